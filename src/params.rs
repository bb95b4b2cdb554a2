//! Path and query parameter extraction.

use serde_json::Value;
use tracing::debug;

use crate::document::OpenApiDocument;
use crate::resolver::{deref_component, ComponentKind};
use crate::types::{ParameterDescriptor, PathPropertyListMap};

/// Split an operation's `parameters` array into path and query parameters.
///
/// Declaration order is kept within each list. Header and cookie parameters
/// are dropped, as are parameters whose `$ref` cannot be resolved or which
/// have no name. A missing or non-array `parameters` value yields two empty
/// lists.
pub fn extract_parameters(
    parameters: Option<&Value>,
    document: &OpenApiDocument,
) -> PathPropertyListMap {
    let mut lists = PathPropertyListMap::default();
    let Some(parameters) = parameters.and_then(Value::as_array) else {
        return lists;
    };

    for parameter in parameters {
        let Some(parameter) = deref_component(ComponentKind::Parameters, parameter, document)
        else {
            continue;
        };
        let Some(name) = parameter.get("name").and_then(Value::as_str) else {
            debug!("skipping parameter without a name");
            continue;
        };

        let descriptor = ParameterDescriptor {
            technical_column_name: name.to_string(),
            is_mandatory: parameter.get("required").and_then(Value::as_bool) == Some(true),
            derived_data_type: parameter
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
        };

        match parameter.get("in").and_then(Value::as_str) {
            Some(location) if location.eq_ignore_ascii_case("path") => {
                lists.path_params.push(descriptor)
            }
            Some(location) if location.eq_ignore_ascii_case("query") => {
                lists.query_params.push(descriptor)
            }
            location => debug!(parameter = name, ?location, "ignoring parameter location"),
        }
    }

    lists
}

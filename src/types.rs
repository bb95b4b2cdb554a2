//! Core types for the action catalog.

use serde::{Deserialize, Serialize};

/// Media type whose body schemas are flattened.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Group name used when an operation declares no tags.
pub const DEFAULT_GROUP_NAME: &str = "DefaultGroup";

/// Which body of an operation a column was flattened from.
///
/// Only changes the prefix of derived paths; traversal is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Request,
    Response,
}

impl Namespace {
    /// Returns the derived-path prefix for this namespace.
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Request => ":request",
            Namespace::Response => ":response",
        }
    }

    /// Recover the namespace from a derived path such as `:response:items`.
    pub fn from_derived_path(path: &str) -> Option<Self> {
        [Namespace::Request, Namespace::Response]
            .into_iter()
            .find(|ns| match path.strip_prefix(ns.prefix()) {
                Some(rest) => rest.is_empty() || rest.starts_with(':'),
                None => false,
            })
    }
}

/// Kind of scenario step an operation becomes, derived from its HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    /// POST operations.
    PostAndVerify,
    /// GET operations.
    FetchAndVerify,
}

impl ActionType {
    /// HTTP method (lowercase, as keyed in an OpenAPI path item).
    pub fn method(&self) -> &'static str {
        match self {
            ActionType::PostAndVerify => "post",
            ActionType::FetchAndVerify => "get",
        }
    }
}

/// A path or query parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub technical_column_name: String,
    pub is_mandatory: bool,
    /// The parameter's description, standing in for a data type.
    pub derived_data_type: Option<String>,
}

/// One leaf field of a request or response body.
///
/// `namespace` is not on the wire; reading a column back recovers it from the
/// prefix of `derivedDataType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ColumnRecord")]
pub struct ColumnDescriptor {
    pub technical_column_name: String,
    pub is_mandatory: bool,
    /// Colon-delimited path of the containing group, e.g. `:request:address`.
    pub derived_data_type: String,
    #[serde(skip_serializing)]
    pub namespace: Namespace,
}

/// Serialized form of a [`ColumnDescriptor`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnRecord {
    technical_column_name: String,
    is_mandatory: bool,
    derived_data_type: String,
}

impl TryFrom<ColumnRecord> for ColumnDescriptor {
    type Error = String;

    fn try_from(record: ColumnRecord) -> Result<Self, Self::Error> {
        let namespace = Namespace::from_derived_path(&record.derived_data_type).ok_or_else(|| {
            format!(
                "derivedDataType '{}' does not start with ':request' or ':response'",
                record.derived_data_type
            )
        })?;
        Ok(Self {
            technical_column_name: record.technical_column_name,
            is_mandatory: record.is_mandatory,
            derived_data_type: record.derived_data_type,
            namespace,
        })
    }
}

impl ColumnDescriptor {
    /// Per-field identifier: the derived path followed by the field name.
    ///
    /// Consumers build grid field ids from it. It is computed on demand and
    /// left out of the serialized catalog, whose column records carry only
    /// `technicalColumnName`, `isMandatory` and `derivedDataType`.
    pub fn attribute_path(&self) -> String {
        format!("{}:{}", self.derived_data_type, self.technical_column_name)
    }
}

/// Path and query parameters of an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPropertyListMap {
    #[serde(rename = "PathParamList")]
    pub path_params: Vec<ParameterDescriptor>,
    #[serde(rename = "QueryParamList")]
    pub query_params: Vec<ParameterDescriptor>,
}

/// One catalog entry: a single OpenAPI operation, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub component_name: String,
    pub action_code_group_name: String,
    pub action_code: String,
    #[serde(rename = "endPoint")]
    pub endpoint: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub path_property_list_map: PathPropertyListMap,
    pub request_body_column_list: Vec<ColumnDescriptor>,
    pub response_body_column_list: Vec<ColumnDescriptor>,
}

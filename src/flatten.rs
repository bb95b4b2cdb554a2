//! Schema flattening - turns nested body schemas into flat column lists.
//!
//! Every leaf property (not an object, not an array) becomes one
//! [`ColumnDescriptor`]. A column's mandatory flag comes from the `required`
//! list of the object that declares the property, and its derived path names
//! the group that contains it rather than the field itself:
//!
//! | Property path      | Derived path (request) |
//! |--------------------|------------------------|
//! | `:id`              | `:request`             |
//! | `:address:city`    | `:request:address`     |
//! | `:a:b:c`           | `:request:a:b`         |

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::OpenApiDocument;
use crate::resolver::resolve_schema_ref;
use crate::schema::{required_names, SchemaNode};
use crate::types::{ColumnDescriptor, Namespace};

/// Flatten a located data schema from the top.
///
/// Uses the schema's own `required` list for its direct properties.
pub fn flatten_schema(
    schema: &Value,
    document: &OpenApiDocument,
    namespace: Namespace,
) -> Vec<ColumnDescriptor> {
    flatten(schema, document, "", &required_names(schema), namespace)
}

/// Flatten `schema` found at `current_path`.
///
/// `required_at_parent` is the `required` list that decides mandatoriness of
/// the properties visited directly by this call.
pub fn flatten(
    schema: &Value,
    document: &OpenApiDocument,
    current_path: &str,
    required_at_parent: &[&str],
    namespace: Namespace,
) -> Vec<ColumnDescriptor> {
    let flattener = Flattener {
        document,
        namespace,
    };
    flattener.walk(schema, current_path, required_at_parent, &[])
}

/// Derived path for a property path: its containing group, prefixed with the
/// namespace.
pub fn derive_path(path: &str, namespace: Namespace) -> String {
    if path.matches(':').count() <= 1 {
        return namespace.prefix().to_string();
    }
    match path.rfind(':') {
        Some(idx) => format!("{}{}", namespace.prefix(), &path[..idx]),
        None => namespace.prefix().to_string(),
    }
}

struct Flattener<'d> {
    document: &'d OpenApiDocument,
    namespace: Namespace,
}

impl<'d> Flattener<'d> {
    /// `expanding` holds the references being expanded on the current branch.
    fn walk<'s>(
        &self,
        schema: &'s Value,
        path: &str,
        required_at_parent: &[&str],
        expanding: &[&'s str],
    ) -> Vec<ColumnDescriptor>
    where
        'd: 's,
    {
        match SchemaNode::classify(schema) {
            SchemaNode::Reference(reference) => {
                let Some((resolved, expanding)) = self.follow(reference, path, expanding) else {
                    return Vec::new();
                };
                self.walk(resolved, path, &required_names(resolved), &expanding)
            }
            SchemaNode::Object { properties, .. } => properties
                .iter()
                .flat_map(|(name, property)| {
                    self.property(name, property, path, required_at_parent, expanding)
                })
                .collect(),
            SchemaNode::Array { items: Some(items) } => {
                self.walk(items, path, &required_names(items), expanding)
            }
            SchemaNode::Array { items: None } | SchemaNode::Leaf => Vec::new(),
        }
    }

    fn property<'s>(
        &self,
        name: &str,
        schema: &'s Value,
        parent_path: &str,
        required_at_parent: &[&str],
        expanding: &[&'s str],
    ) -> Vec<ColumnDescriptor>
    where
        'd: 's,
    {
        let child_path = format!("{}:{}", parent_path, name);
        let is_mandatory = required_at_parent.contains(&name);

        let (schema, expanding) = match SchemaNode::classify(schema) {
            SchemaNode::Reference(reference) => {
                match self.follow(reference, &child_path, expanding) {
                    Some(followed) => followed,
                    None => {
                        warn!(property = name, reference, "skipping property");
                        return Vec::new();
                    }
                }
            }
            _ => (schema, expanding.to_vec()),
        };

        match SchemaNode::classify(schema) {
            SchemaNode::Array { items: Some(items) } => {
                self.walk(items, &child_path, &required_names(items), &expanding)
            }
            SchemaNode::Array { items: None } => {
                debug!(path = %child_path, "array property without items schema");
                Vec::new()
            }
            SchemaNode::Object { .. } | SchemaNode::Reference(_) => {
                self.walk(schema, &child_path, &required_names(schema), &expanding)
            }
            SchemaNode::Leaf => vec![ColumnDescriptor {
                technical_column_name: name.to_string(),
                is_mandatory,
                derived_data_type: derive_path(&child_path, self.namespace),
                namespace: self.namespace,
            }],
        }
    }

    /// Resolve a reference for expansion on the current branch.
    ///
    /// Returns `None` for unknown references and for references already being
    /// expanded further up the branch.
    fn follow<'s>(
        &self,
        reference: &'s str,
        path: &str,
        expanding: &[&'s str],
    ) -> Option<(&'s Value, Vec<&'s str>)>
    where
        'd: 's,
    {
        if expanding.contains(&reference) {
            warn!(reference, path, "recursive reference, not expanding again");
            return None;
        }
        let resolved = resolve_schema_ref(reference, self.document)?;
        let mut next = expanding.to_vec();
        next.push(reference);
        Some((resolved, next))
    }
}

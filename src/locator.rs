//! Locating the data-carrying schema inside a body envelope.
//!
//! Bodies are often wrapped once, e.g. `{ "request": [ {...} ] }` or
//! `{ "data": {...} }`. The locator strips exactly one such layer, judged by
//! shape alone: an array, or an object with a single property. It never
//! unwraps recursively.

use serde_json::Value;
use tracing::debug;

use crate::document::OpenApiDocument;
use crate::resolver::resolve_schema_ref;
use crate::schema::SchemaNode;

/// Find the schema whose properties become the flattened columns.
///
/// Returns `None` only when a reference on the way cannot be resolved.
pub fn locate_data_schema<'a>(
    schema: &'a Value,
    document: &'a OpenApiDocument,
) -> Option<&'a Value> {
    let schema = match SchemaNode::classify(schema) {
        SchemaNode::Reference(reference) => resolve_schema_ref(reference, document)?,
        _ => schema,
    };

    match SchemaNode::classify(schema) {
        SchemaNode::Array { items } => unwrap_items(schema, items, document),
        SchemaNode::Object { properties, .. } if properties.len() == 1 => {
            let (name, inner) = properties.iter().next()?;
            debug!(envelope = %name, "unwrapping single-property envelope");
            match SchemaNode::classify(inner) {
                SchemaNode::Array { items } => unwrap_items(inner, items, document),
                SchemaNode::Reference(reference) => resolve_schema_ref(reference, document),
                SchemaNode::Object { .. } | SchemaNode::Leaf => Some(inner),
            }
        }
        SchemaNode::Object { .. } | SchemaNode::Reference(_) | SchemaNode::Leaf => Some(schema),
    }
}

/// Step into an array's items, following one reference level.
///
/// An array without `items` is kept as the data schema; flattening it yields
/// no columns.
fn unwrap_items<'a>(
    array: &'a Value,
    items: Option<&'a Value>,
    document: &'a OpenApiDocument,
) -> Option<&'a Value> {
    let Some(items) = items else {
        return Some(array);
    };
    match SchemaNode::classify(items) {
        SchemaNode::Reference(reference) => resolve_schema_ref(reference, document),
        _ => Some(items),
    }
}

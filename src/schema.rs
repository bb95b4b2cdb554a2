//! Shape classification for schema nodes.

use serde_json::{Map, Value};

/// The four shapes the flattening engine distinguishes.
///
/// Every JSON value classifies into exactly one of these, so traversal code
/// is a single exhaustive match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    /// A `$ref` pointer, not yet resolved.
    Reference(&'a str),
    /// A schema with a `properties` map, in declaration order.
    Object {
        properties: &'a Map<String, Value>,
        schema: &'a Value,
    },
    /// `type: array` (or anything carrying `items`). `items` may be absent.
    Array { items: Option<&'a Value> },
    /// Everything else: primitives, property-less objects, compositions.
    Leaf,
}

impl<'a> SchemaNode<'a> {
    /// Classify a schema value.
    ///
    /// `$ref` wins over every other keyword; arrays are recognised before
    /// objects.
    pub fn classify(schema: &'a Value) -> Self {
        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return SchemaNode::Reference(reference);
        }

        if has_type(schema, "array") || schema.get("items").is_some() {
            return SchemaNode::Array {
                items: schema.get("items").filter(|items| items.is_object()),
            };
        }

        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            return SchemaNode::Object { properties, schema };
        }

        SchemaNode::Leaf
    }

    /// Number of properties if this is an object node.
    pub fn property_count(&self) -> Option<usize> {
        match self {
            SchemaNode::Object { properties, .. } => Some(properties.len()),
            _ => None,
        }
    }
}

/// Names listed in a schema's `required` array.
pub fn required_names(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Check `type`, accepting both the string form and the OpenAPI 3.1 array form.
fn has_type(schema: &Value, expected: &str) -> bool {
    match schema.get("type") {
        Some(Value::String(t)) => t == expected,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(expected)),
        _ => false,
    }
}

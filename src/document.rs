//! OpenAPI documents and the one-operation-per-file contract.
//!
//! Documents stay as raw JSON; only the pieces the catalog needs are read,
//! and `$ref` pointers are followed lazily through [`crate::resolver`].

use serde_json::Value;

use crate::error::SchemaError;
use crate::types::{ActionType, JSON_MEDIA_TYPE};

/// A parsed OpenAPI document and the place it was loaded from.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    source: String,
    root: Value,
}

impl OpenApiDocument {
    /// Wrap an already-parsed JSON value.
    pub fn new(source: impl Into<String>, root: Value) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidJson` if the text isn't valid JSON.
    pub fn parse(source: impl Into<String>, content: &str) -> Result<Self, SchemaError> {
        let source = source.into();
        let root = serde_json::from_str(content).map_err(|e| SchemaError::InvalidJson {
            source_name: source.clone(),
            source: e,
        })?;
        Ok(Self { source, root })
    }

    /// URL or path the document came from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// A document that satisfies the catalog's structural contract: exactly one
/// path item carrying a POST or GET operation.
#[derive(Debug, Clone)]
pub struct ActionSchema {
    document: OpenApiDocument,
    endpoint: String,
    action_type: ActionType,
}

impl ActionSchema {
    /// Validate a document and pick its operation.
    ///
    /// POST wins over GET when a path item declares both.
    ///
    /// # Errors
    ///
    /// - `SchemaError::NoPaths` if `paths` is missing or empty
    /// - `SchemaError::AmbiguousPaths` if there is more than one path item
    /// - `SchemaError::NoSupportedOperation` if the path item has neither POST nor GET
    pub fn from_document(document: OpenApiDocument) -> Result<Self, SchemaError> {
        let paths = match document.root.get("paths").and_then(Value::as_object) {
            Some(paths) if !paths.is_empty() => paths,
            _ => {
                return Err(SchemaError::NoPaths {
                    source_name: document.source.clone(),
                })
            }
        };

        if paths.len() != 1 {
            return Err(SchemaError::AmbiguousPaths {
                source_name: document.source.clone(),
                count: paths.len(),
            });
        }

        let Some((endpoint, path_item)) = paths.iter().next() else {
            return Err(SchemaError::NoPaths {
                source_name: document.source.clone(),
            });
        };

        let action_type = [ActionType::PostAndVerify, ActionType::FetchAndVerify]
            .into_iter()
            .find(|t| path_item.get(t.method()).is_some_and(Value::is_object))
            .ok_or_else(|| SchemaError::NoSupportedOperation {
                source_name: document.source.clone(),
                path: endpoint.clone(),
            })?;

        let endpoint = endpoint.clone();
        Ok(Self {
            document,
            endpoint,
            action_type,
        })
    }

    pub fn document(&self) -> &OpenApiDocument {
        &self.document
    }

    /// The single path key, e.g. `/demand-codes/{id}`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// The selected operation object.
    pub fn operation(&self) -> &Value {
        &self.document.root["paths"][self.endpoint.as_str()][self.action_type.method()]
    }

    /// First declared tag, if any.
    pub fn first_tag(&self) -> Option<&str> {
        self.operation()
            .get("tags")
            .and_then(Value::as_array)
            .and_then(|tags| tags.first())
            .and_then(Value::as_str)
    }
}

/// Schema of the `application/json` entry in a request body or response
/// object's `content` map.
pub fn json_content_schema(body: &Value) -> Option<&Value> {
    body.get("content")?.get(JSON_MEDIA_TYPE)?.get("schema")
}

//! The manifest listing which OpenAPI documents make up the catalog.
//!
//! ```json
//! {
//!   "components": {
//!     "Demand": {
//!       "apiSchemas": { "CreateDemandCode": "docs/create-demandCode.json" }
//!     }
//!   }
//! }
//! ```
//!
//! Order is taken from the document, so catalogs list actions the way the
//! manifest does.

use serde_json::Value;

use crate::error::CatalogError;

/// Parsed manifest: components in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub components: Vec<ComponentDetail>,
}

/// One component and its action-code → schema-location entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDetail {
    pub name: String,
    pub api_schemas: Vec<SchemaEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub action_code: String,
    /// Path or URL, resolved against the base URL.
    pub schema_path: String,
}

/// A (component, action code, schema location) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry<'a> {
    pub component_name: &'a str,
    pub action_code: &'a str,
    pub schema_path: &'a str,
}

impl Manifest {
    /// Parse a manifest from its JSON value.
    ///
    /// Unknown fields are ignored. `url` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidManifest` if `components` is missing or
    /// any component or schema entry has the wrong shape. A component with no
    /// `apiSchemas` is accepted and contributes no entries.
    pub fn from_value(value: &Value, url: &str) -> Result<Self, CatalogError> {
        let invalid = |message: String| CatalogError::InvalidManifest {
            url: url.to_string(),
            message,
        };

        let components = value
            .get("components")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("missing components object".to_string()))?;

        let mut parsed = Vec::with_capacity(components.len());
        for (name, detail) in components {
            let detail = detail
                .as_object()
                .ok_or_else(|| invalid(format!("component '{}' must be an object", name)))?;

            // A component without apiSchemas lists no actions.
            let schemas = match detail.get("apiSchemas") {
                None | Some(Value::Null) => None,
                Some(Value::Object(schemas)) => Some(schemas),
                Some(_) => {
                    return Err(invalid(format!(
                        "apiSchemas of component '{}' must be an object",
                        name
                    )))
                }
            };

            let api_schemas = schemas
                .into_iter()
                .flatten()
                .map(|(action_code, location)| {
                    location
                        .as_str()
                        .map(|schema_path| SchemaEntry {
                            action_code: action_code.clone(),
                            schema_path: schema_path.to_string(),
                        })
                        .ok_or_else(|| {
                            invalid(format!(
                                "schema location for '{}.{}' must be a string",
                                name, action_code
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            parsed.push(ComponentDetail {
                name: name.clone(),
                api_schemas,
            });
        }

        Ok(Self { components: parsed })
    }

    /// All entries, component by component, in manifest order.
    pub fn entries(&self) -> impl Iterator<Item = ManifestEntry<'_>> {
        self.components.iter().flat_map(|component| {
            component.api_schemas.iter().map(move |entry| ManifestEntry {
                component_name: &component.name,
                action_code: &entry.action_code,
                schema_path: &entry.schema_path,
            })
        })
    }

    /// Total number of action entries.
    pub fn len(&self) -> usize {
        self.components.iter().map(|c| c.api_schemas.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

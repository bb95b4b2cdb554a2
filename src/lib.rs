//! Action Catalog Builder
//!
//! Turns a manifest of OpenAPI documents into a flat catalog of actions, one
//! per API operation, with every leaf field of the JSON request and response
//! bodies listed as a column.
//!
//! # Example
//!
//! ```
//! use actioncode_catalog::{describe_action, load_document_str};
//!
//! let document = r##"{
//!     "paths": {
//!         "/customers": {
//!             "post": {
//!                 "tags": ["Customers"],
//!                 "requestBody": {
//!                     "content": {
//!                         "application/json": {
//!                             "schema": {
//!                                 "type": "object",
//!                                 "properties": {
//!                                     "data": { "$ref": "#/components/schemas/Customer" }
//!                                 }
//!                             }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     },
//!     "components": {
//!         "schemas": {
//!             "Customer": {
//!                 "type": "object",
//!                 "required": ["name"],
//!                 "properties": {
//!                     "name": { "type": "string" },
//!                     "address": {
//!                         "type": "object",
//!                         "required": ["city"],
//!                         "properties": {
//!                             "city": { "type": "string" },
//!                             "zip": { "type": "string" }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! }"##;
//!
//! let schema = load_document_str("customers.json", document).unwrap();
//! let action = describe_action("Crm", "CreateCustomer", &schema);
//!
//! let columns: Vec<_> = action
//!     .request_body_column_list
//!     .iter()
//!     .map(|c| (c.technical_column_name.as_str(), c.is_mandatory, c.derived_data_type.as_str()))
//!     .collect();
//!
//! // The `data` envelope is unwrapped; nested fields are grouped by container.
//! assert_eq!(
//!     columns,
//!     [
//!         ("name", true, ":request"),
//!         ("city", true, ":request:address"),
//!         ("zip", false, ":request:address"),
//!     ]
//! );
//! ```
//!
//! # Flattening Rules
//!
//! | Schema shape | Effect |
//! |--------------|--------|
//! | `$ref` | Resolved against `#/components/schemas`, walked with its own `required` |
//! | object | Each property visited in declaration order |
//! | array | Items walked at the same path, with the items' `required` |
//! | anything else | One column, mandatory if the enclosing object requires it |

mod catalog;
mod config;
mod document;
mod error;
mod flatten;
mod loader;
mod locator;
mod manifest;
mod params;
mod resolver;
mod schema;
mod types;

pub use catalog::{
    build_action, build_catalog, build_catalog_report, describe_action, request_columns,
    response_columns, try_build_catalog, CatalogReport, SkippedAction, SUCCESS_RESPONSE_KEYS,
};
pub use config::{CatalogConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use document::{json_content_schema, ActionSchema, OpenApiDocument};
pub use error::{CatalogError, FetchError, SchemaError};
pub use flatten::{derive_path, flatten, flatten_schema};
pub use loader::{
    load_action_schema, load_document_file, load_document_str, load_manifest, resolve_url,
    Fetcher, SourceFetcher,
};
pub use locator::locate_data_schema;
pub use manifest::{ComponentDetail, Manifest, ManifestEntry, SchemaEntry};
pub use params::extract_parameters;
pub use resolver::{deref_component, resolve_component_ref, resolve_schema_ref, ComponentKind};
pub use schema::{required_names, SchemaNode};
pub use types::{
    ActionDescriptor, ActionType, ColumnDescriptor, Namespace, ParameterDescriptor,
    PathPropertyListMap, DEFAULT_GROUP_NAME, JSON_MEDIA_TYPE,
};

//! Catalog assembly from a manifest of OpenAPI documents.
//!
//! Building is sequential: fetch the manifest, then for each
//! (component, action code, schema location) entry fetch its document and
//! turn it into an [`ActionDescriptor`]. Each entry is processed by
//! [`build_action`], which returns `Result`; [`build_catalog_report`] then
//! keeps the successes and records the skips. A failing entry never affects
//! the ones after it. Only the manifest itself can fail the whole run.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::document::{json_content_schema, ActionSchema};
use crate::error::{CatalogError, SchemaError};
use crate::flatten::flatten_schema;
use crate::loader::{load_action_schema, load_manifest, Fetcher, SourceFetcher};
use crate::locator::locate_data_schema;
use crate::manifest::ManifestEntry;
use crate::params::extract_parameters;
use crate::resolver::{deref_component, ComponentKind};
use crate::types::{ActionDescriptor, ColumnDescriptor, Namespace, DEFAULT_GROUP_NAME};

/// Response codes whose body describes the action's result, in priority order.
pub const SUCCESS_RESPONSE_KEYS: &[&str] = &["200", "201", "default"];

/// Result of a catalog build, including what was left out.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogReport {
    pub actions: Vec<ActionDescriptor>,
    pub skipped: Vec<SkippedAction>,
}

/// A manifest entry that produced no descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedAction {
    pub component_name: String,
    pub action_code: String,
    pub reason: String,
}

/// Build the catalog described by `config`.
///
/// Never fails: a manifest that cannot be loaded yields an empty list, and
/// individual actions that cannot be processed are logged and left out.
pub fn build_catalog(config: &CatalogConfig) -> Vec<ActionDescriptor> {
    match try_build_catalog(config) {
        Ok(report) => report.actions,
        Err(e) => {
            warn!(error = %e, "catalog build aborted, returning empty catalog");
            Vec::new()
        }
    }
}

/// Build the catalog, surfacing run-fatal errors instead of swallowing them.
///
/// # Errors
///
/// Returns `CatalogError` if the HTTP client cannot be built or the manifest
/// cannot be loaded.
pub fn try_build_catalog(config: &CatalogConfig) -> Result<CatalogReport, CatalogError> {
    let fetcher = SourceFetcher::new(config)?;
    build_catalog_report(&fetcher, &config.base_url, &config.manifest_path)
}

/// Build the catalog with an explicit fetcher.
///
/// # Errors
///
/// Returns `CatalogError` if the manifest cannot be loaded. Per-action
/// failures are reported in [`CatalogReport::skipped`].
pub fn build_catalog_report(
    fetcher: &impl Fetcher,
    base_url: &str,
    manifest_path: &str,
) -> Result<CatalogReport, CatalogError> {
    let manifest = load_manifest(fetcher, base_url, manifest_path).map_err(|e| {
        warn!(base_url, manifest_path, error = %e, "failed to load manifest");
        e
    })?;
    info!(actions = manifest.len(), "manifest loaded");

    let mut report = CatalogReport::default();
    for entry in manifest.entries() {
        match build_action(fetcher, base_url, entry) {
            Ok(action) => report.actions.push(action),
            Err(e) => {
                warn!(
                    component = entry.component_name,
                    action_code = entry.action_code,
                    schema_path = entry.schema_path,
                    error = %e,
                    "skipping action"
                );
                report.skipped.push(SkippedAction {
                    component_name: entry.component_name.to_string(),
                    action_code: entry.action_code.to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        built = report.actions.len(),
        skipped = report.skipped.len(),
        "catalog built"
    );
    Ok(report)
}

/// Fetch and describe a single manifest entry.
///
/// # Errors
///
/// Returns `SchemaError` if the entry's document cannot be loaded or does not
/// meet the one-path, POST-or-GET contract.
pub fn build_action(
    fetcher: &impl Fetcher,
    base_url: &str,
    entry: ManifestEntry<'_>,
) -> Result<ActionDescriptor, SchemaError> {
    let schema = load_action_schema(fetcher, base_url, entry.schema_path)?;
    Ok(describe_action(entry.component_name, entry.action_code, &schema))
}

/// Describe a validated action schema.
pub fn describe_action(
    component_name: &str,
    action_code: &str,
    schema: &ActionSchema,
) -> ActionDescriptor {
    let operation = schema.operation();
    let document = schema.document();

    ActionDescriptor {
        component_name: component_name.to_string(),
        action_code_group_name: schema.first_tag().unwrap_or(DEFAULT_GROUP_NAME).to_string(),
        action_code: action_code.to_string(),
        endpoint: schema.endpoint().to_string(),
        action_type: schema.action_type(),
        path_property_list_map: extract_parameters(operation.get("parameters"), document),
        request_body_column_list: request_columns(schema),
        response_body_column_list: response_columns(schema),
    }
}

/// Flatten the JSON request body, if the operation has one.
pub fn request_columns(schema: &ActionSchema) -> Vec<ColumnDescriptor> {
    let document = schema.document();
    let Some(body) = schema
        .operation()
        .get("requestBody")
        .and_then(|body| deref_component(ComponentKind::RequestBodies, body, document))
    else {
        return Vec::new();
    };
    match json_content_schema(body) {
        Some(body_schema) => flatten_body(body_schema, schema, Namespace::Request),
        None => {
            debug!(endpoint = schema.endpoint(), "request body has no JSON content");
            Vec::new()
        }
    }
}

/// Flatten the JSON body of the first success response.
///
/// Only the first of `200`, `201`, `default` that is declared is considered;
/// if it has no JSON content the action gets no response columns.
pub fn response_columns(schema: &ActionSchema) -> Vec<ColumnDescriptor> {
    let document = schema.document();
    let Some(responses) = schema.operation().get("responses") else {
        return Vec::new();
    };

    let response = SUCCESS_RESPONSE_KEYS
        .iter()
        .find_map(|code| responses.get(*code))
        .and_then(|response| deref_component(ComponentKind::Responses, response, document));

    match response.and_then(json_content_schema) {
        Some(body_schema) => flatten_body(body_schema, schema, Namespace::Response),
        None => {
            debug!(
                endpoint = schema.endpoint(),
                "no '200', '201', or 'default' JSON response schema"
            );
            Vec::new()
        }
    }
}

fn flatten_body(body_schema: &Value, schema: &ActionSchema, namespace: Namespace) -> Vec<ColumnDescriptor> {
    let document = schema.document();
    match locate_data_schema(body_schema, document) {
        Some(data_schema) => flatten_schema(data_schema, document, namespace),
        None => {
            warn!(
                endpoint = schema.endpoint(),
                namespace = namespace.prefix(),
                document = document.source(),
                "could not determine root data schema"
            );
            Vec::new()
        }
    }
}

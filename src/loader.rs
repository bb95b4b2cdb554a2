//! Manifest and OpenAPI document loading.
//!
//! Locations are resolved against the configured base URL with standard
//! URI reference resolution, then fetched over HTTP(S) or read from
//! `file://` URLs.

use std::path::Path;

use serde_json::Value;
use tracing::info;
use url::Url;

use crate::config::CatalogConfig;
use crate::document::{ActionSchema, OpenApiDocument};
use crate::error::{CatalogError, FetchError, SchemaError};
use crate::manifest::Manifest;

/// Source of document bodies.
///
/// One blocking call per document; implementations must not cache across
/// calls.
pub trait Fetcher {
    /// Fetch the body at `url` as text.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if the source is unreachable, answers with a
    /// non-success status, or cannot be read.
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Default fetcher: HTTP(S) through a blocking client (feature `remote`)
/// and local files for `file://` URLs.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    #[cfg(feature = "remote")]
    client: reqwest::blocking::Client,
}

impl SourceFetcher {
    /// Build a fetcher with the config's connect and request timeouts.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the HTTP client cannot be constructed.
    #[cfg_attr(not(feature = "remote"), allow(unused_variables))]
    pub fn new(config: &CatalogConfig) -> Result<Self, FetchError> {
        #[cfg(feature = "remote")]
        {
            let client = reqwest::blocking::Client::builder()
                .connect_timeout(config.connect_timeout)
                .timeout(config.request_timeout)
                .build()
                .map_err(|e| FetchError::Client {
                    message: e.to_string(),
                })?;
            Ok(Self { client })
        }
        #[cfg(not(feature = "remote"))]
        {
            Ok(Self {})
        }
    }

    #[cfg(feature = "remote")]
    fn fetch_http(&self, url: &Url) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url.as_str()).send().map_err(network)?;

        // Check for HTTP errors before reading the body
        let response = response.error_for_status().map_err(network)?;

        response.text().map_err(network)
    }
}

impl Fetcher for SourceFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        match url.scheme() {
            "file" => read_file_url(url),
            #[cfg(feature = "remote")]
            "http" | "https" => self.fetch_http(url),
            scheme => Err(FetchError::UnsupportedScheme {
                url: url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }
}

fn read_file_url(url: &Url) -> Result<String, FetchError> {
    let path = url.to_file_path().map_err(|()| FetchError::UnsupportedScheme {
        url: url.to_string(),
        scheme: url.scheme().to_string(),
    })?;
    std::fs::read_to_string(&path).map_err(|source| FetchError::Read { path, source })
}

/// Resolve `reference` against `base` as a URI reference.
///
/// Absolute references replace the base entirely.
///
/// # Errors
///
/// Returns `url::ParseError` if either part is malformed.
pub fn resolve_url(base: &str, reference: &str) -> Result<Url, url::ParseError> {
    Url::parse(base)?.join(reference)
}

/// Fetch and parse the manifest.
///
/// # Errors
///
/// Every failure is fatal for the catalog build: a malformed URL, a failed
/// fetch, invalid JSON, or a manifest without the expected shape.
pub fn load_manifest(
    fetcher: &impl Fetcher,
    base_url: &str,
    manifest_path: &str,
) -> Result<Manifest, CatalogError> {
    let url = resolve_url(base_url, manifest_path).map_err(|source| CatalogError::InvalidUrl {
        url: format!("{}{}", base_url, manifest_path),
        source,
    })?;

    info!(url = %url, "fetching manifest");
    let body = fetcher.fetch(&url)?;

    let value: Value = serde_json::from_str(&body).map_err(|source| CatalogError::InvalidJson {
        url: url.to_string(),
        source,
    })?;

    Manifest::from_value(&value, url.as_str())
}

/// Fetch one action's OpenAPI document and check its structure.
///
/// # Errors
///
/// Returns `SchemaError` for a malformed URL, a failed fetch, invalid JSON,
/// or a document that does not have exactly one path item with a POST or
/// GET operation.
pub fn load_action_schema(
    fetcher: &impl Fetcher,
    base_url: &str,
    schema_path: &str,
) -> Result<ActionSchema, SchemaError> {
    let url = resolve_url(base_url, schema_path).map_err(|source| SchemaError::InvalidUrl {
        url: schema_path.to_string(),
        source,
    })?;

    info!(url = %url, "fetching action schema");
    let body = fetcher.fetch(&url)?;
    load_document_str(url.as_str(), &body)
}

/// Load an OpenAPI document from a local file.
///
/// # Errors
///
/// Same as [`load_document_str`], plus `SchemaError::Fetch` if the file
/// cannot be read.
pub fn load_document_file(path: &Path) -> Result<ActionSchema, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| FetchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_document_str(path.display().to_string(), &content)
}

/// Parse an OpenAPI document from JSON text and check its structure.
///
/// # Errors
///
/// Returns `SchemaError::InvalidJson`, `NoPaths`, `AmbiguousPaths` or
/// `NoSupportedOperation`.
pub fn load_document_str(
    source: impl Into<String>,
    content: &str,
) -> Result<ActionSchema, SchemaError> {
    let document = OpenApiDocument::parse(source, content)?;
    ActionSchema::from_document(document)
}

//! Error types for catalog building.
//!
//! Errors are split by blast radius: [`CatalogError`] ends the whole run,
//! [`SchemaError`] skips a single action, and [`FetchError`] is the transport
//! failure both of them wrap.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve a document from its source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("failed to build HTTP client: {message}")]
    Client { message: String },
}

/// Errors that abort a catalog build before any action is processed.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid manifest JSON from {url}: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid manifest from {url}: {message}")]
    InvalidManifest { url: String, message: String },
}

impl CatalogError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            CatalogError::Fetch(e) => e.exit_code(),
            _ => 2,
        }
    }
}

impl FetchError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FetchError::UnsupportedScheme { .. } => 2,
            _ => 3,
        }
    }
}

/// Reasons a single action's OpenAPI document cannot be used.
///
/// None of these stop the catalog build; the action is logged and skipped.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid OpenAPI JSON from {source_name}: {source}")]
    InvalidJson {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no paths found in OpenAPI document {source_name}")]
    NoPaths { source_name: String },

    #[error("expected exactly one path in OpenAPI document {source_name}, found {count}")]
    AmbiguousPaths { source_name: String, count: usize },

    #[error("no POST or GET operation for path {path} in {source_name}")]
    NoSupportedOperation { source_name: String, path: String },
}

impl SchemaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchemaError::Fetch(e) => e.exit_code(),
            _ => 2,
        }
    }
}

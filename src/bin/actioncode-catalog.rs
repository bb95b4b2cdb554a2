//! Action Catalog CLI
//!
//! Command-line interface for building action catalogs and inspecting single
//! OpenAPI documents.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use actioncode_catalog::{
    load_document_file, request_columns, response_columns, try_build_catalog, ActionType,
    CatalogConfig, ColumnDescriptor,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "actioncode-catalog")]
#[command(about = "Build flattened action catalogs from OpenAPI manifests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the manifest and every listed OpenAPI document, print the catalog
    Build {
        /// Base URL that manifest and schema locations are resolved against
        #[arg(long, env = "CATALOG_BASE_URL")]
        base_url: String,

        /// Manifest location, relative to the base URL
        #[arg(long, env = "CATALOG_MANIFEST_PATH", default_value = "apiList.json")]
        manifest_path: String,

        /// TCP connect timeout in seconds
        #[arg(long, env = "CATALOG_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
        connect_timeout_secs: u64,

        /// Overall request timeout in seconds
        #[arg(long, env = "CATALOG_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
        request_timeout_secs: u64,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// List skipped actions and their reasons on stderr
        #[arg(long)]
        report: bool,
    },

    /// Flatten the bodies of a single local OpenAPI document
    Inspect {
        /// OpenAPI document (JSON)
        document: PathBuf,

        /// Only the request body
        #[arg(long, conflicts_with = "response")]
        request: bool,

        /// Only the response body
        #[arg(long, conflicts_with = "request")]
        response: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the JSON output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build {
            base_url,
            manifest_path,
            connect_timeout_secs,
            request_timeout_secs,
            output,
            pretty,
            report,
        } => {
            let config = CatalogConfig::new(base_url, manifest_path)
                .connect_timeout(Duration::from_secs(connect_timeout_secs))
                .request_timeout(Duration::from_secs(request_timeout_secs));
            run_build(&config, output.as_deref(), pretty, report)
        }

        Commands::Inspect {
            document,
            request,
            response,
            pretty,
        } => run_inspect(&document, request, response, pretty),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_build(
    config: &CatalogConfig,
    output: Option<&Path>,
    pretty: bool,
    report: bool,
) -> Result<(), u8> {
    let catalog = try_build_catalog(config).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if report {
        for skipped in &catalog.skipped {
            eprintln!(
                "skipped {}/{}: {}",
                skipped.component_name, skipped.action_code, skipped.reason
            );
        }
        eprintln!(
            "{} action(s) built, {} skipped",
            catalog.actions.len(),
            catalog.skipped.len()
        );
    }

    write_json(&catalog.actions, output, pretty)
}

/// Columns of one document, keyed by side.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectOutput {
    endpoint: String,
    #[serde(rename = "type")]
    action_type: ActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_body_column_list: Option<Vec<ColumnDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_body_column_list: Option<Vec<ColumnDescriptor>>,
}

fn run_inspect(document: &Path, request: bool, response: bool, pretty: bool) -> Result<(), u8> {
    let schema = load_document_file(document).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    // Neither flag means both sides.
    let want_request = request || !response;
    let want_response = response || !request;

    let output = InspectOutput {
        endpoint: schema.endpoint().to_string(),
        action_type: schema.action_type(),
        request_body_column_list: want_request.then(|| request_columns(&schema)),
        response_body_column_list: want_response.then(|| response_columns(&schema)),
    };

    write_json(&output, None, pretty)
}

fn write_json(value: &impl Serialize, output: Option<&Path>, pretty: bool) -> Result<(), u8> {
    let json_output = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

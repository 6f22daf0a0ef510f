//! CLI commands and argument parsing

use crate::types::JsonValue;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HAL API client CLI
#[derive(Parser, Debug)]
#[command(name = "hal-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parameters shared by every resource command
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ResourceArgs {
    /// Resource name (mapped to a URI through the config)
    pub resource: String,

    /// URI parameter, `key=value` (repeatable)
    #[arg(long = "uri", value_parser = parse_key_value)]
    pub uri: Vec<(String, JsonValue)>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one resource
    Get {
        #[command(flatten)]
        target: ResourceArgs,

        /// Resource id
        id: String,

        /// Query parameter, `key=value` (repeatable)
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, JsonValue)>,
    },

    /// Fetch one page of a collection
    List {
        #[command(flatten)]
        target: ResourceArgs,

        /// Page number
        #[arg(long, default_value = "1")]
        page: u64,

        /// Page size
        #[arg(long, default_value = "10")]
        limit: u64,

        /// Query parameter, `key=value` (repeatable)
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, JsonValue)>,
    },

    /// Fetch every record of a collection
    All {
        #[command(flatten)]
        target: ResourceArgs,

        /// Query parameter, `key=value` (repeatable)
        #[arg(long = "query", value_parser = parse_key_value)]
        query: Vec<(String, JsonValue)>,

        /// Fetch remaining pages with this many requests in flight
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Create a resource
    Create {
        #[command(flatten)]
        target: ResourceArgs,

        /// Body as inline JSON, or `@path` to read it from a file
        #[arg(long, default_value = "{}")]
        data: String,

        /// File to upload, `field=path` (repeatable)
        #[arg(long = "file", value_parser = parse_file)]
        files: Vec<(String, PathBuf)>,
    },

    /// Update a resource
    Update {
        #[command(flatten)]
        target: ResourceArgs,

        /// Resource id
        id: String,

        /// Body as inline JSON, or `@path` to read it from a file
        #[arg(long, default_value = "{}")]
        data: String,

        /// File to upload, `field=path` (repeatable)
        #[arg(long = "file", value_parser = parse_file)]
        files: Vec<(String, PathBuf)>,
    },

    /// Delete a resource
    Delete {
        #[command(flatten)]
        target: ResourceArgs,

        /// Resource id
        id: String,
    },

    /// Submit a checkout step for a cart
    Checkout {
        #[command(flatten)]
        target: ResourceArgs,

        /// Cart id
        cart_id: String,

        /// Body as inline JSON, or `@path` to read it from a file
        #[arg(long, default_value = "{}")]
        data: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}

/// Parse `key=value`. The value is read as JSON when it parses (`2`,
/// `true`, `"x"`), otherwise kept as a string.
pub fn parse_key_value(raw: &str) -> Result<(String, JsonValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn parse_file(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((field, path)) if !field.is_empty() && !path.is_empty() => {
            Ok((field.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected field=path, got '{raw}'")),
    }
}

//! CLI module
//!
//! Command-line interface over the resource façades.
//!
//! # Commands
//!
//! - `get` - Fetch one resource
//! - `list` - Fetch one page of a collection
//! - `all` - Fetch every record of a collection
//! - `create` / `update` / `delete` - Write a resource
//! - `checkout` - Submit a checkout step

mod commands;
mod runner;

pub use commands::{parse_key_value, Cli, Commands, OutputFormat, ResourceArgs};
pub use runner::Runner;

//! CLI module for the vendor portal
//!
//! Provides command-line interface for:
//! - start: serve JSON-line portal requests on stdin/stdout
//! - view: one-shot vendor listing
//! - schema: one-shot form description
//! - check-config: configuration validation

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, schema, serve, start, view};
pub use config::{Config, StoreConfig};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_json, write_text, write_value};

//! CLI argument definitions using clap
//!
//! Commands:
//! - vendor-portal start --config <path>
//! - vendor-portal view --config <path> [--plain]
//! - vendor-portal schema --config <path>
//! - vendor-portal check-config --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vendor onboarding portal over a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "vendor-portal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve JSON-line requests from stdin until EOF
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./vendor-portal.json")]
        config: PathBuf,
    },

    /// Print all vendors and exit
    View {
        /// Path to configuration file
        #[arg(long, default_value = "./vendor-portal.json")]
        config: PathBuf,

        /// Print a text table instead of JSON
        #[arg(long)]
        plain: bool,
    },

    /// Print the form's widget descriptors and exit
    Schema {
        /// Path to configuration file
        #[arg(long, default_value = "./vendor-portal.json")]
        config: PathBuf,
    },

    /// Validate the configuration and print the resolved settings
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./vendor-portal.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terraform provider for WorkOS organizations.
#[derive(Parser, Debug)]
#[command(name = "terraform-provider-workos")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the provider configuration file.
    #[arg(short, long, global = true, env = "WORKOS_PROVIDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the provider over line-delimited JSON on stdin/stdout.
    Serve,

    /// Print the provider, resource and data source schemas.
    Schema,

    /// Validate the provider configuration.
    Validate,

    /// List organizations through the `workos_organizations` data source.
    Organizations,

    /// Show one organization as the `workos_organization` resource sees it.
    Show {
        /// Organization identifier.
        id: String,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! CLI module for the WorkOS provider.
//!
//! This module provides the command-line interface used to serve the
//! provider and to inspect organizations outside of a Terraform run.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;

//! Configuration module for the WorkOS provider.
//!
//! This module handles all configuration-related functionality:
//! - The provider configuration block and its environment fallbacks
//! - Resolution into connection settings, with attribute diagnostics
//! - Loading `workos.provider.yaml` and `.env` for the command line

mod parser;
mod resolver;
mod spec;

pub use parser::{ConfigParser, DEFAULT_CONFIG_FILES, find_config_file};
pub use resolver::ConfigResolver;
pub use spec::{ENV_API_HOST, ENV_API_KEY, ProviderFileConfig, ProviderModel, ResolvedConfig};

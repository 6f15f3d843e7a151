//! Configuration specification types for the provider.
//!
//! This module defines the provider configuration as the host hands it over,
//! the YAML file shape used by the command-line harness, and the resolved
//! connection settings used to build the API client.

use serde::{Deserialize, Serialize};

use crate::framework::Value;

/// Environment variable holding the WorkOS API key.
pub const ENV_API_KEY: &str = "WORKOS_API_KEY";

/// Environment variable holding the WorkOS API host.
pub const ENV_API_HOST: &str = "WORKOS_API_HOST";

/// Provider configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderModel {
    /// API endpoint override.
    pub host: Value<String>,
    /// Secret API key.
    pub api_key: Value<String>,
}

/// Provider configuration file (`workos.provider.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderFileConfig {
    /// API endpoint override.
    #[serde(default)]
    pub host: Option<String>,
    /// Secret API key.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Connection settings after merging configuration and environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API endpoint override, `None` for the public WorkOS endpoint.
    pub host: Option<String>,
    /// Secret API key.
    pub api_key: String,
}

impl From<ProviderFileConfig> for ProviderModel {
    fn from(file: ProviderFileConfig) -> Self {
        Self {
            host: file.host.map_or(Value::Null, Value::known),
            api_key: file.api_key.map_or(Value::Null, Value::known),
        }
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

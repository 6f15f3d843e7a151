//! Resolution of provider configuration against the environment.
//!
//! Configuration values win over environment variables. Unknown values and
//! a missing API key are reported as attribute-scoped diagnostics.

use reqwest::Url;
use tracing::debug;

use crate::framework::{Diagnostics, Value};

use super::spec::{ENV_API_HOST, ENV_API_KEY, ProviderModel, ResolvedConfig};

/// Resolves provider configuration.
#[derive(Debug, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves the configuration using the process environment.
    ///
    /// # Errors
    ///
    /// Returns diagnostics if a value is unknown, the API key is missing, or
    /// the host is not a valid URL.
    pub fn resolve(&self, config: &ProviderModel) -> Result<ResolvedConfig, Diagnostics> {
        self.resolve_with_env(config, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration using the given environment lookup.
    ///
    /// # Errors
    ///
    /// Returns diagnostics if a value is unknown, the API key is missing, or
    /// the host is not a valid URL.
    pub fn resolve_with_env<F>(
        &self,
        config: &ProviderModel,
        env: F,
    ) -> Result<ResolvedConfig, Diagnostics>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut diagnostics = Diagnostics::new();

        if config.api_key.is_unknown() {
            diagnostics.add_attribute_error(
                "api_key",
                "Unknown WorkOS API Key",
                format!(
                    "The provider cannot create the WorkOS API client as there is an unknown configuration value for the WorkOS API key. \
                     Either target apply the source of the value first, set the value statically in the configuration, or use the {ENV_API_KEY} environment variable."
                ),
            );
        }

        if config.host.is_unknown() {
            diagnostics.add_attribute_error(
                "host",
                "Unknown WorkOS API Host",
                format!(
                    "The provider cannot create the WorkOS API client as there is an unknown configuration value for the WorkOS API host. \
                     Either target apply the source of the value first, set the value statically in the configuration, or use the {ENV_API_HOST} environment variable."
                ),
            );
        }

        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        let api_key = Self::pick(&config.api_key, || env(ENV_API_KEY));
        let host = Self::pick(&config.host, || env(ENV_API_HOST));

        if api_key.is_empty() {
            diagnostics.add_attribute_error(
                "api_key",
                "Missing WorkOS API Secret Key",
                format!(
                    "The provider cannot create the WorkOS API client as there is a missing or empty value for the WorkOS API key. \
                     Set the api_key value in the configuration or use the {ENV_API_KEY} environment variable. \
                     If either is already set, ensure the value is not empty."
                ),
            );
        }

        if !host.is_empty() {
            if let Err(e) = Url::parse(&host) {
                diagnostics.add_attribute_error(
                    "host",
                    "Invalid WorkOS API Host",
                    format!("The WorkOS API host '{host}' is not a valid URL: {e}"),
                );
            }
        }

        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        debug!(
            "Resolved WorkOS configuration (custom host: {})",
            !host.is_empty()
        );

        Ok(ResolvedConfig {
            host: (!host.is_empty()).then_some(host),
            api_key,
        })
    }

    /// Configuration value if set, environment otherwise.
    fn pick(value: &Value<String>, fallback: impl FnOnce() -> Option<String>) -> String {
        match value {
            Value::Known(v) => v.clone(),
            Value::Null | Value::Unknown => fallback().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_unknown_values_reported_together() {
        let config = ProviderModel {
            host: Value::Unknown,
            api_key: Value::Unknown,
        };
        let diagnostics = ConfigResolver::new()
            .resolve_with_env(&config, env(&[(ENV_API_KEY, "sk_env")]))
            .unwrap_err();

        let attributes: Vec<_> = diagnostics.iter().map(|d| d.attribute.clone()).collect();
        assert_eq!(
            attributes,
            vec![Some(String::from("api_key")), Some(String::from("host"))]
        );
        assert_eq!(diagnostics.errors()[0].summary, "Unknown WorkOS API Key");
    }

    #[test]
    fn test_environment_fallback() {
        let resolved = ConfigResolver::new()
            .resolve_with_env(
                &ProviderModel::default(),
                env(&[(ENV_API_KEY, "sk_env"), (ENV_API_HOST, "https://workos.test")]),
            )
            .unwrap();
        assert_eq!(resolved.api_key, "sk_env");
        assert_eq!(resolved.host.as_deref(), Some("https://workos.test"));
    }

    #[test]
    fn test_config_overrides_environment() {
        let config = ProviderModel {
            host: Value::Null,
            api_key: Value::known(String::from("sk_config")),
        };
        let resolved = ConfigResolver::new()
            .resolve_with_env(&config, env(&[(ENV_API_KEY, "sk_env")]))
            .unwrap();
        assert_eq!(resolved.api_key, "sk_config");
        assert!(resolved.host.is_none());
    }

    #[test]
    fn test_missing_api_key() {
        let diagnostics = ConfigResolver::new()
            .resolve_with_env(&ProviderModel::default(), env(&[]))
            .unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics.errors()[0];
        assert_eq!(diagnostic.summary, "Missing WorkOS API Secret Key");
        assert_eq!(diagnostic.attribute.as_deref(), Some("api_key"));
    }

    #[test]
    fn test_empty_configured_key_is_missing() {
        let config = ProviderModel {
            host: Value::Null,
            api_key: Value::known(String::new()),
        };
        let result = ConfigResolver::new().resolve_with_env(&config, env(&[(ENV_API_KEY, "sk_env")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_host() {
        let config = ProviderModel {
            host: Value::known(String::from("not a url")),
            api_key: Value::known(String::from("sk_config")),
        };
        let diagnostics = ConfigResolver::new()
            .resolve_with_env(&config, env(&[]))
            .unwrap_err();
        assert_eq!(diagnostics.errors()[0].summary, "Invalid WorkOS API Host");
    }
}

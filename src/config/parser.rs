//! Configuration parser for loading provider configuration files.
//!
//! This module handles loading the provider configuration from YAML files
//! and `.env` files, with proper precedence and error handling.

use crate::error::{ConfigError, ProviderError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::ProviderFileConfig;

/// Configuration parser for loading provider configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ProviderFileConfig> {
        let path = self.resolve(path.as_ref());
        info!("Loading provider configuration from: {}", path.display());

        if !path.exists() {
            return Err(ProviderError::Config(ConfigError::FileNotFound { path }));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ProviderError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(&path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ProviderFileConfig> {
        debug!("Parsing YAML configuration");

        if content.trim().is_empty() {
            return Ok(ProviderFileConfig::default());
        }

        let config: ProviderFileConfig = serde_yaml::from_str(content).map_err(|e| {
            ProviderError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location: source.map(|p| p.display().to_string()),
            })
        })?;

        debug!(
            "Parsed provider configuration (host set: {}, api_key set: {})",
            config.host.is_some(),
            config.api_key.is_some()
        );
        Ok(config)
    }

    /// Loads the .env file if present.
    ///
    /// Variables already present in the environment are not overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                ProviderError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_path {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["workos.provider.yaml", "workos.provider.yml"];

/// Finds the configuration file in the given directory or its parents,
/// then in the user configuration directory.
///
/// Returns `None` when no file exists, in which case the provider relies on
/// the environment alone.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("workos").join("provider.yaml");
    if user_config.exists() {
        info!("Found configuration file: {}", user_config.display());
        return Some(user_config);
    }

    debug!("No provider configuration file found");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
host: https://api.workos.test
api_key: sk_test_123
";
        let config = ConfigParser::new().parse_yaml(yaml, None).unwrap();
        assert_eq!(config.host.as_deref(), Some("https://api.workos.test"));
        assert_eq!(config.api_key.as_deref(), Some("sk_test_123"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ConfigParser::new().parse_yaml("\n", None).unwrap();
        assert_eq!(config, ProviderFileConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let result = ConfigParser::new().parse_yaml("hots: https://x\n", None);
        assert!(matches!(
            result,
            Err(ProviderError::Config(ConfigError::ParseError { .. }))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let result = ConfigParser::new()
            .with_base_path(dir.path())
            .load_file("workos.provider.yaml");
        assert!(matches!(
            result,
            Err(ProviderError::Config(ConfigError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_load_file_relative_to_base_path() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join("workos.provider.yaml"), "api_key: sk_file\n")
            .expect("Failed to write config");

        let config = ConfigParser::new()
            .with_base_path(dir.path())
            .load_file("workos.provider.yaml")
            .expect("Failed to load config");
        assert_eq!(config.api_key.as_deref(), Some("sk_file"));
        assert!(config.host.is_none());
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("Failed to create dirs");
        let expected = dir.path().join("workos.provider.yml");
        std::fs::write(&expected, "host: https://api.workos.test\n")
            .expect("Failed to write config");

        assert_eq!(find_config_file(&nested), Some(expected));
    }

    #[test]
    fn test_load_dotenv_without_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        assert!(ConfigParser::new().with_base_path(dir.path()).load_dotenv().is_ok());
    }
}

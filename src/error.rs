//! Error types for the WorkOS provider.
//!
//! This module provides the error hierarchy for every stage a provider call
//! goes through: configuration, WorkOS API access, and the marshaling of
//! plans and states across the host boundary.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the WorkOS provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// WorkOS API errors.
    #[error("WorkOS API error: {0}")]
    Api(#[from] ApiError),

    /// Errors decoding or encoding plans, states and provider data.
    #[error("Framework error: {0}")]
    Framework(#[from] FrameworkError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },
}

/// WorkOS API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed.
    #[error("WorkOS authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// The addressed entity does not exist.
    #[error("WorkOS entity not found: {message}")]
    NotFound {
        /// Error message from the API.
        message: String,
    },

    /// API request failed.
    #[error("WorkOS API request failed: {status} - {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Error message from API.
        message: String,
    },

    /// Network error.
    #[error("Network error communicating with WorkOS: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from API.
    #[error("Invalid response from WorkOS API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },
}

/// Errors crossing the host boundary.
#[derive(Debug, Error)]
pub enum FrameworkError {
    /// A plan, state or config payload does not match the expected model.
    #[error("Failed to decode {what}: {message}")]
    Decode {
        /// What was being decoded (plan, state, config).
        what: String,
        /// Description of the mismatch.
        message: String,
    },

    /// A model could not be encoded into a payload.
    #[error("Failed to encode {what}: {message}")]
    Encode {
        /// What was being encoded.
        what: String,
        /// Description of the failure.
        message: String,
    },

    /// Provider data handed to a resource is not of the expected type.
    #[error("Expected provider data of type {expected}")]
    UnexpectedProviderData {
        /// The expected concrete type.
        expected: &'static str,
    },

    /// A handler was invoked before the provider was configured.
    #[error("Provider has not been configured")]
    NotConfigured,

    /// The host addressed a resource or data source type that is not registered.
    #[error("Unsupported type: {type_name}")]
    UnsupportedType {
        /// The requested type name.
        type_name: String,
    },
}

/// Result type alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

impl ProviderError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if the error reports a missing remote entity.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound { .. }))
    }
}

impl ApiError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl FrameworkError {
    /// Creates a decode error for the named payload.
    #[must_use]
    pub fn decode(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Creates an encode error for the named payload.
    #[must_use]
    pub fn encode(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            what: what.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let error: ProviderError = ConfigError::FileNotFound {
            path: PathBuf::from("workos.provider.yaml"),
        }
        .into();

        assert!(matches!(error, ProviderError::Config(ConfigError::FileNotFound { .. })));
        assert_eq!(
            error.to_string(),
            "Configuration error: Configuration file not found: workos.provider.yaml"
        );
    }

    #[test]
    fn test_not_found_detection() {
        let missing: ProviderError = ApiError::NotFound {
            message: String::from("Organization not found"),
        }
        .into();
        let failed: ProviderError = ApiError::api_error(422, "bad").into();

        assert!(missing.is_not_found());
        assert!(!failed.is_not_found());
        assert_eq!(
            failed.to_string(),
            "WorkOS API error: WorkOS API request failed: 422 - bad"
        );
    }
}

//! Diagnostics reported back to the host.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, FrameworkError, ProviderError};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the current operation.
    Error,
    /// Informational; the operation continues.
    Warning,
}

/// A structured error or warning shown to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Short summary line.
    pub summary: String,
    /// Longer explanation.
    pub detail: String,
    /// Attribute the diagnostic is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

/// An ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostic {
    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Scopes the diagnostic to an attribute.
    #[must_use]
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Returns true if this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Diagnostics {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Adds an error diagnostic.
    pub fn add_error(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.push(Diagnostic::error(summary, detail));
    }

    /// Adds an error diagnostic scoped to an attribute.
    pub fn add_attribute_error(
        &mut self,
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.push(Diagnostic::error(summary, detail).with_attribute(attribute));
    }

    /// Appends all diagnostics from another collection.
    pub fn append(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    /// Returns true if there are no diagnostics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Returns the error diagnostics only.
    #[must_use]
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.0.iter().filter(|d| d.is_error()).collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(error: ProviderError) -> Self {
        let summary = match &error {
            ProviderError::Config(_) => "Invalid provider configuration",
            ProviderError::Api(ApiError::AuthenticationFailed { .. }) => {
                "WorkOS authentication failed"
            }
            ProviderError::Api(_) => "WorkOS API error",
            ProviderError::Framework(
                FrameworkError::Decode { .. } | FrameworkError::Encode { .. },
            ) => "Value Conversion Error",
            ProviderError::Framework(FrameworkError::NotConfigured) => {
                "Unconfigured WorkOS client"
            }
            ProviderError::Framework(_) => "Provider framework error",
            ProviderError::Io(_) | ProviderError::Internal(_) => "Internal provider error",
        };
        Self::error(summary, error.to_string())
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(error: ProviderError) -> Self {
        Self::from(Diagnostic::from(error))
    }
}

impl From<FrameworkError> for Diagnostics {
    fn from(error: FrameworkError) -> Self {
        Self::from(ProviderError::Framework(error))
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        write!(f, "{level}: {}", self.summary)?;
        if let Some(attribute) = &self.attribute {
            write!(f, " (at {attribute})")?;
        }
        if !self.detail.is_empty() {
            write!(f, "\n  {}", self.detail)?;
        }
        Ok(())
    }
}

//! Untyped config, plan and state payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{FrameworkError, Result};

/// A config, plan or state object as handed over by the host.
///
/// A null payload means "absent": no prior state on create, no planned
/// state on destroy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(serde_json::Value);

impl Payload {
    /// Creates an absent payload.
    #[must_use]
    pub const fn null() -> Self {
        Self(serde_json::Value::Null)
    }

    /// Wraps a raw JSON value.
    #[must_use]
    pub const fn from_json(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Encodes a typed model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be represented as JSON.
    pub fn from_model<T: Serialize>(what: &str, model: &T) -> Result<Self> {
        serde_json::to_value(model)
            .map(Self)
            .map_err(|e| FrameworkError::encode(what, e.to_string()).into())
    }

    /// Decodes the payload into a typed model.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is absent or does not match the model.
    pub fn get<T: DeserializeOwned>(&self, what: &str) -> Result<T> {
        if self.is_null() {
            return Err(FrameworkError::decode(what, "value is null").into());
        }
        T::deserialize(&self.0).map_err(|e| FrameworkError::decode(what, e.to_string()).into())
    }

    /// Decodes the payload, mapping an absent payload to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is present but does not match the model.
    pub fn get_optional<T: DeserializeOwned>(&self, what: &str) -> Result<Option<T>> {
        if self.is_null() {
            return Ok(None);
        }
        self.get(what).map(Some)
    }

    /// Returns true if the payload is absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.0, serde_json::Value::Null)
    }

    /// Returns the raw JSON value.
    #[must_use]
    pub const fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Consumes the payload, returning the raw JSON value.
    #[must_use]
    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

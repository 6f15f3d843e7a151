//! Tri-state attribute values.
//!
//! Every attribute exchanged with the host is either null (not configured),
//! unknown (to be computed during apply), or known.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Key of the marker object used to encode an unknown value.
pub const UNKNOWN_MARKER: &str = "$unknown";

/// An attribute value as seen in configuration, plan, or state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value<T> {
    /// The attribute is not set.
    #[default]
    Null,
    /// The attribute will only be known after apply.
    Unknown,
    /// The attribute has a concrete value.
    Known(T),
}

impl<T> Value<T> {
    /// Creates a known value.
    #[must_use]
    pub const fn known(value: T) -> Self {
        Self::Known(value)
    }

    /// Returns true if the value is null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is unknown.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns true if the value is known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Returns a reference to the concrete value, if known.
    #[must_use]
    pub const fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }
}

impl<T: Clone + Default> Value<T> {
    /// Returns the concrete value, or the type's zero value when null or unknown.
    #[must_use]
    pub fn value_or_default(&self) -> T {
        self.as_known().cloned().unwrap_or_default()
    }
}

impl<T> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl From<&str> for Value<String> {
    fn from(value: &str) -> Self {
        Self::Known(value.to_string())
    }
}

impl<T: Serialize> Serialize for Value<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Unknown => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(UNKNOWN_MARKER, &true)?;
                map.end()
            }
            Self::Known(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Value<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if raw.is_null() {
            return Ok(Self::Null);
        }
        if is_unknown_marker(&raw) {
            return Ok(Self::Unknown);
        }
        T::deserialize(raw).map(Self::Known).map_err(D::Error::custom)
    }
}

/// Returns true if the JSON value is the unknown marker object.
pub fn is_unknown_marker(raw: &serde_json::Value) -> bool {
    raw.as_object().is_some_and(|map| {
        map.len() == 1 && map.get(UNKNOWN_MARKER) == Some(&serde_json::Value::Bool(true))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_states() {
        assert_eq!(serde_json::to_value(Value::<String>::Null).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(Value::<String>::Unknown).unwrap(),
            json!({ "$unknown": true })
        );
        assert_eq!(serde_json::to_value(Value::<String>::from("acme")).unwrap(), json!("acme"));
    }

    #[test]
    fn test_deserialize_states() {
        let null: Value<bool> = serde_json::from_value(json!(null)).unwrap();
        assert!(null.is_null());

        let unknown: Value<bool> = serde_json::from_value(json!({ "$unknown": true })).unwrap();
        assert!(unknown.is_unknown());

        let known: Value<bool> = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(known.as_known(), Some(&true));
    }

    #[test]
    fn test_deserialize_type_mismatch() {
        let result: std::result::Result<Value<bool>, _> = serde_json::from_value(json!("yes"));
        assert!(result.is_err());
    }

    #[test]
    fn test_value_or_default() {
        assert!(!Value::<bool>::Null.value_or_default());
        assert!(!Value::<bool>::Unknown.value_or_default());
        assert!(Value::known(true).value_or_default());
    }
}

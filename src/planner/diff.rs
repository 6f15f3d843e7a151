//! Diff engine for comparing prior state and planned state.
//!
//! This module computes the attribute-level difference between the state a
//! resource currently has and the state a plan proposes for it.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use crate::framework::{Payload, is_unknown_marker};

/// Placeholder shown for values only known after apply.
pub const KNOWN_AFTER_APPLY: &str = "(known after apply)";

/// Engine for computing diffs between prior and planned states.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiffEngine;

/// Type of difference detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Resource needs to be created.
    Create,
    /// Resource needs to be updated in place.
    Update,
    /// Resource needs to be deleted.
    Delete,
    /// Resource is unchanged.
    NoChange,
}

/// Change of a single top-level attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeChange {
    /// Attribute that differs.
    pub attribute: String,
    /// Old value, rendered.
    pub old_value: Option<String>,
    /// New value, rendered.
    pub new_value: Option<String>,
}

/// Complete diff of one resource instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDiff {
    /// Kind of change.
    pub diff_type: DiffType,
    /// Attribute changes, sorted by attribute name.
    pub changes: Vec<AttributeChange>,
}

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the diff between a prior state and a planned state.
    #[must_use]
    pub fn compute_diff(&self, prior: &Payload, planned: &Payload) -> PlanDiff {
        let diff_type = match (prior.is_null(), planned.is_null()) {
            (true, true) => DiffType::NoChange,
            (true, false) => DiffType::Create,
            (false, true) => DiffType::Delete,
            (false, false) => DiffType::Update,
        };

        let changes = Self::attribute_changes(prior.as_json(), planned.as_json());
        let diff_type = if diff_type == DiffType::Update && changes.is_empty() {
            DiffType::NoChange
        } else {
            diff_type
        };

        debug!("Computed {diff_type} with {} attribute changes", changes.len());
        PlanDiff { diff_type, changes }
    }

    /// Compares the top-level attributes of two objects.
    fn attribute_changes(
        prior: &serde_json::Value,
        planned: &serde_json::Value,
    ) -> Vec<AttributeChange> {
        let empty = serde_json::Map::new();
        let prior = prior.as_object().unwrap_or(&empty);
        let planned = planned.as_object().unwrap_or(&empty);

        let names: BTreeSet<&String> = prior.keys().chain(planned.keys()).collect();
        names
            .into_iter()
            .filter_map(|name| {
                let old = prior.get(name).unwrap_or(&serde_json::Value::Null);
                let new = planned.get(name).unwrap_or(&serde_json::Value::Null);
                (old != new).then(|| AttributeChange {
                    attribute: name.clone(),
                    old_value: render(old),
                    new_value: render(new),
                })
            })
            .collect()
    }
}

/// Renders a JSON value for display, `None` for null.
fn render(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other if is_unknown_marker(other) => Some(KNOWN_AFTER_APPLY.to_string()),
        other => Some(other.to_string()),
    }
}

impl PlanDiff {
    /// Returns true if there are any changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.diff_type != DiffType::NoChange
    }

    /// Returns the change for an attribute, if it differs.
    #[must_use]
    pub fn change(&self, attribute: &str) -> Option<&AttributeChange> {
        self.changes.iter().find(|c| c.attribute == attribute)
    }
}

impl std::fmt::Display for DiffType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::NoChange => "no change",
        };
        write!(f, "{s}")
    }
}

impl std::fmt::Display for AttributeChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let old = self.old_value.as_deref().unwrap_or("null");
        let new = self.new_value.as_deref().unwrap_or("null");
        write!(f, "{}: {old} -> {new}", self.attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        Payload::from_json(value)
    }

    #[test]
    fn test_create_diff() {
        let diff = DiffEngine::new().compute_diff(
            &Payload::null(),
            &payload(json!({ "name": "Acme", "id": { "$unknown": true } })),
        );
        assert_eq!(diff.diff_type, DiffType::Create);
        assert_eq!(
            diff.change("id").and_then(|c| c.new_value.as_deref()),
            Some(KNOWN_AFTER_APPLY)
        );
    }

    #[test]
    fn test_identical_states_no_change() {
        let state = json!({ "id": "org_1", "domains": [{ "id": "d1", "domain": "acme.com" }] });
        let diff = DiffEngine::new().compute_diff(&payload(state.clone()), &payload(state));
        assert_eq!(diff.diff_type, DiffType::NoChange);
        assert!(!diff.has_changes());
    }

    #[test]
    fn test_update_lists_changed_attributes_only() {
        let diff = DiffEngine::new().compute_diff(
            &payload(json!({ "id": "org_1", "name": "Acme" })),
            &payload(json!({ "id": "org_1", "name": "Acme Inc" })),
        );
        assert_eq!(diff.diff_type, DiffType::Update);
        assert_eq!(diff.changes.len(), 1);
        assert_eq!(diff.changes[0].to_string(), "name: Acme -> Acme Inc");
    }

    #[test]
    fn test_delete_diff() {
        let diff =
            DiffEngine::new().compute_diff(&payload(json!({ "id": "org_1" })), &Payload::null());
        assert_eq!(diff.diff_type, DiffType::Delete);
    }
}

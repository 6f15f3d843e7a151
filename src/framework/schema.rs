//! Schema declarations for the provider, resources and data sources.

use serde::Serialize;
use std::collections::BTreeMap;

use super::plan_modifier::ModifierDescription;
use super::value::UNKNOWN_MARKER;

/// Type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string.
    String,
    /// A boolean.
    Bool,
    /// A list of objects, described by the attribute's nested attributes.
    ListNested,
}

/// A single attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Attribute type.
    #[serde(rename = "type")]
    pub kind: AttributeType,
    /// Must be set in configuration.
    pub required: bool,
    /// May be set in configuration.
    pub optional: bool,
    /// Set by the provider.
    pub computed: bool,
    /// Hidden from plan output and logs.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Descriptions of the plan modifiers attached to this attribute.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<String>,
    /// Nested attributes for [`AttributeType::ListNested`].
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,
}

/// A schema: a set of named attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    /// Schema version.
    pub version: u64,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Attributes by name.
    pub attributes: BTreeMap<String, Attribute>,
}

impl Attribute {
    const fn new(kind: AttributeType, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            kind,
            required,
            optional,
            computed,
            sensitive: false,
            description: None,
            plan_modifiers: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// A required string.
    #[must_use]
    pub const fn required_string() -> Self {
        Self::new(AttributeType::String, true, false, false)
    }

    /// An optional string.
    #[must_use]
    pub const fn optional_string() -> Self {
        Self::new(AttributeType::String, false, true, false)
    }

    /// A computed string.
    #[must_use]
    pub const fn computed_string() -> Self {
        Self::new(AttributeType::String, false, false, true)
    }

    /// A computed boolean.
    #[must_use]
    pub const fn computed_bool() -> Self {
        Self::new(AttributeType::Bool, false, false, true)
    }

    /// An optional boolean that the provider fills in when unset.
    #[must_use]
    pub const fn optional_computed_bool() -> Self {
        Self::new(AttributeType::Bool, false, true, true)
    }

    /// A required list of nested objects.
    #[must_use]
    pub fn required_list_nested(attributes: BTreeMap<String, Self>) -> Self {
        let mut attribute = Self::new(AttributeType::ListNested, true, false, false);
        attribute.attributes = attributes;
        attribute
    }

    /// A computed list of nested objects.
    #[must_use]
    pub fn computed_list_nested(attributes: BTreeMap<String, Self>) -> Self {
        let mut attribute = Self::new(AttributeType::ListNested, false, false, true);
        attribute.attributes = attributes;
        attribute
    }

    /// Marks the attribute as sensitive.
    #[must_use]
    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Records a plan modifier on the attribute.
    #[must_use]
    pub fn with_plan_modifier(mut self, modifier: &dyn ModifierDescription) -> Self {
        self.plan_modifiers.push(modifier.description());
        self
    }
}

impl Schema {
    /// Creates an empty version 0 schema.
    #[must_use]
    pub fn v0() -> Self {
        Self::default()
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Marks every computed attribute that is null in configuration as
    /// unknown in the proposed plan.
    ///
    /// Nested list elements are matched with configuration by position.
    pub fn mark_computed_unknown(&self, config: &serde_json::Value, plan: &mut serde_json::Value) {
        mark_attributes(&self.attributes, config, plan);
    }
}

fn mark_attributes(
    attributes: &BTreeMap<String, Attribute>,
    config: &serde_json::Value,
    plan: &mut serde_json::Value,
) {
    let Some(plan) = plan.as_object_mut() else {
        return;
    };

    for (name, attribute) in attributes {
        let configured = config.get(name).unwrap_or(&serde_json::Value::Null);
        if configured.is_null() {
            if attribute.computed {
                plan.insert(name.clone(), serde_json::json!({ UNKNOWN_MARKER: true }));
            }
            continue;
        }

        if attribute.kind != AttributeType::ListNested {
            continue;
        }
        if let (Some(config_items), Some(serde_json::Value::Array(plan_items))) =
            (configured.as_array(), plan.get_mut(name))
        {
            for (config_item, plan_item) in config_items.iter().zip(plan_items.iter_mut()) {
                mark_attributes(&attribute.attributes, config_item, plan_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::BoolDefault;
    use serde_json::json;

    #[test]
    fn test_builder_flags() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("api_key", Attribute::optional_string().sensitive());

        let name = schema.attribute("name").unwrap();
        assert!(name.required && !name.optional && !name.computed);

        let key = schema.attribute("api_key").unwrap();
        assert!(key.optional && key.sensitive);
    }

    #[test]
    fn test_mark_computed_unknown() {
        let nested = BTreeMap::from([
            (String::from("id"), Attribute::computed_string()),
            (String::from("domain"), Attribute::required_string()),
        ]);
        let schema = Schema::v0()
            .with_attribute("id", Attribute::computed_string())
            .with_attribute("name", Attribute::required_string())
            .with_attribute("flag", Attribute::optional_computed_bool())
            .with_attribute("domains", Attribute::required_list_nested(nested));

        let config = json!({
            "id": null,
            "name": "Acme",
            "flag": true,
            "domains": [{ "id": null, "domain": "acme.com" }]
        });
        let mut plan = json!({
            "id": "org_1",
            "name": "Acme",
            "flag": true,
            "domains": [{ "id": "d1", "domain": "acme.com" }]
        });
        schema.mark_computed_unknown(&config, &mut plan);

        assert_eq!(
            plan,
            json!({
                "id": { "$unknown": true },
                "name": "Acme",
                "flag": true,
                "domains": [{ "id": { "$unknown": true }, "domain": "acme.com" }]
            })
        );
    }

    #[test]
    fn test_plan_modifier_description_recorded() {
        let attribute =
            Attribute::optional_computed_bool().with_plan_modifier(&BoolDefault::new(false));
        assert_eq!(
            attribute.plan_modifiers,
            vec![String::from("If value is not configured, defaults to false")]
        );
    }
}

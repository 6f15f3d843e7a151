//! Attribute plan modifiers.
//!
//! A plan modifier rewrites one attribute of a proposed plan before the plan
//! is shown to the user or applied.

use super::value::Value;

/// Human-readable description of a plan modifier.
pub trait ModifierDescription {
    /// Plain-text description.
    fn description(&self) -> String;

    /// Markdown description.
    fn markdown_description(&self) -> String;
}

/// Inputs to a single attribute plan modification.
#[derive(Debug, Clone, Copy)]
pub struct PlanModifierRequest<'a, T> {
    /// Value from configuration.
    pub config_value: &'a Value<T>,
    /// Value from prior state, `None` when the resource is being created.
    pub state_value: Option<&'a Value<T>>,
    /// Value proposed so far.
    pub plan_value: &'a Value<T>,
}

/// Rewrites a planned attribute value.
pub trait PlanModifier<T>: ModifierDescription {
    /// Returns the plan value to use.
    fn plan_modify(&self, request: &PlanModifierRequest<'_, T>) -> Value<T>;
}

/// Substitutes a fixed default when a boolean is not configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolDefault {
    default: bool,
}

impl BoolDefault {
    /// Creates the modifier.
    #[must_use]
    pub const fn new(default: bool) -> Self {
        Self { default }
    }

    /// Returns the default value.
    #[must_use]
    pub const fn default_value(&self) -> bool {
        self.default
    }
}

impl ModifierDescription for BoolDefault {
    fn description(&self) -> String {
        format!("If value is not configured, defaults to {}", self.default)
    }

    fn markdown_description(&self) -> String {
        format!("If value is not configured, defaults to `{}`", self.default)
    }
}

impl PlanModifier<bool> for BoolDefault {
    fn plan_modify(&self, request: &PlanModifierRequest<'_, bool>) -> Value<bool> {
        if request.config_value.is_null() {
            return Value::known(self.default);
        }
        request.plan_value.clone()
    }
}

/// Keeps the prior state value for a computed attribute instead of marking
/// it unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseStateForUnknown;

impl ModifierDescription for UseStateForUnknown {
    fn description(&self) -> String {
        String::from("Once set, the value of this attribute in state will not change.")
    }

    fn markdown_description(&self) -> String {
        self.description()
    }
}

impl<T: Clone> PlanModifier<T> for UseStateForUnknown {
    fn plan_modify(&self, request: &PlanModifierRequest<'_, T>) -> Value<T> {
        if !request.plan_value.is_unknown() || request.config_value.is_unknown() {
            return request.plan_value.clone();
        }
        match request.state_value {
            Some(state) if !state.is_null() => state.clone(),
            _ => request.plan_value.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modify<T: Clone>(
        modifier: &impl PlanModifier<T>,
        config: &Value<T>,
        state: Option<&Value<T>>,
        plan: &Value<T>,
    ) -> Value<T> {
        modifier.plan_modify(&PlanModifierRequest {
            config_value: config,
            state_value: state,
            plan_value: plan,
        })
    }

    #[test]
    fn test_bool_default_fills_unconfigured() {
        let result = modify(&BoolDefault::new(false), &Value::Null, None, &Value::Unknown);
        assert_eq!(result, Value::known(false));
    }

    #[test]
    fn test_bool_default_keeps_configured() {
        let result = modify(
            &BoolDefault::new(false),
            &Value::known(true),
            None,
            &Value::known(true),
        );
        assert_eq!(result, Value::known(true));
    }

    #[test]
    fn test_bool_default_markdown() {
        assert_eq!(
            BoolDefault::new(true).markdown_description(),
            "If value is not configured, defaults to `true`"
        );
    }

    #[test]
    fn test_use_state_for_unknown_takes_state() {
        let state = Value::known(String::from("org_1"));
        let result = modify(&UseStateForUnknown, &Value::Null, Some(&state), &Value::Unknown);
        assert_eq!(result, state);
    }

    #[test]
    fn test_use_state_for_unknown_on_create() {
        let result: Value<String> = modify(&UseStateForUnknown, &Value::Null, None, &Value::Unknown);
        assert!(result.is_unknown());
    }

    #[test]
    fn test_use_state_for_unknown_ignores_known_plan() {
        let state = Value::known(String::from("t0"));
        let plan = Value::known(String::from("t1"));
        let result = modify(&UseStateForUnknown, &Value::Null, Some(&state), &plan);
        assert_eq!(result, plan);
    }
}

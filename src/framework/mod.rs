//! Host boundary for the provider.
//!
//! This module declares what the host orchestration framework exchanges with
//! the provider: tri-state attribute values, untyped payloads, diagnostics,
//! schema declarations, plan modifiers, and the request/response envelopes
//! of each lifecycle call.

mod diagnostics;
mod payload;
mod plan_modifier;
mod resource;
mod schema;
mod value;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use payload::Payload;
pub use plan_modifier::{
    BoolDefault, ModifierDescription, PlanModifier, PlanModifierRequest, UseStateForUnknown,
};
pub use resource::{
    ConfigureRequest, ConfigureResponse, CreateRequest, DataSource, DeleteRequest,
    ImportStateRequest, ModifyPlanRequest, ModifyPlanResponse, ProviderData, ReadDataSourceRequest,
    ReadDataSourceResponse, ReadRequest, Resource, ResourceResponse, UpdateRequest,
};
pub use schema::{Attribute, AttributeType, Schema};
pub use value::{UNKNOWN_MARKER, Value, is_unknown_marker};

//! Resource and data source traits with their request/response envelopes.

use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

use super::diagnostics::Diagnostics;
use super::payload::Payload;
use super::schema::Schema;

/// Opaque data the provider hands to every resource and data source after
/// configuration.
pub type ProviderData = Arc<dyn Any + Send + Sync>;

/// Provider configuration request.
#[derive(Debug, Clone, Default)]
pub struct ConfigureRequest {
    /// Provider configuration.
    pub config: Payload,
}

/// Provider configuration response.
#[derive(Default)]
pub struct ConfigureResponse {
    /// Data published to resources and data sources.
    pub provider_data: Option<ProviderData>,
    /// Diagnostics.
    pub diagnostics: Diagnostics,
}

/// Create request.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Resource configuration.
    pub config: Payload,
    /// Planned state.
    pub plan: Payload,
}

/// Read request.
#[derive(Debug, Clone, Default)]
pub struct ReadRequest {
    /// Current state.
    pub state: Payload,
}

/// Update request.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    /// Resource configuration.
    pub config: Payload,
    /// Planned state.
    pub plan: Payload,
    /// Prior state.
    pub state: Payload,
}

/// Delete request.
#[derive(Debug, Clone, Default)]
pub struct DeleteRequest {
    /// Current state.
    pub state: Payload,
}

/// Import request.
#[derive(Debug, Clone, Default)]
pub struct ImportStateRequest {
    /// External identifier supplied by the user.
    pub id: String,
}

/// Plan modification request.
#[derive(Debug, Clone, Default)]
pub struct ModifyPlanRequest {
    /// Resource configuration.
    pub config: Payload,
    /// Proposed new state; null when the resource is being destroyed.
    pub plan: Payload,
    /// Prior state; null when the resource is being created.
    pub state: Payload,
}

/// Response of every state-producing lifecycle call.
#[derive(Debug, Clone, Default)]
pub struct ResourceResponse {
    /// Resulting state; null when the resource no longer exists.
    pub state: Payload,
    /// Diagnostics.
    pub diagnostics: Diagnostics,
}

/// Plan modification response.
#[derive(Debug, Clone, Default)]
pub struct ModifyPlanResponse {
    /// Final planned state.
    pub plan: Payload,
    /// Diagnostics.
    pub diagnostics: Diagnostics,
}

/// Data source read request.
#[derive(Debug, Clone, Default)]
pub struct ReadDataSourceRequest {
    /// Data source configuration.
    pub config: Payload,
}

/// Data source read response.
#[derive(Debug, Clone, Default)]
pub struct ReadDataSourceResponse {
    /// Resulting state.
    pub state: Payload,
    /// Diagnostics.
    pub diagnostics: Diagnostics,
}

impl ResourceResponse {
    /// A successful response carrying a state.
    #[must_use]
    pub fn with_state(state: Payload) -> Self {
        Self {
            state,
            diagnostics: Diagnostics::new(),
        }
    }

    /// A failed response that keeps the given state.
    #[must_use]
    pub const fn failed(state: Payload, diagnostics: Diagnostics) -> Self {
        Self { state, diagnostics }
    }
}

impl std::fmt::Debug for ConfigureResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigureResponse")
            .field("provider_data", &self.provider_data.is_some())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// A managed resource type.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Full type name, e.g. `workos_organization`.
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Schema of the resource.
    fn schema(&self) -> Schema;

    /// Receives the provider data produced by provider configuration.
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics;

    /// Creates the remote entity.
    async fn create(&self, request: CreateRequest) -> ResourceResponse;

    /// Refreshes state from the remote entity.
    async fn read(&self, request: ReadRequest) -> ResourceResponse;

    /// Updates the remote entity in place.
    async fn update(&self, request: UpdateRequest) -> ResourceResponse;

    /// Deletes the remote entity.
    async fn delete(&self, request: DeleteRequest) -> ResourceResponse;

    /// Seeds state from an external identifier.
    async fn import_state(&self, request: ImportStateRequest) -> ResourceResponse;

    /// Adjusts the proposed plan before it is shown or applied.
    async fn modify_plan(&self, request: ModifyPlanRequest) -> ModifyPlanResponse;
}

/// A read-only data source type.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Full type name, e.g. `workos_organizations`.
    fn type_name(&self, provider_type_name: &str) -> String;

    /// Schema of the data source.
    fn schema(&self) -> Schema;

    /// Receives the provider data produced by provider configuration.
    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics;

    /// Reads the data source.
    async fn read(&self, request: ReadDataSourceRequest) -> ReadDataSourceResponse;
}

//! The `workos_organizations` data source.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::error::{FrameworkError, ProviderError, Result};
use crate::framework::{
    Attribute, DataSource, Diagnostic, Diagnostics, Payload, ProviderData,
    ReadDataSourceRequest, ReadDataSourceResponse, Schema, Value,
};
use crate::models::{OrganizationsDataSourceModel, build_organization_state};
use crate::provider::{WorkosClient, configure_client};
use crate::resources::organization_attributes;
use crate::workos::ListOrganizationsOpts;

/// Identifier stored in the data source state.
pub const ORGANIZATIONS_DATA_SOURCE_ID: &str = "workos_organizations";

/// Handler for the `workos_organizations` data source.
#[derive(Debug, Default)]
pub struct OrganizationsDataSource {
    client: Option<Arc<WorkosClient>>,
}

impl OrganizationsDataSource {
    /// Creates an unconfigured handler.
    #[must_use]
    pub const fn new() -> Self {
        Self { client: None }
    }

    /// Creates a handler using the given client.
    #[must_use]
    pub const fn with_client(client: Arc<WorkosClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn list(&self) -> Result<OrganizationsDataSourceModel> {
        let client = self
            .client
            .as_deref()
            .ok_or(ProviderError::Framework(FrameworkError::NotConfigured))?;

        let page = client
            .organizations
            .list_organizations(&ListOrganizationsOpts::default())
            .await?;
        debug!("Listed {} organizations", page.data.len());

        Ok(OrganizationsDataSourceModel {
            id: Value::known(ORGANIZATIONS_DATA_SOURCE_ID.to_string()),
            organizations: page.data.iter().map(build_organization_state).collect(),
        })
    }
}

#[async_trait]
impl DataSource for OrganizationsDataSource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_organizations")
    }

    fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Lists WorkOS organizations.")
            .with_attribute(
                "id",
                Attribute::computed_string().with_description("Placeholder identifier."),
            )
            .with_attribute(
                "organizations",
                Attribute::computed_list_nested(organization_attributes(true))
                    .with_description("Organizations in the order returned by WorkOS."),
            )
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        configure_client(
            provider_data,
            "Unexpected Data Source Configure Type",
            &mut self.client,
        )
    }

    async fn read(&self, _request: ReadDataSourceRequest) -> ReadDataSourceResponse {
        let result = self
            .list()
            .await
            .and_then(|state| Payload::from_model("state", &state));

        match result {
            Ok(state) => ReadDataSourceResponse {
                state,
                diagnostics: Diagnostics::new(),
            },
            Err(e) => ReadDataSourceResponse {
                state: Payload::null(),
                diagnostics: Diagnostic::error("Unable to read WorkOS Organizations", e.to_string())
                    .into(),
            },
        }
    }
}

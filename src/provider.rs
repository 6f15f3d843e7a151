//! The WorkOS provider: configuration and registration of its types.
//!
//! Configuration resolves the API key and host, builds one shared API
//! client, and publishes it to the resource and data source handlers as
//! provider data.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::{ConfigResolver, ENV_API_HOST, ENV_API_KEY, ProviderModel, ResolvedConfig};
use crate::datasources::OrganizationsDataSource;
use crate::error::{FrameworkError, Result};
use crate::framework::{
    Attribute, ConfigureRequest, ConfigureResponse, DataSource, Diagnostic, Diagnostics,
    ProviderData, Resource, Schema,
};
use crate::resources::OrganizationResource;
use crate::workos::{OrganizationsApi, OrganizationsClient};

/// Provider type name, the prefix of every resource and data source name.
pub const TYPE_NAME: &str = "workos";

/// Clients shared by every handler once the provider is configured.
#[derive(Clone)]
pub struct WorkosClient {
    /// Organizations API.
    pub organizations: Arc<dyn OrganizationsApi>,
}

impl WorkosClient {
    /// Wraps an organizations API implementation.
    #[must_use]
    pub fn new(organizations: Arc<dyn OrganizationsApi>) -> Self {
        Self { organizations }
    }

    /// Builds the HTTP clients from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let mut client = OrganizationsClient::new(&config.api_key)?;
        if let Some(host) = &config.host {
            client = client.with_endpoint(host);
        }
        debug!("WorkOS endpoint: {}", client.endpoint());
        Ok(Self::new(Arc::new(client)))
    }

    /// Extracts the client from opaque provider data.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider data holds another type.
    pub fn from_provider_data(data: &ProviderData) -> Result<Arc<Self>> {
        Arc::clone(data).downcast::<Self>().map_err(|_| {
            FrameworkError::UnexpectedProviderData {
                expected: "WorkosClient",
            }
            .into()
        })
    }

    /// Publishes the client as provider data.
    #[must_use]
    pub fn into_provider_data(self) -> ProviderData {
        Arc::new(self)
    }
}

impl std::fmt::Debug for WorkosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkosClient").finish_non_exhaustive()
    }
}

/// Receives provider data in a handler's `configure`.
///
/// Missing data is not an error: the host configures handlers before the
/// provider itself has been configured.
pub(crate) fn configure_client(
    provider_data: Option<&ProviderData>,
    summary: &str,
    client: &mut Option<Arc<WorkosClient>>,
) -> Diagnostics {
    let Some(data) = provider_data else {
        return Diagnostics::new();
    };

    match WorkosClient::from_provider_data(data) {
        Ok(shared) => {
            *client = Some(shared);
            Diagnostics::new()
        }
        Err(e) => Diagnostic::error(
            summary,
            format!("{e}. Please report this issue to the provider developers."),
        )
        .into(),
    }
}

/// The WorkOS provider.
#[derive(Debug, Clone)]
pub struct WorkosProvider {
    version: String,
}

impl WorkosProvider {
    /// Creates the provider.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    /// Provider type name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    /// Provider version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Schema of the provider configuration block.
    #[must_use]
    pub fn schema(&self) -> Schema {
        Schema::v0()
            .with_description("Interact with WorkOS.")
            .with_attribute(
                "host",
                Attribute::optional_string().with_description(format!(
                    "URI for the WorkOS API. May also be provided via {ENV_API_HOST} environment variable."
                )),
            )
            .with_attribute(
                "api_key",
                Attribute::optional_string().sensitive().with_description(format!(
                    "Secret key for the WorkOS API. May also be provided via {ENV_API_KEY} environment variable."
                )),
            )
    }

    /// Configures the provider from its configuration block and the process
    /// environment.
    #[must_use]
    pub fn configure(&self, request: &ConfigureRequest) -> ConfigureResponse {
        self.configure_with_env(request, |name| std::env::var(name).ok())
    }

    /// Configures the provider with the given environment lookup.
    #[must_use]
    pub fn configure_with_env<F>(&self, request: &ConfigureRequest, env: F) -> ConfigureResponse
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Configuring WorkOS client");

        let model: ProviderModel = match request.config.get_optional("provider configuration") {
            Ok(model) => model.unwrap_or_default(),
            Err(e) => return Self::failed(e.into()),
        };

        let resolved = match ConfigResolver::new().resolve_with_env(&model, env) {
            Ok(resolved) => resolved,
            Err(diagnostics) => return Self::failed(diagnostics),
        };

        match WorkosClient::from_config(&resolved) {
            Ok(client) => {
                info!("Configured WorkOS client");
                ConfigureResponse {
                    provider_data: Some(client.into_provider_data()),
                    diagnostics: Diagnostics::new(),
                }
            }
            Err(e) => Self::failed(
                Diagnostic::error(
                    "Unable to Create WorkOS API Client",
                    format!(
                        "An unexpected error occurred when creating the WorkOS API client.\n\nWorkOS Client Error: {e}"
                    ),
                )
                .into(),
            ),
        }
    }

    fn failed(diagnostics: Diagnostics) -> ConfigureResponse {
        ConfigureResponse {
            provider_data: None,
            diagnostics,
        }
    }

    /// Managed resource types.
    #[must_use]
    pub fn resources(&self) -> Vec<Box<dyn Resource>> {
        vec![Box::new(OrganizationResource::new())]
    }

    /// Data source types.
    #[must_use]
    pub fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        vec![Box::new(OrganizationsDataSource::new())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Payload;
    use serde_json::json;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_schema_marks_api_key_sensitive() {
        let schema = WorkosProvider::new("test").schema();
        let api_key = schema.attribute("api_key").unwrap();
        assert!(api_key.optional && api_key.sensitive);
        assert!(!schema.attribute("host").unwrap().sensitive);
    }

    #[test]
    fn test_configure_publishes_client() {
        let request = ConfigureRequest {
            config: Payload::from_json(json!({ "api_key": "sk_test", "host": null })),
        };
        let response = WorkosProvider::new("test").configure_with_env(&request, no_env);

        assert!(response.diagnostics.is_empty());
        let data = response.provider_data.unwrap();
        assert!(WorkosClient::from_provider_data(&data).is_ok());
    }

    #[test]
    fn test_configure_unknown_values() {
        let request = ConfigureRequest {
            config: Payload::from_json(json!({
                "api_key": { "$unknown": true },
                "host": { "$unknown": true }
            })),
        };
        let response = WorkosProvider::new("test").configure_with_env(&request, no_env);

        assert!(response.provider_data.is_none());
        let summaries: Vec<_> = response.diagnostics.iter().map(|d| d.summary.as_str()).collect();
        assert_eq!(summaries, vec!["Unknown WorkOS API Key", "Unknown WorkOS API Host"]);
    }

    #[test]
    fn test_configure_missing_key() {
        let response = WorkosProvider::new("test")
            .configure_with_env(&ConfigureRequest::default(), no_env);
        assert!(response.provider_data.is_none());
        assert_eq!(
            response.diagnostics.errors()[0].summary,
            "Missing WorkOS API Secret Key"
        );
    }

    #[test]
    fn test_unexpected_provider_data() {
        let data: ProviderData = Arc::new(String::from("not a client"));
        let mut client = None;
        let diagnostics = configure_client(Some(&data), "Unexpected Resource Configure Type", &mut client);

        assert!(client.is_none());
        assert_eq!(diagnostics.errors()[0].summary, "Unexpected Resource Configure Type");
    }

    #[test]
    fn test_missing_provider_data_is_ignored() {
        let mut client = None;
        let diagnostics = configure_client(None, "Unexpected Resource Configure Type", &mut client);
        assert!(diagnostics.is_empty());
        assert!(client.is_none());
    }

    #[test]
    fn test_registered_type_names() {
        let provider = WorkosProvider::new("test");
        let resources: Vec<_> = provider
            .resources()
            .iter()
            .map(|r| r.type_name(TYPE_NAME))
            .collect();
        let data_sources: Vec<_> = provider
            .data_sources()
            .iter()
            .map(|d| d.type_name(TYPE_NAME))
            .collect();
        assert_eq!(resources, vec!["workos_organization"]);
        assert_eq!(data_sources, vec!["workos_organizations"]);
    }
}

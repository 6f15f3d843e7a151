//! WorkOS API client implementation.
//!
//! This module provides the HTTP client for the WorkOS organizations REST API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::{ApiError, ProviderError, Result};

use super::api::OrganizationsApi;
use super::types::{
    CreateOrganizationOpts, DeleteOrganizationOpts, GetOrganizationOpts, ListOrganizationsOpts,
    ListOrganizationsResponse, Organization, UpdateOrganizationOpts,
};

/// WorkOS API base URL.
pub const WORKOS_API_URL: &str = "https://api.workos.com";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// WorkOS organizations API client.
#[derive(Clone)]
pub struct OrganizationsClient {
    /// HTTP client.
    client: Client,
    /// Base URL, without trailing slash.
    endpoint: String,
    /// API key.
    api_key: String,
}

/// Error body returned by the WorkOS API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl OrganizationsClient {
    /// Creates a client for the public WorkOS endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_timeout(api_key: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("terraform-provider-workos/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: WORKOS_API_URL.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Points the client at another API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Returns the API endpoint in use.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.endpoint)
    }

    /// Builds `/organizations/{id}` with the id as a single encoded path segment.
    fn organization_url(&self, organization: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url("organizations")).map_err(|e| {
            ProviderError::internal(format!("Invalid WorkOS API endpoint '{}': {e}", self.endpoint))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ProviderError::internal(format!(
                    "WorkOS API endpoint '{}' cannot carry a path",
                    self.endpoint
                ))
            })?
            .push(organization);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }

    /// Sends a request and checks the status.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await.map_err(|e| {
            ProviderError::Api(ApiError::NetworkError {
                message: format!("Request failed: {e}"),
            })
        })?;

        let status = response.status();
        trace!("WorkOS responded with {status}");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ProviderError::Api(Self::error_from(status, &body)))
    }

    /// Sends a request and decodes the JSON response body.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        response.json::<T>().await.map_err(|e| {
            ProviderError::Api(ApiError::invalid_response(format!(
                "Failed to parse response: {e}"
            )))
        })
    }

    /// Maps a failed response onto an API error.
    fn error_from(status: StatusCode, body: &str) -> ApiError {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error_description)
            .or(parsed.error)
            .or(parsed.code)
            .unwrap_or_else(|| body.trim().to_string());
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("unexpected status").to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::AuthenticationFailed { message }
            }
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            _ => ApiError::api_error(status.as_u16(), message),
        }
    }
}

#[async_trait]
impl OrganizationsApi for OrganizationsClient {
    async fn create_organization(&self, opts: &CreateOrganizationOpts) -> Result<Organization> {
        debug!("Creating organization '{}'", opts.name);
        let request = self.client.post(self.url("organizations")).json(opts);
        self.send_json(request).await
    }

    async fn get_organization(&self, opts: &GetOrganizationOpts) -> Result<Organization> {
        debug!("Fetching organization {}", opts.organization);
        let request = self.client.get(self.organization_url(&opts.organization)?);
        self.send_json(request).await
    }

    async fn update_organization(&self, opts: &UpdateOrganizationOpts) -> Result<Organization> {
        debug!("Updating organization {}", opts.organization);
        let request = self
            .client
            .put(self.organization_url(&opts.organization)?)
            .json(opts);
        self.send_json(request).await
    }

    async fn delete_organization(&self, opts: &DeleteOrganizationOpts) -> Result<()> {
        debug!("Deleting organization {}", opts.organization);
        let request = self.client.delete(self.organization_url(&opts.organization)?);
        self.send(request).await?;
        Ok(())
    }

    async fn list_organizations(
        &self,
        opts: &ListOrganizationsOpts,
    ) -> Result<ListOrganizationsResponse> {
        debug!("Listing organizations");
        let request = self
            .client
            .get(self.url("organizations"))
            .query(&opts.query_pairs());
        self.send_json(request).await
    }
}

impl std::fmt::Debug for OrganizationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrganizationsClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

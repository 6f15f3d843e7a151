//! Line-delimited JSON serving adapter.
//!
//! The host writes one request object per line and reads one response
//! object per line:
//!
//! ```text
//! {"id": 1, "method": "read_resource", "params": {"type_name": "workos_organization", "current_state": {...}}}
//! {"id": 1, "result": {...}, "diagnostics": []}
//! ```
//!
//! Only protocol lines are written to the output; logs belong on stderr.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, trace, warn};

use crate::error::{FrameworkError, Result};
use crate::framework::{
    ConfigureRequest, CreateRequest, DataSource, DeleteRequest, Diagnostic, Diagnostics,
    ImportStateRequest, ModifyPlanRequest, Payload, ReadDataSourceRequest, ReadRequest, Resource,
    UpdateRequest,
};
use crate::planner::DiffEngine;
use crate::provider::WorkosProvider;

/// A request from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Correlation identifier, echoed in the response.
    #[serde(default)]
    pub id: Option<u64>,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A response to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Identifier of the request this answers.
    pub id: Option<u64>,
    /// Method result; null on failure.
    pub result: serde_json::Value,
    /// Diagnostics produced while handling the request.
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Deserialize)]
struct ConfigureParams {
    #[serde(default)]
    config: Payload,
}

#[derive(Debug, Deserialize)]
struct PlanParams {
    type_name: String,
    #[serde(default)]
    config: Payload,
    #[serde(default)]
    prior_state: Payload,
    #[serde(default)]
    proposed_new_state: Payload,
}

#[derive(Debug, Deserialize)]
struct ApplyParams {
    type_name: String,
    #[serde(default)]
    config: Payload,
    #[serde(default)]
    prior_state: Payload,
    #[serde(default)]
    planned_state: Payload,
}

#[derive(Debug, Deserialize)]
struct ReadParams {
    type_name: String,
    #[serde(default)]
    current_state: Payload,
}

#[derive(Debug, Deserialize)]
struct ImportParams {
    type_name: String,
    id: String,
}

#[derive(Debug, Deserialize)]
struct ReadDataSourceParams {
    type_name: String,
    #[serde(default)]
    config: Payload,
}

type Outcome = (serde_json::Value, Diagnostics);

/// Serves the provider's resources and data sources to a host.
pub struct ProviderServer {
    provider: WorkosProvider,
    resources: BTreeMap<String, Box<dyn Resource>>,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl ProviderServer {
    /// Creates a server for the provider's registered types.
    #[must_use]
    pub fn new(provider: WorkosProvider) -> Self {
        let type_name = provider.type_name();
        let resources = provider
            .resources()
            .into_iter()
            .map(|r| (r.type_name(type_name), r))
            .collect();
        let data_sources = provider
            .data_sources()
            .into_iter()
            .map(|d| (d.type_name(type_name), d))
            .collect();

        Self {
            provider,
            resources,
            data_sources,
        }
    }

    /// Reads requests until the input closes, answering each one.
    ///
    /// Malformed lines are answered with an error diagnostic.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the input or writing the output fails.
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(
            "Serving provider {} v{}",
            self.provider.type_name(),
            self.provider.version()
        );

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            trace!("Request line: {line}");

            let response = match serde_json::from_str::<Request>(&line) {
                Ok(request) => self.handle(request).await,
                Err(e) => {
                    warn!("Malformed request: {e}");
                    Response {
                        id: None,
                        result: serde_json::Value::Null,
                        diagnostics: Diagnostic::error("Malformed request", e.to_string()).into(),
                    }
                }
            };

            let mut encoded = serde_json::to_string(&response)
                .map_err(|e| FrameworkError::encode("response", e.to_string()))?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }

        info!("Input closed, stopping");
        Ok(())
    }

    /// Handles a single request.
    pub async fn handle(&mut self, request: Request) -> Response {
        debug!("Handling {} (id {:?})", request.method, request.id);

        let (result, diagnostics) = match request.method.as_str() {
            "get_schema" => (self.schemas(), Diagnostics::new()),
            "configure" => self.configure(request.params),
            "plan_resource_change" => self.plan_resource_change(request.params).await,
            "apply_resource_change" => self.apply_resource_change(request.params).await,
            "read_resource" => self.read_resource(request.params).await,
            "import_resource_state" => self.import_resource_state(request.params).await,
            "read_data_source" => self.read_data_source(request.params).await,
            other => (
                serde_json::Value::Null,
                Diagnostic::error(
                    "Unknown method",
                    format!("The provider does not implement the method '{other}'."),
                )
                .into(),
            ),
        };

        if diagnostics.has_error() {
            debug!("{} finished with {} diagnostics", request.method, diagnostics.len());
        }

        Response {
            id: request.id,
            result,
            diagnostics,
        }
    }

    /// Schemas of the provider and every registered type.
    #[must_use]
    pub fn schemas(&self) -> serde_json::Value {
        let resources: BTreeMap<_, _> = self
            .resources
            .iter()
            .map(|(name, r)| (name.clone(), r.schema()))
            .collect();
        let data_sources: BTreeMap<_, _> = self
            .data_sources
            .iter()
            .map(|(name, d)| (name.clone(), d.schema()))
            .collect();

        json!({
            "provider": self.provider.schema(),
            "resources": resources,
            "data_sources": data_sources,
        })
    }

    fn configure(&mut self, params: serde_json::Value) -> Outcome {
        let params: ConfigureParams = match decode(params) {
            Ok(params) => params,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let response = self.provider.configure(&ConfigureRequest {
            config: params.config,
        });
        let mut diagnostics = response.diagnostics;

        if let Some(data) = response.provider_data {
            for resource in self.resources.values_mut() {
                diagnostics.append(resource.configure(Some(&data)));
            }
            for data_source in self.data_sources.values_mut() {
                diagnostics.append(data_source.configure(Some(&data)));
            }
        }

        (serde_json::Value::Null, diagnostics)
    }

    async fn plan_resource_change(&self, params: serde_json::Value) -> Outcome {
        let (params, resource) = match decode::<PlanParams>(params)
            .and_then(|p| self.resource(&p.type_name).map(|r| (p, r)))
        {
            Ok(found) => found,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let mut proposed = params.proposed_new_state.into_json();
        if !proposed.is_null() && proposed != *params.prior_state.as_json() {
            resource
                .schema()
                .mark_computed_unknown(params.config.as_json(), &mut proposed);
        }

        let response = resource
            .modify_plan(ModifyPlanRequest {
                config: params.config,
                plan: Payload::from_json(proposed),
                state: params.prior_state.clone(),
            })
            .await;

        let changes = DiffEngine::new().compute_diff(&params.prior_state, &response.plan);
        (
            json!({
                "planned_state": response.plan,
                "changes": changes,
            }),
            response.diagnostics,
        )
    }

    async fn apply_resource_change(&self, params: serde_json::Value) -> Outcome {
        let (params, resource) = match decode::<ApplyParams>(params)
            .and_then(|p| self.resource(&p.type_name).map(|r| (p, r)))
        {
            Ok(found) => found,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let response = match (params.prior_state.is_null(), params.planned_state.is_null()) {
            (true, true) => return (serde_json::Value::Null, Diagnostics::new()),
            (true, false) => {
                resource
                    .create(CreateRequest {
                        config: params.config,
                        plan: params.planned_state,
                    })
                    .await
            }
            (false, true) => {
                resource
                    .delete(DeleteRequest {
                        state: params.prior_state,
                    })
                    .await
            }
            (false, false) => {
                resource
                    .update(UpdateRequest {
                        config: params.config,
                        plan: params.planned_state,
                        state: params.prior_state,
                    })
                    .await
            }
        };

        (response.state.into_json(), response.diagnostics)
    }

    async fn read_resource(&self, params: serde_json::Value) -> Outcome {
        let (params, resource) = match decode::<ReadParams>(params)
            .and_then(|p| self.resource(&p.type_name).map(|r| (p, r)))
        {
            Ok(found) => found,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let response = resource
            .read(ReadRequest {
                state: params.current_state,
            })
            .await;
        (response.state.into_json(), response.diagnostics)
    }

    async fn import_resource_state(&self, params: serde_json::Value) -> Outcome {
        let (params, resource) = match decode::<ImportParams>(params)
            .and_then(|p| self.resource(&p.type_name).map(|r| (p, r)))
        {
            Ok(found) => found,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let response = resource
            .import_state(ImportStateRequest { id: params.id })
            .await;
        (response.state.into_json(), response.diagnostics)
    }

    async fn read_data_source(&self, params: serde_json::Value) -> Outcome {
        let (params, data_source) = match decode::<ReadDataSourceParams>(params)
            .and_then(|p| self.data_source(&p.type_name).map(|d| (p, d)))
        {
            Ok(found) => found,
            Err(diagnostics) => return (serde_json::Value::Null, diagnostics),
        };

        let response = data_source
            .read(ReadDataSourceRequest {
                config: params.config,
            })
            .await;
        (response.state.into_json(), response.diagnostics)
    }

    fn resource(&self, type_name: &str) -> std::result::Result<&dyn Resource, Diagnostics> {
        self.resources
            .get(type_name)
            .map(|r| &**r)
            .ok_or_else(|| unsupported(type_name))
    }

    fn data_source(&self, type_name: &str) -> std::result::Result<&dyn DataSource, Diagnostics> {
        self.data_sources
            .get(type_name)
            .map(|r| &**r)
            .ok_or_else(|| unsupported(type_name))
    }
}

impl std::fmt::Debug for ProviderServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderServer")
            .field("provider", &self.provider)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .field("data_sources", &self.data_sources.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn decode<T: DeserializeOwned>(params: serde_json::Value) -> std::result::Result<T, Diagnostics> {
    serde_json::from_value(params)
        .map_err(|e| FrameworkError::decode("request parameters", e.to_string()).into())
}

fn unsupported(type_name: &str) -> Diagnostics {
    FrameworkError::UnsupportedType {
        type_name: type_name.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ProviderServer {
        ProviderServer::new(WorkosProvider::new("test"))
    }

    fn request(method: &str, params: serde_json::Value) -> Request {
        Request {
            id: Some(7),
            method: method.to_string(),
            params,
        }
    }

    #[tokio::test]
    async fn test_get_schema_lists_types() {
        let response = server().handle(request("get_schema", serde_json::Value::Null)).await;

        assert_eq!(response.id, Some(7));
        assert!(response.diagnostics.is_empty());
        assert!(response.result["resources"]["workos_organization"].is_object());
        assert!(response.result["data_sources"]["workos_organizations"].is_object());
        assert_eq!(
            response.result["provider"]["attributes"]["api_key"]["sensitive"],
            json!(true)
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = server().handle(request("upgrade_resource_state", json!({}))).await;
        assert_eq!(response.diagnostics.errors()[0].summary, "Unknown method");
    }

    #[tokio::test]
    async fn test_unknown_type_name() {
        let response = server()
            .handle(request(
                "read_resource",
                json!({ "type_name": "workos_user", "current_state": { "id": "u_1" } }),
            ))
            .await;
        assert!(response.diagnostics.has_error());
        assert!(response.result.is_null());
    }

    #[tokio::test]
    async fn test_read_before_configure() {
        let response = server()
            .handle(request(
                "read_resource",
                json!({ "type_name": "workos_organization", "current_state": { "id": "org_1" } }),
            ))
            .await;
        assert_eq!(
            response.diagnostics.errors()[0].summary,
            "Unconfigured WorkOS client"
        );
        assert_eq!(response.result["id"], json!("org_1"));
    }

    #[tokio::test]
    async fn test_import_without_remote_call() {
        let response = server()
            .handle(request(
                "import_resource_state",
                json!({ "type_name": "workos_organization", "id": "org_9" }),
            ))
            .await;
        assert!(response.diagnostics.is_empty());
        assert_eq!(response.result["id"], json!("org_9"));
    }

    #[tokio::test]
    async fn test_serve_answers_malformed_lines() {
        let input = b"not json\n\n{\"id\":1,\"method\":\"get_schema\"}\n".to_vec();
        let mut output = Vec::new();

        server()
            .serve(input.as_slice(), &mut output)
            .await
            .expect("serve failed");

        let lines: Vec<Response> = String::from_utf8(output)
            .expect("output is not UTF-8")
            .lines()
            .map(|l| serde_json::from_str(l).expect("response is not JSON"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].diagnostics.errors()[0].summary, "Malformed request");
        assert_eq!(lines[1].id, Some(1));
        assert!(lines[1].diagnostics.is_empty());
    }
}

//! The `workos_organization` resource.
//!
//! Maps the create / read / update / delete / import lifecycle onto the
//! WorkOS organizations API and normalizes plans so that domain order and
//! server-side timestamps do not show up as changes.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{FrameworkError, ProviderError, Result};
use crate::framework::{
    Attribute, BoolDefault, CreateRequest, DeleteRequest, Diagnostic, Diagnostics,
    ImportStateRequest, ModifyPlanRequest, ModifyPlanResponse, Payload, PlanModifier,
    PlanModifierRequest, ProviderData, ReadRequest, Resource, ResourceResponse, Schema,
    UpdateRequest, UseStateForUnknown, Value,
};
use crate::models::{OrganizationModel, build_organization_state};
use crate::planner::{align_domain_order, normalize_domains, normalize_updated_at};
use crate::provider::{WorkosClient, configure_client};
use crate::workos::{
    CreateOrganizationOpts, DeleteOrganizationOpts, GetOrganizationOpts, UpdateOrganizationOpts,
};

const STABLE: UseStateForUnknown = UseStateForUnknown;
const ALLOW_PROFILES_DEFAULT: BoolDefault = BoolDefault::new(false);

/// Handler for the `workos_organization` resource.
#[derive(Debug, Default)]
pub struct OrganizationResource {
    client: Option<Arc<WorkosClient>>,
}

impl OrganizationResource {
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

    fn client(&self) -> Result<&WorkosClient> {
        self.client
            .as_deref()
            .ok_or(ProviderError::Framework(FrameworkError::NotConfigured))
    }

    async fn create_organization(
        &self,
        request: &CreateRequest,
    ) -> std::result::Result<OrganizationModel, Diagnostics> {
        let plan: OrganizationModel = request.plan.get("plan")?;
        let client = self.client()?;

        let opts = CreateOrganizationOpts {
            name: plan.name.value_or_default(),
            allow_profiles_outside_organization: plan
                .allow_profiles_outside_organization
                .value_or_default(),
            domains: plan.domain_names(),
        };

        let organization = client
            .organizations
            .create_organization(&opts)
            .await
            .map_err(|e| remote_error("creating", "create", &e))?;

        let mut state = build_organization_state(&organization);
        align_domain_order(&plan.domains, &mut state.domains);
        info!("Created organization {}", organization.id);
        Ok(state)
    }

    async fn read_organization(
        &self,
        request: &ReadRequest,
    ) -> std::result::Result<OrganizationModel, Diagnostics> {
        let prior: OrganizationModel = request.state.get("state")?;
        let client = self.client()?;
        let id = organization_id(&prior, "reading", "read")?;

        let organization = client
            .organizations
            .get_organization(&GetOrganizationOpts { organization: id })
            .await
            .map_err(|e| remote_error("reading", "read", &e))?;

        let mut state = build_organization_state(&organization);
        align_domain_order(&prior.domains, &mut state.domains);
        debug!("Read organization {}", organization.id);
        Ok(state)
    }

    async fn update_organization(
        &self,
        request: &UpdateRequest,
    ) -> std::result::Result<OrganizationModel, Diagnostics> {
        let plan: OrganizationModel = request.plan.get("plan")?;
        let prior: OrganizationModel = request.state.get("state")?;
        let client = self.client()?;
        let id = organization_id(&prior, "updating", "update")?;

        let opts = UpdateOrganizationOpts {
            organization: id,
            name: plan.name.value_or_default(),
            allow_profiles_outside_organization: plan
                .allow_profiles_outside_organization
                .value_or_default(),
            domains: plan.domain_names(),
        };

        let organization = client
            .organizations
            .update_organization(&opts)
            .await
            .map_err(|e| remote_error("updating", "update", &e))?;

        let mut state = build_organization_state(&organization);
        align_domain_order(&plan.domains, &mut state.domains);
        info!("Updated organization {}", organization.id);
        Ok(state)
    }

    async fn delete_organization(
        &self,
        request: &DeleteRequest,
    ) -> std::result::Result<(), Diagnostics> {
        let prior: OrganizationModel = request.state.get("state")?;
        let client = self.client()?;
        let id = organization_id(&prior, "deleting", "delete")?;

        client
            .organizations
            .delete_organization(&DeleteOrganizationOpts {
                organization: id.clone(),
            })
            .await
            .map_err(|e| remote_error("deleting", "delete", &e))?;

        info!("Deleted organization {id}");
        Ok(())
    }

    fn plan_organization(request: &ModifyPlanRequest) -> Result<OrganizationModel> {
        let config: OrganizationModel = request.config.get_optional("config")?.unwrap_or_default();
        let mut plan: OrganizationModel = request.plan.get("plan")?;
        let state: Option<OrganizationModel> = request.state.get_optional("state")?;

        plan.id = STABLE.plan_modify(&PlanModifierRequest {
            config_value: &config.id,
            state_value: state.as_ref().map(|s| &s.id),
            plan_value: &plan.id,
        });
        plan.created_at = STABLE.plan_modify(&PlanModifierRequest {
            config_value: &config.created_at,
            state_value: state.as_ref().map(|s| &s.created_at),
            plan_value: &plan.created_at,
        });
        plan.allow_profiles_outside_organization =
            ALLOW_PROFILES_DEFAULT.plan_modify(&PlanModifierRequest {
                config_value: &config.allow_profiles_outside_organization,
                state_value: state
                    .as_ref()
                    .map(|s| &s.allow_profiles_outside_organization),
                plan_value: &plan.allow_profiles_outside_organization,
            });

        if let Some(state) = &state {
            normalize_domains(state, &mut plan);
            normalize_updated_at(state, &mut plan);
        }

        Ok(plan)
    }
}

/// Schema of an organization, shared with the data source entries.
///
/// `computed_only` declares every attribute as computed.
#[must_use]
pub fn organization_attributes(computed_only: bool) -> BTreeMap<String, Attribute> {
    let mut domain = BTreeMap::new();
    domain.insert(
        String::from("id"),
        Attribute::computed_string().with_description("Identifier of the domain."),
    );
    domain.insert(
        String::from("domain"),
        (if computed_only {
            Attribute::computed_string()
        } else {
            Attribute::required_string()
        })
        .with_description("Domain name."),
    );

    let mut attributes = BTreeMap::new();
    attributes.insert(
        String::from("id"),
        Attribute::computed_string()
            .with_description("Identifier of the organization.")
            .with_plan_modifier(&STABLE),
    );
    attributes.insert(
        String::from("name"),
        (if computed_only {
            Attribute::computed_string()
        } else {
            Attribute::required_string()
        })
        .with_description("Name of the organization."),
    );
    attributes.insert(
        String::from("allow_profiles_outside_organization"),
        (if computed_only {
            Attribute::computed_bool()
        } else {
            Attribute::optional_computed_bool().with_plan_modifier(&ALLOW_PROFILES_DEFAULT)
        })
        .with_description(
            "Whether the connections within this organization should allow profiles that do not have a domain that is present in the set of the organization's domains.",
        ),
    );
    attributes.insert(
        String::from("domains"),
        (if computed_only {
            Attribute::computed_list_nested(domain)
        } else {
            Attribute::required_list_nested(domain)
        })
        .with_description("Domains of the organization."),
    );
    attributes.insert(
        String::from("created_at"),
        Attribute::computed_string()
            .with_description("Timestamp of when the organization was created.")
            .with_plan_modifier(&STABLE),
    );
    attributes.insert(
        String::from("updated_at"),
        Attribute::computed_string()
            .with_description("Timestamp of when the organization was last updated."),
    );

    if computed_only {
        for attribute in attributes.values_mut() {
            attribute.plan_modifiers.clear();
        }
    }
    attributes
}

/// Error diagnostic for a failed remote call.
fn remote_error(action: &str, verb: &str, error: &ProviderError) -> Diagnostics {
    Diagnostic::error(
        format!("Error {action} organization"),
        format!("Could not {verb} organization, unexpected error: {error}"),
    )
    .into()
}

fn organization_id(
    model: &OrganizationModel,
    action: &str,
    verb: &str,
) -> std::result::Result<String, Diagnostics> {
    match &model.id {
        Value::Known(id) if !id.is_empty() => Ok(id.clone()),
        _ => Err(Diagnostic::error(
            format!("Error {action} organization"),
            format!("Could not {verb} organization, unexpected error: missing organization id"),
        )
        .into()),
    }
}

/// Encodes a new state, or keeps `fallback` if encoding fails.
fn respond(state: &OrganizationModel, fallback: Payload) -> ResourceResponse {
    match Payload::from_model("state", state) {
        Ok(payload) => ResourceResponse::with_state(payload),
        Err(e) => ResourceResponse::failed(fallback, e.into()),
    }
}

#[async_trait]
impl Resource for OrganizationResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_organization")
    }

    fn schema(&self) -> Schema {
        organization_attributes(false).into_iter().fold(
            Schema::v0().with_description("Manages a WorkOS organization."),
            |schema, (name, attribute)| schema.with_attribute(name, attribute),
        )
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        configure_client(
            provider_data,
            "Unexpected Resource Configure Type",
            &mut self.client,
        )
    }

    async fn create(&self, request: CreateRequest) -> ResourceResponse {
        match self.create_organization(&request).await {
            Ok(state) => respond(&state, Payload::null()),
            Err(diagnostics) => ResourceResponse::failed(Payload::null(), diagnostics),
        }
    }

    async fn read(&self, request: ReadRequest) -> ResourceResponse {
        match self.read_organization(&request).await {
            Ok(state) => respond(&state, request.state),
            Err(diagnostics) => ResourceResponse::failed(request.state, diagnostics),
        }
    }

    async fn update(&self, request: UpdateRequest) -> ResourceResponse {
        match self.update_organization(&request).await {
            Ok(state) => respond(&state, request.state),
            Err(diagnostics) => ResourceResponse::failed(request.state, diagnostics),
        }
    }

    async fn delete(&self, request: DeleteRequest) -> ResourceResponse {
        match self.delete_organization(&request).await {
            Ok(()) => ResourceResponse::with_state(Payload::null()),
            Err(diagnostics) => ResourceResponse::failed(request.state, diagnostics),
        }
    }

    async fn import_state(&self, request: ImportStateRequest) -> ResourceResponse {
        if request.id.is_empty() {
            return ResourceResponse::failed(
                Payload::null(),
                Diagnostic::error(
                    "Unexpected Import Identifier",
                    "Expected a WorkOS organization id, got an empty string.",
                )
                .into(),
            );
        }

        info!("Importing organization {}", request.id);
        let state = OrganizationModel {
            id: Value::known(request.id),
            ..OrganizationModel::default()
        };
        respond(&state, Payload::null())
    }

    async fn modify_plan(&self, request: ModifyPlanRequest) -> ModifyPlanResponse {
        if request.plan.is_null() {
            return ModifyPlanResponse {
                plan: request.plan,
                diagnostics: Diagnostics::new(),
            };
        }

        let result = Self::plan_organization(&request)
            .and_then(|plan| Payload::from_model("plan", &plan));
        match result {
            Ok(plan) => ModifyPlanResponse {
                plan,
                diagnostics: Diagnostics::new(),
            },
            Err(e) => ModifyPlanResponse {
                plan: request.plan,
                diagnostics: e.into(),
            },
        }
    }
}

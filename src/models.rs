//! Local state shapes shared by the organization resource and data source.

use serde::{Deserialize, Serialize};

use crate::framework::Value;
use crate::workos::Organization;

/// State of a `workos_organization` resource, also used for each entry of
/// the `workos_organizations` data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationModel {
    /// Organization identifier.
    pub id: Value<String>,
    /// Display name.
    pub name: Value<String>,
    /// Whether profiles outside the verified domains may sign in.
    pub allow_profiles_outside_organization: Value<bool>,
    /// Domains of the organization.
    pub domains: Vec<DomainModel>,
    /// Creation timestamp.
    pub created_at: Value<String>,
    /// Last update timestamp.
    pub updated_at: Value<String>,
}

/// A domain record nested in an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainModel {
    /// Domain identifier, assigned by WorkOS.
    pub id: Value<String>,
    /// Domain name.
    pub domain: Value<String>,
}

/// State of the `workos_organizations` data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationsDataSourceModel {
    /// Placeholder identifier.
    pub id: Value<String>,
    /// Organizations in the order returned by WorkOS.
    pub organizations: Vec<OrganizationModel>,
}

impl OrganizationModel {
    /// Returns the known domain names, in order.
    #[must_use]
    pub fn domain_names(&self) -> Vec<String> {
        self.domains
            .iter()
            .filter_map(|d| d.domain.as_known().cloned())
            .collect()
    }

    /// Compares two models on every attribute except `updated_at`.
    #[must_use]
    pub fn eq_ignoring_updated_at(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.allow_profiles_outside_organization == other.allow_profiles_outside_organization
            && self.domains == other.domains
            && self.created_at == other.created_at
    }
}

impl DomainModel {
    /// Creates a domain record whose identifier is not yet known.
    #[must_use]
    pub fn planned(domain: impl Into<String>) -> Self {
        Self {
            id: Value::Unknown,
            domain: Value::known(domain.into()),
        }
    }
}

/// Builds the local state of an organization from an API response.
#[must_use]
pub fn build_organization_state(organization: &Organization) -> OrganizationModel {
    OrganizationModel {
        id: Value::known(organization.id.clone()),
        name: Value::known(organization.name.clone()),
        allow_profiles_outside_organization: Value::known(
            organization.allow_profiles_outside_organization,
        ),
        domains: organization
            .domains
            .iter()
            .map(|d| DomainModel {
                id: Value::known(d.id.clone()),
                domain: Value::known(d.domain.clone()),
            })
            .collect(),
        created_at: Value::known(organization.created_at.clone()),
        updated_at: Value::known(organization.updated_at.clone()),
    }
}

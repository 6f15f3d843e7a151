//! WorkOS API types and data structures.
//!
//! This module defines the types exchanged with the WorkOS organizations API.

use serde::{Deserialize, Serialize};

/// A WorkOS organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique organization identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether profiles outside the verified domains may sign in.
    #[serde(default)]
    pub allow_profiles_outside_organization: bool,
    /// Domains of the organization.
    #[serde(default)]
    pub domains: Vec<OrganizationDomain>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

/// A domain belonging to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDomain {
    /// Unique domain identifier.
    pub id: String,
    /// Domain name.
    pub domain: String,
}

/// Parameters for creating an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOrganizationOpts {
    /// Display name.
    pub name: String,
    /// Whether profiles outside the verified domains may sign in.
    pub allow_profiles_outside_organization: bool,
    /// Domain names.
    pub domains: Vec<String>,
}

/// Parameters for fetching an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetOrganizationOpts {
    /// Organization identifier.
    pub organization: String,
}

/// Parameters for updating an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOrganizationOpts {
    /// Organization identifier, sent in the path.
    #[serde(skip)]
    pub organization: String,
    /// Display name.
    pub name: String,
    /// Whether profiles outside the verified domains may sign in.
    pub allow_profiles_outside_organization: bool,
    /// Domain names; replaces the current list.
    pub domains: Vec<String>,
}

/// Parameters for deleting an organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOrganizationOpts {
    /// Organization identifier.
    pub organization: String,
}

/// Sort order for list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

/// Parameters for listing organizations.
///
/// The `workos_organizations` data source sends the defaults and reads a
/// single page. The filter and cursor fields serve direct callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationsOpts {
    /// Only organizations with any of these domains.
    pub domains: Vec<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Cursor for the previous page.
    pub before: Option<String>,
    /// Cursor for the next page.
    pub after: Option<String>,
    /// Sort order.
    pub order: Option<ListOrder>,
}

/// A page of organizations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListOrganizationsResponse {
    /// Organizations of this page.
    pub data: Vec<Organization>,
    /// Pagination cursors.
    #[serde(default)]
    pub list_metadata: ListMetadata,
}

/// Pagination cursors of a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListMetadata {
    /// Cursor for the previous page.
    pub before: Option<String>,
    /// Cursor for the next page.
    pub after: Option<String>,
}

impl ListOrder {
    /// Returns the query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl ListOrganizationsOpts {
    /// Builds the query string pairs for this request.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for domain in &self.domains {
            pairs.push(("domains[]", domain.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(before) = &self.before {
            pairs.push(("before", before.clone()));
        }
        if let Some(after) = &self.after {
            pairs.push(("after", after.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        pairs
    }
}

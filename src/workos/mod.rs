//! WorkOS API integration module.
//!
//! This module provides the typed client for the WorkOS organizations API
//! and the [`OrganizationsApi`] trait the provider handlers are written
//! against.

mod api;
mod client;
mod types;

pub use api::OrganizationsApi;
#[cfg(test)]
pub use api::MockOrganizationsApi;
pub use client::{DEFAULT_TIMEOUT_SECS, OrganizationsClient, WORKOS_API_URL};
pub use types::{
    CreateOrganizationOpts, DeleteOrganizationOpts, GetOrganizationOpts, ListMetadata,
    ListOrganizationsOpts, ListOrganizationsResponse, ListOrder, Organization,
    OrganizationDomain, UpdateOrganizationOpts,
};

//! The organizations API seam used by the provider handlers.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{
    CreateOrganizationOpts, DeleteOrganizationOpts, GetOrganizationOpts, ListOrganizationsOpts,
    ListOrganizationsResponse, Organization, UpdateOrganizationOpts,
};

/// Remote operations on WorkOS organizations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationsApi: Send + Sync {
    /// Creates an organization.
    async fn create_organization(&self, opts: &CreateOrganizationOpts) -> Result<Organization>;

    /// Fetches an organization by identifier.
    async fn get_organization(&self, opts: &GetOrganizationOpts) -> Result<Organization>;

    /// Replaces the name, flag and domains of an organization.
    async fn update_organization(&self, opts: &UpdateOrganizationOpts) -> Result<Organization>;

    /// Deletes an organization.
    async fn delete_organization(&self, opts: &DeleteOrganizationOpts) -> Result<()>;

    /// Lists one page of organizations.
    async fn list_organizations(
        &self,
        opts: &ListOrganizationsOpts,
    ) -> Result<ListOrganizationsResponse>;
}

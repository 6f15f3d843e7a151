//! Managed resource handlers.

mod organization;

pub use organization::{OrganizationResource, organization_attributes};

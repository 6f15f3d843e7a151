//! Data source handlers.

mod organizations;

pub use organizations::{ORGANIZATIONS_DATA_SOURCE_ID, OrganizationsDataSource};

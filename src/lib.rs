// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![warn(missing_docs)]                // All public items must be documented
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![warn(unused_imports)]              // Unused imports are reported
#![warn(unused_variables)]            // Unused variables are reported
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// Tests assert with unwrap
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

// ============================================================================
// Crate Documentation
// ============================================================================

//! # Terraform Provider for WorkOS
//!
//! Manages WorkOS organizations, with their domains, as Terraform resources.
//!
//! ## Overview
//!
//! The provider exposes:
//!
//! - `workos_organization`: a managed resource mapping create, read, update,
//!   delete and import onto the WorkOS organizations API
//! - `workos_organizations`: a data source listing organizations
//!
//! ## Architecture
//!
//! 1. **Configuration**: the provider block (`host`, `api_key`) is resolved
//!    against `WORKOS_API_HOST` / `WORKOS_API_KEY` and turns into one shared
//!    API client
//! 2. **Handlers**: the resource and data source translate plans and states
//!    into API calls and back
//! 3. **Plan normalization**: domain order and server-side timestamps are
//!    kept out of the diff
//!
//! ## Modules
//!
//! - [`framework`]: Host boundary types (values, payloads, diagnostics, schemas)
//! - [`config`]: Provider configuration and its resolution
//! - [`workos`]: WorkOS organizations API client
//! - [`provider`]: Provider configuration and type registration
//! - [`resources`]: The `workos_organization` resource
//! - [`datasources`]: The `workos_organizations` data source
//! - [`planner`]: Plan normalization and diffs
//! - [`server`]: Line-delimited JSON serving adapter
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```hcl
//! provider "workos" {}
//!
//! resource "workos_organization" "acme" {
//!   name    = "Acme"
//!   domains = [{ domain = "acme.com" }]
//! }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod framework;
pub mod models;
pub mod planner;
pub mod provider;
pub mod resources;
pub mod server;
pub mod workos;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{ConfigParser, ConfigResolver, ProviderModel, ResolvedConfig};
pub use datasources::OrganizationsDataSource;
pub use error::{ProviderError, Result};
pub use planner::{DiffEngine, PlanDiff};
pub use provider::{WorkosClient, WorkosProvider};
pub use resources::OrganizationResource;
pub use server::ProviderServer;
pub use workos::{OrganizationsApi, OrganizationsClient};

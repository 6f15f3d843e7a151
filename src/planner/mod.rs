//! Planning module for organization changes.
//!
//! This module holds the normalization applied to proposed plans and the
//! diff engine used to report what a plan changes.

mod diff;
mod normalize;

pub use diff::{AttributeChange, DiffEngine, DiffType, KNOWN_AFTER_APPLY, PlanDiff};
pub use normalize::{align_domain_order, domains_equal, normalize_domains, normalize_updated_at};

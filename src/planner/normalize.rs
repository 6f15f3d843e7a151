//! Plan normalization for organizations.
//!
//! WorkOS neither keeps domain order stable nor leaves `updated_at` alone on
//! idempotent writes. The functions here keep such differences from showing
//! up as changes.

use tracing::debug;

use crate::models::{DomainModel, OrganizationModel};

/// Compares two domain lists by domain name, ignoring order.
#[must_use]
pub fn domains_equal(left: &[DomainModel], right: &[DomainModel]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    sorted_names(left) == sorted_names(right)
}

fn sorted_names(domains: &[DomainModel]) -> Vec<Option<&str>> {
    let mut names: Vec<Option<&str>> = domains
        .iter()
        .map(|d| d.domain.as_known().map(String::as_str))
        .collect();
    names.sort_unstable();
    names
}

/// Replaces the domains of `to` with those of `from` when both lists hold
/// the same domains.
pub fn normalize_domains(from: &OrganizationModel, to: &mut OrganizationModel) {
    if to.domains != from.domains && domains_equal(&from.domains, &to.domains) {
        debug!(
            "Reusing domains {:?} in place of {:?}",
            from.domain_names(),
            to.domain_names()
        );
        to.domains.clone_from(&from.domains);
    }
}

/// Carries the state's `updated_at` into the plan when nothing else changes.
pub fn normalize_updated_at(state: &OrganizationModel, plan: &mut OrganizationModel) {
    if plan.updated_at != state.updated_at && state.eq_ignoring_updated_at(plan) {
        debug!(
            "No changes, reusing updated_at {:?} from state in place of {:?}",
            state.updated_at, plan.updated_at
        );
        plan.updated_at = state.updated_at.clone();
    }
}

/// Reorders `domains` to follow `reference` when both hold the same domains.
///
/// Domain identifiers from `domains` are kept, only the order changes.
pub fn align_domain_order(reference: &[DomainModel], domains: &mut Vec<DomainModel>) {
    if !domains_equal(reference, domains) {
        return;
    }

    let mut remaining = std::mem::take(domains);
    for wanted in reference {
        if let Some(position) = remaining.iter().position(|d| d.domain == wanted.domain) {
            domains.push(remaining.remove(position));
        }
    }
    domains.append(&mut remaining);
}

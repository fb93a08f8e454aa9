//! Agreement partitioning and lookup.
//!
//! Splits agreements into active and expired and produces the list order the dashboard
//! shows: every active agreement, then every expired one, each group in input order.

use crate::core::dates::is_expired;
use crate::entities::Agreement;
use chrono::NaiveDate;

/// Agreements split by expiry relative to a reference date.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// Agreements not yet past their end date
    pub active: Vec<&'a Agreement>,
    /// Agreements whose end date is before the reference date
    pub expired: Vec<&'a Agreement>,
}

impl<'a> Partition<'a> {
    /// Number of active agreements
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of expired agreements
    #[must_use]
    pub fn expired_count(&self) -> usize {
        self.expired.len()
    }

    /// Active agreements followed by expired ones.
    #[must_use]
    pub fn display_order(&self) -> Vec<&'a Agreement> {
        self.active
            .iter()
            .chain(self.expired.iter())
            .copied()
            .collect()
    }
}

/// Splits `agreements` into active and expired, preserving input order in each half.
#[must_use]
pub fn partition(agreements: &[Agreement], today: NaiveDate) -> Partition<'_> {
    let (expired, active) = agreements.iter().partition(|a| is_expired(a, today));
    Partition { active, expired }
}

/// Convenience for [`Partition::display_order`].
#[must_use]
pub fn display_order(agreements: &[Agreement], today: NaiveDate) -> Vec<&Agreement> {
    partition(agreements, today).display_order()
}

/// Looks up an agreement by ID.
#[must_use]
pub fn find_by_id<'a>(agreements: &'a [Agreement], id: &str) -> Option<&'a Agreement> {
    agreements.iter().find(|a| a.id == id)
}

/// Agreements whose vendor contains `partial`, case-insensitively.
#[must_use]
pub fn search_by_vendor<'a>(agreements: &'a [Agreement], partial: &str) -> Vec<&'a Agreement> {
    let partial_lower = partial.to_lowercase();
    agreements
        .iter()
        .filter(|a| a.vendor_name().to_lowercase().contains(&partial_lower))
        .collect()
}

/// Resolves user input to an agreement: an exact ID first, then a vendor name that
/// matches exactly one agreement (case-insensitive).
#[must_use]
pub fn resolve<'a>(agreements: &'a [Agreement], input: &str) -> Option<&'a Agreement> {
    let input = input.trim();
    if let Some(found) = find_by_id(agreements, input) {
        return Some(found);
    }
    let input_lower = input.to_lowercase();
    let mut by_vendor = agreements
        .iter()
        .filter(|a| a.vendor_name().to_lowercase() == input_lower);
    match (by_vendor.next(), by_vendor.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}

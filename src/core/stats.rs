//! Dashboard statistics.
//!
//! The four headline numbers (plus the expired count) are recomputed from the current
//! snapshot on every render and never maintained incrementally.

use crate::core::{agreements::partition, events};
use crate::entities::{Agreement, CalendarEvent};
use chrono::NaiveDate;

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// Agreements not yet expired
    pub active_count: usize,
    /// Agreements past their end date
    pub expired_count: usize,
    /// Sum of `total_value` over active agreements, missing values counted as zero
    pub active_total_value: f64,
    /// Events within the upcoming horizon
    pub upcoming_count: usize,
    /// Events within 30 days
    pub urgent_count: usize,
}

/// Computes the dashboard numbers for one render.
#[must_use]
pub fn compute_dashboard_stats(
    agreements: &[Agreement],
    calendar: &[CalendarEvent],
    today: NaiveDate,
    upcoming_horizon_days: i64,
) -> DashboardStats {
    let split = partition(agreements, today);
    let active_total_value = split.active.iter().map(|a| a.value_or_zero()).sum();

    DashboardStats {
        active_count: split.active_count(),
        expired_count: split.expired_count(),
        active_total_value,
        upcoming_count: events::upcoming(calendar, today, upcoming_horizon_days).len(),
        urgent_count: events::urgent(calendar, today).len(),
    }
}

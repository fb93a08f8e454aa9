//! The immutable `{agreements, events}` pair every view is derived from.

use crate::core::{agreements, events, stats};
use crate::entities::{Agreement, CalendarEvent};
use chrono::{DateTime, Local, NaiveDate};

/// One backend-confirmed view of both collections.
///
/// A snapshot is never modified after construction; a reload builds a new one and the
/// orchestrator swaps it in whole.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Every agreement, in backend order
    pub agreements: Vec<Agreement>,
    /// Every calendar event, in backend order
    pub events: Vec<CalendarEvent>,
    /// Reload sequence number; higher is newer, 0 is the empty startup snapshot
    pub generation: u64,
    /// When the data was fetched
    pub loaded_at: DateTime<Local>,
}

impl Snapshot {
    /// The snapshot shown before the first successful load.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), 0)
    }

    /// Wraps freshly fetched collections.
    #[must_use]
    pub fn new(agreements: Vec<Agreement>, events: Vec<CalendarEvent>, generation: u64) -> Self {
        Self {
            agreements,
            events,
            generation,
            loaded_at: Local::now(),
        }
    }

    /// True until the first successful load.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        self.generation == 0
    }

    /// Dashboard numbers for this snapshot.
    #[must_use]
    pub fn stats(&self, today: NaiveDate, upcoming_horizon_days: i64) -> stats::DashboardStats {
        stats::compute_dashboard_stats(&self.agreements, &self.events, today, upcoming_horizon_days)
    }

    /// Looks up an agreement by ID.
    #[must_use]
    pub fn agreement(&self, id: &str) -> Option<&Agreement> {
        agreements::find_by_id(&self.agreements, id)
    }

    /// Events belonging to one agreement, earliest first.
    #[must_use]
    pub fn events_for(&self, agreement_id: &str) -> Vec<&CalendarEvent> {
        events::events_for_agreement(&self.events, agreement_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EventType;
    use crate::test_utils::{agreement, date, event};

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.is_initial());
        assert!(snapshot.agreements.is_empty());
        assert_eq!(snapshot.stats(date("2026-10-19"), 90).active_count, 0);
    }

    #[test]
    fn test_lookups() {
        let snapshot = Snapshot::new(
            vec![agreement("a1", "Acme", Some("2027-01-01"), Some(10.0))],
            vec![
                event("e2", "a1", "2026-12-01", EventType::RenewalDate),
                event("e1", "a1", "2026-11-01", EventType::NoticeDeadline),
                event("e3", "a2", "2026-11-01", EventType::NoticeDeadline),
            ],
            3,
        );
        assert!(!snapshot.is_initial());
        assert_eq!(snapshot.agreement("a1").map(Agreement::vendor_name), Some("Acme"));
        assert!(snapshot.agreement("a2").is_none());
        let ids: Vec<&str> = snapshot.events_for("a1").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e2"]);
    }
}

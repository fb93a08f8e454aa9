//! Event derivation and filtering.
//!
//! Turns the flat event collection into the lists the dashboard renders: upcoming,
//! urgent, all future events and the 42-cell month grid. Past events never appear in
//! any list. Sorting is stable, so events sharing a date keep their input order.

use crate::core::dates::{days_until, first_of_month};
use crate::entities::{CalendarEvent, EventType};
use chrono::{Datelike, Days, NaiveDate};

/// Default window for the upcoming list and the upcoming counter.
pub const DEFAULT_UPCOMING_HORIZON_DAYS: i64 = 90;

/// Events within this many days are urgent.
pub const URGENT_HORIZON_DAYS: i64 = 30;

/// Cells in a month grid: six Sunday-first weeks.
pub const MONTH_GRID_CELLS: usize = 42;

fn within(event: &CalendarEvent, today: NaiveDate, horizon_days: i64) -> bool {
    (0..=horizon_days).contains(&days_until(event.date, today))
}

fn sorted_by_date(mut events: Vec<&CalendarEvent>) -> Vec<&CalendarEvent> {
    events.sort_by_key(|e| e.date);
    events
}

/// Events occurring between today and `horizon_days` from now, inclusive, earliest first.
#[must_use]
pub fn upcoming(
    events: &[CalendarEvent],
    today: NaiveDate,
    horizon_days: i64,
) -> Vec<&CalendarEvent> {
    sorted_by_date(
        events
            .iter()
            .filter(|e| within(e, today, horizon_days))
            .collect(),
    )
}

/// Events occurring today or later, earliest first.
#[must_use]
pub fn future(events: &[CalendarEvent], today: NaiveDate) -> Vec<&CalendarEvent> {
    sorted_by_date(
        events
            .iter()
            .filter(|e| days_until(e.date, today) >= 0)
            .collect(),
    )
}

/// Events occurring within the next 30 days, in input order.
#[must_use]
pub fn urgent(events: &[CalendarEvent], today: NaiveDate) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|e| within(e, today, URGENT_HORIZON_DAYS))
        .collect()
}

/// Whether an event gets urgent emphasis.
#[must_use]
pub fn is_urgent(event: &CalendarEvent, today: NaiveDate) -> bool {
    within(event, today, URGENT_HORIZON_DAYS)
}

/// Days left to act on a notice deadline that has not yet arrived.
#[must_use]
pub fn days_to_act(event: &CalendarEvent, today: NaiveDate) -> Option<i64> {
    let days = days_until(event.date, today);
    (event.event_type == EventType::NoticeDeadline && days > 0).then_some(days)
}

/// All events dated exactly `date`, in input order.
#[must_use]
pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|e| e.date == date).collect()
}

/// All events owned by one agreement, earliest first.
#[must_use]
pub fn events_for_agreement<'a>(
    events: &'a [CalendarEvent],
    agreement_id: &str,
) -> Vec<&'a CalendarEvent> {
    sorted_by_date(
        events
            .iter()
            .filter(|e| e.agreement_id == agreement_id)
            .collect(),
    )
}

/// One day of a month grid.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    /// The calendar date of this cell
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from adjacent months
    pub in_current_month: bool,
    /// True when `date` is the reference date
    pub is_today: bool,
    /// Events dated exactly on `date`
    pub events: Vec<&'a CalendarEvent>,
}

/// A displayed month: 42 cells starting on the Sunday on or before the 1st.
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    /// Displayed year
    pub year: i32,
    /// Displayed month, 1-12
    pub month: u32,
    /// Cells in row-major order, Sunday first
    pub cells: Vec<DayCell<'a>>,
}

impl MonthGrid<'_> {
    /// Number of events placed on days of the displayed month itself.
    #[must_use]
    pub fn events_in_month(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.in_current_month)
            .map(|c| c.events.len())
            .sum()
    }
}

/// Buckets events into the 42-cell grid of `year`/`month`.
///
/// Returns `None` for an invalid month.
#[must_use]
pub fn month_grid(
    events: &[CalendarEvent],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Option<MonthGrid<'_>> {
    let first = first_of_month(year, month)?;
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead))?;

    let cells = start
        .iter_days()
        .take(MONTH_GRID_CELLS)
        .map(|date| DayCell {
            date,
            in_current_month: date.month() == month && date.year() == year,
            is_today: date == today,
            events: events_on(events, date),
        })
        .collect();

    Some(MonthGrid { year, month, cells })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, event};

    fn sample(today: &str) -> Vec<CalendarEvent> {
        let t = date(today);
        let offset = |d: i64| (t + chrono::Duration::days(d)).format("%Y-%m-%d").to_string();
        vec![
            event("e1", "a1", &offset(45), EventType::RenewalDate),
            event("e2", "a1", &offset(-3), EventType::ExpirationDate),
            event("e3", "a2", &offset(0), EventType::NoticeDeadline),
            event("e4", "a2", &offset(120), EventType::ExpirationDate),
            event("e5", "a3", &offset(90), EventType::RenewalDate),
            event("e6", "a3", &offset(30), EventType::NoticeDeadline),
            event("e7", "a4", &offset(91), EventType::RenewalDate),
            event("e8", "a4", &offset(31), EventType::NoticeDeadline),
        ]
    }

    fn ids(events: &[&CalendarEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_upcoming_window_and_order() {
        let today = date("2026-10-19");
        let events = sample("2026-10-19");
        let list = upcoming(&events, today, DEFAULT_UPCOMING_HORIZON_DAYS);
        assert_eq!(ids(&list), ["e3", "e6", "e8", "e1", "e5"]);
    }

    #[test]
    fn test_future_excludes_past_and_sorts() {
        let today = date("2026-10-19");
        let events = sample("2026-10-19");
        let list = future(&events, today);
        assert_eq!(ids(&list), ["e3", "e6", "e8", "e1", "e5", "e7", "e4"]);
    }

    #[test]
    fn test_urgent_keeps_input_order() {
        let today = date("2026-10-19");
        let events = sample("2026-10-19");
        assert_eq!(ids(&urgent(&events, today)), ["e3", "e6"]);
    }

    #[test]
    fn test_upcoming_is_subset_of_future() {
        let today = date("2026-10-19");
        let events = sample("2026-10-19");
        let all_future = future(&events, today);
        for e in upcoming(&events, today, DEFAULT_UPCOMING_HORIZON_DAYS) {
            let d = days_until(e.date, today);
            assert!((0..=90).contains(&d));
            assert!(all_future.iter().any(|f| f.id == e.id));
        }
    }

    #[test]
    fn test_event_today_is_upcoming_and_urgent() {
        let today = date("2026-10-19");
        let events = vec![event("e1", "a1", "2026-10-19", EventType::RenewalDate)];
        assert_eq!(days_until(events[0].date, today), 0);
        assert_eq!(upcoming(&events, today, 90).len(), 1);
        assert_eq!(urgent(&events, today).len(), 1);
        assert!(is_urgent(&events[0], today));
    }

    #[test]
    fn test_same_date_preserves_input_order() {
        let today = date("2026-10-19");
        let events = vec![
            event("late", "a1", "2026-11-02", EventType::RenewalDate),
            event("b", "a2", "2026-11-01", EventType::RenewalDate),
            event("a", "a3", "2026-11-01", EventType::NoticeDeadline),
        ];
        assert_eq!(ids(&upcoming(&events, today, 90)), ["b", "a", "late"]);
    }

    #[test]
    fn test_empty_input_yields_empty_lists() {
        let today = date("2026-10-19");
        assert!(upcoming(&[], today, 90).is_empty());
        assert!(future(&[], today).is_empty());
        assert!(urgent(&[], today).is_empty());
    }

    #[test]
    fn test_days_to_act_only_for_future_notice_deadlines() {
        let today = date("2026-10-19");
        let notice = event("e1", "a1", "2026-10-29", EventType::NoticeDeadline);
        let notice_today = event("e2", "a1", "2026-10-19", EventType::NoticeDeadline);
        let renewal = event("e3", "a1", "2026-10-29", EventType::RenewalDate);
        assert_eq!(days_to_act(&notice, today), Some(10));
        assert_eq!(days_to_act(&notice_today, today), None);
        assert_eq!(days_to_act(&renewal, today), None);
    }

    #[test]
    fn test_events_for_agreement() {
        let events = sample("2026-10-19");
        let list = events_for_agreement(&events, "a2");
        assert_eq!(ids(&list), ["e3", "e4"]);
        assert!(events_for_agreement(&events, "missing").is_empty());
    }

    #[test]
    fn test_month_grid_layout() {
        // October 2026 starts on a Thursday.
        let today = date("2026-10-19");
        let grid = month_grid(&[], 2026, 10, today).unwrap();
        assert_eq!(grid.cells.len(), MONTH_GRID_CELLS);
        assert_eq!(grid.cells[0].date, date("2026-09-27"));
        assert!(!grid.cells[0].in_current_month);
        assert_eq!(grid.cells[4].date, date("2026-10-01"));
        assert!(grid.cells[4].in_current_month);
        assert_eq!(grid.cells[41].date, date("2026-11-07"));
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(grid.cells.iter().filter(|c| c.in_current_month).count(), 31);
    }

    #[test]
    fn test_month_grid_starting_on_sunday() {
        // February 2026 starts on a Sunday, so the grid has no leading days.
        let grid = month_grid(&[], 2026, 2, date("2026-10-19")).unwrap();
        assert_eq!(grid.cells[0].date, date("2026-02-01"));
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_month_grid_buckets_by_exact_date() {
        let today = date("2026-10-19");
        let events = vec![
            event("e1", "a1", "2026-10-19", EventType::RenewalDate),
            event("e2", "a2", "2026-10-19", EventType::NoticeDeadline),
            event("e3", "a3", "2026-11-03", EventType::ExpirationDate),
            event("e4", "a4", "2027-01-01", EventType::ExpirationDate),
        ];
        let grid = month_grid(&events, 2026, 10, today).unwrap();
        let today_cell = grid.cells.iter().find(|c| c.is_today).unwrap();
        assert_eq!(ids(&today_cell.events), ["e1", "e2"]);

        let trailing = grid.cells.iter().find(|c| c.date == date("2026-11-03")).unwrap();
        assert!(!trailing.in_current_month);
        assert_eq!(trailing.events.len(), 1);

        assert_eq!(grid.events_in_month(), 2);
        assert_eq!(grid.cells.iter().map(|c| c.events.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_month_grid_invalid_month() {
        assert!(month_grid(&[], 2026, 0, date("2026-10-19")).is_none());
        assert!(month_grid(&[], 2026, 13, date("2026-10-19")).is_none());
    }
}

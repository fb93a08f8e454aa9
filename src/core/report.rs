//! Text rendering of the derived views.
//!
//! These functions turn core data into the strings the bot sends. They are
//! framework-agnostic and only format; every filtering decision happens in
//! [`crate::core::events`] and [`crate::core::agreements`].

use crate::core::{
    dates::{days_until, format_currency, format_date, format_days_until, is_expired},
    events::{MonthGrid, days_to_act, is_urgent},
    stats::DashboardStats,
};
use crate::entities::{Agreement, CalendarEvent};
use chrono::{Datelike, NaiveDate};
use std::fmt::Write;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a month, 1-12.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// The four dashboard cards as `(label, value)` pairs.
#[must_use]
pub fn dashboard_fields(stats: &DashboardStats, upcoming_horizon_days: i64) -> Vec<(String, String)> {
    let mut active = stats.active_count.to_string();
    if stats.expired_count > 0 {
        // write! is infallible when writing to String
        let _ = write!(active, "\n{} expired", stats.expired_count);
    }

    vec![
        ("📄 Active Agreements".to_string(), active),
        (
            "💲 Active Value".to_string(),
            format_currency(stats.active_total_value),
        ),
        (
            format!("⏳ Upcoming ({upcoming_horizon_days} days)"),
            stats.upcoming_count.to_string(),
        ),
        (
            "🚨 Urgent (30 days)".to_string(),
            stats.urgent_count.to_string(),
        ),
    ]
}

/// One event as a list entry.
///
/// Shows the type marker, vendor, urgency flag, date, relative day count, recurrence,
/// description and, for notice deadlines, the days left to act.
#[must_use]
pub fn format_event_line(event: &CalendarEvent, today: NaiveDate) -> String {
    let days = days_until(event.date, today);
    let mut line = format!("{} **{}**", event.event_type.marker(), event.vendor_name());
    if is_urgent(event, today) {
        line.push_str(" ⚠️");
    }
    let _ = write!(
        line,
        " · {} · {} ({})",
        event.event_type,
        format_date(event.date),
        format_days_until(days)
    );
    if event.is_recurring {
        line.push_str(" · 🔄 Recurring");
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(line, "\n  {description}");
    }
    if let Some(days_left) = days_to_act(event, today) {
        let _ = write!(line, "\n  ⏰ {days_left} days to act");
    }
    line
}

/// A list of events, truncated to `limit` entries with a note about the rest.
/// An empty list renders as `empty`.
#[must_use]
pub fn format_event_list(
    events: &[&CalendarEvent],
    today: NaiveDate,
    limit: usize,
    empty: &str,
) -> String {
    if events.is_empty() {
        return empty.to_string();
    }

    let mut out = String::new();
    for event in events.iter().take(limit) {
        let _ = writeln!(out, "{}", format_event_line(event, today));
    }
    if events.len() > limit {
        let _ = writeln!(out, "_…and {} more_", events.len() - limit);
    }
    out
}

/// One agreement as a list entry.
#[must_use]
pub fn format_agreement_line(agreement: &Agreement, today: NaiveDate) -> String {
    let expired = is_expired(agreement, today);
    let mut line = format!("📄 **{}**", agreement.vendor_name());
    if expired {
        line.push_str(" `EXPIRED`");
    }
    if let Some(value) = agreement.total_value {
        let _ = write!(line, " · {} {}", format_currency(value), agreement.currency);
    }
    if let Some(end) = agreement.end_date {
        let label = if expired { "Expired" } else { "Expires" };
        let _ = write!(line, " · {label}: {}", format_date(end));
    }
    let _ = write!(line, "\n  `{}` · {}", agreement.id, agreement.filename);
    line
}

/// Full details of one agreement and its events.
#[must_use]
pub fn format_agreement_details(
    agreement: &Agreement,
    events: &[&CalendarEvent],
    today: NaiveDate,
) -> String {
    let mut out = format!("📋 **Agreement: {}**\n\n", agreement.vendor_name());
    let optional_date = |d: Option<NaiveDate>| d.map_or_else(|| "—".to_string(), format_date);

    let _ = writeln!(out, "📁 File: {}", agreement.filename);
    if let Some(buyer) = agreement.buyer.as_deref() {
        let _ = writeln!(out, "🏢 Buyer: {buyer}");
    }
    if agreement.order_date.is_some() {
        let _ = writeln!(out, "🧾 Ordered: {}", optional_date(agreement.order_date));
    }
    let _ = writeln!(out, "▶️ Effective: {}", optional_date(agreement.effective_date));
    let _ = writeln!(out, "⏹️ Ends: {}", optional_date(agreement.end_date));
    if let Some(term) = agreement.term_length_months {
        let _ = writeln!(out, "📆 Term: {term} months");
    }
    let value = agreement
        .total_value
        .map_or_else(|| "—".to_string(), format_currency);
    let _ = writeln!(out, "💰 Value: {value} {}", agreement.currency);
    let status = if is_expired(agreement, today) {
        "Expired"
    } else {
        "Active"
    };
    let _ = writeln!(out, "📌 Status: {status}\n");

    if events.is_empty() {
        out.push_str("_No calendar events_\n");
    } else {
        out.push_str("**Calendar Events:**\n");
        for event in events {
            let _ = writeln!(out, "• {}", format_event_line(event, today));
        }
    }
    out
}

/// Renders a month grid as a fixed-width block.
///
/// Each cell is four columns: `>` marks today, `*` marks a day with events, and days
/// outside the displayed month are left blank.
#[must_use]
pub fn format_month_grid(grid: &MonthGrid<'_>) -> String {
    let mut out = format!("{} {}\n", month_name(grid.month), grid.year);
    out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa\n");

    for week in grid.cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|cell| {
                if !cell.in_current_month {
                    return "    ".to_string();
                }
                let prefix = if cell.is_today { '>' } else { ' ' };
                let suffix = if cell.events.is_empty() { ' ' } else { '*' };
                format!("{prefix}{:>2}{suffix}", cell.date.day())
            })
            .collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

/// Cuts `text` to at most `max_chars` characters, ending in `…` when shortened.
#[must_use]
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

//! Temporal utilities - days-until math, expiry classification and display formatting.
//!
//! Every function takes the reference date explicitly. Callers that want "now" pass
//! [`today`]; tests pass a fixed date.

use crate::entities::Agreement;
use chrono::{Datelike, Local, NaiveDate};

/// The local calendar date, used as the default reference date at call sites.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Signed number of calendar days from `today` to `date`.
///
/// `0` for today, `1` for tomorrow, `-1` for yesterday. Time of day plays no part.
#[must_use]
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// An agreement is expired iff it has an end date strictly before `today`.
#[must_use]
pub fn is_expired(agreement: &Agreement, today: NaiveDate) -> bool {
    agreement.end_date.is_some_and(|end| today > end)
}

/// Formats a date the way the dashboard shows it, e.g. `Jan 5, 2025`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats an amount as US dollars with thousands separators, e.g. `$1,234.56`.
///
/// Every currency renders this way; the code is shown separately where it matters.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round();
    // Cast safety: dashboard totals stay far below 2^53 cents.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Relative label for a days-until value.
#[must_use]
pub fn format_days_until(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        d if d > 1 => format!("in {d} days"),
        d => format!("{} days ago", d.abs()),
    }
}

/// First day of the month.
#[must_use]
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// `(year, month)` of the month before the given one.
#[must_use]
pub const fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// `(year, month)` of the month after the given one.
#[must_use]
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// `(year, month)` containing `date`.
#[must_use]
pub fn month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Parses an ISO `YYYY-MM-DD` date as entered in a form.
#[must_use]
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

//! Calendar event entity - A date-anchored reminder derived from an agreement.
//!
//! The backend generates these from the agreement's notice period, renewal and end
//! dates and regenerates them whenever the agreement is edited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of date an event marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Last day to give notice before an auto-renewal
    NoticeDeadline,
    /// Date the agreement renews
    RenewalDate,
    /// Date the agreement ends
    ExpirationDate,
    /// Any type string this client does not know about
    #[serde(other)]
    Other,
}

impl EventType {
    /// Human-readable label, e.g. "notice deadline"
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoticeDeadline => "notice deadline",
            Self::RenewalDate => "renewal date",
            Self::ExpirationDate => "expiration date",
            Self::Other => "event",
        }
    }

    /// Marker shown next to the event in lists and on the month grid
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::NoticeDeadline => "🟠",
            Self::RenewalDate => "🔵",
            Self::ExpirationDate => "🔴",
            Self::Other => "⚪",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar event as returned by `GET /calendar`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Opaque unique identifier
    pub id: String,
    /// Agreement this event belongs to
    pub agreement_id: String,
    /// What the date means
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Day the event occurs
    pub date: NaiveDate,
    /// Vendor of the owning agreement
    #[serde(default)]
    pub vendor: Option<String>,
    /// Source document of the owning agreement
    #[serde(default)]
    pub filename: Option<String>,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the event repeats; display only
    #[serde(default)]
    pub is_recurring: bool,
}

impl CalendarEvent {
    /// Vendor name for display
    #[must_use]
    pub fn vendor_name(&self) -> &str {
        self.vendor
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("Unknown vendor")
    }
}

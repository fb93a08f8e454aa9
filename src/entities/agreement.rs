//! Agreement entity - Represents one vendor purchase or subscription contract.
//!
//! Agreements are created by the backend from an uploaded PDF. Whether an agreement is
//! expired is never stored; see [`crate::core::dates::is_expired`].

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies an agreement can be denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// Pound sterling
    Gbp,
    /// Canadian dollar
    Cad,
}

impl Currency {
    /// ISO 4217 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Agreement record as returned by `GET /agreements`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Agreement {
    /// Opaque unique identifier
    pub id: String,
    /// Name of the source document
    pub filename: String,
    /// Company providing the service; `None` when extraction failed
    #[serde(default)]
    pub vendor: Option<String>,
    /// Company purchasing the service
    #[serde(default)]
    pub buyer: Option<String>,
    /// Date the order was placed
    #[serde(default)]
    pub order_date: Option<NaiveDate>,
    /// When the agreement becomes effective
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    /// When the agreement ends
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Contract length in months
    #[serde(default)]
    pub term_length_months: Option<u32>,
    /// Total contract value in `currency`
    #[serde(default)]
    pub total_value: Option<f64>,
    /// Currency of `total_value`
    #[serde(default)]
    pub currency: Currency,
    /// When the backend created the record
    pub created_at: NaiveDateTime,
}

impl Agreement {
    /// Vendor name for display, with a placeholder when the backend has none.
    #[must_use]
    pub fn vendor_name(&self) -> &str {
        self.vendor
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("Unknown vendor")
    }

    /// Total value with a missing amount counted as zero.
    #[must_use]
    pub fn value_or_zero(&self) -> f64 {
        self.total_value.unwrap_or(0.0)
    }
}

//! Client-side validation for agreement edits and uploads.
//!
//! Nothing here touches the network: a form that fails validation is never sent, and a
//! non-PDF upload is rejected before any request is built.

use crate::core::dates::parse_iso_date;
use crate::entities::{Agreement, Currency};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Editable agreement fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Vendor name
    Vendor,
    /// Effective date
    EffectiveDate,
    /// End date
    EndDate,
    /// Term length in months
    TermLengthMonths,
    /// Total value
    TotalValue,
}

impl Field {
    /// Wire name of the field
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::EffectiveDate => "effective_date",
            Self::EndDate => "end_date",
            Self::TermLengthMonths => "term_length_months",
            Self::TotalValue => "total_value",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field validation messages, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    /// Records a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// True when no field failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed fields and their messages, in field order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Raw edit-form input. Dates are the strings the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgreementForm {
    /// Vendor name
    pub vendor: String,
    /// Effective date as `YYYY-MM-DD`
    pub effective_date: String,
    /// End date as `YYYY-MM-DD`
    pub end_date: String,
    /// Term length in months
    pub term_length_months: Option<i64>,
    /// Total value
    pub total_value: Option<f64>,
    /// Currency
    pub currency: Currency,
}

impl AgreementForm {
    /// Pre-fills the form from an existing agreement, the way the edit dialog opens.
    #[must_use]
    pub fn from_agreement(agreement: &Agreement) -> Self {
        let iso = |d: Option<NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        Self {
            vendor: agreement.vendor.clone().unwrap_or_default(),
            effective_date: iso(agreement.effective_date),
            end_date: iso(agreement.end_date),
            term_length_months: agreement.term_length_months.map(i64::from),
            total_value: agreement.total_value,
            currency: agreement.currency,
        }
    }
}

/// A validated `PUT /agreements/{id}` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementUpdate {
    /// Vendor name, trimmed
    pub vendor: String,
    /// Effective date
    pub effective_date: NaiveDate,
    /// End date, strictly after `effective_date`
    pub end_date: NaiveDate,
    /// Term length, at least one month
    pub term_length_months: u32,
    /// Non-negative total value
    pub total_value: f64,
    /// Currency
    pub currency: Currency,
}

fn required_date(
    input: &str,
    field: Field,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<NaiveDate> {
    if input.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
        return None;
    }
    let parsed = parse_iso_date(input);
    if parsed.is_none() {
        errors.insert(field, format!("{label} must be a valid date (YYYY-MM-DD)"));
    }
    parsed
}

/// Validates an edit form, collecting every field error rather than stopping at the first.
///
/// # Errors
/// Returns the full [`ValidationErrors`] map when any field fails.
pub fn validate_agreement_form(form: &AgreementForm) -> Result<AgreementUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let vendor = form.vendor.trim();
    if vendor.is_empty() {
        errors.insert(Field::Vendor, "Vendor name is required");
    }

    let effective = required_date(&form.effective_date, Field::EffectiveDate, "Effective date", &mut errors);
    let end = required_date(&form.end_date, Field::EndDate, "End date", &mut errors);
    if let (Some(effective), Some(end)) = (effective, end) {
        if end <= effective {
            errors.insert(Field::EndDate, "End date must be after effective date");
        }
    }

    let term = form
        .term_length_months
        .filter(|t| *t >= 1)
        .and_then(|t| u32::try_from(t).ok());
    if term.is_none() {
        errors.insert(Field::TermLengthMonths, "Term length must be at least 1 month");
    }

    let value = form.total_value.filter(|v| v.is_finite() && *v >= 0.0);
    if value.is_none() {
        errors.insert(Field::TotalValue, "Total value must be a non-negative number");
    }

    match (effective, end, term, value) {
        (Some(effective_date), Some(end_date), Some(term_length_months), Some(total_value))
            if errors.is_empty() =>
        {
            Ok(AgreementUpdate {
                vendor: vendor.to_string(),
                effective_date,
                end_date,
                term_length_months,
                total_value,
                currency: form.currency,
            })
        }
        _ => Err(errors),
    }
}

/// MIME type the backend accepts for uploads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Checks that an upload is a PDF before anything is sent.
///
/// A declared content type wins; without one the file extension decides.
///
/// # Errors
/// Returns the message shown to the user when the file is not a PDF.
pub fn check_pdf_upload(filename: &str, content_type: Option<&str>) -> Result<(), String> {
    let is_pdf = content_type.map_or_else(
        || {
            std::path::Path::new(filename)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        },
        |ct| {
            ct.split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        },
    );

    if is_pdf {
        Ok(())
    } else {
        Err("Please upload a PDF file".to_string())
    }
}

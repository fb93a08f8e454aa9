//! Backend API - the contract between the dashboard and the agreement backend.
//!
//! The backend parses uploaded PDFs, persists agreements and generates their calendar
//! events. This module only describes the endpoints the dashboard consumes
//! ([`AgreementApi`]) and provides the HTTP implementation ([`HttpAgreementApi`]).

/// reqwest-backed implementation of [`AgreementApi`]
pub mod http;

pub use http::HttpAgreementApi;

use crate::{
    core::validation::AgreementUpdate,
    entities::{Agreement, CalendarEvent},
    errors::Result,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadResponse {
    /// Status message from the backend
    pub message: String,
    /// The agreement that was created
    pub agreement: Agreement,
}

/// Body of a successful `PUT /agreements/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateResponse {
    /// The agreement after the edit
    pub agreement: Agreement,
    /// Whether the backend regenerated the agreement's calendar events
    #[serde(default)]
    pub calendar_updated: bool,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the backend is up
    pub status: String,
    /// Backend clock at the time of the check
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// True when the backend reports itself healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// One entry of `GET /calendar/upcoming`, which carries a server-computed day count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpcomingEvent {
    /// Event identifier
    pub id: String,
    /// Day the event occurs
    pub date: NaiveDate,
    /// Event type as sent by the backend
    #[serde(rename = "type")]
    pub event_type: crate::entities::EventType,
    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Vendor of the owning agreement
    #[serde(default)]
    pub vendor: Option<String>,
    /// Source document of the owning agreement
    #[serde(default)]
    pub filename: Option<String>,
    /// Days from the backend's today
    pub days_until: i64,
}

/// Optional date range for `GET /calendar`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Inclusive lower bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Query parameters for the range, omitting unset bounds.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let iso = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        self.start_date
            .map(|d| ("start_date", iso(d)))
            .into_iter()
            .chain(self.end_date.map(|d| ("end_date", iso(d))))
            .collect()
    }
}

/// Operations the agreement backend provides.
#[async_trait]
pub trait AgreementApi: Send + Sync {
    /// `GET /agreements`
    async fn list_agreements(&self) -> Result<Vec<Agreement>>;

    /// `GET /calendar` with an optional date range
    async fn list_events(&self, range: DateRange) -> Result<Vec<CalendarEvent>>;

    /// `GET /calendar/upcoming`
    async fn upcoming_events(&self) -> Result<Vec<UpcomingEvent>>;

    /// `POST /upload` with the PDF as multipart field `file`
    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadResponse>;

    /// `PUT /agreements/{id}`
    async fn update_agreement(&self, id: &str, update: &AgreementUpdate) -> Result<UpdateResponse>;

    /// `DELETE /agreements/{id}`
    async fn delete_agreement(&self, id: &str) -> Result<()>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_date_range_query_pairs() {
        assert!(DateRange::default().query_pairs().is_empty());

        let range = DateRange {
            start_date: Some(date("2026-10-01")),
            end_date: Some(date("2026-10-31")),
        };
        assert_eq!(
            range.query_pairs(),
            vec![
                ("start_date", "2026-10-01".to_string()),
                ("end_date", "2026-10-31".to_string())
            ]
        );

        let open_ended = DateRange {
            start_date: None,
            end_date: Some(date("2026-12-31")),
        };
        assert_eq!(open_ended.query_pairs(), vec![("end_date", "2026-12-31".to_string())]);
    }

    #[test]
    fn test_parse_update_response() {
        let json = r#"{
            "agreement": {"id": "a1", "filename": "x.pdf", "vendor": "Acme",
                          "created_at": "2025-01-01T00:00:00"},
            "calendar_updated": true
        }"#;
        let response: UpdateResponse = serde_json::from_str(json).unwrap();
        assert!(response.calendar_updated);
        assert_eq!(response.agreement.id, "a1");
    }

    #[test]
    fn test_parse_upload_and_upcoming_payloads() {
        let upload = r#"{
            "message": "PDF processed successfully",
            "agreement_id": "a7",
            "agreement": {"id": "a7", "filename": "globex.pdf", "vendor": "Globex",
                          "created_at": "2026-10-19T08:00:00.000001"}
        }"#;
        let response: UploadResponse = serde_json::from_str(upload).unwrap();
        assert_eq!(response.agreement.vendor_name(), "Globex");

        let upcoming = r#"[{"id": "e1", "date": "2026-11-01", "type": "renewal_date",
                            "description": "Annual renewal", "vendor": "Globex",
                            "filename": "globex.pdf", "days_until": 13}]"#;
        let events: Vec<UpcomingEvent> = serde_json::from_str(upcoming).unwrap();
        assert_eq!(events[0].days_until, 13);

        let health: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "timestamp": "2026-10-19T08:00:00"}"#)
                .unwrap();
        assert!(health.is_healthy());
    }
}

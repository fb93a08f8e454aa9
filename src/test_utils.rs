//! Shared test utilities.
//!
//! Fixture builders with sensible defaults and an in-memory [`FakeApi`] that behaves like
//! the backend, so orchestrator tests never touch the network.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use crate::{
    api::{AgreementApi, DateRange, HealthStatus, UpcomingEvent, UpdateResponse, UploadResponse},
    core::{dates, orchestrator::Orchestrator, validation::AgreementUpdate},
    entities::{Agreement, CalendarEvent, Currency, EventType},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Parses a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date literal")
}

fn created_at() -> NaiveDateTime {
    date("2025-01-01").and_hms_opt(9, 0, 0).unwrap()
}

/// Creates a test agreement.
///
/// # Defaults
/// * `filename`: `"<id>.pdf"`
/// * `effective_date`, `order_date`, `buyer`: None
/// * `term_length_months`: 12
/// * `currency`: USD
pub fn agreement(
    id: &str,
    vendor: &str,
    end_date: Option<&str>,
    total_value: Option<f64>,
) -> Agreement {
    Agreement {
        id: id.to_string(),
        filename: format!("{id}.pdf"),
        vendor: Some(vendor.to_string()),
        buyer: None,
        order_date: None,
        effective_date: None,
        end_date: end_date.map(date),
        term_length_months: Some(12),
        total_value,
        currency: Currency::Usd,
        created_at: created_at(),
    }
}

/// Creates a test calendar event.
pub fn event(id: &str, agreement_id: &str, on: &str, event_type: EventType) -> CalendarEvent {
    CalendarEvent {
        id: id.to_string(),
        agreement_id: agreement_id.to_string(),
        event_type,
        date: date(on),
        vendor: Some(format!("Vendor {agreement_id}")),
        filename: Some(format!("{agreement_id}.pdf")),
        description: Some(format!("{} for {agreement_id}", event_type.label())),
        is_recurring: false,
    }
}

#[derive(Default)]
struct FakeState {
    agreements: Vec<Agreement>,
    events: Vec<CalendarEvent>,
    calls: HashMap<&'static str, usize>,
    fail_next: Option<(u16, String)>,
    fail_lists: bool,
    next_id: usize,
}

/// In-memory backend. Deleting an agreement removes its events, as the real one does.
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    /// A backend holding the given records.
    pub fn new(agreements: Vec<Agreement>, events: Vec<CalendarEvent>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                agreements,
                events,
                ..FakeState::default()
            }),
        }
    }

    /// How many times a mutating endpoint (`upload`, `update`, `delete`) was called.
    pub fn calls(&self, endpoint: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Makes the next mutating call fail with the given status.
    pub fn fail_next(&self, status: u16, message: &str) {
        self.state.lock().unwrap().fail_next = Some((status, message.to_string()));
    }

    /// Makes the list endpoints fail with 503 until switched off again.
    pub fn fail_lists(&self, fail: bool) {
        self.state.lock().unwrap().fail_lists = fail;
    }

    fn check_lists(state: &FakeState) -> Result<()> {
        if state.fail_lists {
            return Err(Error::Backend {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn record(&self, endpoint: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(endpoint).or_default() += 1;
        match state.fail_next.take() {
            Some((status, message)) => Err(Error::Backend { status, message }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AgreementApi for FakeApi {
    async fn list_agreements(&self) -> Result<Vec<Agreement>> {
        let state = self.state.lock().unwrap();
        Self::check_lists(&state)?;
        Ok(state.agreements.clone())
    }

    async fn list_events(&self, range: DateRange) -> Result<Vec<CalendarEvent>> {
        let state = self.state.lock().unwrap();
        Self::check_lists(&state)?;
        Ok(state
            .events
            .iter()
            .filter(|e| range.start_date.is_none_or(|s| e.date >= s))
            .filter(|e| range.end_date.is_none_or(|end| e.date <= end))
            .cloned()
            .collect())
    }

    async fn upcoming_events(&self) -> Result<Vec<UpcomingEvent>> {
        let today = dates::today();
        let state = self.state.lock().unwrap();
        Ok(state
            .events
            .iter()
            .map(|e| UpcomingEvent {
                id: e.id.clone(),
                date: e.date,
                event_type: e.event_type,
                description: e.description.clone(),
                vendor: e.vendor.clone(),
                filename: e.filename.clone(),
                days_until: dates::days_until(e.date, today),
            })
            .filter(|e| (0..=90).contains(&e.days_until))
            .collect())
    }

    async fn upload_pdf(&self, filename: &str, _bytes: Vec<u8>) -> Result<UploadResponse> {
        self.record("upload")?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("new-{}", state.next_id);
        let vendor = filename.trim_end_matches(".pdf");
        let mut created = agreement(&id, vendor, None, None);
        created.filename = filename.to_string();
        state.agreements.push(created.clone());
        Ok(UploadResponse {
            message: "PDF processed successfully".to_string(),
            agreement: created,
        })
    }

    async fn update_agreement(&self, id: &str, update: &AgreementUpdate) -> Result<UpdateResponse> {
        self.record("update")?;
        let mut state = self.state.lock().unwrap();
        let existing = state
            .agreements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| Error::Backend {
                status: 404,
                message: "Agreement not found".to_string(),
            })?;
        existing.vendor = Some(update.vendor.clone());
        existing.effective_date = Some(update.effective_date);
        existing.end_date = Some(update.end_date);
        existing.term_length_months = Some(update.term_length_months);
        existing.total_value = Some(update.total_value);
        existing.currency = update.currency;
        Ok(UpdateResponse {
            agreement: existing.clone(),
            calendar_updated: true,
        })
    }

    async fn delete_agreement(&self, id: &str) -> Result<()> {
        self.record("delete")?;
        let mut state = self.state.lock().unwrap();
        state.agreements.retain(|a| a.id != id);
        state.events.retain(|e| e.agreement_id != id);
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: None,
        })
    }
}

/// Two agreements and three events: agreement `1` (Acme Cloud) owns `e1` and `e2`,
/// agreement `2` (Globex) owns `e3`.
pub fn sample_api() -> FakeApi {
    FakeApi::new(
        vec![
            agreement("1", "Acme Cloud", Some("2099-01-01"), Some(12_000.0)),
            agreement("2", "Globex", Some("2020-06-30"), Some(800.0)),
        ],
        vec![
            event("e1", "1", "2098-10-03", EventType::NoticeDeadline),
            event("e2", "1", "2099-01-01", EventType::ExpirationDate),
            event("e3", "2", "2020-06-30", EventType::ExpirationDate),
        ],
    )
}

/// Sets up an orchestrator over [`sample_api`] with the first snapshot loaded.
/// Returns (orchestrator, api) so tests can inspect the calls made.
pub async fn setup_orchestrator() -> Result<(Orchestrator, Arc<FakeApi>)> {
    let api = Arc::new(sample_api());
    let orchestrator = Orchestrator::new(Arc::clone(&api) as Arc<dyn AgreementApi>);
    orchestrator.reload().await?;
    Ok((orchestrator, api))
}

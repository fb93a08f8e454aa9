//! Mutation orchestration.
//!
//! The orchestrator owns the canonical [`Snapshot`]. Every mutation is a single
//! request/reload round trip: validate locally, send one request, then reload both
//! collections in full. A rejected or failed request leaves the previously installed
//! snapshot in place. Once the backend has accepted a mutation it is reported as done,
//! even when the reload that follows fails.

use crate::{
    api::{AgreementApi, DateRange, UpdateResponse},
    core::{
        snapshot::Snapshot,
        validation::{AgreementForm, check_pdf_upload, validate_agreement_form},
    },
    entities::Agreement,
    errors::{Error, Result},
};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Result of a mutation the backend accepted.
#[derive(Debug)]
pub struct Outcome<T> {
    /// What the backend returned
    pub value: T,
    /// Set when the follow-up reload failed; the previous snapshot is still installed
    pub reload_error: Option<Error>,
}

impl<T> Outcome<T> {
    /// True when the installed snapshot does not yet reflect this mutation.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.reload_error.is_some()
    }
}

/// Owns the current snapshot and routes mutations to the backend.
pub struct Orchestrator {
    api: Arc<dyn AgreementApi>,
    snapshot: RwLock<Arc<Snapshot>>,
    next_generation: AtomicU64,
}

impl Orchestrator {
    /// Creates an orchestrator holding the empty startup snapshot.
    #[must_use]
    pub fn new(api: Arc<dyn AgreementApi>) -> Self {
        Self {
            api,
            snapshot: RwLock::new(Arc::new(Snapshot::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// The backend this orchestrator talks to.
    #[must_use]
    pub fn api(&self) -> &dyn AgreementApi {
        self.api.as_ref()
    }

    /// The currently installed snapshot.
    pub async fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Fetches both collections and installs them as a new snapshot.
    ///
    /// Reloads are numbered when they start. A reload that finishes after a newer one
    /// has already been installed is discarded, and the newer snapshot is returned.
    ///
    /// # Errors
    /// Returns the first backend error; the installed snapshot is left unchanged.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<Arc<Snapshot>> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let (agreements, events) = tokio::try_join!(
            self.api.list_agreements(),
            self.api.list_events(DateRange::default())
        )?;
        debug!(
            generation,
            agreements = agreements.len(),
            events = events.len(),
            "fetched snapshot"
        );

        Ok(self
            .install(Snapshot::new(agreements, events, generation))
            .await)
    }

    /// Installs `fresh` unless a newer snapshot is already in place; returns whichever
    /// snapshot is installed afterwards.
    async fn install(&self, fresh: Snapshot) -> Arc<Snapshot> {
        let mut installed = self.snapshot.write().await;
        if fresh.generation > installed.generation {
            *installed = Arc::new(fresh);
        } else {
            warn!(
                generation = fresh.generation,
                installed = installed.generation,
                "discarding stale reload"
            );
        }
        Arc::clone(&installed)
    }

    /// Reloads after a committed mutation without turning a reload failure into an error.
    async fn reload_after<T>(&self, value: T) -> Outcome<T> {
        let reload_error = self
            .reload()
            .await
            .inspect_err(|e| warn!("mutation applied but reload failed: {}", e))
            .err();
        Outcome {
            value,
            reload_error,
        }
    }

    /// Uploads a PDF for the backend to turn into an agreement, then reloads.
    ///
    /// # Errors
    /// [`Error::UnsupportedInput`] for non-PDF files (nothing is sent), otherwise the
    /// backend error. A failed reload is reported in the [`Outcome`] instead.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        filename: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Outcome<Agreement>> {
        check_pdf_upload(filename, content_type)
            .map_err(|message| Error::UnsupportedInput { message })?;

        let response = self.api.upload_pdf(filename, bytes).await?;
        info!(agreement = %response.agreement.id, "{}", response.message);
        Ok(self.reload_after(response.agreement).await)
    }

    /// Validates an edit form and, if it passes, sends it and reloads.
    ///
    /// # Errors
    /// [`Error::Validation`] when the form fails (nothing is sent),
    /// [`Error::AgreementNotFound`] when `id` is not in the current snapshot, otherwise
    /// the backend error.
    #[instrument(skip(self, form))]
    pub async fn update(
        &self,
        id: &str,
        form: &AgreementForm,
    ) -> Result<Outcome<UpdateResponse>> {
        let update = validate_agreement_form(form)?;
        if self.snapshot().await.agreement(id).is_none() {
            return Err(Error::AgreementNotFound { id: id.to_string() });
        }

        let response = self.api.update_agreement(id, &update).await?;
        info!(calendar_updated = response.calendar_updated, "agreement updated");
        Ok(self.reload_after(response).await)
    }

    /// Deletes an agreement (the backend removes its events too), then reloads.
    ///
    /// Returns the agreement as it was last seen, if it was in the snapshot.
    ///
    /// # Errors
    /// The backend error. A failed reload is reported in the [`Outcome`] instead.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Outcome<Option<Agreement>>> {
        let removed = self.snapshot().await.agreement(id).cloned();
        self.api.delete_agreement(id).await?;
        info!("agreement deleted");
        Ok(self.reload_after(removed).await)
    }
}

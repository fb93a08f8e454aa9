use super::{
    AgreementApi, DateRange, HealthStatus, UpcomingEvent, UpdateResponse, UploadResponse,
};
use crate::{
    config::backend::BackendConfig,
    core::validation::{AgreementUpdate, PDF_CONTENT_TYPE},
    entities::{Agreement, CalendarEvent},
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{Client, Response, multipart};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to the agreement backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAgreementApi {
    client: Client,
    base_url: String,
}

impl HttpAgreementApi {
    /// Builds a client for the configured backend.
    ///
    /// # Errors
    /// Fails if the TLS backend cannot be initialised.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Pulls the backend's `{"error": "..."}` message out of a failure body.
fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

/// Turns a non-2xx response into [`Error::Backend`]; passes successes through.
async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message =
        error_message_from_body(&body).unwrap_or_else(|| format!("Failed to {action}"));
    warn!(status = status.as_u16(), %message, "backend request failed");
    Err(Error::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let response = check_status(response, action).await?;
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl AgreementApi for HttpAgreementApi {
    async fn list_agreements(&self) -> Result<Vec<Agreement>> {
        let response = self.client.get(self.endpoint("agreements")).send().await?;
        let agreements: Vec<Agreement> = read_json(response, "fetch agreements").await?;
        debug!(count = agreements.len(), "fetched agreements");
        Ok(agreements)
    }

    async fn list_events(&self, range: DateRange) -> Result<Vec<CalendarEvent>> {
        let response = self
            .client
            .get(self.endpoint("calendar"))
            .query(&range.query_pairs())
            .send()
            .await?;
        let events: Vec<CalendarEvent> = read_json(response, "fetch calendar data").await?;
        debug!(count = events.len(), "fetched calendar events");
        Ok(events)
    }

    async fn upcoming_events(&self) -> Result<Vec<UpcomingEvent>> {
        let response = self
            .client
            .get(self.endpoint("calendar/upcoming"))
            .send()
            .await?;
        read_json(response, "fetch upcoming dates").await
    }

    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<UploadResponse> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(PDF_CONTENT_TYPE)?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        read_json(response, "process PDF").await
    }

    async fn update_agreement(&self, id: &str, update: &AgreementUpdate) -> Result<UpdateResponse> {
        let response = self
            .client
            .put(self.endpoint(&format!("agreements/{id}")))
            .json(update)
            .send()
            .await?;
        read_json(response, "update agreement").await
    }

    async fn delete_agreement(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(&format!("agreements/{id}")))
            .send()
            .await?;
        check_status(response, "delete agreement").await?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus> {
        let response = self.client.get(self.endpoint("health")).send().await?;
        read_json(response, "reach backend").await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn api(base_url: &str) -> HttpAgreementApi {
        HttpAgreementApi::new(&BackendConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let api = api("http://localhost:5000/");
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.endpoint("agreements"), "http://localhost:5000/agreements");
        assert_eq!(
            api.endpoint("/agreements/a1"),
            "http://localhost:5000/agreements/a1"
        );
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"error": "File type not allowed. Please upload a PDF."}"#),
            Some("File type not allowed. Please upload a PDF.".to_string())
        );
        assert_eq!(error_message_from_body("<html>502</html>"), None);
        assert_eq!(error_message_from_body(r#"{"message": "ok"}"#), None);
    }
}

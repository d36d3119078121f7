//! HTTP client for the registration backend
//!
//! Registrations are a single JSON resource at `<backend_url>/form`:
//! POST creates one, GET lists them.

use super::{BackendClientTrait, BackendError};
use crate::state::{FormData, Registration};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

/// Path of the registrations resource, relative to the backend url
const FORM_PATH: &str = "form";

/// Longest response body kept in a status error
const BODY_PREVIEW_LIMIT: usize = 160;

/// Client for communicating with the registration backend
pub struct HttpBackend {
    /// The reqwest client
    client: Client,
    /// Full url of the registrations resource
    form_url: Url,
}

impl HttpBackend {
    /// Create a client for the backend at `base_url` with a per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let form_url = form_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(BackendError::from_reqwest)?;

        Ok(Self { client, form_url })
    }

    /// Url registrations are posted to
    pub fn form_url(&self) -> &Url {
        &self.form_url
    }
}

#[async_trait]
impl BackendClientTrait for HttpBackend {
    async fn submit_registration(&self, data: &FormData) -> Result<(), BackendError> {
        tracing::debug!("POST {}", self.form_url);

        let response = self
            .client
            .post(self.form_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(data)
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        Ok(())
    }

    async fn list_registrations(&self) -> Result<Vec<Registration>, BackendError> {
        tracing::debug!("GET {}", self.form_url);

        let response = self
            .client
            .get(self.form_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(BackendError::from_reqwest)?;

        let status = response.status();
        let body = response.bytes().await.map_err(BackendError::from_reqwest)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Resolve the registrations resource under `base_url`, keeping any path prefix
fn form_url(base_url: &str) -> Result<Url, BackendError> {
    let invalid = |reason: String| BackendError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) url".to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(FORM_PATH).map_err(|e| invalid(e.to_string()))
}

fn status_error(status: StatusCode, body: &[u8]) -> BackendError {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(BODY_PREVIEW_LIMIT).collect();
    if compact.chars().count() > BODY_PREVIEW_LIMIT {
        preview.push_str("...");
    }

    BackendError::Status {
        status: status.as_u16(),
        body: preview,
    }
}

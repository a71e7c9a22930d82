//! Transport seam between the controller and the scheduling service.
//!
//! [`Transport`] sends one [`Request`] and reports what came back. It does
//! not interpret status codes or bodies; that is the controller's job.
//! [`HttpTransport`] is the production implementation over `reqwest`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::ServiceConfig;
use crate::request::{Request, FILE_FIELD};

/// Path of the processing endpoint, relative to the service base URL.
pub const PROCESS_PATH: &str = "/process";

/// Raw response from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unparsed.
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No usable response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    Client(String),
    /// The multipart body could not be assembled.
    #[error("failed to encode request: {0}")]
    Encode(String),
    /// Connection, send, or body read failed.
    #[error("request failed: {0}")]
    Unreachable(String),
}

/// Sends requests to the scheduling service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and waits for the full response.
    async fn send(&self, request: &Request) -> Result<TransportResponse, TransportError>;
}

/// `reqwest`-backed transport posting multipart forms.
///
/// No timeout is set: the service contract defines none, so a hung
/// service leaves the caller waiting.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Creates a transport for the configured service.
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        let url = format!("{}{}", config.base_url.trim_end_matches('/'), PROCESS_PATH);
        Ok(Self { client, url })
    }

    /// Full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn form(request: &Request) -> Result<Form, TransportError> {
        let dataset = request.dataset();
        let file = Part::bytes(dataset.bytes().to_vec())
            .file_name(dataset.name().to_string())
            .mime_str(dataset.media_type())
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        let form = request
            .form_fields()
            .into_iter()
            .fold(Form::new().part(FILE_FIELD, file), |form, (name, value)| {
                form.text(name, value)
            });
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Result<TransportResponse, TransportError> {
        let form = Self::form(request)?;

        info!(
            url = %self.url,
            mode = %request.mode(),
            rules = ?request.rules(),
            bytes = request.dataset().len(),
            "posting dataset"
        );

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, "request failed: {}", e);
                TransportError::Unreachable(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            error!(status, "failed to read response body: {}", e);
            TransportError::Unreachable(e.to_string())
        })?;

        debug!(status, bytes = body.len(), "response received");
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base() {
        let t = HttpTransport::new(&ServiceConfig {
            base_url: "http://localhost:5000/".into(),
        })
        .unwrap();
        assert_eq!(t.url(), "http://localhost:5000/process");
    }

    #[test]
    fn test_response_success_range() {
        assert!(TransportResponse::new(200, Vec::new()).is_success());
        assert!(TransportResponse::new(204, Vec::new()).is_success());
        assert!(!TransportResponse::new(400, Vec::new()).is_success());
        assert!(!TransportResponse::new(500, Vec::new()).is_success());
        assert!(!TransportResponse::new(302, Vec::new()).is_success());
    }
}

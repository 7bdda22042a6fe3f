//! HTTP transport seam for the API client.
//!
//! The client builds an [`HttpRequest`] per RPC and hands it to a
//! [`Transport`]. [`HttpTransport`] is the reqwest-backed implementation used
//! in production; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ErrorRecord};

/// Form field carrying the envelope in the form-encoded variant.
pub const FORM_FIELD: &str = "JSON-RPC";

pub const TRANSPORT_ERROR_NAME: &str = "TransportError";

/// How the RPC envelope is placed in the POST body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    /// Raw JSON body, `Content-Type: application/json`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` with a single `JSON-RPC` field.
    Form,
}

impl std::str::FromStr for WireFormat {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(WireFormat::Json),
            "form" => Ok(WireFormat::Form),
            other => Err(ClientError::InvalidArgument(format!(
                "unknown wire format: {other}"
            ))),
        }
    }
}

/// A POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub format: WireFormat,
    /// The serialized RPC envelope.
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to execute one POST round-trip.
///
/// Implementations return `Err` only when no response was obtained at all;
/// non-2xx statuses come back as an `HttpResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError>;
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured `reqwest::Client` (proxies, custom TLS, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_failure)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let builder = self.client.post(&request.url);
        let builder = match request.format {
            WireFormat::Json => builder
                .header(CONTENT_TYPE, "application/json")
                .body(request.payload),
            WireFormat::Form => builder.form(&[(FORM_FIELD, request.payload.as_str())]),
        };

        let response = builder.send().await.map_err(transport_failure)?;

        let status = response.status();
        debug!("MyAdmin response status: {}", status);

        let body = response.text().await.map_err(transport_failure)?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn transport_failure(err: reqwest::Error) -> ClientError {
    ClientError::Transport(ErrorRecord {
        code: err.status().map(|status| i64::from(status.as_u16())),
        message: err.to_string(),
        name: TRANSPORT_ERROR_NAME.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            body: String::new(),
        }
    }

    #[test]
    fn test_wire_format_from_str() {
        assert_eq!("json".parse::<WireFormat>().unwrap(), WireFormat::Json);
        assert_eq!(" Form ".parse::<WireFormat>().unwrap(), WireFormat::Form);
        assert!("xml".parse::<WireFormat>().is_err());
    }

    #[test]
    fn test_success_range() {
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(!response(302).is_success());
        assert!(!response(500).is_success());
    }
}

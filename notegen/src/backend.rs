//! Client for the notes-generation backend
//!
//! The backend takes a language/topic pair and answers with JSON that is
//! expected to be a content model. Decoding the shape is not done here:
//! callers hand the raw value to [`crate::content_model::ContentModel::validate`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Endpoint used when neither the CLI nor the config names one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/data";

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status
    #[error("Backend responded with error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Response body, if any
        message: String,
    },

    /// The body was not JSON
    #[error("Failed to parse backend response: {0}")]
    Parse(String),
}

/// The form fields sent to the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Programming language the notes are about
    pub language: String,
    /// Topic within that language
    pub topic: String,
}

impl GenerationRequest {
    pub fn new(language: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            topic: topic.into(),
        }
    }
}

/// Anything that can turn a request into a raw JSON answer
#[async_trait]
pub trait NotesBackend: Send + Sync + Debug {
    /// Send one generation request
    ///
    /// # Returns
    /// * `Ok(Value)` - The decoded JSON body, not yet validated
    /// * `Err(BackendError)` - Transport, status, or decoding failure
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, BackendError>;
}

/// HTTP backend posting JSON to a single endpoint
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Full URL of the generation endpoint
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

impl HttpBackend {
    /// Create a backend for `endpoint`
    ///
    /// # Parameters
    /// * `endpoint` - Full URL, e.g. `http://localhost:5000/api/data`
    /// * `timeout` - Optional limit on the whole request
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    /// The endpoint this backend posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotesBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, BackendError> {
        log::debug!(
            "POST {} language={:?} topic={:?}",
            self.endpoint,
            request.language,
            request.topic
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("Failed to read error body from {}: {}", self.endpoint, e);
                    String::new()
                }
            };
            log::error!("Backend returned {}: {}", status, message);
            return Err(BackendError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = GenerationRequest::new("Python", "Loops");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"language": "Python", "topic": "Loops"}));
    }

    #[test]
    fn test_http_backend_keeps_endpoint() {
        let backend = HttpBackend::new(DEFAULT_ENDPOINT, Some(Duration::from_secs(5))).unwrap();
        assert_eq!(backend.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_http_backend_unreachable_is_request_error() {
        // Grab a free port, then close it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let endpoint = format!("http://127.0.0.1:{}/api/data", port);
        let backend = HttpBackend::new(endpoint, Some(Duration::from_secs(2))).unwrap();
        let result = backend.generate(&GenerationRequest::new("Rust", "Traits")).await;
        assert!(matches!(result, Err(BackendError::Request(_))));
    }
}

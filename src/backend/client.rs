//! HTTP client for the workflow backend.
//!
//! Two endpoints drive the whole loop:
//! - `POST {base}/conversations` starts a conversation and returns the first
//!   screen.
//! - `POST {base}/conversations/{id}/actions` submits an action and returns
//!   the next screen.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::json;

use super::types::{ActionRequest, ScreenResponse};

/// Errors from backend operations.
/// Variants carry enough info to determine retryability (future use).
#[derive(Debug)]
pub enum BackendError {
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// Backend returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the backend's response. Not retryable.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The conversation operations the renderer depends on. Behind a trait so
/// the run loop can be driven by a fake in tests.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Opens a new conversation; the response carries the first screen.
    async fn start(&self) -> Result<ScreenResponse, BackendError>;

    /// Submits one action and returns the screen that replaces the current one.
    async fn send_action(&self, request: &ActionRequest) -> Result<ScreenResponse, BackendError>;
}

pub struct WorkflowClient {
    base_url: String,
    http: reqwest::Client,
}

impl WorkflowClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            base_url,
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
        }
    }

    async fn parse_screen(response: reqwest::Response) -> Result<ScreenResponse, BackendError> {
        let status = response.status();
        debug!("backend response status: {status}");
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("backend API error: {} - {}", status.as_u16(), message);
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WorkflowApi for WorkflowClient {
    async fn start(&self) -> Result<ScreenResponse, BackendError> {
        let response = self
            .http
            .post(format!("{}/conversations", self.base_url))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::parse_screen(response).await
    }

    async fn send_action(&self, request: &ActionRequest) -> Result<ScreenResponse, BackendError> {
        debug!(
            "sending action \"{}\" for conversation {}",
            request.action.action_id, request.conversation_id
        );
        let response = self
            .http
            .post(format!(
                "{}/conversations/{}/actions",
                self.base_url, request.conversation_id
            ))
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Self::parse_screen(response).await
    }
}

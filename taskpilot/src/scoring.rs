//! HTTP client for the scoring backend.
//!
//! Each call posts the full task array to one [`Endpoint`] and either returns
//! the scored array or a [`ScoringError`] describing which stage failed. The
//! client never retries.

use std::time::Duration;

use reqwest::Client;
use taskpilot_proto::api::Endpoint;
use taskpilot_proto::codec;
use taskpilot_proto::task::Task;
use url::Url;

/// Errors surfaced by a scoring request.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ScoringError {
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field, or a generic status message.
        message: String,
    },

    /// The request never completed (connection refused, reset, timeout).
    #[error("Error contacting server: {0}")]
    Transport(String),

    /// The backend answered with success but the body is not a task array.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// The endpoint URL could not be built from the server URL.
    #[error("invalid endpoint URL: {0}")]
    Url(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Scoring backend client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ScoringClient {
    client: Client,
    base_url: Url,
}

impl ScoringClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// `timeout` bounds each whole request; `None` leaves the transport
    /// defaults in place.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Client`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, ScoringError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScoringError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Full URL of an endpoint, keeping any path prefix of the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Url`] if the URL cannot be joined.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ScoringError> {
        self.base_url
            .join(endpoint.path().trim_start_matches('/'))
            .map_err(|e| ScoringError::Url(e.to_string()))
    }

    /// Posts `tasks` to `endpoint` and returns the backend's task array.
    ///
    /// # Errors
    ///
    /// - [`ScoringError::Transport`] if the request or body read fails.
    /// - [`ScoringError::Rejected`] on a non-success status.
    /// - [`ScoringError::InvalidResponse`] if a success body does not decode.
    pub async fn submit(
        &self,
        endpoint: Endpoint,
        tasks: &[Task],
    ) -> Result<Vec<Task>, ScoringError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(%endpoint, %url, count = tasks.len(), "posting tasks");

        let response = self
            .client
            .post(url)
            .json(tasks)
            .send()
            .await
            .map_err(|e| ScoringError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ScoringError::Transport(e.to_string()))?;

        if status.is_success() {
            let scored = codec::decode_task_array_bytes(&body)
                .map_err(|e| ScoringError::InvalidResponse(e.to_string()))?;
            tracing::debug!(%endpoint, count = scored.len(), "received scored tasks");
            Ok(scored)
        } else {
            let message = codec::decode_error_message(&body)
                .unwrap_or_else(|| format!("Server returned {status}"));
            Err(ScoringError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

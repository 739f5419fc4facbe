//! Generation types — request, wire bodies, errors, backend trait.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Message used when the backend fails without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate code";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The prompt was empty after trimming.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// The exchange could not complete.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-success status. Displays the message verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A success response did not carry the expected body.
    #[error("unexpected response from generation service: {0}")]
    Protocol(String),

    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// The caller abandoned the request.
    #[error("generation cancelled")]
    Cancelled,

    /// Another generation is still in flight on this client.
    #[error("a generation request is already in progress")]
    Busy,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl GenerateError {
    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPrompt => "E_EMPTY_PROMPT",
            Self::Network(_) => "E_NETWORK",
            Self::Server { .. } => "E_SERVER",
            Self::Protocol(_) => "E_PROTOCOL",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Cancelled => "E_CANCELLED",
            Self::Busy => "E_BUSY",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether the caller may reasonably try again. This layer never retries itself.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::Server { status: 429 | 500..=599, .. }
        )
    }

    pub(crate) fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
        Self::Server { status, message }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// A validated prompt. Lives only for one submit action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    prompt: String,
}

impl GenerationRequest {
    /// # Errors
    ///
    /// Returns [`GenerateError::EmptyPrompt`] if `prompt` is blank.
    pub fn new(prompt: impl Into<String>) -> Result<Self, GenerateError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        Ok(Self { prompt })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseBody {
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponseBody {
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// One request/response exchange with a generation backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Issue exactly one request for `request` and return the generated code verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerateError`] describing the transport, server, or protocol failure.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

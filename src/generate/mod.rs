//! Generation client — prompt → backend → generated source.
//!
//! DESIGN
//! ======
//! [`GenerationClient`] wraps a [`CodeGenerator`] backend (HTTP by default)
//! and adds the call discipline the backend itself does not provide:
//! - single-flight: a second call while one is outstanding fails with `Busy`;
//! - an explicit request deadline (`Timeout`);
//! - a cancellation token honored mid-flight (`Cancelled`).
//!
//! Each call issues at most one backend request. There is no retry, caching,
//! or deduplication at this layer; callers decide what to do with a failure.

pub mod config;
pub mod http;
pub mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use config::GenerationConfig;
use http::HttpGenerator;
pub use types::{CodeGenerator, GENERIC_FAILURE_MESSAGE, GenerateError, GenerationRequest};

/// Single-flight generation client.
pub struct GenerationClient<G = HttpGenerator> {
    backend: G,
    timeout: Duration,
    in_flight: AtomicBool,
}

impl GenerationClient<HttpGenerator> {
    /// Build an HTTP-backed client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_env() -> Result<Self, GenerateError> {
        Self::from_config(&GenerationConfig::from_env())
    }

    /// Build an HTTP-backed client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerateError> {
        let backend = HttpGenerator::new(config)?;
        Ok(Self::with_backend(backend, config.timeouts.request()))
    }
}

impl<G: CodeGenerator> GenerationClient<G> {
    #[must_use]
    pub fn with_backend(backend: G, timeout: Duration) -> Self {
        Self { backend, timeout, in_flight: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether a call is currently outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Generate code for `prompt`.
    ///
    /// # Errors
    ///
    /// See [`GenerationClient::generate_with_cancel`].
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.generate_with_cancel(prompt, &CancellationToken::new())
            .await
    }

    /// Generate code for `prompt`, abandoning the request if `cancel` fires.
    ///
    /// # Errors
    ///
    /// - `EmptyPrompt` if the prompt is blank;
    /// - `Busy` if another call on this client is outstanding;
    /// - `Cancelled` if `cancel` fires first;
    /// - `Timeout` if the deadline passes first;
    /// - otherwise whatever the backend reports.
    pub async fn generate_with_cancel(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, GenerateError> {
        let request = GenerationRequest::new(prompt)?;

        let Some(_flight) = InFlight::acquire(&self.in_flight) else {
            warn!("generate: rejected, request already in flight");
            return Err(GenerateError::Busy);
        };

        info!(prompt_len = request.prompt().len(), "generate: request started");
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(GenerateError::Cancelled),
            outcome = tokio::time::timeout(self.timeout, self.backend.generate(&request)) => {
                outcome.unwrap_or(Err(GenerateError::Timeout(self.timeout)))
            }
        };

        match &result {
            Ok(code) => info!(code_len = code.len(), "generate: request ok"),
            Err(e) => warn!(error_code = e.error_code(), error = %e, "generate: request failed"),
        }
        result
    }
}

/// Holds the in-flight flag; clears it on drop, including when the call's
/// future is dropped mid-await.
struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

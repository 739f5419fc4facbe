//! HTTP generation backend.
//!
//! `POST {base_url}/api/generate` with `{ "prompt": ... }`. A 2xx answer must
//! carry `{ "code": ... }`; anything else is read as `{ "error": ... }` with a
//! generic fallback when the message is missing.

use serde::Serialize;

use super::config::GenerationConfig;
use super::types::{
    CodeGenerator, ErrorResponseBody, GenerateError, GenerateResponseBody, GenerationRequest,
};

pub struct HttpGenerator {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct GenerateRequestBody<'a> {
    prompt: &'a str,
}

impl HttpGenerator {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerateError> {
        // The overall request deadline is enforced by `GenerationClient`.
        let http = reqwest::Client::builder()
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| GenerateError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, endpoint: config.endpoint() })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CodeGenerator for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequestBody { prompt: request.prompt() })
            .send()
            .await
            .map_err(GenerateError::Network)?;

        let status = response.status();
        let text = response.text().await.map_err(GenerateError::Network)?;
        if !status.is_success() {
            return Err(parse_error_response(status.as_u16(), &text));
        }
        parse_success_response(&text)
    }
}

fn parse_success_response(text: &str) -> Result<String, GenerateError> {
    serde_json::from_str::<GenerateResponseBody>(text)
        .map(|body| body.code)
        .map_err(|e| GenerateError::Protocol(e.to_string()))
}

fn parse_error_response(status: u16, text: &str) -> GenerateError {
    let body: ErrorResponseBody = serde_json::from_str(text).unwrap_or_default();
    GenerateError::server(status, body.error)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

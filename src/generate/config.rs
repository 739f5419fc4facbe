//! Generation client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_GENERATION_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Path of the generation endpoint relative to the base URL.
pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl GenerationTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for GenerationTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub base_url: String,
    pub timeouts: GenerationTimeouts,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_GENERATION_API_URL.to_owned(), timeouts: GenerationTimeouts::default() }
    }
}

impl GenerationConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GENERATION_API_URL`: default `http://localhost:3001`
    /// - `GENERATION_REQUEST_TIMEOUT_SECS`: default 120
    /// - `GENERATION_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`GenerationConfig::from_env`], reading through `lookup`.
    #[must_use]
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("GENERATION_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_GENERATION_API_URL.to_owned());
        let timeouts = GenerationTimeouts {
            request_secs: parse_secs(&lookup, "GENERATION_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_secs(&lookup, "GENERATION_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self { base_url, timeouts }
    }

    /// Full URL of the generation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{GENERATE_PATH}", self.base_url)
    }
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

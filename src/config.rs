//! Application configuration.
//!
//! DESIGN
//! ======
//! Two sources, both optional:
//! - environment variables (optionally seeded from a `.env` file);
//! - a YAML access file named by `ACCESS_CONFIG_PATH` declaring redirect
//!   destinations, guarded routes, and admin emails.
//!
//! With neither present the crate runs with default destinations, no gated
//! routes, an empty admin allow-list, and the local generation backend.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::access::{AccessGate, AdminAllowList, Destinations, RouteRule, RouteTable};
use crate::generate::config::GenerationConfig;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read access config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse access config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid route '{path}': {reason}")]
    InvalidRoute { path: String, reason: &'static str },
}

// =============================================================================
// ACCESS FILE
// =============================================================================

/// Raw shape of the YAML access file.
///
/// ```yaml
/// destinations:
///   unauthenticated: /login
///   insufficient_plan: /pricing
/// routes:
///   - path: /admin
///     guard: protected
///     required_admin: true
///   - path: /studio
///     guard: protected
///     required_plan: pro
///   - path: /login
///     guard: public
/// admin_emails:
///   - admin@example.com
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessFile {
    pub destinations: Destinations,
    pub routes: Vec<RouteRule>,
    pub admin_emails: Vec<String>,
}

impl AccessFile {
    /// # Errors
    ///
    /// Returns an error if the document is not valid YAML of the expected shape.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }
}

/// Validated access configuration.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    pub gate: AccessGate,
    pub admins: AdminAllowList,
}

impl AccessConfig {
    /// Validate a parsed file, merging extra admin emails from `ADMIN_EMAILS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a route declaration is invalid.
    pub fn from_file(file: AccessFile, extra_admins: Option<&str>) -> Result<Self, ConfigError> {
        let routes = RouteTable::new(file.routes)?;
        let mut admins = AdminAllowList::new(&file.admin_emails);
        if let Some(raw) = extra_admins {
            admins.extend(raw.split(','));
        }
        Ok(Self { gate: AccessGate::new(routes, file.destinations), admins })
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub access: AccessConfig,
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Load `.env` if present, then build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the access file is unreadable or invalid.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "config: loaded .env");
        }
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config reading variables through `lookup`.
    ///
    /// - `ACCESS_CONFIG_PATH`: YAML access file (optional)
    /// - `ADMIN_EMAILS`: comma-separated admin emails merged into the file's list
    /// - `GENERATION_*`: see [`GenerationConfig::from_env`]
    ///
    /// # Errors
    ///
    /// Returns an error if the access file is unreadable or invalid.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match lookup("ACCESS_CONFIG_PATH").filter(|p| !p.trim().is_empty()) {
            Some(path) => AccessFile::load(Path::new(path.trim()))?,
            None => AccessFile::default(),
        };
        let access = AccessConfig::from_file(file, lookup("ADMIN_EMAILS").as_deref())?;
        let generation = GenerationConfig::from_vars(&lookup);

        tracing::info!(
            routes = access.gate.routes().rules().len(),
            admins = access.admins.len(),
            generation_url = %generation.base_url,
            "config: loaded"
        );
        Ok(Self { access, generation })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

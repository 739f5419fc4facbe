//! Per-surface guard declarations.
//!
//! Rules match on path-segment boundaries and the longest matching rule wins:
//! `/admin` covers `/admin` and `/admin/users` but not `/administer`. Paths no
//! rule covers are ungated.

use serde::{Deserialize, Serialize};

use super::{Guard, RouteRequirement};
use crate::config::ConfigError;
use crate::session::Plan;

/// One configured surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RouteDecl")]
pub struct RouteRule {
    pub path: String,
    #[serde(flatten)]
    pub guard: Guard,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum GuardKind {
    Protected,
    Public,
}

/// Declared shape of a rule. Unknown keys are rejected so a misspelled
/// requirement cannot silently open a surface.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteDecl {
    path: String,
    guard: GuardKind,
    #[serde(default)]
    required_plan: Option<Plan>,
    #[serde(default)]
    required_admin: Option<bool>,
}

impl TryFrom<RouteDecl> for RouteRule {
    type Error = String;

    fn try_from(decl: RouteDecl) -> Result<Self, Self::Error> {
        let guard = match decl.guard {
            GuardKind::Protected => Guard::Protected(RouteRequirement {
                required_plan: decl.required_plan,
                required_admin: decl.required_admin.unwrap_or(false),
            }),
            GuardKind::Public => {
                if decl.required_plan.is_some() || decl.required_admin.is_some() {
                    return Err(format!(
                        "public route '{}' cannot declare required_plan or required_admin",
                        decl.path
                    ));
                }
                Guard::Public
            }
        };
        Ok(Self { path: decl.path, guard })
    }
}

impl RouteRule {
    #[must_use]
    pub fn new(path: impl Into<String>, guard: Guard) -> Self {
        Self { path: path.into(), guard }
    }
}

/// Validated set of route rules.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Normalize and validate `rules`.
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not start with `/` or appears twice.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, ConfigError> {
        let mut normalized: Vec<RouteRule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if !rule.path.starts_with('/') {
                return Err(ConfigError::InvalidRoute { path: rule.path, reason: "must start with '/'" });
            }
            let path = normalize(&rule.path).to_owned();
            if normalized.iter().any(|r| r.path == path) {
                return Err(ConfigError::InvalidRoute { path, reason: "declared more than once" });
            }
            normalized.push(RouteRule { path, guard: rule.guard });
        }
        Ok(Self { rules: normalized })
    }

    #[must_use]
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Guard for the most specific rule covering `path`.
    #[must_use]
    pub fn guard_for(&self, path: &str) -> Option<&Guard> {
        let path = normalize(strip_query(path));
        self.rules
            .iter()
            .filter(|rule| covers(&rule.path, path))
            .max_by_key(|rule| rule.path.len())
            .map(|rule| &rule.guard)
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

fn covers(rule: &str, path: &str) -> bool {
    if rule == "/" {
        return true;
    }
    path.strip_prefix(rule)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;

//! Session snapshot types for the current principal.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session provider (external) owns authentication. This crate only
//! observes what it publishes: a loading flag, the identity once known, and
//! the profile once provisioned. The access gate and admin check read these
//! snapshots; nothing here writes them except the provider via [`SessionStore`].
//!
//! DESIGN
//! ======
//! The profile is an explicit two-state tag rather than an `Option` buried in
//! the identity, so "profile not loaded yet" is its own branch in every
//! decision that needs role or plan.

pub mod store;

pub use store::{SessionStore, SessionSubscription};

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// IDENTITY
// =============================================================================

/// An authenticated principal as reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned user identifier.
    pub id: Uuid,
    /// Primary email address, if the provider exposes one.
    #[serde(default)]
    pub email: Option<String>,
    /// Whether the provider has verified `email`.
    #[serde(default)]
    pub email_verified: bool,
}

impl Identity {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self { id, email: None, email_verified: false }
    }

    /// Attach a primary email and its verification state.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>, verified: bool) -> Self {
        self.email = Some(email.into());
        self.email_verified = verified;
        self
    }

    /// Primary email, only when the provider has verified it.
    #[must_use]
    pub fn verified_email(&self) -> Option<&str> {
        if self.email_verified { self.email.as_deref() } else { None }
    }
}

// =============================================================================
// ROLE / PLAN
// =============================================================================

/// Account role stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    /// Any role this build does not know about. Never grants admin access.
    #[serde(other)]
    Unknown,
}

/// Subscription plan stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

impl Plan {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PROFILE
// =============================================================================

/// Role and plan attached 1:1 to an identity once provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub role: Role,
    pub plan: Plan,
}

/// Whether the profile for the current identity has been resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileState {
    /// Still loading, or never provisioned.
    #[default]
    Absent,
    Present(Profile),
}

impl ProfileState {
    #[must_use]
    pub fn as_profile(&self) -> Option<&Profile> {
        match self {
            Self::Present(profile) => Some(profile),
            Self::Absent => None,
        }
    }
}

impl From<Option<Profile>> for ProfileState {
    fn from(value: Option<Profile>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl From<Profile> for ProfileState {
    fn from(value: Profile) -> Self {
        Self::Present(value)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time view of the session provider's state.
///
/// While `loading` is set, an absent identity or profile means "unknown yet",
/// never "signed out".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub identity: Option<Identity>,
    pub profile: ProfileState,
}

impl SessionSnapshot {
    /// Initial state before the provider has reported anything.
    #[must_use]
    pub fn loading() -> Self {
        Self { loading: true, identity: None, profile: ProfileState::Absent }
    }

    /// Provider finished loading and nobody is signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self { loading: false, identity: None, profile: ProfileState::Absent }
    }

    /// Provider finished loading with an identity and its (possibly absent) profile.
    #[must_use]
    pub fn signed_in(identity: Identity, profile: impl Into<ProfileState>) -> Self {
        Self { loading: false, identity: Some(identity), profile: profile.into() }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

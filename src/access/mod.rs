//! Access gate — session snapshot + route requirement → verdict.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every gated surface asks the gate what to do with the current session:
//! keep waiting, send the user elsewhere, or render. The UI layer owns the
//! actual navigation; this module only decides.
//!
//! DESIGN
//! ======
//! Protected and public surfaces share one decision table in [`evaluate`].
//! The table is a pure function of its inputs: no clock, no cache, no I/O.
//! A loading snapshot always yields [`Verdict::Wait`] so a transient tick can
//! never redirect away from a protected page before the real answer is known.
//!
//! Plan checks are exact-match. A route gated on `pro` rejects `enterprise`
//! accounts as well as `free` ones.

pub mod admin;
pub mod routes;
pub mod watcher;

pub use admin::{AdminAllowList, is_admin};
pub use routes::{RouteRule, RouteTable};
pub use watcher::GateWatcher;

use serde::{Deserialize, Serialize};

use crate::session::{Plan, Role, SessionSnapshot};

// =============================================================================
// VERDICT
// =============================================================================

/// Why a surface sent the user elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectReason {
    /// Protected surface, nobody signed in.
    Unauthenticated,
    /// Public-only surface (e.g. login), someone is already signed in.
    Authenticated,
    /// Admin-only surface, profile role is not admin.
    InsufficientRole,
    /// Plan-gated surface, profile plan does not match.
    InsufficientPlan,
}

impl RedirectReason {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Authenticated => "authenticated",
            Self::InsufficientRole => "insufficient_role",
            Self::InsufficientPlan => "insufficient_plan",
        }
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Session still loading; render nothing conclusive and do not navigate.
    Wait,
    Redirect(RedirectReason),
    Allow,
}

impl Verdict {
    #[must_use]
    pub fn is_wait(self) -> bool {
        matches!(self, Self::Wait)
    }

    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    #[must_use]
    pub fn redirect_reason(self) -> Option<RedirectReason> {
        match self {
            Self::Redirect(reason) => Some(reason),
            Self::Wait | Self::Allow => None,
        }
    }
}

// =============================================================================
// REQUIREMENTS
// =============================================================================

/// What a protected surface demands of the signed-in principal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteRequirement {
    pub required_plan: Option<Plan>,
    pub required_admin: bool,
}

impl RouteRequirement {
    /// Signed-in users only, no role or plan constraint.
    #[must_use]
    pub fn signed_in() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn admin() -> Self {
        Self { required_plan: None, required_admin: true }
    }

    #[must_use]
    pub fn plan(plan: Plan) -> Self {
        Self { required_plan: Some(plan), required_admin: false }
    }
}

/// The two kinds of gated surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "guard", rename_all = "lowercase")]
pub enum Guard {
    /// Requires a signed-in principal meeting the requirement.
    Protected(RouteRequirement),
    /// Only for visitors who are not signed in.
    Public,
}

// =============================================================================
// DECISION TABLE
// =============================================================================

/// Evaluate a protected surface.
#[must_use]
pub fn evaluate_protected(snapshot: &SessionSnapshot, requirement: &RouteRequirement) -> Verdict {
    evaluate(snapshot, &Guard::Protected(*requirement))
}

/// Evaluate a public-only surface.
#[must_use]
pub fn evaluate_public(snapshot: &SessionSnapshot) -> Verdict {
    evaluate(snapshot, &Guard::Public)
}

/// The shared decision table.
#[must_use]
pub fn evaluate(snapshot: &SessionSnapshot, guard: &Guard) -> Verdict {
    if snapshot.loading {
        return Verdict::Wait;
    }

    let signed_in = snapshot.identity.is_some();
    let requirement = match guard {
        Guard::Public if signed_in => return Verdict::Redirect(RedirectReason::Authenticated),
        Guard::Public => return Verdict::Allow,
        Guard::Protected(requirement) => requirement,
    };

    if !signed_in {
        return Verdict::Redirect(RedirectReason::Unauthenticated);
    }

    // An absent profile has neither role nor plan, so any requirement fails.
    let profile = snapshot.profile.as_profile();

    if requirement.required_admin && profile.map(|p| p.role) != Some(Role::Admin) {
        return Verdict::Redirect(RedirectReason::InsufficientRole);
    }

    if let Some(plan) = requirement.required_plan {
        if profile.map(|p| p.plan) != Some(plan) {
            return Verdict::Redirect(RedirectReason::InsufficientPlan);
        }
    }

    Verdict::Allow
}

// =============================================================================
// DESTINATIONS
// =============================================================================

/// Where each redirect reason sends the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destinations {
    pub unauthenticated: String,
    pub authenticated: String,
    pub insufficient_role: String,
    pub insufficient_plan: String,
}

impl Default for Destinations {
    fn default() -> Self {
        Self {
            unauthenticated: "/login".to_owned(),
            authenticated: "/dashboard".to_owned(),
            insufficient_role: "/dashboard".to_owned(),
            insufficient_plan: "/pricing".to_owned(),
        }
    }
}

impl Destinations {
    #[must_use]
    pub fn path_for(&self, reason: RedirectReason) -> &str {
        match reason {
            RedirectReason::Unauthenticated => &self.unauthenticated,
            RedirectReason::Authenticated => &self.authenticated,
            RedirectReason::InsufficientRole => &self.insufficient_role,
            RedirectReason::InsufficientPlan => &self.insufficient_plan,
        }
    }
}

// =============================================================================
// ACCESS GATE
// =============================================================================

/// Route table plus redirect destinations, as loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    routes: RouteTable,
    destinations: Destinations,
}

impl AccessGate {
    #[must_use]
    pub fn new(routes: RouteTable, destinations: Destinations) -> Self {
        Self { routes, destinations }
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    #[must_use]
    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    /// Evaluate the surface at `path`. `None` when no rule covers it.
    #[must_use]
    pub fn check(&self, path: &str, snapshot: &SessionSnapshot) -> Option<Verdict> {
        self.routes
            .guard_for(path)
            .map(|guard| evaluate(snapshot, guard))
    }

    #[must_use]
    pub fn destination(&self, reason: RedirectReason) -> &str {
        self.destinations.path_for(reason)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

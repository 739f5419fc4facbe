//! Boder — access gating and code generation client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host application owns rendering, navigation, and the session
//! provider. This crate supplies the two pieces with real invariants:
//! - [`access`]: decides, for the current [`session`] snapshot, whether a
//!   surface may render, must wait, or must redirect;
//! - [`generate`]: sends a prompt to the generation backend and returns the
//!   generated source, with single-flight, timeout, and cancellation.

pub mod access;
pub mod config;
pub mod generate;
pub mod logging;
pub mod session;

pub use access::{AccessGate, AdminAllowList, Guard, RedirectReason, RouteRequirement, Verdict};
pub use config::{AppConfig, ConfigError};
pub use generate::{GenerateError, GenerationClient};
pub use session::{Identity, Plan, Profile, ProfileState, Role, SessionSnapshot, SessionStore};

//! Application state for the EliteConstruct field shell
//!
//! This crate owns the session state machine that gates access to the
//! authenticated shell, and the summary of the signed-in technician that
//! every screen receives.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod user;

pub use session::{
    AcceptAll, AuthState, CredentialVerifier, LoginRequest, RequireFields, Session, SessionError,
    Transition,
};
pub use user::UserSummary;

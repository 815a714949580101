//! Session state machine
//!
//! The session is a two-state machine: `Unauthenticated` (initial) and
//! `Authenticated`. Nothing is persisted; every process starts signed out.
//!
//! Credential checking sits behind [`CredentialVerifier`]. The shipped
//! default, [`AcceptAll`], accepts every request, including the demo
//! quick-access path. [`RequireFields`] is the stricter drop-in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A required login field was empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Quick access was attempted while it is disabled
    #[error("Quick access is disabled")]
    QuickAccessDisabled,

    /// The verifier rejected the credentials
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    /// No technician is signed in
    #[default]
    Unauthenticated,
    /// A technician is signed in
    Authenticated,
}

/// Outcome of a session transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed
    Changed {
        /// State before the transition
        from: AuthState,
        /// State after the transition
        to: AuthState,
    },
    /// The session was already in the target state
    Unchanged,
}

impl Transition {
    /// Whether the transition changed the state
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed { .. })
    }
}

/// What the login view submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoginRequest {
    /// Email and password form submission
    Credentials {
        /// Email address
        email: String,
        /// Password
        password: String,
    },
    /// Demo-mode bypass without credentials
    QuickAccess,
}

impl LoginRequest {
    /// Create a credentials request
    pub fn credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginRequest::Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Decides whether a login request may open the session
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier {
    /// Verify a login request
    fn verify(&self, request: &LoginRequest) -> Result<()>;
}

/// Accepts every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl CredentialVerifier for AcceptAll {
    fn verify(&self, _request: &LoginRequest) -> Result<()> {
        Ok(())
    }
}

/// Requires a non-empty email and password, and refuses quick access
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireFields;

impl CredentialVerifier for RequireFields {
    fn verify(&self, request: &LoginRequest) -> Result<()> {
        match request {
            LoginRequest::QuickAccess => Err(SessionError::QuickAccessDisabled),
            LoginRequest::Credentials { email, password } => {
                if email.trim().is_empty() {
                    return Err(SessionError::MissingField("email"));
                }
                if password.is_empty() {
                    return Err(SessionError::MissingField("password"));
                }
                Ok(())
            }
        }
    }
}

/// Process-scoped session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    state: AuthState,
}

impl Session {
    /// Create a signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Whether a technician is signed in
    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::Authenticated
    }

    /// Open the session unconditionally
    pub fn login(&mut self) -> Transition {
        self.transition(AuthState::Authenticated)
    }

    /// Open the session if `verifier` accepts `request`
    pub fn login_with(
        &mut self,
        verifier: &dyn CredentialVerifier,
        request: &LoginRequest,
    ) -> Result<Transition> {
        if let Err(e) = verifier.verify(request) {
            tracing::warn!("Login rejected: {}", e);
            return Err(e);
        }
        Ok(self.login())
    }

    /// Close the session
    pub fn logout(&mut self) -> Transition {
        self.transition(AuthState::Unauthenticated)
    }

    fn transition(&mut self, to: AuthState) -> Transition {
        if self.state == to {
            return Transition::Unchanged;
        }
        let from = self.state;
        self.state = to;
        tracing::info!(?from, ?to, "Session transition");
        Transition::Changed { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_unauthenticated() {
        let session = Session::new();
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_logout_cycle() {
        let mut session = Session::new();

        let t = session.login();
        assert_eq!(
            t,
            Transition::Changed {
                from: AuthState::Unauthenticated,
                to: AuthState::Authenticated
            }
        );
        assert!(session.is_authenticated());

        let t = session.logout();
        assert!(t.is_changed());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_repeated_transitions_are_unchanged() {
        let mut session = Session::new();
        assert_eq!(session.logout(), Transition::Unchanged);

        session.login();
        assert_eq!(session.login(), Transition::Unchanged);
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_accept_all_allows_quick_access() {
        let mut session = Session::new();
        let t = session
            .login_with(&AcceptAll, &LoginRequest::QuickAccess)
            .unwrap();
        assert!(t.is_changed());
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_require_fields_rejects_blank_email() {
        let mut session = Session::new();
        let err = session
            .login_with(&RequireFields, &LoginRequest::credentials("  ", "secret"))
            .unwrap_err();
        assert_eq!(err, SessionError::MissingField("email"));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_require_fields_rejects_quick_access() {
        let mut session = Session::new();
        let err = session
            .login_with(&RequireFields, &LoginRequest::QuickAccess)
            .unwrap_err();
        assert_eq!(err, SessionError::QuickAccessDisabled);
    }

    #[test]
    fn test_require_fields_accepts_complete_form() {
        let mut session = Session::new();
        session
            .login_with(
                &RequireFields,
                &LoginRequest::credentials("tech@eliteconstruct.com", "hunter2"),
            )
            .unwrap();
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_verifier_is_consulted_once() {
        let mut verifier = MockCredentialVerifier::new();
        verifier
            .expect_verify()
            .times(1)
            .returning(|_| Err(SessionError::InvalidCredentials));

        let mut session = Session::new();
        let result = session.login_with(&verifier, &LoginRequest::credentials("a@b.c", "x"));
        assert_eq!(result, Err(SessionError::InvalidCredentials));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_login_request_serialization() {
        let json = serde_json::to_string(&LoginRequest::QuickAccess).unwrap();
        assert_eq!(json, r#"{"kind":"quick_access"}"#);
    }
}

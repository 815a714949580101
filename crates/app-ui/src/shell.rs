//! Authenticated shell and the auth gate in front of it
//!
//! The gate owns the [`Session`] and, only while it is authenticated, a
//! mounted [`Shell`]. Logging out drops the shell with its history, so the
//! next login always starts from a fresh mount on the default screen.

use crate::history::{History, NavigationRequest};
use crate::navigation::{NavigationError, Resolution, Route, RouteTable, Router};
use crate::tab_bar::TabBar;
use app_state::{
    AcceptAll, CredentialVerifier, LoginRequest, Session, SessionError, Transition, UserSummary,
};
use serde::Serialize;
use std::rc::Rc;
use uuid::Uuid;

// =============================================================================
// Screen Collaborator Contract
// =============================================================================

/// Capability to end the session, handed only to screens that offer logout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutHandle {
    _private: (),
}

/// Read-only context passed to the mounted screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenContext<'a> {
    /// Signed-in technician
    pub user: &'a UserSummary,
    /// Mounted route
    pub route: &'a Route,
    /// Positional `taskId` parameter of detail routes
    pub task_id: Option<&'a str>,
    /// Present only for the profile screen
    pub logout: Option<LogoutHandle>,
}

/// Requests a screen sends back to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Move the active path
    Navigate(NavigationRequest),
    /// End the session
    Logout(LogoutHandle),
}

impl ShellCommand {
    /// Navigate to `path`
    pub fn go(path: impl Into<String>) -> Self {
        ShellCommand::Navigate(NavigationRequest::to(path))
    }

    /// Navigate back
    pub fn back() -> Self {
        ShellCommand::Navigate(NavigationRequest::Back)
    }
}

// =============================================================================
// Shell
// =============================================================================

/// What a navigation request did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// Moved to a matched path
    Navigated,
    /// The requested path did not match; moved to the default screen
    Redirected {
        /// Path that was asked for
        requested: String,
    },
    /// Popped back to the previous path
    WentBack,
    /// Already there, or nothing to go back to
    Unchanged,
    /// No shell is mounted
    Ignored,
}

/// The mounted, authenticated shell
#[derive(Debug)]
pub struct Shell {
    table: Rc<RouteTable>,
    router: Rc<Router>,
    history: History,
    resolution: Resolution,
    mount_id: Uuid,
}

impl Shell {
    /// Mount a fresh shell on the default screen
    pub fn mount(table: Rc<RouteTable>, router: Rc<Router>) -> Self {
        let resolution = router.resolve(&table.default_entry().path);
        let mount_id = Uuid::new_v4();
        tracing::debug!(%mount_id, path = %resolution.path, "Shell mounted");

        Self {
            history: History::new(resolution.path.clone()),
            table,
            router,
            resolution,
            mount_id,
        }
    }

    /// Identifier of this mount; changes on every login
    pub fn mount_id(&self) -> Uuid {
        self.mount_id
    }

    /// ActivePath
    pub fn active_path(&self) -> &str {
        self.history.current()
    }

    /// Mounted route
    pub fn route(&self) -> &Route {
        &self.resolution.route
    }

    /// Resolution of the active path
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Navigation history
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Route table the tab bar is built from
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Tab bar for the active path
    pub fn tab_bar(&self) -> TabBar {
        TabBar::new(&self.table, self.active_path())
    }

    /// Apply a navigation request
    pub fn navigate(&mut self, request: NavigationRequest) -> NavigationOutcome {
        match request {
            NavigationRequest::To(path) => self.go_to(&path),
            NavigationRequest::Back => self.go_back(),
        }
    }

    fn go_to(&mut self, path: &str) -> NavigationOutcome {
        let resolution = self.router.resolve(path);

        if !self.history.push(resolution.path.clone()) {
            return NavigationOutcome::Unchanged;
        }

        tracing::debug!(from = ?self.resolution.route, to = %resolution.path, "Navigated");
        let redirected = resolution.redirected;
        self.resolution = resolution;

        if redirected {
            NavigationOutcome::Redirected {
                requested: path.to_string(),
            }
        } else {
            NavigationOutcome::Navigated
        }
    }

    fn go_back(&mut self) -> NavigationOutcome {
        if !self.history.back() {
            return NavigationOutcome::Unchanged;
        }
        self.resolution = self.router.resolve(self.history.current());
        tracing::debug!(to = %self.resolution.path, "Went back");
        NavigationOutcome::WentBack
    }
}

// =============================================================================
// Auth Gate
// =============================================================================

/// Which render tree is mounted
#[derive(Debug, Clone, Copy)]
pub enum GateView<'a> {
    /// Standalone login view; no shell exists
    Login,
    /// Authenticated shell
    Shell(&'a Shell),
}

/// Result of applying a [`ShellCommand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A navigation request ran
    Navigation(NavigationOutcome),
    /// The session changed
    Session(Transition),
}

/// Owns the session and mounts the shell only while authenticated
pub struct AuthGate {
    session: Session,
    shell: Option<Shell>,
    table: Rc<RouteTable>,
    router: Rc<Router>,
    user: UserSummary,
    verifier: Box<dyn CredentialVerifier>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("session", &self.session)
            .field("shell", &self.shell)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    /// Signed-out gate over the standard route table, accepting any login
    pub fn new(user: UserSummary) -> Result<Self, NavigationError> {
        Ok(Self {
            session: Session::new(),
            shell: None,
            table: Rc::new(RouteTable::standard()?),
            router: Rc::new(Router::new()),
            user,
            verifier: Box::new(AcceptAll),
        })
    }

    /// Replace the credential verifier
    pub fn with_verifier(mut self, verifier: Box<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// The session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether the shell is mounted
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Signed-in (or about to sign in) technician
    pub fn user(&self) -> &UserSummary {
        &self.user
    }

    /// Route table
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Router
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Open the session without verification and mount a fresh shell
    pub fn login(&mut self) -> Transition {
        let transition = self.session.login();
        self.mount_if_changed(transition)
    }

    /// Submit the login view; opens the session if the verifier accepts
    pub fn submit_login(&mut self, request: &LoginRequest) -> Result<Transition, SessionError> {
        if self.is_authenticated() {
            return Ok(Transition::Unchanged);
        }
        let transition = self.session.login_with(self.verifier.as_ref(), request)?;
        Ok(self.mount_if_changed(transition))
    }

    fn mount_if_changed(&mut self, transition: Transition) -> Transition {
        if transition.is_changed() {
            self.shell = Some(Shell::mount(self.table.clone(), self.router.clone()));
        }
        transition
    }

    /// Close the session and drop the shell with its history
    pub fn logout(&mut self) -> Transition {
        let transition = self.session.logout();
        if let Some(shell) = self.shell.take() {
            tracing::debug!(mount_id = %shell.mount_id(), "Shell unmounted");
        }
        transition
    }

    /// Apply a navigation request; ignored while signed out
    pub fn navigate(&mut self, request: NavigationRequest) -> NavigationOutcome {
        match self.shell.as_mut() {
            Some(shell) => shell.navigate(request),
            None => {
                tracing::debug!(?request, "Navigation ignored while signed out");
                NavigationOutcome::Ignored
            }
        }
    }

    /// Apply a command from a screen
    pub fn apply(&mut self, command: ShellCommand) -> CommandOutcome {
        match command {
            ShellCommand::Navigate(request) => CommandOutcome::Navigation(self.navigate(request)),
            ShellCommand::Logout(_) => CommandOutcome::Session(self.logout()),
        }
    }

    /// Mounted render tree
    pub fn view(&self) -> GateView<'_> {
        match &self.shell {
            Some(shell) => GateView::Shell(shell),
            None => GateView::Login,
        }
    }

    /// Mounted shell
    pub fn shell(&self) -> Option<&Shell> {
        self.shell.as_ref()
    }

    /// ActivePath, if a shell is mounted
    pub fn active_path(&self) -> Option<&str> {
        self.shell.as_ref().map(Shell::active_path)
    }

    /// Context for the mounted screen
    pub fn screen_context(&self) -> Option<ScreenContext<'_>> {
        let shell = self.shell.as_ref()?;
        let route = shell.route();
        Some(ScreenContext {
            user: &self.user,
            route,
            task_id: route.task_id(),
            logout: route.offers_logout().then_some(LogoutHandle { _private: () }),
        })
    }
}

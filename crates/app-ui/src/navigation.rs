//! Navigation system for the field shell
//!
//! This module provides:
//! - The route table of tab-bar (primary) and in-screen (secondary) entries
//! - Typed routes for every screen, including detail screens with a task id
//! - A path router with typed templates and redirect-to-default fallback

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Path of the default (home) screen. Root and unknown paths land here.
pub const DEFAULT_PATH: &str = "/dashboard";

/// Route table construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Two entries share an identifier
    #[error("Duplicate navigation identifier: {0}")]
    DuplicateIdentifier(String),

    /// Two entries share a path
    #[error("Duplicate navigation path: {0}")]
    DuplicatePath(String),

    /// Entry path does not start with '/'
    #[error("Navigation path must be absolute: {0}")]
    RelativePath(String),

    /// No primary entries, so there is no default screen
    #[error("Route table needs at least one primary entry")]
    EmptyPrimary,
}

/// Result type for navigation operations
pub type Result<T> = std::result::Result<T, NavigationError>;

// =============================================================================
// Route Table
// =============================================================================

/// Symbolic icon for a navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    /// House
    Home,
    /// Task list
    Tasks,
    /// Bell
    Bell,
    /// Person
    User,
    /// Magnifier
    Search,
    /// Warning triangle
    ExclamationTriangle,
}

impl Icon {
    /// Icon name
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Home => "home",
            Icon::Tasks => "tasks",
            Icon::Bell => "bell",
            Icon::User => "user",
            Icon::Search => "search",
            Icon::ExclamationTriangle => "exclamation-triangle",
        }
    }

    /// Single-cell glyph for terminal rendering
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Home => "⌂",
            Icon::Tasks => "☰",
            Icon::Bell => "◉",
            Icon::User => "☺",
            Icon::Search => "⌕",
            Icon::ExclamationTriangle => "⚠",
        }
    }
}

/// A navigable screen descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// Unique identifier
    pub id: String,
    /// Icon
    pub icon: Icon,
    /// Short label shown in the tab bar
    pub label: String,
    /// Unique absolute path
    pub path: String,
    /// One-line description
    pub description: String,
}

impl NavigationEntry {
    /// Create an entry
    pub fn new(
        id: impl Into<String>,
        icon: Icon,
        label: impl Into<String>,
        path: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            icon,
            label: label.into(),
            path: path.into(),
            description: description.into(),
        }
    }
}

/// Static table of navigation entries
///
/// Primary entries are rendered as tabs, left to right, and the first one
/// is the default screen. Secondary entries are addressable by path but
/// never rendered as tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    primary: Vec<NavigationEntry>,
    secondary: Vec<NavigationEntry>,
}

impl RouteTable {
    /// Build a table, checking that ids and paths are unique and absolute
    pub fn new(primary: Vec<NavigationEntry>, secondary: Vec<NavigationEntry>) -> Result<Self> {
        if primary.is_empty() {
            return Err(NavigationError::EmptyPrimary);
        }

        let mut ids = HashSet::new();
        let mut paths = HashSet::new();
        for entry in primary.iter().chain(secondary.iter()) {
            if !entry.path.starts_with('/') {
                return Err(NavigationError::RelativePath(entry.path.clone()));
            }
            if !ids.insert(entry.id.as_str()) {
                return Err(NavigationError::DuplicateIdentifier(entry.id.clone()));
            }
            if !paths.insert(entry.path.as_str()) {
                return Err(NavigationError::DuplicatePath(entry.path.clone()));
            }
        }

        Ok(Self { primary, secondary })
    }

    /// The application's table
    pub fn standard() -> Result<Self> {
        Self::new(
            vec![
                NavigationEntry::new("dashboard", Icon::Home, "Home", DEFAULT_PATH, "Main dashboard"),
                NavigationEntry::new("tasks", Icon::Tasks, "Tasks", "/tasks", "View and manage tasks"),
                NavigationEntry::new(
                    "notifications",
                    Icon::Bell,
                    "Alerts",
                    "/notifications",
                    "View notifications",
                ),
                NavigationEntry::new(
                    "profile",
                    Icon::User,
                    "Profile",
                    "/profile",
                    "User profile and settings",
                ),
            ],
            vec![
                NavigationEntry::new(
                    "lift-tracker",
                    Icon::Search,
                    "Lift Tracker",
                    "/lift-tracker",
                    "Track lift status",
                ),
                NavigationEntry::new(
                    "report-issue",
                    Icon::ExclamationTriangle,
                    "Report Issue",
                    "/report-issue",
                    "Report on-site issues",
                ),
            ],
        )
    }

    /// Tab-bar entries in display order
    pub fn primary_entries(&self) -> &[NavigationEntry] {
        &self.primary
    }

    /// Entries reachable only from inside screens
    pub fn secondary_entries(&self) -> &[NavigationEntry] {
        &self.secondary
    }

    /// Primary followed by secondary entries
    pub fn all_entries(&self) -> impl Iterator<Item = &NavigationEntry> {
        self.primary.iter().chain(self.secondary.iter())
    }

    /// Look up an entry by exact path
    pub fn find_by_path(&self, path: &str) -> Option<&NavigationEntry> {
        self.all_entries().find(|e| e.path == path)
    }

    /// Look up an entry by identifier
    pub fn find_by_id(&self, id: &str) -> Option<&NavigationEntry> {
        self.all_entries().find(|e| e.id == id)
    }

    /// The default (home) entry: the first primary entry
    pub fn default_entry(&self) -> &NavigationEntry {
        // Non-empty by construction
        &self.primary[0]
    }
}

// =============================================================================
// Route Definitions
// =============================================================================

/// Parameters extracted from a path template
pub type RouteParams = HashMap<String, String>;

/// Every screen the shell can mount
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "params", rename_all = "kebab-case")]
pub enum Route {
    /// Home dashboard
    #[default]
    Dashboard,
    /// Task list
    Tasks,
    /// One task
    TaskDetail {
        /// Task identifier
        task_id: String,
    },
    /// Compliance checklist for a task
    Compliance {
        /// Task identifier
        task_id: String,
    },
    /// Lift status tracker
    LiftTracker,
    /// Issue report form
    ReportIssue,
    /// Notification inbox
    Notifications,
    /// Technician profile
    Profile,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> String {
        match self {
            Route::Dashboard => DEFAULT_PATH.to_string(),
            Route::Tasks => "/tasks".to_string(),
            Route::TaskDetail { task_id } => format!("/task/{}", urlencoding::encode(task_id)),
            Route::Compliance { task_id } => {
                format!("/compliance/{}", urlencoding::encode(task_id))
            }
            Route::LiftTracker => "/lift-tracker".to_string(),
            Route::ReportIssue => "/report-issue".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Profile => "/profile".to_string(),
        }
    }

    /// Screen title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Tasks => "Tasks",
            Route::TaskDetail { .. } => "Task Details",
            Route::Compliance { .. } => "Compliance Checklist",
            Route::LiftTracker => "Lift Tracker",
            Route::ReportIssue => "Report Issue",
            Route::Notifications => "Notifications",
            Route::Profile => "Profile",
        }
    }

    /// Task id carried by detail routes
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Route::TaskDetail { task_id } | Route::Compliance { task_id } => Some(task_id),
            _ => None,
        }
    }

    /// Whether the route's screen receives the logout capability
    pub fn offers_logout(&self) -> bool {
        matches!(self, Route::Profile)
    }
}

// =============================================================================
// Router
// =============================================================================

/// Route pattern for matching
struct RoutePattern {
    /// Source template, e.g. `/task/:taskId`
    template: &'static str,
    /// Pattern segments
    segments: Vec<PatternSegment>,
    /// Route builder
    builder: fn(&RouteParams) -> Option<Route>,
}

/// Segment type in a pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    /// Literal segment
    Literal(String),
    /// Parameter segment
    Param(String),
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Screen to mount
    pub route: Route,
    /// Canonical path of that screen
    pub path: String,
    /// True when the requested path did not match and fell back to the default
    pub redirected: bool,
}

/// Path router: resolves every path to exactly one route
pub struct Router {
    patterns: Vec<RoutePattern>,
    fallback: Route,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("templates", &self.templates().collect::<Vec<_>>())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Router {
    /// Create a router with all routes
    pub fn new() -> Self {
        let mut router = Self {
            patterns: Vec::new(),
            fallback: Route::Dashboard,
        };

        router.add_route("/dashboard", |_| Some(Route::Dashboard));
        router.add_route("/tasks", |_| Some(Route::Tasks));
        router.add_route("/task/:taskId", |params| {
            Some(Route::TaskDetail {
                task_id: params.get("taskId")?.clone(),
            })
        });
        router.add_route("/compliance/:taskId", |params| {
            Some(Route::Compliance {
                task_id: params.get("taskId")?.clone(),
            })
        });
        router.add_route("/lift-tracker", |_| Some(Route::LiftTracker));
        router.add_route("/report-issue", |_| Some(Route::ReportIssue));
        router.add_route("/notifications", |_| Some(Route::Notifications));
        router.add_route("/profile", |_| Some(Route::Profile));

        router
    }

    /// Add a route pattern
    fn add_route(&mut self, template: &'static str, builder: fn(&RouteParams) -> Option<Route>) {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if let Some(param) = s.strip_prefix(':') {
                    PatternSegment::Param(param.to_string())
                } else {
                    PatternSegment::Literal(s.to_string())
                }
            })
            .collect();

        self.patterns.push(RoutePattern {
            template,
            segments,
            builder,
        });
    }

    /// Registered templates in match order
    pub fn templates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.patterns.iter().map(|p| p.template)
    }

    /// Match a path to a route, if any template matches
    pub fn match_path(&self, path: &str) -> Option<Route> {
        // Query strings and fragments never take part in matching
        let pathname = path.split(['?', '#']).next().unwrap_or_default();
        if !pathname.starts_with('/') {
            return None;
        }
        let path_segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();

        self.patterns.iter().find_map(|pattern| {
            let params = Self::match_pattern(&pattern.segments, &path_segments)?;
            (pattern.builder)(&params)
        })
    }

    /// Resolve a path to exactly one route, falling back to the default screen
    pub fn resolve(&self, path: &str) -> Resolution {
        match self.match_path(path) {
            Some(route) => Resolution {
                path: route.to_path(),
                route,
                redirected: false,
            },
            None => {
                tracing::debug!(requested = path, "Unmatched path, redirecting to default");
                Resolution {
                    path: self.fallback.to_path(),
                    route: self.fallback.clone(),
                    redirected: true,
                }
            }
        }
    }

    /// Match a pattern against path segments
    fn match_pattern(pattern: &[PatternSegment], path: &[&str]) -> Option<RouteParams> {
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = RouteParams::new();

        for (segment, actual) in pattern.iter().zip(path.iter()) {
            match segment {
                PatternSegment::Literal(expected) => {
                    if expected != *actual {
                        return None;
                    }
                }
                PatternSegment::Param(name) => {
                    params.insert(name.clone(), urlencoding::decode(actual).ok()?.into_owned());
                }
            }
        }

        Some(params)
    }
}

// =============================================================================
// Tests
// =============================================================================

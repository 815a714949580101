//! Headless navigation shell for the EliteConstruct field app
//!
//! This crate decides what is on screen without drawing anything: which
//! render tree is mounted, which route is active, which tab is highlighted,
//! and where content may be drawn.
//!
//! # Modules
//!
//! - [`navigation`] - Route table, typed routes and the path router
//! - [`history`] - ActivePath and the back stack
//! - [`tab_bar`] - Active tab selection and the tab bar model
//! - [`layout`] - Header, content and tab bar regions; scroll clamping
//! - [`shell`] - Auth gate and the authenticated shell
//! - [`tokens`] - Sizing and color tokens
//!
//! # Example
//!
//! ```rust
//! use app_state::UserSummary;
//! use app_ui::{AuthGate, GateView, NavigationRequest};
//!
//! let mut gate = AuthGate::new(UserSummary::default()).unwrap();
//! assert!(matches!(gate.view(), GateView::Login));
//!
//! gate.login();
//! gate.navigate(NavigationRequest::to("/task/TASK001"));
//! assert_eq!(gate.active_path(), Some("/task/TASK001"));
//!
//! gate.navigate(NavigationRequest::Back);
//! assert_eq!(gate.active_path(), Some("/dashboard"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod history;
pub mod layout;
pub mod navigation;
pub mod shell;
pub mod tab_bar;
pub mod tokens;

// Re-export commonly used types
pub use history::{History, HistoryEntry, NavigationRequest};

pub use layout::{LayoutShell, Region, ScrollState, ShellRegions};

pub use navigation::{
    Icon, NavigationEntry, NavigationError, Resolution, Route, RouteParams, RouteTable, Router,
    DEFAULT_PATH,
};

pub use shell::{
    AuthGate, CommandOutcome, GateView, LogoutHandle, NavigationOutcome, ScreenContext, Shell,
    ShellCommand,
};

pub use tab_bar::{active_entry, select_active, ActiveTab, MatchKind, TabBar, TabBarItem, TabRule};

pub use tokens::{breakpoints, color, sizing, Breakpoint};

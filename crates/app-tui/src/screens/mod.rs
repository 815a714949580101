//! Screen collaborators mounted by the shell
//!
//! One screen per route. A screen is mounted fresh for every history entry
//! and dropped when the entry is left, so its local state (selection,
//! filters, half-typed input) never outlives the visit.

use std::collections::HashMap;

use app_core::{Checklist, Inbox, TaskBoard};
use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};
use uuid::Uuid;

use crate::theme::ShellTheme;

mod compliance;
mod dashboard;
mod lift_tracker;
pub mod login;
mod notifications;
mod profile;
mod report_issue;
mod task_detail;
mod tasks;

pub use login::LoginScreen;

/// Data shared by screens for the lifetime of one shell mount
#[derive(Debug, Clone)]
pub struct FieldData {
    /// Mount this data belongs to
    pub mount_id: Uuid,
    /// Assigned tasks
    pub tasks: TaskBoard,
    /// Notification inbox
    pub inbox: Inbox,
    checklists: HashMap<String, Checklist>,
}

impl FieldData {
    /// Seed demo data for a new mount
    pub fn new(mount_id: Uuid) -> Self {
        Self {
            mount_id,
            tasks: TaskBoard::mock(),
            inbox: Inbox::mock(),
            checklists: HashMap::new(),
        }
    }

    /// Checklist for a task, if it has been opened
    pub fn checklist(&self, task_id: &str) -> Option<&Checklist> {
        self.checklists.get(task_id)
    }

    /// Checklist for a task, created on first use
    pub fn checklist_mut(&mut self, task_id: &str) -> &mut Checklist {
        self.checklists
            .entry(task_id.to_string())
            .or_insert_with(|| Checklist::for_task(task_id))
    }
}

/// What a key press did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenUpdate {
    /// Request for the shell
    pub command: Option<ShellCommand>,
    /// Message shown in the header until the next key
    pub notice: Option<String>,
    /// Whether the screen used the key
    pub handled: bool,
}

impl ScreenUpdate {
    /// Key was not used
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Key was used, nothing else to report
    pub fn handled() -> Self {
        Self {
            handled: true,
            ..Self::default()
        }
    }

    /// Key produced a shell command
    pub fn command(command: ShellCommand) -> Self {
        Self {
            command: Some(command),
            handled: true,
            ..Self::default()
        }
    }

    /// Key produced a message
    pub fn notice(message: impl Into<String>) -> Self {
        Self {
            notice: Some(message.into()),
            handled: true,
            ..Self::default()
        }
    }

    /// Attach a message
    pub fn with_notice(mut self, message: impl Into<String>) -> Self {
        self.notice = Some(message.into());
        self
    }
}

/// A screen mounted inside the shell
pub trait Screen {
    /// Header title
    fn title(&self, ctx: &ScreenContext<'_>) -> String {
        ctx.route.title().to_string()
    }

    /// Key hints shown under the title
    fn hints(&self) -> &'static str {
        ""
    }

    /// Content lines, drawn into the scrollable region
    fn render(&self, ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>>;

    /// Handle a key the shell did not consume
    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>, data: &mut FieldData) -> ScreenUpdate;

    /// Whether the screen is taking text input and wants every key
    fn captures_input(&self) -> bool {
        false
    }
}

/// Create the screen for a route
pub fn mount(route: &Route) -> Box<dyn Screen> {
    match route {
        Route::Dashboard => Box::new(dashboard::DashboardScreen::default()),
        Route::Tasks => Box::new(tasks::TasksScreen::default()),
        Route::TaskDetail { .. } => Box::new(task_detail::TaskDetailScreen::default()),
        Route::Compliance { .. } => Box::new(compliance::ComplianceScreen::default()),
        Route::LiftTracker => Box::new(lift_tracker::LiftTrackerScreen::default()),
        Route::ReportIssue => Box::new(report_issue::ReportIssueScreen::default()),
        Route::Notifications => Box::new(notifications::NotificationsScreen::default()),
        Route::Profile => Box::new(profile::ProfileScreen::default()),
    }
}

// ===== Shared helpers =====

/// Move a list selection with Up/Down. Returns true if the key was a move.
pub(crate) fn move_selection(selected: &mut usize, len: usize, key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            *selected = selected.saturating_sub(1);
            true
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if len > 0 {
                *selected = (*selected + 1).min(len - 1);
            }
            true
        }
        _ => false,
    }
}

/// Section heading line
pub(crate) fn heading(text: impl Into<String>, theme: &ShellTheme) -> Line<'static> {
    Line::from(Span::styled(text.into(), theme.title()))
}

/// Selectable row with a cursor marker
pub(crate) fn row(selected: bool, spans: Vec<Span<'static>>, theme: &ShellTheme) -> Line<'static> {
    let marker = if selected {
        Span::styled("▸ ", theme.selected())
    } else {
        Span::raw("  ")
    };
    let mut all = vec![marker];
    all.extend(spans);
    Line::from(all)
}

/// Text field line with a cursor when editing
pub(crate) fn field(
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
    editing: bool,
    theme: &ShellTheme,
) -> Line<'static> {
    let value_span = if value.is_empty() && !editing {
        Span::styled(placeholder.to_string(), theme.muted())
    } else if editing {
        Span::styled(format!("{}█", value), theme.selected())
    } else {
        Span::raw(value.to_string())
    };
    row(
        focused,
        vec![Span::styled(format!("{:<12}", label), theme.muted()), value_span],
        theme,
    )
}

//! Home dashboard: quick actions, upcoming tasks and today's summary

use app_core::TaskStatus;
use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{heading, move_selection, row, FieldData, Screen, ScreenUpdate};
use crate::theme::ShellTheme;

/// Selectable shortcut on the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
struct Shortcut {
    label: String,
    detail: String,
    target: String,
}

#[derive(Debug, Default)]
pub(crate) struct DashboardScreen {
    selected: usize,
}

impl DashboardScreen {
    fn shortcuts(data: &FieldData) -> Vec<Shortcut> {
        let mut shortcuts = vec![
            Shortcut {
                label: "Track Lift".to_string(),
                detail: "Scan QR Code".to_string(),
                target: Route::LiftTracker.to_path(),
            },
            Shortcut {
                label: "Report Issue".to_string(),
                detail: "On-site Problems".to_string(),
                target: Route::ReportIssue.to_path(),
            },
            Shortcut {
                label: "View All Tasks".to_string(),
                detail: format!("{} assigned", data.tasks.tasks().len()),
                target: Route::Tasks.to_path(),
            },
        ];

        for task in data.tasks.open_tasks() {
            shortcuts.push(Shortcut {
                label: task.title.clone(),
                detail: format!("{} · {}", task.site, task.status.badge()),
                target: Route::TaskDetail {
                    task_id: task.id.clone(),
                }
                .to_path(),
            });
        }
        shortcuts
    }
}

impl Screen for DashboardScreen {
    fn hints(&self) -> &'static str {
        "↑↓ select · Enter open"
    }

    fn render(&self, ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let shortcuts = Self::shortcuts(data);
        let mut lines = vec![
            Line::from(vec![
                Span::raw(format!("Good day, {}", ctx.user.first_name())),
                Span::styled(format!("  {} · {}", ctx.user.role, ctx.user.id), theme.muted()),
            ]),
            Line::default(),
            heading("Quick Actions", theme),
        ];

        for (index, shortcut) in shortcuts.iter().enumerate() {
            if index == 3 {
                lines.push(Line::default());
                lines.push(heading("Upcoming Tasks", theme));
            }
            lines.push(row(
                index == self.selected,
                vec![
                    Span::raw(shortcut.label.clone()),
                    Span::styled(format!("  {}", shortcut.detail), theme.muted()),
                ],
                theme,
            ));
        }

        let counts = data.tasks.status_counts();
        let count = |status: TaskStatus| counts.get(&status).copied().unwrap_or(0);
        lines.push(Line::default());
        lines.push(heading("Today's Summary", theme));
        lines.push(Line::from(vec![
            Span::raw(format!("  {} Total Tasks   ", data.tasks.tasks().len())),
            Span::styled(
                format!("{} Completed   ", count(TaskStatus::Completed)),
                theme.task_status(TaskStatus::Completed),
            ),
            Span::styled(
                format!("{} Pending", count(TaskStatus::Pending) + count(TaskStatus::InProgress)),
                theme.task_status(TaskStatus::Pending),
            ),
        ]));
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>, data: &mut FieldData) -> ScreenUpdate {
        let shortcuts = Self::shortcuts(data);
        if move_selection(&mut self.selected, shortcuts.len(), &key) {
            return ScreenUpdate::handled();
        }
        match key.code {
            KeyCode::Enter => match shortcuts.get(self.selected) {
                Some(shortcut) => ScreenUpdate::command(ShellCommand::go(shortcut.target.clone())),
                None => ScreenUpdate::handled(),
            },
            _ => ScreenUpdate::ignored(),
        }
    }
}

//! Task detail with the five-step work progress

use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{heading, FieldData, Screen, ScreenUpdate};
use crate::theme::ShellTheme;

const STEPS: [&str; 5] = ["Not Started", "Arrived", "Started", "Compliance", "Completed"];

#[derive(Debug)]
pub(crate) struct TaskDetailScreen {
    /// 1-based current step
    step: usize,
}

impl Default for TaskDetailScreen {
    fn default() -> Self {
        Self { step: 1 }
    }
}

impl TaskDetailScreen {
    fn advance_to(&mut self, step: usize) {
        self.step = self.step.max(step);
    }
}

impl Screen for TaskDetailScreen {
    fn title(&self, ctx: &ScreenContext<'_>) -> String {
        match ctx.task_id {
            Some(id) => format!("{} · {}", ctx.route.title(), id),
            None => ctx.route.title().to_string(),
        }
    }

    fn hints(&self) -> &'static str {
        "i check in · s start · c compliance · d complete · r report issue"
    }

    fn render(&self, ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let task_id = ctx.task_id.unwrap_or_default();
        let Some(task) = data.tasks.find(task_id) else {
            return vec![
                Line::from(Span::styled(format!("Task {} not found", task_id), theme.error())),
                Line::from(Span::styled("Esc to go back", theme.muted())),
            ];
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(task.title.clone(), theme.title()),
                Span::raw("  "),
                Span::styled(task.status.badge().to_string(), theme.task_status(task.status)),
            ]),
            Line::from(Span::styled(
                format!("{} · {}", task.site, task.address),
                theme.muted(),
            )),
            Line::from(Span::styled(
                format!("Lift {} · due {} · {:?} priority", task.lift_id, task.due_date, task.priority),
                theme.muted(),
            )),
            Line::default(),
            heading("Progress", theme),
        ];

        for (index, name) in STEPS.iter().enumerate() {
            let number = index + 1;
            let (marker, style) = if number < self.step {
                ("✓", theme.item_status(app_core::ItemStatus::Ok))
            } else if number == self.step {
                ("●", theme.selected())
            } else {
                ("○", theme.muted())
            };
            lines.push(Line::from(Span::styled(format!("  {} {}", marker, name), style)));
        }

        let checklist = data
            .checklist(&task.id)
            .map(|c| c.progress())
            .map_or("not started".to_string(), |(done, total)| format!("{}/{} checked", done, total));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Compliance checklist: ", theme.muted()),
            Span::raw(checklist),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Assigned to: ", theme.muted()),
            Span::raw(task.assigned_to.clone()),
        ]));
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>, _data: &mut FieldData) -> ScreenUpdate {
        let Some(task_id) = ctx.task_id else {
            return ScreenUpdate::ignored();
        };
        match key.code {
            KeyCode::Char('i') => {
                self.advance_to(2);
                ScreenUpdate::notice("Check-in successful! Location captured.")
            }
            KeyCode::Char('s') => {
                self.advance_to(3);
                ScreenUpdate::handled()
            }
            KeyCode::Char('c') => {
                self.advance_to(4);
                let target = Route::Compliance {
                    task_id: task_id.to_string(),
                };
                ScreenUpdate::command(ShellCommand::go(target.to_path()))
            }
            KeyCode::Char('d') => {
                self.advance_to(5);
                ScreenUpdate::notice("Task completed successfully!")
            }
            KeyCode::Char('r') => ScreenUpdate::command(ShellCommand::go(Route::ReportIssue.to_path())),
            _ => ScreenUpdate::ignored(),
        }
    }
}

//! Task list with search and status filter

use app_core::{TaskFilter, TaskStatus};
use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{field, heading, move_selection, row, FieldData, Screen, ScreenUpdate};
use crate::input::edit_text;
use crate::theme::ShellTheme;

#[derive(Debug, Default)]
pub(crate) struct TasksScreen {
    filter: TaskFilter,
    selected: usize,
    searching: bool,
}

impl Screen for TasksScreen {
    fn hints(&self) -> &'static str {
        if self.searching {
            "type to search · Enter/Esc done"
        } else {
            "/ search · f filter · ↑↓ select · Enter open"
        }
    }

    fn render(&self, _ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let tasks = data.tasks.filter(&self.filter);
        let mut lines = vec![
            field(
                "Search",
                &self.filter.search,
                "Search tasks, sites, or lift IDs...",
                false,
                self.searching,
                theme,
            ),
            Line::from(vec![
                Span::styled(format!("{:<14}", "Status"), theme.muted()),
                Span::styled(self.filter.status_label().to_string(), theme.selected()),
            ]),
            Line::default(),
            heading(format!("Tasks ({})", tasks.len()), theme),
        ];

        if tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "  No tasks found. Try adjusting your search or filter.",
                theme.muted(),
            )));
        }

        for (index, task) in tasks.iter().enumerate() {
            lines.push(row(
                index == self.selected,
                vec![
                    Span::raw(format!("{}  ", task.title)),
                    Span::styled(task.status.badge().to_string(), theme.task_status(task.status)),
                ],
                theme,
            ));
            lines.push(Line::from(Span::styled(
                format!("    {} · {} · due {}", task.site, task.lift_id, task.due_date),
                theme.muted(),
            )));
        }

        let counts = data.tasks.status_counts();
        lines.push(Line::default());
        lines.push(Line::from(
            TaskStatus::all()
                .into_iter()
                .map(|status| {
                    Span::styled(
                        format!("{} {}   ", counts.get(&status).copied().unwrap_or(0), status.badge()),
                        theme.task_status(status),
                    )
                })
                .collect::<Vec<_>>(),
        ));
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>, data: &mut FieldData) -> ScreenUpdate {
        if self.searching {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.searching = false,
                _ => {
                    if edit_text(&mut self.filter.search, &key) {
                        self.selected = 0;
                    }
                }
            }
            return ScreenUpdate::handled();
        }

        let visible = data.tasks.filter(&self.filter);
        if move_selection(&mut self.selected, visible.len(), &key) {
            return ScreenUpdate::handled();
        }

        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                ScreenUpdate::handled()
            }
            KeyCode::Char('f') => {
                self.filter.cycle_status();
                self.selected = 0;
                ScreenUpdate::handled()
            }
            KeyCode::Enter => match visible.get(self.selected) {
                Some(task) => {
                    let target = Route::TaskDetail {
                        task_id: task.id.clone(),
                    };
                    ScreenUpdate::command(ShellCommand::go(target.to_path()))
                }
                None => ScreenUpdate::handled(),
            },
            _ => ScreenUpdate::ignored(),
        }
    }

    fn captures_input(&self) -> bool {
        self.searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::*;

    #[test]
    fn test_search_narrows_list() {
        let gate = gate_at("/tasks");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        let mut screen = TasksScreen::default();

        screen.handle_key(key(KeyCode::Char('/')), &ctx, &mut data);
        assert!(screen.captures_input());
        for c in "mall".chars() {
            screen.handle_key(key(KeyCode::Char(c)), &ctx, &mut data);
        }
        screen.handle_key(key(KeyCode::Enter), &ctx, &mut data);
        assert!(!screen.captures_input());

        let out = text(&screen.render(&ctx, &data, &ShellTheme::default()));
        assert!(out.contains("Tasks (1)"));
        assert!(out.contains("Maintenance Check - Building B"));

        let update = screen.handle_key(key(KeyCode::Enter), &ctx, &mut data);
        assert_eq!(update.command, Some(ShellCommand::go("/task/TASK002")));
    }

    #[test]
    fn test_status_filter_cycles() {
        let gate = gate_at("/tasks");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        let mut screen = TasksScreen::default();

        screen.handle_key(key(KeyCode::Char('f')), &ctx, &mut data);
        assert_eq!(screen.filter.status, Some(TaskStatus::Pending));
        let out = text(&screen.render(&ctx, &data, &ShellTheme::default()));
        assert!(out.contains("Tasks (1)"));

        // Overdue has no tasks
        for _ in 0..3 {
            screen.handle_key(key(KeyCode::Char('f')), &ctx, &mut data);
        }
        let out = text(&screen.render(&ctx, &data, &ShellTheme::default()));
        assert!(out.contains("No tasks found"));
        let update = screen.handle_key(key(KeyCode::Enter), &ctx, &mut data);
        assert!(update.command.is_none());
    }

    #[test]
    fn test_escape_leaves_search_without_navigating() {
        let gate = gate_at("/tasks");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        let mut screen = TasksScreen::default();
        screen.handle_key(key(KeyCode::Char('/')), &ctx, &mut data);
        let update = screen.handle_key(key(KeyCode::Esc), &ctx, &mut data);
        assert!(update.handled);
        assert!(update.command.is_none());
        assert!(!screen.captures_input());
    }
}

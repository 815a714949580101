//! Notification inbox

use app_core::NotificationKind;
use app_ui::{Route, ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{heading, move_selection, row, FieldData, Screen, ScreenUpdate};
use crate::theme::ShellTheme;

#[derive(Debug, Default)]
pub(crate) struct NotificationsScreen {
    selected: usize,
}

fn kind_glyph(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Task => "▣",
        NotificationKind::Schedule => "◷",
        NotificationKind::Message => "✉",
        NotificationKind::Alert => "⚠",
        NotificationKind::Completion => "✓",
        NotificationKind::Reminder => "◔",
    }
}

impl Screen for NotificationsScreen {
    fn hints(&self) -> &'static str {
        "↑↓ select · Enter open · a mark all read"
    }

    fn render(&self, _ctx: &ScreenContext<'_>, data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let unread = data.inbox.unread_count();
        let mut lines = vec![
            Line::from(Span::styled(
                if unread == 0 {
                    "All caught up".to_string()
                } else {
                    format!("{} unread", unread)
                },
                theme.muted(),
            )),
            Line::default(),
            heading("Recent", theme),
        ];

        for (index, n) in data.inbox.notifications().iter().enumerate() {
            let title_style = if n.is_read { theme.muted() } else { theme.title() };
            lines.push(row(
                index == self.selected,
                vec![
                    Span::styled(format!("{} ", kind_glyph(n.kind)), theme.notification_priority(n.priority)),
                    Span::styled(n.title.clone(), title_style),
                    Span::styled(if n.is_read { "" } else { " •" }.to_string(), theme.active_tab()),
                    Span::styled(format!("  {}", n.timestamp), theme.muted()),
                ],
                theme,
            ));
            lines.push(Line::from(Span::styled(format!("    {}", n.message), theme.muted())));
            lines.push(Line::from(Span::styled(format!("    [{}]", n.action), theme.muted())));
        }
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &ScreenContext<'_>, data: &mut FieldData) -> ScreenUpdate {
        if move_selection(&mut self.selected, data.inbox.notifications().len(), &key) {
            return ScreenUpdate::handled();
        }

        match key.code {
            KeyCode::Char('a') => {
                data.inbox.mark_all_read();
                ScreenUpdate::handled()
            }
            KeyCode::Enter => {
                let Some(n) = data.inbox.notifications().get(self.selected) else {
                    return ScreenUpdate::handled();
                };
                let (id, action) = (n.id, n.action.clone());
                data.inbox.mark_read(id);
                match data.inbox.linked_task(id) {
                    Some(task_id) => {
                        let target = Route::TaskDetail {
                            task_id: task_id.to_string(),
                        };
                        ScreenUpdate::command(ShellCommand::go(target.to_path()))
                    }
                    None => ScreenUpdate::notice(format!("{}: nothing to open", action)),
                }
            }
            _ => ScreenUpdate::ignored(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::*;

    #[test]
    fn test_open_marks_read_and_follows_task() {
        let gate = gate_at("/notifications");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        let mut screen = NotificationsScreen::default();
        assert_eq!(data.inbox.unread_count(), 2);

        let update = screen.handle_key(key(KeyCode::Enter), &ctx, &mut data);
        assert_eq!(update.command, Some(ShellCommand::go("/task/TASK001")));
        assert_eq!(data.inbox.unread_count(), 1);
    }

    #[test]
    fn test_unlinked_notification_shows_action() {
        let gate = gate_at("/notifications");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        let mut screen = NotificationsScreen::default();
        screen.handle_key(key(KeyCode::Down), &ctx, &mut data);
        screen.handle_key(key(KeyCode::Down), &ctx, &mut data);

        let update = screen.handle_key(key(KeyCode::Enter), &ctx, &mut data);
        assert!(update.command.is_none());
        assert_eq!(update.notice.as_deref(), Some("Reply: nothing to open"));
    }

    #[test]
    fn test_mark_all_read() {
        let gate = gate_at("/notifications");
        let ctx = gate.screen_context().unwrap();
        let mut data = data();
        NotificationsScreen::default().handle_key(key(KeyCode::Char('a')), &ctx, &mut data);
        assert_eq!(data.inbox.unread_count(), 0);
        let out = text(&NotificationsScreen::default().render(&ctx, &data, &ShellTheme::default()));
        assert!(out.contains("All caught up"));
    }
}

//! Technician profile, settings and logout

use app_ui::{ScreenContext, ShellCommand};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};

use super::{heading, FieldData, Screen, ScreenUpdate};
use crate::theme::ShellTheme;

const LANGUAGES: [&str; 3] = ["English", "Hindi", "Gujarati"];

const STATS: [(&str, &str); 4] = [
    ("Tasks Completed", "127"),
    ("Hours Worked", "1,240"),
    ("Lifts Installed", "89"),
    ("Rating", "4.8"),
];

#[derive(Debug, Default)]
pub(crate) struct ProfileScreen {
    confirm_logout: bool,
    language: usize,
}

impl Screen for ProfileScreen {
    fn hints(&self) -> &'static str {
        if self.confirm_logout {
            "y log out · n cancel"
        } else {
            "l language · o log out"
        }
    }

    fn render(&self, ctx: &ScreenContext<'_>, _data: &FieldData, theme: &ShellTheme) -> Vec<Line<'static>> {
        let user = ctx.user;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("[{}] ", user.initials()), theme.active_tab()),
                Span::styled(user.name.clone(), theme.title()),
            ]),
            Line::from(Span::styled(format!("      {} · {}", user.role, user.id), theme.muted())),
            Line::default(),
            heading("Performance", theme),
        ];
        for (label, value) in STATS {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<18}", label), theme.muted()),
                Span::raw(value),
            ]));
        }

        lines.push(Line::default());
        lines.push(heading("Settings", theme));
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", "Language"), theme.muted()),
            Span::styled(LANGUAGES[self.language % LANGUAGES.len()], theme.selected()),
        ]));
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<18}", "Notifications"), theme.muted()),
            Span::raw("On"),
        ]));
        lines.push(Line::default());

        if self.confirm_logout {
            lines.push(Line::from(Span::styled(
                "  Are you sure you want to log out? (y/n)",
                theme.error(),
            )));
        } else {
            lines.push(Line::from(Span::styled("  Log Out", theme.error())));
        }
        lines
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &ScreenContext<'_>, _data: &mut FieldData) -> ScreenUpdate {
        if self.confirm_logout {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.confirm_logout = false;
                    match ctx.logout {
                        Some(handle) => ScreenUpdate::command(ShellCommand::Logout(handle)),
                        None => ScreenUpdate::handled(),
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.confirm_logout = false;
                    ScreenUpdate::handled()
                }
                _ => ScreenUpdate::handled(),
            };
        }

        match key.code {
            KeyCode::Char('l') => {
                self.language = (self.language + 1) % LANGUAGES.len();
                ScreenUpdate::notice(format!("Language set to {}", LANGUAGES[self.language]))
            }
            KeyCode::Char('o') if ctx.logout.is_some() => {
                self.confirm_logout = true;
                ScreenUpdate::handled()
            }
            _ => ScreenUpdate::ignored(),
        }
    }

    fn captures_input(&self) -> bool {
        self.confirm_logout
    }
}

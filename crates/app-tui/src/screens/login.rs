//! Login view
//!
//! Mounted alone, outside the shell. The form refuses to submit with an
//! empty field; whether a submission opens the session is up to the auth
//! gate's verifier.

use app_state::LoginRequest;
use app_ui::sizing;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::input::edit_text;
use crate::theme::ShellTheme;

/// Focused form field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    /// Email address
    #[default]
    Email,
    /// Password
    Password,
}

/// Login form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginScreen {
    email: String,
    password: String,
    focus: LoginField,
    show_password: bool,
    error: Option<String>,
}

impl LoginScreen {
    /// Focused field
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    /// Last rejection message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show a rejection message
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Handle a key. Returns a request when the form is submitted.
    ///
    /// Enter submits the credentials, Ctrl+D is the quick access button,
    /// Ctrl+R toggles password visibility and Tab/Up/Down switch fields.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<LoginRequest> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('d') if ctrl => {
                self.error = None;
                Some(LoginRequest::QuickAccess)
            }
            KeyCode::Char('r') if ctrl => {
                self.show_password = !self.show_password;
                None
            }
            KeyCode::Enter => match self.missing_input() {
                Some((field, message)) => {
                    self.focus = field;
                    self.error = Some(message.to_string());
                    None
                }
                None => {
                    self.error = None;
                    Some(LoginRequest::credentials(self.email.trim(), self.password.clone()))
                }
            },
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
                None
            }
            _ => {
                let buffer = match self.focus {
                    LoginField::Email => &mut self.email,
                    LoginField::Password => &mut self.password,
                };
                if edit_text(buffer, &key) {
                    self.error = None;
                }
                None
            }
        }
    }

    /// Both inputs are required and the email needs an '@'
    fn missing_input(&self) -> Option<(LoginField, &'static str)> {
        let email = self.email.trim();
        if email.is_empty() {
            Some((LoginField::Email, "Please fill in your email address"))
        } else if !email.contains('@') {
            Some((LoginField::Email, "Please include an '@' in the email address"))
        } else if self.password.is_empty() {
            Some((LoginField::Password, "Please fill in your password"))
        } else {
            None
        }
    }

    fn masked_password(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }

    /// Draw the login card centered in `area`
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &ShellTheme) {
        let [card] = Layout::horizontal([Constraint::Length(sizing::login_card::WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [card] = Layout::vertical([Constraint::Length(sizing::login_card::HEIGHT)])
            .flex(Flex::Center)
            .areas(card);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.muted())
            .title(" Technician Login ")
            .title_alignment(Alignment::Center);

        let input = |label: &str, value: String, placeholder: &str, focused: bool| {
            let style = if focused { theme.selected() } else { theme.muted() };
            let value = if value.is_empty() {
                Span::styled(placeholder.to_string(), theme.muted())
            } else if focused {
                Span::raw(format!("{}█", value))
            } else {
                Span::raw(value)
            };
            vec![
                Line::from(Span::styled(label.to_string(), style)),
                Line::from(vec![Span::styled("› ", style), value]),
            ]
        };

        let mut lines = vec![
            Line::from(Span::styled("EliteConstruct", theme.active_tab())).alignment(Alignment::Center),
            Line::from(Span::styled("Field Service Management", theme.muted()))
                .alignment(Alignment::Center),
            Line::default(),
        ];
        lines.extend(input(
            "Email Address",
            self.email.clone(),
            "Enter your email",
            self.focus == LoginField::Email,
        ));
        lines.extend(input(
            "Password",
            self.masked_password(),
            "Enter your password",
            self.focus == LoginField::Password,
        ));
        lines.push(Line::default());
        match &self.error {
            Some(error) => lines.push(Line::from(Span::styled(error.clone(), theme.error()))),
            None => lines.push(Line::from(Span::styled(
                "Enter sign in · Ctrl+D quick access (demo)",
                theme.muted(),
            ))),
        }
        lines.push(Line::from(Span::styled(
            "Ctrl+R show password · Esc quit",
            theme.muted(),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::test_support::key;

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            assert!(screen.handle_key(key(KeyCode::Char(c))).is_none());
        }
    }

    #[test]
    fn test_submit_credentials() {
        let mut screen = LoginScreen::default();
        type_text(&mut screen, "john@eliteconstruct.com");
        screen.handle_key(key(KeyCode::Tab));
        assert_eq!(screen.focus(), LoginField::Password);
        type_text(&mut screen, "pw");

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            Some(LoginRequest::credentials("john@eliteconstruct.com", "pw"))
        );
    }

    #[test]
    fn test_empty_fields_block_submit() {
        let mut screen = LoginScreen::default();
        assert!(screen.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(screen.error(), Some("Please fill in your email address"));
        assert_eq!(screen.focus(), LoginField::Email);

        type_text(&mut screen, "john");
        assert!(screen.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(screen.error(), Some("Please include an '@' in the email address"));

        type_text(&mut screen, "@eliteconstruct.com");
        assert!(screen.handle_key(key(KeyCode::Enter)).is_none());
        assert_eq!(screen.error(), Some("Please fill in your password"));
        assert_eq!(screen.focus(), LoginField::Password);

        type_text(&mut screen, "pw");
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter)),
            Some(LoginRequest::credentials("john@eliteconstruct.com", "pw"))
        );
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_quick_access_ignores_empty_fields() {
        let mut screen = LoginScreen::default();
        screen.handle_key(key(KeyCode::Enter));
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_d), Some(LoginRequest::QuickAccess));
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_quick_access() {
        let mut screen = LoginScreen::default();
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_d), Some(LoginRequest::QuickAccess));
    }

    #[test]
    fn test_password_masking() {
        let mut screen = LoginScreen::default();
        screen.handle_key(key(KeyCode::Down));
        type_text(&mut screen, "abc");
        assert_eq!(screen.masked_password(), "•••");

        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        screen.handle_key(ctrl_r);
        assert_eq!(screen.masked_password(), "abc");
    }

    #[test]
    fn test_typing_clears_error() {
        let mut screen = LoginScreen::default();
        screen.set_error("Missing required field: email");
        type_text(&mut screen, "j");
        assert!(screen.error().is_none());
    }
}

//! Application state and event loop

use std::time::Duration;

use anyhow::{Context, Result};
use app_ui::{
    AuthGate, CommandOutcome, GateView, LayoutShell, NavigationOutcome, NavigationRequest,
    ScrollState, ShellCommand,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;

use crate::config::TuiConfig;
use crate::input::{edit_text, global_action, is_interrupt, GlobalAction};
use crate::render::{render_login, render_shell, ShellFrame, StatusLine};
use crate::screens::{self, FieldData, LoginScreen, Screen};
use crate::terminal::ShellTerminal;
use crate::theme::ShellTheme;

/// Screen mounted for one history entry
struct MountedScreen {
    entry_key: String,
    screen: Box<dyn Screen>,
}

/// Terminal application: the auth gate plus everything needed to draw it
pub struct App {
    gate: AuthGate,
    theme: ShellTheme,
    layout: LayoutShell,
    tick_rate: Duration,
    login: LoginScreen,
    data: Option<FieldData>,
    mounted: Option<MountedScreen>,
    scroll: ScrollState,
    prompt: Option<String>,
    notice: Option<String>,
    open_path: Option<String>,
    should_quit: bool,
}

impl App {
    /// Create the app from configuration
    pub fn new(config: TuiConfig) -> Result<Self> {
        let gate = AuthGate::new(config.user.clone())
            .context("Invalid route table")?
            .with_verifier(config.verifier());
        let mut app = Self {
            gate,
            theme: ShellTheme::default(),
            layout: config.layout_shell(),
            tick_rate: config.tick_rate(),
            login: LoginScreen::default(),
            data: None,
            mounted: None,
            scroll: ScrollState::default(),
            prompt: None,
            notice: None,
            open_path: config.behavior.open_path.clone(),
            should_quit: false,
        };

        if config.behavior.auto_login && app.gate.login().is_changed() {
            app.signed_in();
        }
        app.sync();
        Ok(app)
    }

    /// Auth gate
    pub fn gate(&self) -> &AuthGate {
        &self.gate
    }

    /// Message shown in the header, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Login form state
    pub fn login(&self) -> &LoginScreen {
        &self.login
    }

    /// Whether the go-to-path prompt is open
    pub fn prompt_open(&self) -> bool {
        self.prompt.is_some()
    }

    /// Whether the event loop should stop
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Shared data of the current mount
    pub fn data(&self) -> Option<&FieldData> {
        self.data.as_ref()
    }

    // ===== Input =====

    /// Handle one key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if is_interrupt(&key) {
            self.should_quit = true;
            return;
        }

        self.notice = None;
        if self.gate.is_authenticated() {
            self.handle_shell_key(key);
        } else {
            self.handle_login_key(key);
        }
        self.sync();
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        let Some(request) = self.login.handle_key(key) else {
            return;
        };
        match self.gate.submit_login(&request) {
            Ok(transition) if transition.is_changed() => self.signed_in(),
            Ok(_) => {}
            Err(e) => self.login.set_error(e.to_string()),
        }
    }

    fn handle_shell_key(&mut self, key: KeyEvent) {
        if let Some(prompt) = self.prompt.as_mut() {
            match key.code {
                KeyCode::Enter => {
                    let path = std::mem::take(prompt);
                    self.prompt = None;
                    if !path.trim().is_empty() {
                        self.navigate(NavigationRequest::to(path.trim()));
                    }
                }
                KeyCode::Esc => self.prompt = None,
                _ => {
                    edit_text(prompt, &key);
                }
            }
            return;
        }

        let captured = self
            .mounted
            .as_ref()
            .is_some_and(|m| m.screen.captures_input());
        if !captured {
            if let Some(action) = global_action(&key) {
                self.apply_global(action);
                return;
            }
        }
        self.dispatch_to_screen(key);
    }

    fn apply_global(&mut self, action: GlobalAction) {
        let Some(shell) = self.gate.shell() else {
            return;
        };
        let bar = shell.tab_bar();
        let request = match action {
            GlobalAction::Quit => {
                self.should_quit = true;
                None
            }
            GlobalAction::SelectTab(index) => bar.select(index),
            GlobalAction::NextTab => bar.select(bar.next_index()),
            GlobalAction::PreviousTab => bar.select(bar.previous_index()),
            GlobalAction::Back => Some(NavigationRequest::Back),
            GlobalAction::OpenPrompt => {
                self.prompt = Some(String::new());
                None
            }
            GlobalAction::PageUp => {
                self.scroll.page_up();
                None
            }
            GlobalAction::PageDown => {
                self.scroll.page_down();
                None
            }
        };
        if let Some(request) = request {
            self.navigate(request);
        }
    }

    fn dispatch_to_screen(&mut self, key: KeyEvent) {
        let (Some(ctx), Some(mounted), Some(data)) = (
            self.gate.screen_context(),
            self.mounted.as_mut(),
            self.data.as_mut(),
        ) else {
            return;
        };
        let update = mounted.screen.handle_key(key, &ctx, data);

        if let Some(notice) = update.notice {
            self.notice = Some(notice);
        }
        if let Some(command) = update.command {
            self.apply_command(command);
        }
    }

    // ===== Shell =====

    fn navigate(&mut self, request: NavigationRequest) {
        let outcome = self.gate.navigate(request);
        self.report(outcome);
    }

    fn apply_command(&mut self, command: ShellCommand) {
        match self.gate.apply(command) {
            CommandOutcome::Navigation(outcome) => self.report(outcome),
            CommandOutcome::Session(transition) => {
                if transition.is_changed() {
                    tracing::info!("Signed out");
                    self.login = LoginScreen::default();
                }
            }
        }
    }

    fn report(&mut self, outcome: NavigationOutcome) {
        if let NavigationOutcome::Redirected { requested } = &outcome {
            let active = self.gate.active_path().unwrap_or_default();
            tracing::info!(requested = %requested, active = %active, "Redirected unknown path");
            self.notice = Some(format!("No page at {}, showing {}", requested, active));
        } else {
            tracing::trace!(?outcome, "Navigation");
        }
    }

    fn signed_in(&mut self) {
        self.login = LoginScreen::default();
        tracing::info!(user = %self.gate.user().id, "Signed in");
        if let Some(path) = self.open_path.take() {
            self.navigate(NavigationRequest::to(path));
        }
    }

    /// Mount data and screen for the current gate state.
    ///
    /// Data follows the shell mount and the screen follows the active
    /// history entry; both are dropped when the shell is gone.
    fn sync(&mut self) {
        let Some(shell) = self.gate.shell() else {
            self.data = None;
            self.mounted = None;
            self.prompt = None;
            return;
        };

        let mount_id = shell.mount_id();
        if self.data.as_ref().map(|d| d.mount_id) != Some(mount_id) {
            tracing::debug!(%mount_id, "Seeding field data");
            self.data = Some(FieldData::new(mount_id));
        }

        let entry = shell.history().current_entry();
        if self.mounted.as_ref().map(|m| m.entry_key.as_str()) != Some(entry.key.as_str()) {
            tracing::debug!(path = %entry.path, "Mounting screen");
            self.mounted = Some(MountedScreen {
                entry_key: entry.key.clone(),
                screen: screens::mount(shell.route()),
            });
            self.scroll.reset();
        }
    }

    // ===== Drawing =====

    /// Draw one frame
    pub fn draw(&mut self, frame: &mut Frame) {
        let shell = match self.gate.view() {
            GateView::Login => {
                render_login(frame, &self.login, &self.theme);
                return;
            }
            GateView::Shell(shell) => shell,
        };
        let (Some(ctx), Some(mounted), Some(data)) = (
            self.gate.screen_context(),
            self.mounted.as_ref(),
            self.data.as_ref(),
        ) else {
            return;
        };

        let unread = u32::try_from(data.inbox.unread_count()).unwrap_or(u32::MAX);
        let bar = shell.tab_bar().set_badge("notifications", unread);
        let status = match (&self.prompt, &self.notice) {
            (Some(prompt), _) => StatusLine::Prompt(prompt),
            (None, Some(notice)) => StatusLine::Notice(notice),
            (None, None) => StatusLine::Hints(mounted.screen.hints()),
        };
        let view = ShellFrame {
            title: mounted.screen.title(&ctx),
            status,
            lines: mounted.screen.render(&ctx, data, &self.theme),
            tab_bar: &bar,
        };
        render_shell(frame, &self.layout, view, &mut self.scroll, &self.theme);
    }

    /// Run the event loop until quit
    pub fn run(&mut self, terminal: &mut ShellTerminal) -> Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| self.draw(frame))
                .context("Failed to draw frame")?;

            if event::poll(self.tick_rate).context("Failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, BehaviorConfig};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn signed_in() -> App {
        let mut config = TuiConfig::default();
        config.behavior.auto_login = true;
        App::new(config).unwrap()
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_starts_on_login_view() {
        let mut app = App::new(TuiConfig::default()).unwrap();
        assert!(!app.gate().is_authenticated());
        assert!(app.data().is_none());
        assert!(screen_text(&mut app).contains("Technician Login"));
    }

    #[test]
    fn test_quick_access_opens_dashboard() {
        let mut app = App::new(TuiConfig::default()).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(app.gate().active_path(), Some("/dashboard"));
        assert!(screen_text(&mut app).contains("Good day, John"));
    }

    #[test]
    fn test_rejected_login_shows_error() {
        let config = TuiConfig {
            auth: AuthConfig {
                require_credentials: true,
            },
            ..TuiConfig::default()
        };
        let mut app = App::new(config).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(!app.gate().is_authenticated());
        assert!(app.login().error().is_some());
    }

    #[test]
    fn test_empty_sign_in_stays_on_login() {
        let mut app = App::new(TuiConfig::default()).unwrap();
        press(&mut app, KeyCode::Enter);
        assert!(!app.gate().is_authenticated());
        assert_eq!(app.login().error(), Some("Please fill in your email address"));
        assert!(screen_text(&mut app).contains("Please fill in your email address"));

        type_text(&mut app, "john@eliteconstruct.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "pw");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.gate().active_path(), Some("/dashboard"));
    }

    #[test]
    fn test_escape_quits_from_login() {
        let mut app = App::new(TuiConfig::default()).unwrap();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }

    #[test]
    fn test_open_path_applies_after_first_login() {
        let config = TuiConfig {
            behavior: BehaviorConfig {
                auto_login: true,
                open_path: Some("/tasks".to_string()),
                ..BehaviorConfig::default()
            },
            ..TuiConfig::default()
        };
        let app = App::new(config).unwrap();
        assert_eq!(app.gate().active_path(), Some("/tasks"));
        assert_eq!(app.gate().shell().unwrap().history().depth(), 2);
    }

    #[test]
    fn test_tabs_and_back() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.gate().active_path(), Some("/tasks"));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.gate().active_path(), Some("/notifications"));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.gate().active_path(), Some("/tasks"));
    }

    #[test]
    fn test_prompt_navigation_and_redirect_notice() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('g'));
        assert!(app.prompt_open());
        type_text(&mut app, "/nowhere");
        press(&mut app, KeyCode::Enter);

        assert!(!app.prompt_open());
        // Redirect to the current path pushes nothing and reports nothing
        assert_eq!(app.gate().active_path(), Some("/dashboard"));
        assert!(app.notice().is_none());

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "/nowhere");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.gate().active_path(), Some("/dashboard"));
        assert_eq!(app.notice(), Some("No page at /nowhere, showing /dashboard"));
    }

    #[test]
    fn test_capturing_screen_gets_global_keys() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        // 'q' and digits are text while searching
        type_text(&mut app, "q1");
        assert!(!app.should_quit());
        assert_eq!(app.gate().active_path(), Some("/tasks"));
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_screen_state_resets_per_entry() {
        let mut app = signed_in();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.data().unwrap().inbox.unread_count(), 0);

        // Shared data survives navigation, screen-local state does not
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.data().unwrap().inbox.unread_count(), 0);
        assert!(screen_text(&mut app).contains("All caught up"));
    }

    #[test]
    fn test_logout_from_profile_returns_to_login() {
        let mut app = signed_in();
        let first_mount = app.data().unwrap().mount_id;
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('y'));
        assert!(!app.gate().is_authenticated());
        assert!(app.data().is_none());
        assert!(app.gate().active_path().is_none());

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(app.gate().active_path(), Some("/dashboard"));
        assert_ne!(app.data().unwrap().mount_id, first_mount);
        assert_eq!(app.data().unwrap().inbox.unread_count(), 2);
    }

    #[test]
    fn test_notification_badge_is_drawn() {
        let mut app = signed_in();
        assert!(screen_text(&mut app).contains("Alerts (2)"));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = signed_in();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(!app.should_quit());
    }
}

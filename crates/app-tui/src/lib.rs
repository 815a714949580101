//! Terminal front end for the EliteConstruct field shell
//!
//! Draws the auth gate from `app-ui` with ratatui and feeds it crossterm key
//! events. Signed out, the login card fills the terminal; signed in, the
//! shell shows a header, the mounted screen and the tab bar.
//!
//! # Modules
//!
//! - [`app`] - Application state, key routing and the event loop
//! - [`config`] - TOML configuration
//! - [`input`] - Shell-wide key bindings and text editing
//! - [`render`] - Shell chrome and login drawing
//! - [`screens`] - One screen per route, plus the login form
//! - [`tab_bar`] - Tab bar widget
//! - [`terminal`] - Raw mode and alternate screen lifecycle
//! - [`theme`] - Styles from the color tokens

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod input;
pub mod render;
pub mod screens;
pub mod tab_bar;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use config::{ConfigError, TuiConfig};
pub use theme::ShellTheme;

/// Set up the terminal, run the app until it quits and restore the terminal
pub fn run(config: TuiConfig) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;
    let result = app.run(&mut terminal);

    terminal::restore_terminal()?;
    result
}

//! Terminal lifecycle
//!
//! Raw mode and the alternate screen are entered by [`setup_terminal`] and
//! left by [`restore_terminal`]. The panic hook restores the terminal before
//! the panic message is printed.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Terminal type the shell draws to
pub type ShellTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enable raw mode, enter the alternate screen and create the terminal.
///
/// Call [`install_panic_hook`] first.
/// Raw mode is disabled again if a later step fails.
pub fn setup_terminal() -> Result<ShellTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    undo_on_error(execute!(stdout, EnterAlternateScreen), || {
        let _ = disable_raw_mode();
    })
    .context("Failed to enter alternate screen")?;
    let terminal = undo_on_error(Terminal::new(CrosstermBackend::new(stdout)), || {
        let _ = restore_terminal();
    })
    .context("Failed to create terminal")?;
    Ok(terminal)
}

fn undo_on_error<T, E>(
    result: std::result::Result<T, E>,
    undo: impl FnOnce(),
) -> std::result::Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Leave the alternate screen and disable raw mode. Safe to call twice.
pub fn restore_terminal() -> Result<()> {
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Restore the terminal before the default panic output
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

//! Shell-wide key bindings
//!
//! Screens get a key only when it is not bound here, or when they are
//! capturing text input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action bound to a key at shell level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    /// Exit the application
    Quit,
    /// Select the tab at this index
    SelectTab(usize),
    /// Select the tab after the active one
    NextTab,
    /// Select the tab before the active one
    PreviousTab,
    /// Navigate back
    Back,
    /// Open the go-to-path prompt
    OpenPrompt,
    /// Scroll content up one page
    PageUp,
    /// Scroll content down one page
    PageDown,
}

/// Whether `key` is Ctrl+C, which quits from anywhere
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Shell-level action for `key`, if any
pub fn global_action(key: &KeyEvent) -> Option<GlobalAction> {
    if is_interrupt(key) {
        return Some(GlobalAction::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Char('q') => Some(GlobalAction::Quit),
        KeyCode::Char(c @ '1'..='9') => {
            // '1' is the first tab
            Some(GlobalAction::SelectTab(c as usize - '1' as usize))
        }
        KeyCode::Tab => Some(GlobalAction::NextTab),
        KeyCode::BackTab => Some(GlobalAction::PreviousTab),
        KeyCode::Esc | KeyCode::Backspace => Some(GlobalAction::Back),
        KeyCode::Char('g') => Some(GlobalAction::OpenPrompt),
        KeyCode::PageUp => Some(GlobalAction::PageUp),
        KeyCode::PageDown => Some(GlobalAction::PageDown),
        _ => None,
    }
}

/// Edit `buffer` with a text-entry key. Returns false for keys that are not text edits.
pub fn edit_text(buffer: &mut String, key: &KeyEvent) -> bool {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return false;
    }
    match key.code {
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        _ => false,
    }
}

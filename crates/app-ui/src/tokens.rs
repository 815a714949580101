//! Design tokens for the field shell
//!
//! Sizes are measured in terminal cells. Colors are hex strings so any
//! renderer can convert them to its own color type.

use serde::{Deserialize, Serialize};

// =============================================================================
// Sizing Tokens
// =============================================================================

/// Size tokens for shell chrome
pub mod sizing {
    /// Tab bar height: top border, labels, badge row
    pub const TAB_BAR_HEIGHT: u16 = 3;
    /// Header height: title and divider
    pub const HEADER_HEIGHT: u16 = 2;
    /// Smallest usable tab bar: top border and labels
    pub const MIN_TAB_BAR_HEIGHT: u16 = 2;

    /// Login card
    pub mod login_card {
        /// Card width
        pub const WIDTH: u16 = 44;
        /// Card height
        pub const HEIGHT: u16 = 14;
    }
}

// =============================================================================
// Breakpoint Tokens
// =============================================================================

/// Width class of the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    /// Tabs show icons only
    Compact,
    /// Tabs show icon and label
    Regular,
}

/// Breakpoint widths
pub mod breakpoints {
    /// Width below which tabs drop their labels
    pub const COMPACT: u16 = 40;

    /// Get current breakpoint
    pub fn current(width: u16) -> super::Breakpoint {
        if width < COMPACT {
            super::Breakpoint::Compact
        } else {
            super::Breakpoint::Regular
        }
    }
}

// =============================================================================
// Color Tokens
// =============================================================================

/// Brand and status colors
pub mod color {
    /// Brand red, used for the active tab and primary actions
    pub const BRAND: &str = "#DC2626";
    /// Muted foreground
    pub const MUTED: &str = "#6B7280";
    /// Success / completed
    pub const SUCCESS: &str = "#22C55E";
    /// Warning / pending
    pub const WARNING: &str = "#EAB308";
    /// In progress
    pub const INFO: &str = "#3B82F6";
    /// Error / not ok
    pub const DANGER: &str = "#EF4444";

    /// Parse a `#RRGGBB` string
    pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

// =============================================================================
// Tests
// =============================================================================

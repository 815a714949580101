//! Terminal styles built from the shell's color tokens

use app_core::{ItemStatus, NotificationPriority, StageStatus, TaskStatus};
use app_ui::color;
use ratatui::style::{Color, Modifier, Style};

/// Convert a `#RRGGBB` token to a terminal color
pub fn token_color(hex: &str) -> Color {
    match color::parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => {
            tracing::warn!("Invalid color token: {}", hex);
            Color::Reset
        }
    }
}

/// Resolved colors for one render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellTheme {
    /// Brand accent
    pub brand: Color,
    /// Secondary text
    pub muted: Color,
    /// Positive status
    pub success: Color,
    /// Pending status
    pub warning: Color,
    /// In-progress status
    pub info: Color,
    /// Negative status
    pub danger: Color,
}

impl Default for ShellTheme {
    fn default() -> Self {
        Self {
            brand: token_color(color::BRAND),
            muted: token_color(color::MUTED),
            success: token_color(color::SUCCESS),
            warning: token_color(color::WARNING),
            info: token_color(color::INFO),
            danger: token_color(color::DANGER),
        }
    }
}

impl ShellTheme {
    /// Screen title
    pub fn title(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Secondary text
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Highlighted row or field
    pub fn selected(&self) -> Style {
        Style::default().fg(self.brand).add_modifier(Modifier::BOLD)
    }

    /// Active tab
    pub fn active_tab(&self) -> Style {
        Style::default().fg(self.brand).add_modifier(Modifier::BOLD)
    }

    /// Inactive tab
    pub fn inactive_tab(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Transient message in the header
    pub fn notice(&self) -> Style {
        Style::default().fg(self.warning)
    }

    /// Error text
    pub fn error(&self) -> Style {
        Style::default().fg(self.danger)
    }

    /// Task status badge
    pub fn task_status(&self, status: TaskStatus) -> Style {
        let fg = match status {
            TaskStatus::Pending => self.warning,
            TaskStatus::InProgress => self.info,
            TaskStatus::Completed => self.success,
            TaskStatus::Overdue => self.danger,
        };
        Style::default().fg(fg)
    }

    /// Checklist item status
    pub fn item_status(&self, status: ItemStatus) -> Style {
        let fg = match status {
            ItemStatus::Ok => self.success,
            ItemStatus::NotOk => self.danger,
            ItemStatus::Pending => self.muted,
        };
        Style::default().fg(fg)
    }

    /// Lift journey stage
    pub fn stage_status(&self, status: StageStatus) -> Style {
        let fg = match status {
            StageStatus::Completed => self.success,
            StageStatus::InProgress => self.brand,
            StageStatus::Pending => self.muted,
        };
        Style::default().fg(fg)
    }

    /// Notification priority marker
    pub fn notification_priority(&self, priority: NotificationPriority) -> Style {
        let fg = match priority {
            NotificationPriority::High => self.danger,
            NotificationPriority::Medium => self.warning,
            NotificationPriority::Normal => self.muted,
        };
        Style::default().fg(fg)
    }
}

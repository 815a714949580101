//! Tab bar widget

use app_ui::{breakpoints, Breakpoint, TabBar, TabBarItem};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::theme::ShellTheme;

/// Draws a [`TabBar`] as evenly sized cells under a top border
pub struct TabBarWidget<'a> {
    bar: &'a TabBar,
    theme: &'a ShellTheme,
}

impl<'a> TabBarWidget<'a> {
    /// Create the widget
    pub fn new(bar: &'a TabBar, theme: &'a ShellTheme) -> Self {
        Self { bar, theme }
    }

    fn label(item: &TabBarItem, breakpoint: Breakpoint) -> String {
        let mut label = match breakpoint {
            Breakpoint::Compact => item.icon.glyph().to_string(),
            Breakpoint::Regular => format!("{} {}", item.icon.glyph(), item.label),
        };
        if let Some(count) = item.badge_count {
            label.push_str(&format!(" ({})", count));
        }
        label
    }
}

impl Widget for TabBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(self.theme.muted());
        let inner = block.inner(area);
        block.render(area, buf);

        let count = self.bar.items.len();
        if count == 0 || inner.height == 0 {
            return;
        }

        let breakpoint = breakpoints::current(area.width);
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, count as u32); count]).split(inner);

        for (index, (item, cell)) in self.bar.items.iter().zip(cells.iter()).enumerate() {
            let style = if item.is_active {
                self.theme.active_tab()
            } else {
                self.theme.inactive_tab()
            };
            let mut lines = vec![Line::from(Span::styled(Self::label(item, breakpoint), style))];
            if breakpoint == Breakpoint::Regular {
                lines.push(Line::from(Span::styled(
                    format!("[{}]", index + 1),
                    self.theme.muted(),
                )));
            }
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(*cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::RouteTable;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_all_labels() {
        let table = RouteTable::standard().unwrap();
        let bar = TabBar::new(&table, "/tasks").set_badge("notifications", 2);
        let theme = ShellTheme::default();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        TabBarWidget::new(&bar, &theme).render(area, &mut buf);

        let labels = row_text(&buf, 1);
        for label in ["Home", "Tasks", "Alerts (2)", "Profile"] {
            assert!(labels.contains(label), "missing {label} in {labels:?}");
        }
        assert!(row_text(&buf, 2).contains("[1]"));
    }

    #[test]
    fn test_active_tab_is_styled() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/profile");
        let theme = ShellTheme::default();
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        TabBarWidget::new(&bar, &theme).render(area, &mut buf);

        let x = (0..area.width)
            .find(|&x| buf[(x, 1)].symbol() == "P")
            .unwrap();
        assert_eq!(buf[(x, 1)].fg, theme.brand);
        let x = (0..area.width)
            .find(|&x| buf[(x, 1)].symbol() == "H")
            .unwrap();
        assert_eq!(buf[(x, 1)].fg, theme.muted);
    }

    #[test]
    fn test_compact_hides_labels() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/dashboard");
        let theme = ShellTheme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        TabBarWidget::new(&bar, &theme).render(area, &mut buf);
        assert!(!row_text(&buf, 1).contains("Home"));
    }
}

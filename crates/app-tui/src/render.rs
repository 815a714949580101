//! Drawing the login view and the shell chrome

use app_ui::{LayoutShell, Region, ScrollState, TabBar};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::screens::LoginScreen;
use crate::tab_bar::TabBarWidget;
use crate::theme::ShellTheme;

/// Convert a layout region to a ratatui rect
pub fn to_rect(region: Region) -> Rect {
    Rect::new(region.x, region.y, region.width, region.height)
}

/// Convert a ratatui rect to a layout region
pub fn to_region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Second header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine<'a> {
    /// Key hints of the mounted screen
    Hints(&'a str),
    /// Message from the last action
    Notice(&'a str),
    /// Go-to-path prompt being typed
    Prompt(&'a str),
}

/// Everything the shell draws in one frame
#[derive(Debug)]
pub struct ShellFrame<'a> {
    /// Header title
    pub title: String,
    /// Second header line
    pub status: StatusLine<'a>,
    /// Screen content
    pub lines: Vec<Line<'static>>,
    /// Tab bar for the active path
    pub tab_bar: &'a TabBar,
}

/// Draw the login view over the whole frame
pub fn render_login(frame: &mut Frame, login: &LoginScreen, theme: &ShellTheme) {
    let area = frame.area();
    login.render(frame, area, theme);
}

/// Draw the shell: header, scrolled content and tab bar.
///
/// `scroll` is re-bounded to the content so the offset never runs past it.
pub fn render_shell(
    frame: &mut Frame,
    layout: &LayoutShell,
    view: ShellFrame<'_>,
    scroll: &mut ScrollState,
    theme: &ShellTheme,
) {
    let regions = layout.split(to_region(frame.area()));

    let status = match view.status {
        StatusLine::Hints(hints) => Line::from(Span::styled(hints.to_string(), theme.muted())),
        StatusLine::Notice(notice) => Line::from(Span::styled(notice.to_string(), theme.notice())),
        StatusLine::Prompt(input) => Line::from(vec![
            Span::styled("Go to: ", theme.selected()),
            Span::raw(format!("{}█", input)),
        ]),
    };
    let header = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("EliteConstruct ", theme.active_tab()),
            Span::styled(view.title, theme.title()),
        ]),
        status,
    ]);
    frame.render_widget(header, to_rect(regions.header));

    let content = to_rect(regions.content);
    let block = Block::default().borders(Borders::TOP).border_style(theme.muted());
    let viewport = block.inner(content);
    let content_height = u16::try_from(view.lines.len()).unwrap_or(u16::MAX);
    scroll.set_bounds(content_height, viewport.height);
    frame.render_widget(
        Paragraph::new(view.lines)
            .block(block)
            .scroll((scroll.offset(), 0)),
        content,
    );

    frame.render_widget(TabBarWidget::new(view.tab_bar, theme), to_rect(regions.tab_bar));
}

//! Layout shell
//!
//! Splits the viewport into header, content and tab bar regions. The tab bar
//! reservation is taken from the bottom before anything else, so content can
//! never overlap it however small the viewport is.

use crate::tokens::sizing;
use serde::{Deserialize, Serialize};

/// A rectangle in terminal cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Left column
    pub x: u16,
    /// Top row
    pub y: u16,
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Region {
    /// Create a region
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First row below the region
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Whether the region has no area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether two regions share at least one cell
    pub fn intersects(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x.saturating_add(other.width)
            && other.x < self.x.saturating_add(self.width)
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Regions produced by [`LayoutShell::split`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRegions {
    /// Screen title
    pub header: Region,
    /// Scrollable screen content
    pub content: Region,
    /// Persistent tab bar
    pub tab_bar: Region,
}

/// Fixed chrome heights around the content region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutShell {
    /// Rows reserved at the top for the header
    pub header_height: u16,
    /// Rows reserved at the bottom for the tab bar
    pub tab_bar_height: u16,
}

impl Default for LayoutShell {
    fn default() -> Self {
        Self {
            header_height: sizing::HEADER_HEIGHT,
            tab_bar_height: sizing::TAB_BAR_HEIGHT,
        }
    }
}

impl LayoutShell {
    /// Create a layout with custom chrome heights
    pub fn new(header_height: u16, tab_bar_height: u16) -> Self {
        Self {
            header_height,
            tab_bar_height,
        }
    }

    /// Split `area` into header, content and tab bar.
    ///
    /// The tab bar keeps its full height whenever the area allows it; the
    /// header gets what is left after that, and content gets the rest.
    pub fn split(&self, area: Region) -> ShellRegions {
        let tab_bar_height = self.tab_bar_height.min(area.height);
        let above = area.height - tab_bar_height;
        let header_height = self.header_height.min(above);
        let content_height = above - header_height;

        let header = Region::new(area.x, area.y, area.width, header_height);
        let content = Region::new(area.x, header.bottom(), area.width, content_height);
        let tab_bar = Region::new(area.x, content.bottom(), area.width, tab_bar_height);

        ShellRegions {
            header,
            content,
            tab_bar,
        }
    }
}

/// Vertical scroll position of the content region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollState {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollState {
    /// Current offset in rows
    pub fn offset(&self) -> u16 {
        self.offset
    }

    /// Record the size of the content and of the viewport showing it
    pub fn set_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Largest offset that still fills the viewport
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Scroll by `delta` rows, clamped to the content
    pub fn scroll_by(&mut self, delta: i32) {
        let target = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        // In range by the clamp above
        self.offset = u16::try_from(target).unwrap_or(0);
    }

    /// Scroll up one viewport
    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.viewport_height.max(1)));
    }

    /// Scroll down one viewport
    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.viewport_height.max(1)));
    }

    /// Back to the top
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

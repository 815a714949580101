//! Tab bar model
//!
//! The active tab is chosen by an ordered rule table:
//! 1. the default (first) entry matches only on exact path equality
//! 2. every other entry matches when its path is a prefix of the current path
//! 3. if nothing matched, the default entry is active
//!
//! The default entry is kept out of the prefix scan so it cannot swallow
//! unrelated paths that merely share its leading characters.

use crate::history::NavigationRequest;
use crate::navigation::{Icon, NavigationEntry, RouteTable};
use serde::{Deserialize, Serialize};

/// How an entry is compared against the current path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabRule {
    /// Entry path must equal the current path
    Exact,
    /// Entry path must be a prefix of the current path
    Prefix,
}

impl TabRule {
    /// Rule applied to the entry at `index` of the primary list
    pub fn for_position(index: usize) -> Self {
        if index == 0 {
            TabRule::Exact
        } else {
            TabRule::Prefix
        }
    }

    /// Whether `entry_path` matches `current_path` under this rule
    pub fn matches(&self, entry_path: &str, current_path: &str) -> bool {
        match self {
            TabRule::Exact => current_path == entry_path,
            TabRule::Prefix => current_path.starts_with(entry_path),
        }
    }
}

/// Why an entry is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Matched its rule
    Matched(TabRule),
    /// Nothing matched; the default entry is active
    Fallback,
}

/// Result of active-tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveTab<'a> {
    /// Position in the primary list
    pub index: usize,
    /// The active entry
    pub entry: &'a NavigationEntry,
    /// How it was chosen
    pub kind: MatchKind,
}

/// Select the active tab for `current_path`. `None` only when `entries` is empty.
pub fn select_active<'a>(current_path: &str, entries: &'a [NavigationEntry]) -> Option<ActiveTab<'a>> {
    let default = entries.first()?;

    // Rules are evaluated in order: exact default first, then prefixes
    let matched = entries.iter().enumerate().find(|(index, entry)| {
        TabRule::for_position(*index).matches(&entry.path, current_path)
    });

    Some(match matched {
        Some((index, entry)) => ActiveTab {
            index,
            entry,
            kind: MatchKind::Matched(TabRule::for_position(index)),
        },
        None => ActiveTab {
            index: 0,
            entry: default,
            kind: MatchKind::Fallback,
        },
    })
}

/// The active entry for `current_path`. `None` only when `entries` is empty.
pub fn active_entry<'a>(current_path: &str, entries: &'a [NavigationEntry]) -> Option<&'a NavigationEntry> {
    select_active(current_path, entries).map(|active| active.entry)
}

/// One rendered tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabBarItem {
    /// Entry identifier
    pub id: String,
    /// Icon
    pub icon: Icon,
    /// Label text
    pub label: String,
    /// Target path
    pub path: String,
    /// Whether this tab is currently active
    pub is_active: bool,
    /// Badge count (e.g. unread notifications)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_count: Option<u32>,
}

impl From<&NavigationEntry> for TabBarItem {
    fn from(entry: &NavigationEntry) -> Self {
        Self {
            id: entry.id.clone(),
            icon: entry.icon,
            label: entry.label.clone(),
            path: entry.path.clone(),
            is_active: false,
            badge_count: None,
        }
    }
}

/// Tab bar derived from the route table and the active path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabBar {
    /// Tab items, left to right
    pub items: Vec<TabBarItem>,
    /// Index of the active item
    pub active: usize,
}

impl TabBar {
    /// Build the tab bar for `current_path`
    pub fn new(table: &RouteTable, current_path: &str) -> Self {
        let entries = table.primary_entries();
        let active = select_active(current_path, entries).map_or(0, |a| a.index);
        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| TabBarItem {
                is_active: index == active,
                ..TabBarItem::from(entry)
            })
            .collect();

        Self { items, active }
    }

    /// Update badge count for a specific tab; zero clears it
    pub fn set_badge(mut self, tab_id: &str, count: u32) -> Self {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == tab_id) {
            item.badge_count = (count > 0).then_some(count);
        }
        self
    }

    /// The active item
    pub fn active_item(&self) -> Option<&TabBarItem> {
        self.items.get(self.active)
    }

    /// Navigation request for tapping the tab at `index`
    pub fn select(&self, index: usize) -> Option<NavigationRequest> {
        self.items
            .get(index)
            .map(|item| NavigationRequest::to(item.path.clone()))
    }

    /// Navigation request for tapping the tab with `id`
    pub fn select_id(&self, id: &str) -> Option<NavigationRequest> {
        let index = self.items.iter().position(|i| i.id == id)?;
        self.select(index)
    }

    /// Index of the tab after the active one, wrapping
    pub fn next_index(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.active + 1) % self.items.len()
    }

    /// Index of the tab before the active one, wrapping
    pub fn previous_index(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.active + self.items.len() - 1) % self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<NavigationEntry> {
        RouteTable::standard().unwrap().primary_entries().to_vec()
    }

    #[test]
    fn test_default_matches_exactly() {
        let entries = entries();
        let active = select_active("/dashboard", &entries).unwrap();
        assert_eq!(active.entry.id, "dashboard");
        assert_eq!(active.kind, MatchKind::Matched(TabRule::Exact));
    }

    #[test]
    fn test_prefix_match_for_nested_paths() {
        let entries = entries();
        for suffix in ["", "/", "/anything", "/a/b/c"] {
            let path = format!("/tasks{suffix}");
            assert_eq!(active_entry(&path, &entries).unwrap().id, "tasks");
        }
        assert_eq!(active_entry("/profile", &entries).unwrap().id, "profile");
    }

    #[test]
    fn test_default_never_prefix_matches() {
        let entries = entries();
        let active = select_active("/dashboardX", &entries).unwrap();
        assert_ne!(active.kind, MatchKind::Matched(TabRule::Exact));
        assert_ne!(active.kind, MatchKind::Matched(TabRule::Prefix));
        assert_eq!(active.kind, MatchKind::Fallback);

        let active = select_active("/dashboard/sub", &entries).unwrap();
        assert_eq!(active.kind, MatchKind::Fallback);
    }

    #[test]
    fn test_unmatched_path_falls_back_to_default() {
        let entries = entries();
        // Task detail lives under /task/, which "/tasks" does not prefix
        let active = select_active("/task/TASK001", &entries).unwrap();
        assert_eq!(active.entry.id, "dashboard");
        assert_eq!(active.kind, MatchKind::Fallback);

        assert_eq!(active_entry("/lift-tracker", &entries).unwrap().id, "dashboard");
    }

    #[test]
    fn test_first_prefix_wins() {
        let entries = vec![
            NavigationEntry::new("home", Icon::Home, "Home", "/", ""),
            NavigationEntry::new("a", Icon::Tasks, "A", "/a", ""),
            NavigationEntry::new("ab", Icon::Bell, "AB", "/ab", ""),
        ];
        assert_eq!(active_entry("/abc", &entries).unwrap().id, "a");
        // Default "/" only matches "/" itself
        assert_eq!(select_active("/zzz", &entries).unwrap().kind, MatchKind::Fallback);
    }

    #[test]
    fn test_empty_entries() {
        assert!(active_entry("/dashboard", &[]).is_none());
    }

    #[test]
    fn test_tab_bar_marks_single_active_item() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/notifications");
        assert_eq!(bar.items.len(), 4);
        assert_eq!(bar.items.iter().filter(|i| i.is_active).count(), 1);
        assert_eq!(bar.active_item().unwrap().id, "notifications");
    }

    #[test]
    fn test_tab_bar_select_issues_navigation() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/dashboard");
        assert_eq!(bar.select(1), Some(NavigationRequest::to("/tasks")));
        assert_eq!(bar.select_id("profile"), Some(NavigationRequest::to("/profile")));
        assert_eq!(bar.select(9), None);
        assert_eq!(bar.select_id("lift-tracker"), None);
        // Selecting does not change the bar itself
        assert_eq!(bar.active, 0);
    }

    #[test]
    fn test_tab_bar_badges() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/dashboard")
            .set_badge("notifications", 2)
            .set_badge("tasks", 0);
        assert_eq!(bar.items[2].badge_count, Some(2));
        assert_eq!(bar.items[1].badge_count, None);
    }

    #[test]
    fn test_tab_cycling_wraps() {
        let bar = TabBar::new(&RouteTable::standard().unwrap(), "/profile");
        assert_eq!(bar.next_index(), 0);
        assert_eq!(bar.previous_index(), 2);
    }
}

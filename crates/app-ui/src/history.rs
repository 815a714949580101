//! Navigation history
//!
//! `History` owns the active path and the stack of paths behind it. Every
//! stored path is already resolved, so going back never needs a redirect.

use serde::{Deserialize, Serialize};

/// A request to move the active path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum NavigationRequest {
    /// Go to a path
    To(String),
    /// Go back one entry
    Back,
}

impl NavigationRequest {
    /// Request navigation to `path`
    pub fn to(path: impl Into<String>) -> Self {
        NavigationRequest::To(path.into())
    }

    /// Request for a relative history step; only `-1` (back) is meaningful
    pub fn delta(delta: i32) -> Option<Self> {
        (delta == -1).then_some(NavigationRequest::Back)
    }
}

/// A history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Resolved path
    pub path: String,
    /// Unique key for this entry
    pub key: String,
}

impl HistoryEntry {
    /// Create a new entry
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Stack of visited paths; the top is the active path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    /// Entries, oldest first. Never empty.
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Start a history at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry::new(path)],
        }
    }

    /// Active path
    pub fn current(&self) -> &str {
        &self.current_entry().path
    }

    /// Active entry
    pub fn current_entry(&self) -> &HistoryEntry {
        // Never empty: `back` refuses to pop the last entry
        &self.entries[self.entries.len() - 1]
    }

    /// Push a path. Pushing the active path again is a no-op that returns false.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path == self.current() {
            return false;
        }
        self.entries.push(HistoryEntry::new(path));
        true
    }

    /// Pop the active entry. Returns false when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.entries.len() > 1 {
            self.entries.pop();
            true
        } else {
            false
        }
    }

    /// Whether there is an entry to go back to
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Number of entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

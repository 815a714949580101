//! Compliance checklists
//!
//! Every task carries a checklist split into civil, electrical and safety
//! sections. A checklist is complete when no item is still pending.

use serde::{Deserialize, Serialize};

/// Checklist section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistCategory {
    /// Foundation, pit and hoistway
    Civil,
    /// Power, wiring and switches
    Electrical,
    /// Fire, lighting, signage and access
    Safety,
}

impl ChecklistCategory {
    /// All categories in display order
    pub fn all() -> [ChecklistCategory; 3] {
        [
            ChecklistCategory::Civil,
            ChecklistCategory::Electrical,
            ChecklistCategory::Safety,
        ]
    }

    /// Section title
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistCategory::Civil => "Civil",
            ChecklistCategory::Electrical => "Electrical",
            ChecklistCategory::Safety => "Safety",
        }
    }
}

/// Result recorded for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Passed
    Ok,
    /// Failed
    NotOk,
    /// Not yet checked
    #[default]
    Pending,
}

impl ItemStatus {
    /// Next status when the technician toggles the item
    pub fn next(self) -> Self {
        match self {
            ItemStatus::Pending => ItemStatus::Ok,
            ItemStatus::Ok => ItemStatus::NotOk,
            ItemStatus::NotOk => ItemStatus::Pending,
        }
    }
}

/// One line of a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Item number within its category
    pub id: u32,
    /// Category
    pub category: ChecklistCategory,
    /// What to check
    pub item: String,
    /// Recorded status
    pub status: ItemStatus,
    /// Free-form remarks
    #[serde(default)]
    pub remarks: String,
}

/// Checklist for one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Task the checklist belongs to
    pub task_id: String,
    items: Vec<ChecklistItem>,
}

impl Checklist {
    /// Standard lift checklist for a task
    pub fn for_task(task_id: impl Into<String>) -> Self {
        use ChecklistCategory::{Civil, Electrical, Safety};
        let (ok, not_ok, pending) = (ItemStatus::Ok, ItemStatus::NotOk, ItemStatus::Pending);

        let rows: [(ChecklistCategory, u32, &str, ItemStatus, &str); 12] = [
            (Civil, 1, "Foundation inspection completed", ok, ""),
            (Civil, 2, "Structural integrity verified", ok, ""),
            (Civil, 3, "Pit dimensions meet specifications", not_ok, "Pit needs adjustment"),
            (Civil, 4, "Hoistway clearance confirmed", pending, ""),
            (Electrical, 1, "Power supply voltage checked", ok, ""),
            (Electrical, 2, "Emergency backup system tested", ok, ""),
            (Electrical, 3, "Wiring installation verified", pending, ""),
            (Electrical, 4, "Safety switches functional", pending, ""),
            (Safety, 1, "Fire safety compliance", ok, ""),
            (Safety, 2, "Emergency lighting installed", pending, ""),
            (Safety, 3, "Safety signage in place", pending, ""),
            (Safety, 4, "Accessibility standards met", pending, ""),
        ];

        Self {
            task_id: task_id.into(),
            items: rows
                .into_iter()
                .map(|(category, id, item, status, remarks)| ChecklistItem {
                    id,
                    category,
                    item: item.to_string(),
                    status,
                    remarks: remarks.to_string(),
                })
                .collect(),
        }
    }

    /// All items in display order
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Items of one category
    pub fn category(&self, category: ChecklistCategory) -> impl Iterator<Item = &ChecklistItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Toggle the item at `index` to its next status
    pub fn cycle_status(&mut self, index: usize) -> Option<ItemStatus> {
        let item = self.items.get_mut(index)?;
        item.status = item.status.next();
        Some(item.status)
    }

    /// Replace the remarks of the item at `index`
    pub fn set_remarks(&mut self, index: usize, remarks: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.remarks = remarks.into();
                true
            }
            None => false,
        }
    }

    /// (checked, total) where checked counts every non-pending item
    pub fn progress(&self) -> (usize, usize) {
        let checked = self
            .items
            .iter()
            .filter(|i| i.status != ItemStatus::Pending)
            .count();
        (checked, self.items.len())
    }

    /// Whether every item has been checked
    pub fn is_complete(&self) -> bool {
        let (checked, total) = self.progress();
        checked == total
    }
}

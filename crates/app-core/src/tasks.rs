//! Assigned tasks
//!
//! Tasks are the unit of field work: an installation, maintenance visit or
//! inspection at a site, tied to a lift.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    Pending,
    /// Work under way
    InProgress,
    /// Finished
    Completed,
    /// Past its due date
    Overdue,
}

impl TaskStatus {
    /// Badge text
    pub fn badge(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Overdue => "OVERDUE",
        }
    }

    /// All statuses in filter order
    pub fn all() -> [TaskStatus; 4] {
        [
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Overdue,
        ]
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

/// An assigned task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task identifier, e.g. `TASK001`
    pub id: String,
    /// Title
    pub title: String,
    /// Site name
    pub site: String,
    /// Street address
    pub address: String,
    /// Status
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Due date (ISO 8601 date)
    pub due_date: String,
    /// Assigned technician name
    pub assigned_to: String,
    /// Lift identifier
    pub lift_id: String,
}

impl Task {
    fn matches_search(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        [&self.title, &self.site, &self.lift_id]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Search and status filter for the task list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive search over title, site and lift id
    pub search: String,
    /// Restrict to one status; `None` means all
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Advance the status filter: all, pending, in progress, completed, overdue, all
    pub fn cycle_status(&mut self) {
        let all = TaskStatus::all();
        self.status = match self.status {
            None => Some(all[0]),
            Some(current) => all
                .iter()
                .position(|s| *s == current)
                .and_then(|i| all.get(i + 1).copied()),
        };
    }

    /// Label for the current status filter
    pub fn status_label(&self) -> &'static str {
        self.status.map_or("ALL", |s| s.badge())
    }
}

/// The technician's task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Create a board from tasks
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Demo board
    pub fn mock() -> Self {
        #[allow(clippy::too_many_arguments)]
        fn task(
            id: &str,
            title: &str,
            site: &str,
            address: &str,
            status: TaskStatus,
            priority: Priority,
            due: &str,
            lift: &str,
        ) -> Task {
            Task {
                id: id.to_string(),
                title: title.to_string(),
                site: site.to_string(),
                address: address.to_string(),
                status,
                priority,
                due_date: due.to_string(),
                assigned_to: "John Smith".to_string(),
                lift_id: lift.to_string(),
            }
        }

        Self::new(vec![
            task(
                "TASK001",
                "Lift Installation - Building A",
                "Downtown Office Complex",
                "123 Main St, Downtown",
                TaskStatus::InProgress,
                Priority::High,
                "2024-01-15",
                "LIFT-2024-001",
            ),
            task(
                "TASK002",
                "Maintenance Check - Building B",
                "Shopping Mall",
                "456 Commerce Ave",
                TaskStatus::Pending,
                Priority::Medium,
                "2024-01-18",
                "LIFT-2024-002",
            ),
            task(
                "TASK003",
                "Safety Inspection - Building C",
                "Residential Complex",
                "789 Housing Blvd",
                TaskStatus::Completed,
                Priority::Low,
                "2024-01-12",
                "LIFT-2024-003",
            ),
        ])
    }

    /// All tasks in board order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Find a task by id
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks matching `filter`, in board order
    pub fn filter<'a>(&'a self, filter: &TaskFilter) -> Vec<&'a Task> {
        let needle = filter.search.trim().to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.matches_search(&needle))
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .collect()
    }

    /// Number of tasks per status
    pub fn status_counts(&self) -> BTreeMap<TaskStatus, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            *counts.entry(task.status).or_insert(0) += 1;
        }
        counts
    }

    /// Tasks not yet completed
    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_task() {
        let board = TaskBoard::mock();
        assert_eq!(board.find("TASK002").unwrap().site, "Shopping Mall");
        assert!(board.find("TASK999").is_none());
    }

    #[test]
    fn test_filter_search_is_case_insensitive() {
        let board = TaskBoard::mock();
        let filter = TaskFilter {
            search: "shopping".to_string(),
            status: None,
        };
        let hits = board.filter(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "TASK002");
    }

    #[test]
    fn test_filter_search_matches_lift_id() {
        let board = TaskBoard::mock();
        let filter = TaskFilter {
            search: "lift-2024-003".to_string(),
            status: None,
        };
        assert_eq!(board.filter(&filter)[0].id, "TASK003");
    }

    #[test]
    fn test_filter_by_status() {
        let board = TaskBoard::mock();
        let filter = TaskFilter {
            search: String::new(),
            status: Some(TaskStatus::Completed),
        };
        let hits = board.filter(&filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].status, TaskStatus::Completed);
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let board = TaskBoard::mock();
        assert_eq!(board.filter(&TaskFilter::default()).len(), 3);
    }

    #[test]
    fn test_cycle_status_wraps_to_all() {
        let mut filter = TaskFilter::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            filter.cycle_status();
            seen.push(filter.status);
        }
        assert_eq!(
            seen,
            vec![
                Some(TaskStatus::Pending),
                Some(TaskStatus::InProgress),
                Some(TaskStatus::Completed),
                Some(TaskStatus::Overdue),
                None,
            ]
        );
        assert_eq!(filter.status_label(), "ALL");
    }

    #[test]
    fn test_status_counts() {
        let counts = TaskBoard::mock().status_counts();
        assert_eq!(counts.get(&TaskStatus::InProgress), Some(&1));
        assert_eq!(counts.get(&TaskStatus::Overdue), None);
    }

    #[test]
    fn test_open_tasks_excludes_completed() {
        let board = TaskBoard::mock();
        assert_eq!(board.open_tasks().count(), 2);
    }

    #[test]
    fn test_task_serialization_uses_wire_names() {
        let board = TaskBoard::mock();
        let json = serde_json::to_value(&board.tasks()[0]).unwrap();
        assert_eq!(json["status"], "in-progress");
        assert_eq!(json["dueDate"], "2024-01-15");
    }
}

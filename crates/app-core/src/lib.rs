//! Field-service data for the EliteConstruct shell
//!
//! This crate holds the in-memory data the screens display: assigned
//! tasks, the notification inbox, per-task compliance checklists, lift
//! journeys and issue reports.
//! Everything is seeded from fixed demo data and lives only in memory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compliance;
pub mod issues;
pub mod lifts;
pub mod notifications;
pub mod tasks;

pub use compliance::{Checklist, ChecklistCategory, ChecklistItem, ItemStatus};
pub use issues::{IssueError, IssuePriority, IssueReport, IssueType};
pub use lifts::{JourneyStage, LiftJourney, LiftTracker, StageStatus};
pub use notifications::{Inbox, Notification, NotificationKind, NotificationPriority};
pub use tasks::{Priority, Task, TaskBoard, TaskFilter, TaskStatus};

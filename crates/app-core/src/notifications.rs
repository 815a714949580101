//! Notification inbox

use serde::{Deserialize, Serialize};

/// Kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// A task was assigned
    Task,
    /// A schedule changed
    Schedule,
    /// Message from the office
    Message,
    /// Safety alert
    Alert,
    /// A task was completed
    Completion,
    /// Upcoming obligation
    Reminder,
}

/// Notification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Informational
    Normal,
    /// Worth a look today
    Medium,
    /// Needs attention
    High,
}

/// A single notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier
    pub id: u32,
    /// Kind
    pub kind: NotificationKind,
    /// Title
    pub title: String,
    /// Body text
    pub message: String,
    /// Human-readable age, e.g. "2 minutes ago"
    pub timestamp: String,
    /// Whether it has been read
    pub is_read: bool,
    /// Priority
    pub priority: NotificationPriority,
    /// Call-to-action label
    pub action: String,
    /// Related task, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// The technician's notifications, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inbox {
    notifications: Vec<Notification>,
}

impl Inbox {
    /// Create an inbox
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    /// Demo inbox
    pub fn mock() -> Self {
        let n = |id: u32,
                 kind: NotificationKind,
                 title: &str,
                 message: &str,
                 timestamp: &str,
                 is_read: bool,
                 priority: NotificationPriority,
                 action: &str,
                 task: Option<&str>| {
            Notification {
                id,
                kind,
                title: title.to_string(),
                message: message.to_string(),
                timestamp: timestamp.to_string(),
                is_read,
                priority,
                action: action.to_string(),
                task_id: task.map(str::to_string),
            }
        };

        Self::new(vec![
            n(1, NotificationKind::Task, "New Task Assigned",
              "You have been assigned a new installation task at Tech Park Tower",
              "2 minutes ago", false, NotificationPriority::High, "View Task", Some("TASK001")),
            n(2, NotificationKind::Schedule, "Schedule Update",
              "Your task at Residential Complex A has been rescheduled to 3:00 PM",
              "15 minutes ago", false, NotificationPriority::Medium, "Update Calendar", Some("TASK002")),
            n(3, NotificationKind::Message, "Message from Admin",
              "Please ensure all safety protocols are followed during today's installation",
              "1 hour ago", true, NotificationPriority::Normal, "Reply", None),
            n(4, NotificationKind::Alert, "Safety Alert",
              "Weather conditions may affect outdoor installations today",
              "2 hours ago", true, NotificationPriority::High, "Acknowledge", None),
            n(5, NotificationKind::Completion, "Task Completed",
              "Installation at Office Building B has been marked as completed",
              "3 hours ago", true, NotificationPriority::Normal, "View Report", Some("TASK003")),
            n(6, NotificationKind::Reminder, "Equipment Check Due",
              "Your safety equipment inspection is due tomorrow",
              "5 hours ago", true, NotificationPriority::Medium, "Schedule Check", None),
        ])
    }

    /// All notifications
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Number of unread notifications
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read. Returns false if the id is unknown.
    pub fn mark_read(&mut self, id: u32) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => {
                tracing::debug!(id, "mark_read on unknown notification");
                false
            }
        }
    }

    /// Mark everything read
    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
    }

    /// Task linked from a notification
    pub fn linked_task(&self, id: u32) -> Option<&str> {
        self.notifications
            .iter()
            .find(|n| n.id == id)
            .and_then(|n| n.task_id.as_deref())
    }
}

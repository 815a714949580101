//! On-site issue reports

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issue report errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// A required field is empty
    #[error("Please fill in the required field: {0}")]
    MissingField(&'static str),
}

/// Result type for issue operations
pub type Result<T> = std::result::Result<T, IssueError>;

/// What kind of problem is being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Structural, foundation, or construction issues
    Civil,
    /// Power, wiring, or electrical system problems
    Electrical,
    /// Schedule delays or timeline issues
    Delay,
    /// Safety concerns or violations
    Safety,
}

impl IssueType {
    /// All types in display order
    pub fn all() -> [IssueType; 4] {
        [
            IssueType::Civil,
            IssueType::Electrical,
            IssueType::Delay,
            IssueType::Safety,
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            IssueType::Civil => "Civil",
            IssueType::Electrical => "Electrical",
            IssueType::Delay => "Delay",
            IssueType::Safety => "Safety",
        }
    }

    /// One-line description
    pub fn description(&self) -> &'static str {
        match self {
            IssueType::Civil => "Structural, foundation, or construction issues",
            IssueType::Electrical => "Power, wiring, or electrical system problems",
            IssueType::Delay => "Schedule delays or timeline issues",
            IssueType::Safety => "Safety concerns or violations",
        }
    }
}

/// Urgency of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuePriority {
    /// Low
    Low,
    /// Medium
    #[default]
    Medium,
    /// High
    High,
    /// Critical
    Critical,
}

impl IssuePriority {
    /// All priorities, lowest first
    pub fn all() -> [IssuePriority; 4] {
        [
            IssuePriority::Low,
            IssuePriority::Medium,
            IssuePriority::High,
            IssuePriority::Critical,
        ]
    }

    /// Next priority, wrapping from critical back to low
    pub fn next(self) -> Self {
        match self {
            IssuePriority::Low => IssuePriority::Medium,
            IssuePriority::Medium => IssuePriority::High,
            IssuePriority::High => IssuePriority::Critical,
            IssuePriority::Critical => IssuePriority::Low,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            IssuePriority::Low => "Low",
            IssuePriority::Medium => "Medium",
            IssuePriority::High => "High",
            IssuePriority::Critical => "Critical",
        }
    }
}

/// An issue report being filled in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    /// Kind of issue; required
    pub issue_type: Option<IssueType>,
    /// Urgency
    pub priority: IssuePriority,
    /// Short title; required
    pub title: String,
    /// Details; required
    pub description: String,
    /// Site location
    pub location: String,
    /// Affected lift
    pub lift_id: String,
    /// Attached photo names
    pub photos: Vec<String>,
}

impl IssueReport {
    /// Check that the required fields are filled in
    pub fn validate(&self) -> Result<()> {
        if self.issue_type.is_none() {
            return Err(IssueError::MissingField("issue type"));
        }
        if self.title.trim().is_empty() {
            return Err(IssueError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(IssueError::MissingField("description"));
        }
        Ok(())
    }

    /// Attach a placeholder photo and return its name
    pub fn attach_photo(&mut self) -> &str {
        let name = format!("photo_{}.jpg", self.photos.len() + 1);
        self.photos.push(name);
        // Just pushed
        self.photos.last().map_or("", String::as_str)
    }

    /// Remove the photo at `index`
    pub fn remove_photo(&mut self, index: usize) -> Option<String> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    /// Validate and hand the report off
    pub fn submit(&self) -> Result<()> {
        self.validate()?;
        tracing::info!(
            issue_type = ?self.issue_type,
            priority = ?self.priority,
            photos = self.photos.len(),
            "Issue report submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> IssueReport {
        IssueReport {
            issue_type: Some(IssueType::Electrical),
            title: "No power on floor 3".to_string(),
            description: "Breaker trips when the car is called".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields() {
        let mut report = IssueReport::default();
        assert_eq!(report.validate(), Err(IssueError::MissingField("issue type")));

        report.issue_type = Some(IssueType::Safety);
        assert_eq!(report.validate(), Err(IssueError::MissingField("title")));

        report.title = "  ".to_string();
        assert_eq!(report.validate(), Err(IssueError::MissingField("title")));

        report.title = "Loose handrail".to_string();
        assert_eq!(report.validate(), Err(IssueError::MissingField("description")));

        assert!(filled().submit().is_ok());
    }

    #[test]
    fn test_default_priority_is_medium() {
        assert_eq!(IssueReport::default().priority, IssuePriority::Medium);
        assert_eq!(IssuePriority::Critical.next(), IssuePriority::Low);
    }

    #[test]
    fn test_photos() {
        let mut report = filled();
        assert_eq!(report.attach_photo(), "photo_1.jpg");
        assert_eq!(report.attach_photo(), "photo_2.jpg");
        assert_eq!(report.remove_photo(0).as_deref(), Some("photo_1.jpg"));
        assert_eq!(report.remove_photo(5), None);
        assert_eq!(report.photos, vec!["photo_2.jpg".to_string()]);
    }
}

//! Signed-in technician summary

use serde::{Deserialize, Serialize};

/// Read-only summary of the signed-in technician handed to every screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSummary {
    /// Display name
    pub name: String,
    /// Job role
    pub role: String,
    /// Technician identifier
    pub id: String,
    /// Avatar reference, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Default for UserSummary {
    fn default() -> Self {
        Self {
            name: "John Smith".to_string(),
            role: "Senior Technician".to_string(),
            id: "TECH001".to_string(),
            avatar: None,
        }
    }
}

impl UserSummary {
    /// Initials for avatar placeholders, e.g. "JS"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// First name used in greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_demo_technician() {
        let user = UserSummary::default();
        assert_eq!(user.id, "TECH001");
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_initials() {
        assert_eq!(UserSummary::default().initials(), "JS");

        let user = UserSummary {
            name: "ada".to_string(),
            ..Default::default()
        };
        assert_eq!(user.initials(), "A");
    }

    #[test]
    fn test_first_name() {
        assert_eq!(UserSummary::default().first_name(), "John");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let user: UserSummary = serde_json::from_str(r#"{"name": "Ana Reyes"}"#).unwrap();
        assert_eq!(user.name, "Ana Reyes");
        assert_eq!(user.role, "Senior Technician");
        assert_eq!(user.id, "TECH001");
    }

    #[test]
    fn test_avatar_omitted_when_absent() {
        let json = serde_json::to_value(UserSummary::default()).unwrap();
        assert!(json.get("avatar").is_none());
    }
}

//! Lift journey tracking
//!
//! A lift moves through a fixed sequence of stages from the factory to the
//! customer handover. Lookups are served from demo data.

use serde::{Deserialize, Serialize};

/// Progress of a single stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    /// Done
    Completed,
    /// Under way
    InProgress,
    /// Not reached yet
    Pending,
}

/// One stop on the lift's journey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyStage {
    /// Stage name, e.g. "Dispatched"
    pub stage: String,
    /// Progress
    pub status: StageStatus,
    /// When the stage was reached, if it has been
    pub timestamp: Option<String>,
    /// Where it happened
    pub location: String,
    /// What happened
    pub description: String,
}

/// A lift and its journey so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiftJourney {
    /// Lift identifier
    pub lift_id: String,
    /// Model name
    pub model: String,
    /// Rated load
    pub capacity: String,
    /// Floors served
    pub floors: String,
    /// Stages in order
    pub journey: Vec<JourneyStage>,
}

impl LiftJourney {
    /// The in-progress stage, or the first pending one if none is in progress
    pub fn current_stage(&self) -> Option<&JourneyStage> {
        self.journey
            .iter()
            .find(|s| s.status == StageStatus::InProgress)
            .or_else(|| self.journey.iter().find(|s| s.status == StageStatus::Pending))
    }

    /// Number of completed stages
    pub fn completed_stages(&self) -> usize {
        self.journey
            .iter()
            .filter(|s| s.status == StageStatus::Completed)
            .count()
    }
}

/// Lift lookup service
#[derive(Debug, Clone, Default)]
pub struct LiftTracker;

impl LiftTracker {
    /// Look up a lift by id. Blank ids find nothing.
    pub fn search(&self, lift_id: &str) -> Option<LiftJourney> {
        let lift_id = lift_id.trim();
        if lift_id.is_empty() {
            return None;
        }
        tracing::debug!(lift_id, "Lift lookup");
        Some(Self::demo_journey(lift_id))
    }

    /// Result of scanning the QR code on the lift car
    pub fn scan(&self) -> LiftJourney {
        Self::demo_journey("LIFT-2024-001")
    }

    fn demo_journey(lift_id: &str) -> LiftJourney {
        let stage = |name: &str, status: StageStatus, timestamp: Option<&str>, location: &str, description: &str| {
            JourneyStage {
                stage: name.to_string(),
                status,
                timestamp: timestamp.map(str::to_string),
                location: location.to_string(),
                description: description.to_string(),
            }
        };
        let site = "Tech Park Tower, Downtown";

        LiftJourney {
            lift_id: lift_id.to_string(),
            model: "Passenger Lift XL-2000".to_string(),
            capacity: "1000kg".to_string(),
            floors: "8 floors".to_string(),
            journey: vec![
                stage(
                    "Factory",
                    StageStatus::Completed,
                    Some("2024-01-15 10:30 AM"),
                    "Manufacturing Plant, Industrial Zone",
                    "Lift manufactured and quality tested",
                ),
                stage(
                    "Dispatched",
                    StageStatus::Completed,
                    Some("2024-01-18 02:15 PM"),
                    "Warehouse, Logistics Center",
                    "Lift packaged and dispatched to site",
                ),
                stage(
                    "Delivered",
                    StageStatus::Completed,
                    Some("2024-01-20 09:45 AM"),
                    site,
                    "Lift delivered to installation site",
                ),
                stage(
                    "Installed",
                    StageStatus::InProgress,
                    Some("2024-01-22 11:20 AM"),
                    site,
                    "Installation in progress by technician team",
                ),
                stage(
                    "Handover",
                    StageStatus::Pending,
                    None,
                    site,
                    "Final inspection and customer handover",
                ),
            ],
        }
    }
}

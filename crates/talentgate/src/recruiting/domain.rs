use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an application record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ApplicationId(pub i64);

/// Review pipeline states an application moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    Highlighted,
    Possible,
    Discarded,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::Highlighted => "highlighted",
            ApplicationStatus::Possible => "possible",
            ApplicationStatus::Discarded => "discarded",
        }
    }

    /// Parse a reviewer-supplied status. The status set is closed; anything
    /// else is rejected at the service boundary.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "new" => Some(ApplicationStatus::New),
            "highlighted" => Some(ApplicationStatus::Highlighted),
            "possible" => Some(ApplicationStatus::Possible),
            "discarded" => Some(ApplicationStatus::Discarded),
            _ => None,
        }
    }
}

/// Candidate-submitted intake payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position_id: Option<i64>,
    #[serde(default)]
    pub business_unit_id: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Stored application record. New submissions always start as `new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub submission: ApplicationSubmission,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decided_by: Option<i64>,
    pub decision_note: Option<String>,
}

/// Reviewer decision applied to an application.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub reviewer_id: Option<i64>,
}

/// Per-status totals for the review dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub new: usize,
    pub highlighted: usize,
    pub possible: usize,
    pub discarded: usize,
    pub total: usize,
}

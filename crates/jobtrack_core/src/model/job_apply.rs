//! Job application domain model.
//!
//! # Responsibility
//! - Define the tracked-application record and its status vocabulary.
//! - Provide the status text codec shared by storage and callers.
//!
//! # Invariants
//! - `status` is an open tagged value: any status may follow any other.
//!   Transition legality is deliberately not enforced here.
//! - New applications always start as `Applied`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stable identifier for a job application row.
pub type JobApplyId = i64;

/// Progress stage of a job application.
///
/// Seven stages, no enforced transition graph. `Passed` and `Rejected` are
/// the terminal stages excluded by the active-application query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobApplyStatus {
    Applied,
    ExamScheduled,
    ExamResultWaiting,
    InterviewScheduled,
    InterviewResultWaiting,
    Passed,
    Rejected,
}

impl JobApplyStatus {
    /// Storage/wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::ExamScheduled => "EXAM_SCHEDULED",
            Self::ExamResultWaiting => "EXAM_RESULT_WAITING",
            Self::InterviewScheduled => "INTERVIEW_SCHEDULED",
            Self::InterviewResultWaiting => "INTERVIEW_RESULT_WAITING",
            Self::Passed => "PASSED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Parses a storage/wire status name. Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "APPLIED" => Some(Self::Applied),
            "EXAM_SCHEDULED" => Some(Self::ExamScheduled),
            "EXAM_RESULT_WAITING" => Some(Self::ExamResultWaiting),
            "INTERVIEW_SCHEDULED" => Some(Self::InterviewScheduled),
            "INTERVIEW_RESULT_WAITING" => Some(Self::InterviewResultWaiting),
            "PASSED" => Some(Self::Passed),
            "REJECTED" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns whether applications in this status still need attention.
    pub fn is_active(self) -> bool {
        !matches!(self, Self::Passed | Self::Rejected)
    }
}

/// A tracked application to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApply {
    pub id: JobApplyId,
    pub company_name: String,
    pub position: Option<String>,
    pub job_posting_url: Option<String>,
    pub applied_at: Option<NaiveDateTime>,
    pub status: JobApplyStatus,
    pub next_event_date: Option<NaiveDateTime>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl JobApply {
    /// Returns whether this application should be considered visible.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Request model for creating a job application.
///
/// Status is not part of the request: creation always stamps `Applied`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewJobApply {
    pub company_name: String,
    pub position: Option<String>,
    pub job_posting_url: Option<String>,
    pub applied_at: Option<NaiveDateTime>,
    pub next_event_date: Option<NaiveDateTime>,
    pub notes: Option<String>,
}

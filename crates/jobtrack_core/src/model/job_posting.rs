//! Watched job posting domain model.
//!
//! # Responsibility
//! - Define the watched-posting record and its deadline fields.
//! - Provide the notes-merge rule used when a posting is converted into an
//!   application.
//!
//! # Invariants
//! - `start_date`/`end_date` are calendar dates, not instants.
//! - A converted posting is tombstoned; the resulting application keeps no
//!   reference back to it.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stable identifier for a job posting row.
pub type JobPostingId = i64;

/// A watched, not-yet-applied-to job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobPostingId,
    pub company_name: String,
    pub position: Option<String>,
    pub job_posting_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// Application deadline used by the upcoming-deadline queries.
    pub end_date: Option<NaiveDate>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

impl JobPosting {
    /// Returns whether this posting should be considered visible.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Request model for creating a watched posting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewJobPosting {
    pub company_name: String,
    pub position: Option<String>,
    pub job_posting_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub requirements: Option<String>,
    pub notes: Option<String>,
}

/// Builds the notes text carried onto an application created by conversion.
///
/// One line per non-blank source field, requirements first:
/// `요구사항: {requirements}` and `메모: {notes}`. Returns `None` when both
/// fields are absent or blank.
pub fn merged_application_notes(
    requirements: Option<&str>,
    notes: Option<&str>,
) -> Option<String> {
    let mut merged = String::new();
    if let Some(requirements) = requirements.filter(|text| !text.trim().is_empty()) {
        merged.push_str("요구사항: ");
        merged.push_str(requirements);
    }
    if let Some(notes) = notes.filter(|text| !text.trim().is_empty()) {
        if !merged.is_empty() {
            merged.push('\n');
        }
        merged.push_str("메모: ");
        merged.push_str(notes);
    }
    if merged.is_empty() {
        None
    } else {
        Some(merged)
    }
}

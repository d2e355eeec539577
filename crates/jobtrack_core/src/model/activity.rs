//! Activity domain model.
//!
//! # Responsibility
//! - Define a single tracked time interval.
//! - Provide lifecycle helpers for soft-delete and completion state.
//!
//! # Invariants
//! - `started_at` is always present; `ended_at = None` means "in progress".
//! - `deleted_at` is the source of truth for tombstone state.
//! - `ended_at` is never clamped against `started_at`; range filters compare
//!   only the calendar date of `started_at`.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Stable identifier for an activity row.
pub type ActivityId = i64;

/// A single tracked time interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub started_at: NaiveDateTime,
    /// `None` while the activity is still in progress.
    pub ended_at: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Soft-delete tombstone; set once, never cleared by the ledger.
    pub deleted_at: Option<NaiveDateTime>,
}

impl Activity {
    /// Returns whether this activity should be considered visible/active.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Returns whether the interval has been closed.
    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Elapsed time for a finished activity, `None` while in progress.
    ///
    /// The difference may be negative; the ledger stores whatever the caller
    /// supplied and aggregation sums it as-is.
    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|ended| ended - self.started_at)
    }
}

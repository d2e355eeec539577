//! Domain records for the job-search tracker.
//!
//! # Responsibility
//! - Define the canonical shapes for activities, applications and postings.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - Every record is identified by a stable `i64` row id.
//! - Deletion is represented by a `deleted_at` tombstone, not hard delete.
//! - All stamps carry whole-second precision so they round-trip through
//!   TEXT storage unchanged.

pub mod activity;
pub mod job_apply;
pub mod job_posting;

use chrono::{Local, NaiveDateTime, Timelike};

/// Current local wall-clock time truncated to whole seconds.
///
/// Used for every `created_at`/`updated_at`/`deleted_at` stamp.
pub fn now_stamp() -> NaiveDateTime {
    let now = Local::now().naive_local();
    // with_nanosecond(0) only fails for leap-second inputs.
    now.with_nanosecond(0).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::now_stamp;
    use chrono::Timelike;

    #[test]
    fn now_stamp_has_second_precision() {
        assert_eq!(now_stamp().nanosecond(), 0);
    }
}

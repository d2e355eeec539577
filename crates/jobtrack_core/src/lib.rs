//! Core domain logic for the jobtrack job-search tracker.
//! This crate is the single source of truth for record lifecycle invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityId};
pub use model::job_apply::{JobApply, JobApplyId, JobApplyStatus, NewJobApply};
pub use model::job_posting::{JobPosting, JobPostingId, NewJobPosting};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::job_apply_repo::{JobApplyRepository, SqliteJobApplyRepository};
pub use repo::job_posting_repo::{JobPostingRepository, SqliteJobPostingRepository};
pub use repo::{RepoError, RepoResult};
pub use service::activity_service::ActivityService;
pub use service::job_apply_service::JobApplyService;
pub use service::job_posting_service::JobPostingService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

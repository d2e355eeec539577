//! Activity ledger use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for activity tracking callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository soft-delete contracts.
//! - Service layer remains storage-agnostic.

use crate::model::activity::{Activity, ActivityId};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::RepoResult;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Use-case service wrapper for the activity ledger.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Starts tracking an activity; `started_at` defaults to now.
    pub fn create_activity(
        &self,
        started_at: Option<NaiveDateTime>,
        ended_at: Option<NaiveDateTime>,
        description: Option<&str>,
    ) -> RepoResult<Activity> {
        self.repo.create(started_at, ended_at, description)
    }

    /// Lists all visible activities, earliest start first.
    pub fn find_all(&self) -> RepoResult<Vec<Activity>> {
        self.repo.find_all()
    }

    /// Loads one visible activity.
    pub fn find_by_id(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        self.repo.find_by_id(id)
    }

    /// Lists activities started inside the inclusive calendar-date window.
    pub fn find_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Activity>> {
        self.repo.find_by_date_range(start_date, end_date)
    }

    pub fn update_started_at(
        &self,
        id: ActivityId,
        started_at: NaiveDateTime,
    ) -> RepoResult<bool> {
        self.repo.update_started_at(id, started_at)
    }

    pub fn update_ended_at(
        &self,
        id: ActivityId,
        ended_at: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.repo.update_ended_at(id, ended_at)
    }

    pub fn update_description(
        &self,
        id: ActivityId,
        description: Option<&str>,
    ) -> RepoResult<bool> {
        self.repo.update_description(id, description)
    }

    /// Soft-deletes one activity.
    pub fn delete_activity(&self, id: ActivityId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    /// Soft-deletes a batch of activities, returning the affected count.
    pub fn delete_activities(&self, ids: &[ActivityId]) -> RepoResult<usize> {
        self.repo.delete_many(ids)
    }

    /// Total tracked time for one calendar date; in-progress rows excluded.
    pub fn total_duration_by_date(&self, date: NaiveDate) -> RepoResult<Duration> {
        self.repo.total_duration_by_date(date)
    }

    /// Total tracked time over an inclusive calendar-date range.
    pub fn total_duration_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Duration> {
        self.repo.total_duration_by_date_range(start_date, end_date)
    }
}

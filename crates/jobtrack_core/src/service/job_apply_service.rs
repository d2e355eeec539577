//! Application tracker use-case service.

use crate::model::job_apply::{JobApply, JobApplyId, JobApplyStatus, NewJobApply};
use crate::repo::job_apply_repo::JobApplyRepository;
use crate::repo::RepoResult;
use chrono::{NaiveDate, NaiveDateTime};

/// Use-case service wrapper for the application tracker.
pub struct JobApplyService<R: JobApplyRepository> {
    repo: R,
}

impl<R: JobApplyRepository> JobApplyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a new application; status always starts as `APPLIED`.
    pub fn create_job_apply(&self, new: &NewJobApply) -> RepoResult<JobApply> {
        self.repo.create(new)
    }

    pub fn find_all(&self) -> RepoResult<Vec<JobApply>> {
        self.repo.find_all()
    }

    /// Lists applications that still need attention (not passed/rejected).
    pub fn find_active(&self) -> RepoResult<Vec<JobApply>> {
        self.repo.find_active()
    }

    pub fn find_by_id(&self, id: JobApplyId) -> RepoResult<Option<JobApply>> {
        self.repo.find_by_id(id)
    }

    pub fn find_by_status(&self, status: JobApplyStatus) -> RepoResult<Vec<JobApply>> {
        self.repo.find_by_status(status)
    }

    pub fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobApply>> {
        self.repo.find_by_company_name(company_name)
    }

    pub fn find_by_applied_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobApply>> {
        self.repo.find_by_applied_date_range(start_date, end_date)
    }

    /// Moves an application to any target status; no transition checks.
    pub fn update_status(&self, id: JobApplyId, status: JobApplyStatus) -> RepoResult<bool> {
        self.repo.update_status(id, status)
    }

    pub fn update_applied_at(
        &self,
        id: JobApplyId,
        applied_at: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.repo.update_applied_at(id, applied_at)
    }

    pub fn update_next_event_date(
        &self,
        id: JobApplyId,
        next_event_date: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.repo.update_next_event_date(id, next_event_date)
    }

    pub fn update_notes(&self, id: JobApplyId, notes: Option<&str>) -> RepoResult<bool> {
        self.repo.update_notes(id, notes)
    }

    pub fn update_company_name(&self, id: JobApplyId, company_name: &str) -> RepoResult<bool> {
        self.repo.update_company_name(id, company_name)
    }

    pub fn update_position(&self, id: JobApplyId, position: Option<&str>) -> RepoResult<bool> {
        self.repo.update_position(id, position)
    }

    pub fn update_job_posting_url(
        &self,
        id: JobApplyId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool> {
        self.repo.update_job_posting_url(id, job_posting_url)
    }

    pub fn delete_job_apply(&self, id: JobApplyId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    pub fn delete_job_applies(&self, ids: &[JobApplyId]) -> RepoResult<usize> {
        self.repo.delete_many(ids)
    }
}

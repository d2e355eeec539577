//! Posting watcher use-case service.

use crate::model::job_apply::JobApply;
use crate::model::job_posting::{JobPosting, JobPostingId, NewJobPosting};
use crate::repo::job_posting_repo::JobPostingRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;

/// Use-case service wrapper for the posting watcher.
pub struct JobPostingService<R: JobPostingRepository> {
    repo: R,
}

impl<R: JobPostingRepository> JobPostingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_job_posting(&self, new: &NewJobPosting) -> RepoResult<JobPosting> {
        self.repo.create(new)
    }

    pub fn find_all(&self) -> RepoResult<Vec<JobPosting>> {
        self.repo.find_all()
    }

    pub fn find_by_id(&self, id: JobPostingId) -> RepoResult<Option<JobPosting>> {
        self.repo.find_by_id(id)
    }

    pub fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobPosting>> {
        self.repo.find_by_company_name(company_name)
    }

    pub fn find_by_end_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobPosting>> {
        self.repo.find_by_end_date_range(start_date, end_date)
    }

    /// Postings whose deadline is today through `days` days out.
    pub fn find_upcoming_deadlines(&self, days: u32) -> RepoResult<Vec<JobPosting>> {
        self.repo.find_upcoming_deadlines(days)
    }

    pub fn update_company_name(&self, id: JobPostingId, company_name: &str) -> RepoResult<bool> {
        self.repo.update_company_name(id, company_name)
    }

    pub fn update_position(&self, id: JobPostingId, position: Option<&str>) -> RepoResult<bool> {
        self.repo.update_position(id, position)
    }

    pub fn update_job_posting_url(
        &self,
        id: JobPostingId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool> {
        self.repo.update_job_posting_url(id, job_posting_url)
    }

    pub fn update_start_date(
        &self,
        id: JobPostingId,
        start_date: Option<NaiveDate>,
    ) -> RepoResult<bool> {
        self.repo.update_start_date(id, start_date)
    }

    pub fn update_end_date(
        &self,
        id: JobPostingId,
        end_date: Option<NaiveDate>,
    ) -> RepoResult<bool> {
        self.repo.update_end_date(id, end_date)
    }

    pub fn update_requirements(
        &self,
        id: JobPostingId,
        requirements: Option<&str>,
    ) -> RepoResult<bool> {
        self.repo.update_requirements(id, requirements)
    }

    pub fn update_notes(&self, id: JobPostingId, notes: Option<&str>) -> RepoResult<bool> {
        self.repo.update_notes(id, notes)
    }

    pub fn delete_job_posting(&self, id: JobPostingId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    pub fn delete_job_postings(&self, ids: &[JobPostingId]) -> RepoResult<usize> {
        self.repo.delete_many(ids)
    }

    /// Applies to a watched posting: creates the application and retires the
    /// posting in one atomic step.
    pub fn convert_to_application(&self, id: JobPostingId) -> RepoResult<Option<JobApply>> {
        self.repo.convert_to_application(id)
    }
}

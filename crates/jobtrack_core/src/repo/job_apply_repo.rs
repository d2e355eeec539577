//! Application tracker contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, filtered finders and per-field updaters over the
//!   `job_apply` table.
//!
//! # Invariants
//! - Creation forces `status = APPLIED` regardless of caller input.
//! - `update_status` accepts any target status: the seven stages form an
//!   open tagged value, not a state machine.
//! - Rows with NULL `applied_at` never match the applied-date-range filter.

use crate::model::job_apply::{JobApply, JobApplyId, JobApplyStatus, NewJobApply};
use crate::model::now_stamp;
use crate::repo::{
    date_to_db, datetime_column, datetime_to_db, required_datetime_column, RepoError, RepoResult,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row, ToSql, Transaction, TransactionBehavior};

const JOB_APPLY_SELECT_SQL: &str = "SELECT
    id,
    company_name,
    position,
    job_posting_url,
    applied_at,
    status,
    next_event_date,
    notes,
    created_at,
    updated_at,
    deleted_at
FROM job_apply";

/// Repository interface for the application tracker.
pub trait JobApplyRepository {
    /// Creates an application; status is always stamped `APPLIED`.
    fn create(&self, new: &NewJobApply) -> RepoResult<JobApply>;
    /// Lists non-deleted applications, newest first.
    fn find_all(&self) -> RepoResult<Vec<JobApply>>;
    /// Lists non-deleted applications that are neither passed nor rejected,
    /// newest first.
    fn find_active(&self) -> RepoResult<Vec<JobApply>>;
    /// Loads one non-deleted application.
    fn find_by_id(&self, id: JobApplyId) -> RepoResult<Option<JobApply>>;
    /// Lists non-deleted applications in the given status, newest first.
    fn find_by_status(&self, status: JobApplyStatus) -> RepoResult<Vec<JobApply>>;
    /// Lists non-deleted applications to the given company, newest first.
    fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobApply>>;
    /// Lists applications whose `applied_at` calendar date falls inside the
    /// inclusive range, ordered by `applied_at` descending.
    fn find_by_applied_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobApply>>;
    /// Per-field updaters; false when the row is absent or soft-deleted.
    fn update_status(&self, id: JobApplyId, status: JobApplyStatus) -> RepoResult<bool>;
    fn update_applied_at(
        &self,
        id: JobApplyId,
        applied_at: Option<NaiveDateTime>,
    ) -> RepoResult<bool>;
    fn update_next_event_date(
        &self,
        id: JobApplyId,
        next_event_date: Option<NaiveDateTime>,
    ) -> RepoResult<bool>;
    fn update_notes(&self, id: JobApplyId, notes: Option<&str>) -> RepoResult<bool>;
    fn update_company_name(&self, id: JobApplyId, company_name: &str) -> RepoResult<bool>;
    fn update_position(&self, id: JobApplyId, position: Option<&str>) -> RepoResult<bool>;
    fn update_job_posting_url(
        &self,
        id: JobApplyId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool>;
    /// Soft-deletes one application; true when the row exists.
    fn delete(&self, id: JobApplyId) -> RepoResult<bool>;
    /// Soft-deletes many applications in one transaction; already-deleted
    /// rows count toward the returned total.
    fn delete_many(&self, ids: &[JobApplyId]) -> RepoResult<usize>;
}

/// SQLite-backed application tracker.
pub struct SqliteJobApplyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobApplyRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn update_column<V: ToSql>(
        &self,
        id: JobApplyId,
        column: &'static str,
        value: V,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE job_apply
                 SET {column} = ?1, updated_at = ?2
                 WHERE id = ?3 AND deleted_at IS NULL;"
            ),
            params![value, datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn query_rows(&self, sql: &str, bind: &[&dyn ToSql]) -> RepoResult<Vec<JobApply>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut applies = Vec::new();

        while let Some(row) = rows.next()? {
            applies.push(parse_job_apply_row(row)?);
        }

        Ok(applies)
    }
}

impl JobApplyRepository for SqliteJobApplyRepository<'_> {
    fn create(&self, new: &NewJobApply) -> RepoResult<JobApply> {
        let now = now_stamp();
        let status = JobApplyStatus::Applied;

        self.conn.execute(
            "INSERT INTO job_apply (
                company_name,
                position,
                job_posting_url,
                applied_at,
                status,
                next_event_date,
                notes,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8);",
            params![
                new.company_name,
                new.position,
                new.job_posting_url,
                new.applied_at.map(datetime_to_db),
                status.as_str(),
                new.next_event_date.map(datetime_to_db),
                new.notes,
                datetime_to_db(now),
            ],
        )?;

        Ok(JobApply {
            id: self.conn.last_insert_rowid(),
            company_name: new.company_name.clone(),
            position: new.position.clone(),
            job_posting_url: new.job_posting_url.clone(),
            applied_at: new.applied_at,
            status,
            next_event_date: new.next_event_date,
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn find_all(&self) -> RepoResult<Vec<JobApply>> {
        self.query_rows(
            &format!(
                "{JOB_APPLY_SELECT_SQL}
                 WHERE deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[],
        )
    }

    fn find_active(&self) -> RepoResult<Vec<JobApply>> {
        self.query_rows(
            &format!(
                "{JOB_APPLY_SELECT_SQL}
                 WHERE deleted_at IS NULL
                   AND status <> ?1
                   AND status <> ?2
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[
                &JobApplyStatus::Passed.as_str() as &dyn ToSql,
                &JobApplyStatus::Rejected.as_str(),
            ],
        )
    }

    fn find_by_id(&self, id: JobApplyId) -> RepoResult<Option<JobApply>> {
        let mut stmt = self.conn.prepare(&format!(
            "{JOB_APPLY_SELECT_SQL}
             WHERE id = ?1 AND deleted_at IS NULL;"
        ))?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_job_apply_row(row)?));
        }

        Ok(None)
    }

    fn find_by_status(&self, status: JobApplyStatus) -> RepoResult<Vec<JobApply>> {
        self.query_rows(
            &format!(
                "{JOB_APPLY_SELECT_SQL}
                 WHERE status = ?1 AND deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[&status.as_str() as &dyn ToSql],
        )
    }

    fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobApply>> {
        self.query_rows(
            &format!(
                "{JOB_APPLY_SELECT_SQL}
                 WHERE company_name = ?1 AND deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[&company_name as &dyn ToSql],
        )
    }

    fn find_by_applied_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobApply>> {
        self.query_rows(
            &format!(
                "{JOB_APPLY_SELECT_SQL}
                 WHERE date(applied_at) >= ?1
                   AND date(applied_at) <= ?2
                   AND deleted_at IS NULL
                 ORDER BY applied_at DESC, id DESC;"
            ),
            &[&date_to_db(start_date) as &dyn ToSql, &date_to_db(end_date)],
        )
    }

    fn update_status(&self, id: JobApplyId, status: JobApplyStatus) -> RepoResult<bool> {
        self.update_column(id, "status", status.as_str())
    }

    fn update_applied_at(
        &self,
        id: JobApplyId,
        applied_at: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.update_column(id, "applied_at", applied_at.map(datetime_to_db))
    }

    fn update_next_event_date(
        &self,
        id: JobApplyId,
        next_event_date: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.update_column(id, "next_event_date", next_event_date.map(datetime_to_db))
    }

    fn update_notes(&self, id: JobApplyId, notes: Option<&str>) -> RepoResult<bool> {
        self.update_column(id, "notes", notes)
    }

    fn update_company_name(&self, id: JobApplyId, company_name: &str) -> RepoResult<bool> {
        self.update_column(id, "company_name", company_name)
    }

    fn update_position(&self, id: JobApplyId, position: Option<&str>) -> RepoResult<bool> {
        self.update_column(id, "position", position)
    }

    fn update_job_posting_url(
        &self,
        id: JobApplyId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool> {
        self.update_column(id, "job_posting_url", job_posting_url)
    }

    fn delete(&self, id: JobApplyId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE job_apply SET deleted_at = ?1 WHERE id = ?2;",
            params![datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn delete_many(&self, ids: &[JobApplyId]) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let now = datetime_to_db(now_stamp());
        let mut count = 0;

        for id in ids {
            count += tx.execute(
                "UPDATE job_apply SET deleted_at = ?1 WHERE id = ?2;",
                params![now, id],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

fn parse_job_apply_row(row: &Row<'_>) -> RepoResult<JobApply> {
    let status_text: String = row.get("status")?;
    let status = JobApplyStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in job_apply.status"))
    })?;

    Ok(JobApply {
        id: row.get("id")?,
        company_name: row.get("company_name")?,
        position: row.get("position")?,
        job_posting_url: row.get("job_posting_url")?,
        applied_at: datetime_column(row.get("applied_at")?, "job_apply", "applied_at")?,
        status,
        next_event_date: datetime_column(
            row.get("next_event_date")?,
            "job_apply",
            "next_event_date",
        )?,
        notes: row.get("notes")?,
        created_at: required_datetime_column(row.get("created_at")?, "job_apply", "created_at")?,
        updated_at: required_datetime_column(row.get("updated_at")?, "job_apply", "updated_at")?,
        deleted_at: datetime_column(row.get("deleted_at")?, "job_apply", "deleted_at")?,
    })
}

//! Posting watcher contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, deadline queries and per-field updaters over the
//!   `job_posting` table.
//! - Convert a watched posting into a job application atomically.
//!
//! # Invariants
//! - Deadline queries order by `end_date` ascending; NULL `end_date` never
//!   matches a range.
//! - Conversion creates the application and tombstones the posting inside
//!   one transaction: both writes commit or neither does.
//! - The converted application keeps no reference back to the posting.

use crate::model::job_apply::{JobApply, JobApplyStatus};
use crate::model::job_posting::{
    merged_application_notes, JobPosting, JobPostingId, NewJobPosting,
};
use crate::model::now_stamp;
use crate::repo::{
    date_column, date_to_db, datetime_column, datetime_to_db, required_datetime_column,
    RepoResult,
};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection, Row, ToSql, Transaction, TransactionBehavior};

const JOB_POSTING_SELECT_SQL: &str = "SELECT
    id,
    company_name,
    position,
    job_posting_url,
    start_date,
    end_date,
    requirements,
    notes,
    created_at,
    updated_at,
    deleted_at
FROM job_posting";

/// Repository interface for the posting watcher.
pub trait JobPostingRepository {
    /// Creates a watched posting.
    fn create(&self, new: &NewJobPosting) -> RepoResult<JobPosting>;
    /// Lists non-deleted postings, newest first.
    fn find_all(&self) -> RepoResult<Vec<JobPosting>>;
    /// Loads one non-deleted posting.
    fn find_by_id(&self, id: JobPostingId) -> RepoResult<Option<JobPosting>>;
    /// Lists non-deleted postings for the given company, newest first.
    fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobPosting>>;
    /// Lists postings whose `end_date` falls inside the inclusive range,
    /// ordered by `end_date` ascending.
    fn find_by_end_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobPosting>>;
    /// Lists postings whose deadline falls within `[today, today + days]`,
    /// ordered by `end_date` ascending. Expired deadlines are excluded.
    fn find_upcoming_deadlines(&self, days: u32) -> RepoResult<Vec<JobPosting>>;
    /// Per-field updaters; false when the row is absent or soft-deleted.
    fn update_company_name(&self, id: JobPostingId, company_name: &str) -> RepoResult<bool>;
    fn update_position(&self, id: JobPostingId, position: Option<&str>) -> RepoResult<bool>;
    fn update_job_posting_url(
        &self,
        id: JobPostingId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool>;
    fn update_start_date(&self, id: JobPostingId, start_date: Option<NaiveDate>)
        -> RepoResult<bool>;
    fn update_end_date(&self, id: JobPostingId, end_date: Option<NaiveDate>) -> RepoResult<bool>;
    fn update_requirements(&self, id: JobPostingId, requirements: Option<&str>)
        -> RepoResult<bool>;
    fn update_notes(&self, id: JobPostingId, notes: Option<&str>) -> RepoResult<bool>;
    /// Soft-deletes one posting; true when the row exists.
    fn delete(&self, id: JobPostingId) -> RepoResult<bool>;
    /// Soft-deletes many postings in one transaction; already-deleted rows
    /// count toward the returned total.
    fn delete_many(&self, ids: &[JobPostingId]) -> RepoResult<usize>;
    /// Atomically turns a posting into a job application.
    ///
    /// Copies `company_name`/`position`/`job_posting_url`, stamps status
    /// `APPLIED`, merges `requirements`/`notes` into the application notes
    /// and tombstones the source posting. Returns `None` without side
    /// effects when the posting is absent or already deleted.
    fn convert_to_application(&self, id: JobPostingId) -> RepoResult<Option<JobApply>>;
}

/// SQLite-backed posting watcher.
pub struct SqliteJobPostingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJobPostingRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn update_column<V: ToSql>(
        &self,
        id: JobPostingId,
        column: &'static str,
        value: V,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE job_posting
                 SET {column} = ?1, updated_at = ?2
                 WHERE id = ?3 AND deleted_at IS NULL;"
            ),
            params![value, datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn query_rows(&self, sql: &str, bind: &[&dyn ToSql]) -> RepoResult<Vec<JobPosting>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut postings = Vec::new();

        while let Some(row) = rows.next()? {
            postings.push(parse_job_posting_row(row)?);
        }

        Ok(postings)
    }
}

impl JobPostingRepository for SqliteJobPostingRepository<'_> {
    fn create(&self, new: &NewJobPosting) -> RepoResult<JobPosting> {
        let now = now_stamp();

        self.conn.execute(
            "INSERT INTO job_posting (
                company_name,
                position,
                job_posting_url,
                start_date,
                end_date,
                requirements,
                notes,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8);",
            params![
                new.company_name,
                new.position,
                new.job_posting_url,
                new.start_date.map(date_to_db),
                new.end_date.map(date_to_db),
                new.requirements,
                new.notes,
                datetime_to_db(now),
            ],
        )?;

        Ok(JobPosting {
            id: self.conn.last_insert_rowid(),
            company_name: new.company_name.clone(),
            position: new.position.clone(),
            job_posting_url: new.job_posting_url.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            requirements: new.requirements.clone(),
            notes: new.notes.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn find_all(&self) -> RepoResult<Vec<JobPosting>> {
        self.query_rows(
            &format!(
                "{JOB_POSTING_SELECT_SQL}
                 WHERE deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[],
        )
    }

    fn find_by_id(&self, id: JobPostingId) -> RepoResult<Option<JobPosting>> {
        let mut stmt = self.conn.prepare(&format!(
            "{JOB_POSTING_SELECT_SQL}
             WHERE id = ?1 AND deleted_at IS NULL;"
        ))?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_job_posting_row(row)?));
        }

        Ok(None)
    }

    fn find_by_company_name(&self, company_name: &str) -> RepoResult<Vec<JobPosting>> {
        self.query_rows(
            &format!(
                "{JOB_POSTING_SELECT_SQL}
                 WHERE company_name = ?1 AND deleted_at IS NULL
                 ORDER BY created_at DESC, id DESC;"
            ),
            &[&company_name as &dyn ToSql],
        )
    }

    fn find_by_end_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<JobPosting>> {
        self.query_rows(
            &format!(
                "{JOB_POSTING_SELECT_SQL}
                 WHERE end_date >= ?1
                   AND end_date <= ?2
                   AND deleted_at IS NULL
                 ORDER BY end_date ASC, id ASC;"
            ),
            &[&date_to_db(start_date) as &dyn ToSql, &date_to_db(end_date)],
        )
    }

    fn find_upcoming_deadlines(&self, days: u32) -> RepoResult<Vec<JobPosting>> {
        let today = Local::now().date_naive();
        let horizon = today + chrono::Duration::days(i64::from(days));
        self.find_by_end_date_range(today, horizon)
    }

    fn update_company_name(&self, id: JobPostingId, company_name: &str) -> RepoResult<bool> {
        self.update_column(id, "company_name", company_name)
    }

    fn update_position(&self, id: JobPostingId, position: Option<&str>) -> RepoResult<bool> {
        self.update_column(id, "position", position)
    }

    fn update_job_posting_url(
        &self,
        id: JobPostingId,
        job_posting_url: Option<&str>,
    ) -> RepoResult<bool> {
        self.update_column(id, "job_posting_url", job_posting_url)
    }

    fn update_start_date(
        &self,
        id: JobPostingId,
        start_date: Option<NaiveDate>,
    ) -> RepoResult<bool> {
        self.update_column(id, "start_date", start_date.map(date_to_db))
    }

    fn update_end_date(&self, id: JobPostingId, end_date: Option<NaiveDate>) -> RepoResult<bool> {
        self.update_column(id, "end_date", end_date.map(date_to_db))
    }

    fn update_requirements(
        &self,
        id: JobPostingId,
        requirements: Option<&str>,
    ) -> RepoResult<bool> {
        self.update_column(id, "requirements", requirements)
    }

    fn update_notes(&self, id: JobPostingId, notes: Option<&str>) -> RepoResult<bool> {
        self.update_column(id, "notes", notes)
    }

    fn delete(&self, id: JobPostingId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE job_posting SET deleted_at = ?1 WHERE id = ?2;",
            params![datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn delete_many(&self, ids: &[JobPostingId]) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let now = datetime_to_db(now_stamp());
        let mut count = 0;

        for id in ids {
            count += tx.execute(
                "UPDATE job_posting SET deleted_at = ?1 WHERE id = ?2;",
                params![now, id],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    fn convert_to_application(&self, id: JobPostingId) -> RepoResult<Option<JobApply>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let posting = {
            let mut stmt = tx.prepare(&format!(
                "{JOB_POSTING_SELECT_SQL}
                 WHERE id = ?1 AND deleted_at IS NULL;"
            ))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => parse_job_posting_row(row)?,
                None => return Ok(None),
            }
        };

        let now = now_stamp();
        let status = JobApplyStatus::Applied;
        let notes = merged_application_notes(
            posting.requirements.as_deref(),
            posting.notes.as_deref(),
        );

        tx.execute(
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
            ) VALUES (?1, ?2, ?3, NULL, ?4, NULL, ?5, ?6, ?6);",
            params![
                posting.company_name,
                posting.position,
                posting.job_posting_url,
                status.as_str(),
                notes,
                datetime_to_db(now),
            ],
        )?;
        let apply_id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE job_posting SET deleted_at = ?1 WHERE id = ?2;",
            params![datetime_to_db(now), id],
        )?;

        tx.commit()?;

        Ok(Some(JobApply {
            id: apply_id,
            company_name: posting.company_name,
            position: posting.position,
            job_posting_url: posting.job_posting_url,
            applied_at: None,
            status,
            next_event_date: None,
            notes,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }))
    }
}

fn parse_job_posting_row(row: &Row<'_>) -> RepoResult<JobPosting> {
    Ok(JobPosting {
        id: row.get("id")?,
        company_name: row.get("company_name")?,
        position: row.get("position")?,
        job_posting_url: row.get("job_posting_url")?,
        start_date: date_column(row.get("start_date")?, "job_posting", "start_date")?,
        end_date: date_column(row.get("end_date")?, "job_posting", "end_date")?,
        requirements: row.get("requirements")?,
        notes: row.get("notes")?,
        created_at: required_datetime_column(row.get("created_at")?, "job_posting", "created_at")?,
        updated_at: required_datetime_column(row.get("updated_at")?, "job_posting", "updated_at")?,
        deleted_at: datetime_column(row.get("deleted_at")?, "job_posting", "deleted_at")?,
    })
}

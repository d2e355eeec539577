//! Activity ledger contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, date-window queries and duration aggregation over the
//!   `activity` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Range filters compare the calendar date of `started_at` inclusively on
//!   both ends.
//! - Duration aggregation skips in-progress rows entirely rather than
//!   counting them as zero.
//! - The delete paths intentionally skip the `deleted_at IS NULL` guard so a
//!   tombstone can be restamped (bulk delete counts such rows).

use crate::model::activity::{Activity, ActivityId};
use crate::model::now_stamp;
use crate::repo::{
    date_to_db, datetime_column, datetime_to_db, required_datetime_column, RepoResult,
};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row, ToSql, Transaction, TransactionBehavior};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    started_at,
    ended_at,
    description,
    created_at,
    updated_at,
    deleted_at
FROM activity";

/// Repository interface for the activity ledger.
pub trait ActivityRepository {
    /// Creates an activity; `started_at` defaults to the creation instant.
    fn create(
        &self,
        started_at: Option<NaiveDateTime>,
        ended_at: Option<NaiveDateTime>,
        description: Option<&str>,
    ) -> RepoResult<Activity>;
    /// Lists non-deleted activities ordered by `started_at` ascending.
    fn find_all(&self) -> RepoResult<Vec<Activity>>;
    /// Loads one non-deleted activity.
    fn find_by_id(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    /// Lists activities whose `started_at` calendar date falls inside the
    /// inclusive range, ordered by `started_at` ascending.
    fn find_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Activity>>;
    /// Replaces `started_at`; false when the row is absent or deleted.
    fn update_started_at(&self, id: ActivityId, started_at: NaiveDateTime) -> RepoResult<bool>;
    /// Replaces `ended_at` (`None` reopens the interval).
    fn update_ended_at(&self, id: ActivityId, ended_at: Option<NaiveDateTime>)
        -> RepoResult<bool>;
    /// Replaces `description`.
    fn update_description(&self, id: ActivityId, description: Option<&str>) -> RepoResult<bool>;
    /// Soft-deletes one activity; true when the row exists (even if already
    /// tombstoned, in which case the stamp is refreshed).
    fn delete(&self, id: ActivityId) -> RepoResult<bool>;
    /// Soft-deletes many activities in one transaction, returning how many
    /// ids resolved to an existing row. Already-deleted rows count.
    fn delete_many(&self, ids: &[ActivityId]) -> RepoResult<usize>;
    /// Sums `ended_at - started_at` over finished, non-deleted activities
    /// started on the given calendar date.
    fn total_duration_by_date(&self, date: NaiveDate) -> RepoResult<Duration>;
    /// Same as [`Self::total_duration_by_date`] over an inclusive date range.
    fn total_duration_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Duration>;
}

/// SQLite-backed activity ledger.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn update_column<V: ToSql>(
        &self,
        id: ActivityId,
        column: &'static str,
        value: V,
    ) -> RepoResult<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE activity
                 SET {column} = ?1, updated_at = ?2
                 WHERE id = ?3 AND deleted_at IS NULL;"
            ),
            params![value, datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn sum_durations(&self, sql: &str, bind: &[&dyn ToSql]) -> RepoResult<Duration> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut total = Duration::zero();

        while let Some(row) = rows.next()? {
            let started = datetime_column(row.get("started_at")?, "activity", "started_at")?;
            let ended = datetime_column(row.get("ended_at")?, "activity", "ended_at")?;
            if let (Some(started), Some(ended)) = (started, ended) {
                total += ended - started;
            }
        }

        Ok(total)
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create(
        &self,
        started_at: Option<NaiveDateTime>,
        ended_at: Option<NaiveDateTime>,
        description: Option<&str>,
    ) -> RepoResult<Activity> {
        let now = now_stamp();
        let started_at = started_at.unwrap_or(now);

        self.conn.execute(
            "INSERT INTO activity (started_at, ended_at, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![
                datetime_to_db(started_at),
                ended_at.map(datetime_to_db),
                description,
                datetime_to_db(now),
            ],
        )?;

        Ok(Activity {
            id: self.conn.last_insert_rowid(),
            started_at,
            ended_at,
            description: description.map(str::to_string),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    fn find_all(&self) -> RepoResult<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE deleted_at IS NULL
             ORDER BY started_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut activities = Vec::new();

        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }

        Ok(activities)
    }

    fn find_by_id(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE id = ?1 AND deleted_at IS NULL;"
        ))?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }

        Ok(None)
    }

    fn find_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE date(started_at) >= ?1
               AND date(started_at) <= ?2
               AND deleted_at IS NULL
             ORDER BY started_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query(params![date_to_db(start_date), date_to_db(end_date)])?;
        let mut activities = Vec::new();

        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }

        Ok(activities)
    }

    fn update_started_at(&self, id: ActivityId, started_at: NaiveDateTime) -> RepoResult<bool> {
        self.update_column(id, "started_at", datetime_to_db(started_at))
    }

    fn update_ended_at(
        &self,
        id: ActivityId,
        ended_at: Option<NaiveDateTime>,
    ) -> RepoResult<bool> {
        self.update_column(id, "ended_at", ended_at.map(datetime_to_db))
    }

    fn update_description(&self, id: ActivityId, description: Option<&str>) -> RepoResult<bool> {
        self.update_column(id, "description", description)
    }

    fn delete(&self, id: ActivityId) -> RepoResult<bool> {
        let changed = self.conn.execute(
            "UPDATE activity SET deleted_at = ?1 WHERE id = ?2;",
            params![datetime_to_db(now_stamp()), id],
        )?;
        Ok(changed > 0)
    }

    fn delete_many(&self, ids: &[ActivityId]) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let now = datetime_to_db(now_stamp());
        let mut count = 0;

        for id in ids {
            count += tx.execute(
                "UPDATE activity SET deleted_at = ?1 WHERE id = ?2;",
                params![now, id],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }

    fn total_duration_by_date(&self, date: NaiveDate) -> RepoResult<Duration> {
        self.sum_durations(
            "SELECT started_at, ended_at FROM activity
             WHERE date(started_at) = ?1
               AND ended_at IS NOT NULL
               AND deleted_at IS NULL;",
            &[&date_to_db(date) as &dyn ToSql],
        )
    }

    fn total_duration_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Duration> {
        self.sum_durations(
            "SELECT started_at, ended_at FROM activity
             WHERE date(started_at) >= ?1
               AND date(started_at) <= ?2
               AND ended_at IS NOT NULL
               AND deleted_at IS NULL;",
            &[&date_to_db(start_date) as &dyn ToSql, &date_to_db(end_date)],
        )
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        started_at: required_datetime_column(row.get("started_at")?, "activity", "started_at")?,
        ended_at: datetime_column(row.get("ended_at")?, "activity", "ended_at")?,
        description: row.get("description")?,
        created_at: required_datetime_column(row.get("created_at")?, "activity", "created_at")?,
        updated_at: required_datetime_column(row.get("updated_at")?, "activity", "updated_at")?,
        deleted_at: datetime_column(row.get("deleted_at")?, "activity", "deleted_at")?,
    })
}

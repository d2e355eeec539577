//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for the three record
//!   kinds.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every read path carries an explicit `deleted_at IS NULL` predicate;
//!   deleted-row exclusion is never left to implicit scoping.
//! - "Not found" and "already deleted" surface as `None`/`false`/empty,
//!   never as an error variant.
//! - Non-delete mutations guard on `deleted_at IS NULL` inside the UPDATE
//!   itself, so a tombstoned row is rejected without touching `updated_at`.

pub mod activity_repo;
pub mod job_apply_repo;
pub mod job_posting_repo;

use crate::db::DbError;
use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error type shared by all three repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn datetime_to_db(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub(crate) fn date_to_db(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DATETIME_FORMAT).ok()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Reads a datetime TEXT column, mapping malformed content to `InvalidData`.
pub(crate) fn datetime_column(
    value: Option<String>,
    table: &str,
    column: &str,
) -> RepoResult<Option<NaiveDateTime>> {
    match value {
        Some(text) => parse_datetime(&text)
            .map(Some)
            .ok_or_else(|| invalid_column(&text, table, column)),
        None => Ok(None),
    }
}

/// Reads a date TEXT column, mapping malformed content to `InvalidData`.
pub(crate) fn date_column(
    value: Option<String>,
    table: &str,
    column: &str,
) -> RepoResult<Option<NaiveDate>> {
    match value {
        Some(text) => parse_date(&text)
            .map(Some)
            .ok_or_else(|| invalid_column(&text, table, column)),
        None => Ok(None),
    }
}

/// Reads a NOT NULL datetime TEXT column.
pub(crate) fn required_datetime_column(
    value: String,
    table: &str,
    column: &str,
) -> RepoResult<NaiveDateTime> {
    parse_datetime(&value).ok_or_else(|| invalid_column(&value, table, column))
}

fn invalid_column(text: &str, table: &str, column: &str) -> RepoError {
    RepoError::InvalidData(format!("invalid value `{text}` in {table}.{column}"))
}

//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Translate between fleet records and SQL rows.
//! - Turn storage outcomes into semantic errors (`NotFound`,
//!   `AlreadyExists`, `AlreadyAssigned`).
//!
//! # Invariants
//! - Inserts are single statements; natural-key collisions are detected by
//!   UNIQUE constraints, never by a separate read.
//! - Updates and deletes report `NotFound` when no row matched the id.
//! - Adding a record drops association rows still keyed by its id, in the
//!   same transaction as the insert, so a reused id starts unassigned.

pub mod bus_repo;
pub mod bus_stop_repo;
pub mod driver_repo;
pub mod route_repo;

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::EntityKind;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, Params, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by every fleet repository.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No record of this kind matched the lookup key.
    NotFound(EntityKind),
    /// A record with the same id or natural key already exists.
    AlreadyExists(EntityKind),
    /// The association row between a route and this kind already exists.
    AlreadyAssigned(EntityKind),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(kind) => write!(f, "{kind} not found"),
            Self::AlreadyExists(kind) => write!(f, "{kind} already exists"),
            Self::AlreadyAssigned(kind) => write!(f, "{kind} is already assigned to route"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "repository requires table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Maps a constraint violation to `conflict`, passing other errors through.
pub(crate) fn translate_conflict(err: rusqlite::Error, conflict: RepoError) -> RepoError {
    let err = DbError::from(err);
    if err.is_unique_violation() {
        conflict
    } else {
        RepoError::Db(err)
    }
}

/// Checks that `conn` was migrated and carries the tables a repository needs.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(*table));
        }
    }

    Ok(())
}

/// Runs `write` inside one immediate transaction on `conn`.
pub(crate) fn in_immediate_tx<T>(
    conn: &Connection,
    write: impl FnOnce(&Connection) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = write(&*tx)?;
    tx.commit()?;
    Ok(value)
}

pub(crate) fn query_one<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    kind: EntityKind,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<T> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => parse(row),
        None => Err(RepoError::NotFound(kind)),
    }
}

pub(crate) fn query_all<T, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

/// Storage form for timestamps: RFC 3339 in UTC, sub-second digits kept.
pub(crate) fn timestamp_to_db(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub(crate) fn parse_timestamp(
    row: &Row<'_>,
    column: &'static str,
    table: &'static str,
) -> RepoResult<DateTime<Utc>> {
    let text: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| RepoError::InvalidData(format!("invalid timestamp `{text}` in {table}.{column}")))
}

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Own the single-row transaction discipline shared by every write path.
//!
//! # Invariants
//! - Every mutation runs inside an IMMEDIATE transaction: execute, check
//!   affected rows, re-fetch the canonical row, commit. Any error path drops
//!   the transaction, which rolls it back — a transaction is never left open.
//! - Zero affected rows is a failure, never silent success.
//! - Required fields are validated by callers before a transaction opens.

use crate::db::DbError;
use rusqlite::{Connection, Params, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod categoria_repo;
pub mod compra_repo;
pub mod producto_repo;
pub mod usuario_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error (includes constraint violations).
    Db(DbError),
    /// Mutation matched no row for the given id.
    NotFound { table: &'static str, id: i64 },
    /// Statement reported zero affected rows outside the by-id case.
    NoRowsAffected {
        table: &'static str,
        operation: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row in {table} with id {id}"),
            Self::NoRowsAffected { table, operation } => {
                write!(f, "{operation} on {table} affected no rows")
            }
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

/// Runs one parameterized insert inside an IMMEDIATE transaction.
///
/// Verifies the statement affected a row, re-fetches the canonical row via
/// the store's last-insert identity, then commits. Every failure before
/// `commit` rolls back on drop.
pub(crate) fn insert_row<T, P: Params>(
    conn: &mut Connection,
    table: &'static str,
    sql: &str,
    params: P,
    fetch: impl FnOnce(&Transaction<'_>, i64) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let changed = tx.execute(sql, params)?;
    if changed == 0 {
        return Err(RepoError::NoRowsAffected {
            table,
            operation: "insert",
        });
    }

    let id = tx.last_insert_rowid();
    let row = fetch(&tx, id)?;
    tx.commit()?;
    Ok(row)
}

/// Runs one parameterized by-id update inside an IMMEDIATE transaction.
///
/// Zero affected rows (no such id) is reported as `NotFound` after rollback.
pub(crate) fn update_row<T, P: Params>(
    conn: &mut Connection,
    table: &'static str,
    id: i64,
    sql: &str,
    params: P,
    fetch: impl FnOnce(&Transaction<'_>, i64) -> RepoResult<T>,
) -> RepoResult<T> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let changed = tx.execute(sql, params)?;
    if changed == 0 {
        return Err(RepoError::NotFound { table, id });
    }

    let row = fetch(&tx, id)?;
    tx.commit()?;
    Ok(row)
}

/// Runs one parameterized by-id delete inside an IMMEDIATE transaction.
pub(crate) fn delete_row<P: Params>(
    conn: &mut Connection,
    table: &'static str,
    id: i64,
    sql: &str,
    params: P,
) -> RepoResult<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let changed = tx.execute(sql, params)?;
    if changed == 0 {
        return Err(RepoError::NotFound { table, id });
    }

    tx.commit()?;
    Ok(())
}

pub(crate) fn read_back_missing(table: &'static str, id: i64) -> RepoError {
    RepoError::InvalidData(format!("row {id} in {table} missing in post-write read-back"))
}

// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! SQLite backend, used to run tests against an in-memory database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use async_trait::async_trait;
use log::warn;
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool};
use std::str::FromStr;
use time::{Duration, OffsetDateTime};

/// Classifies an SQLite error.  SQLite reports constraint failures only in the message text.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => {
            DbError::ForeignKeyViolation
        }
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Opens a connection pool to the database at `conn_str`.
///
/// Foreign key enforcement is enabled on every connection.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let options =
        SqliteConnectOptions::from_str(conn_str).map_err(map_sqlx_error)?.foreign_keys(true);
    let pool = SqlitePool::connect_with(options).await.map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// Query executor for SQLite.
#[derive(Debug)]
pub enum SqliteExecutor {
    /// A connection checked out of the pool, outside of any transaction.
    PoolExec(PoolConnection<Sqlite>),

    /// A connection with an open transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl SqliteExecutor {
    /// Returns the raw connection to issue `sqlx` queries against.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            SqliteExecutor::PoolExec(conn) => &mut **conn,
            SqliteExecutor::TxExec(tx) => &mut **tx,
        }
    }

    /// Commits the open transaction.  Must only be reached through `TxExecutor::commit`.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            SqliteExecutor::PoolExec(_) => unreachable!("No transaction to commit"),
            SqliteExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Underlying pool.  For `:memory:` databases all its connections share one database.
    pool: SqlitePool,
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("SqliteDb dropped while its pool was still open; call close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(Executor::Sqlite(SqliteExecutor::PoolExec(conn)))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(SqliteExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Applies `schema`, a script with any number of statements.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(e.conn()).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Rebuilds a timestamp from the two integer columns it is stored in.
///
/// SQLite has no native timestamp type so we store timestamps as a pair of integers: the seconds
/// since the Unix epoch, which may be negative, and the non-negative nanoseconds within that
/// second.
pub fn build_timestamp(timestamp_sec: i64, timestamp_nsec: i64) -> DbResult<OffsetDateTime> {
    if !(0..1_000_000_000).contains(&timestamp_nsec) {
        return Err(DbError::DataIntegrityError(format!(
            "Timestamp nanoseconds out of range: sec={}, nsec={}",
            timestamp_sec, timestamp_nsec
        )));
    }

    match OffsetDateTime::from_unix_timestamp(timestamp_sec) {
        Ok(timestamp) => Ok(timestamp + Duration::nanoseconds(timestamp_nsec)),
        Err(e) => Err(DbError::DataIntegrityError(format!("Invalid timestamp: {}", e))),
    }
}

/// Splits `ts` into the two integer columns used to store it.  Inverse of `build_timestamp`.
pub fn unpack_timestamp(ts: OffsetDateTime) -> (i64, i64) {
    (ts.unix_timestamp(), i64::from(ts.nanosecond()))
}

/// Helpers to run tests against SQLite.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Opens a fresh, empty in-memory database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

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

//! Database access shared by all services.
//!
//! Two backends are supported: PostgreSQL, which services run against in production, and SQLite,
//! which exists so that tests can run against an in-memory database without any setup.
//!
//! Services implement their persistence layer as free functions that take an `&mut Executor`,
//! destructure it, and issue the backend-specific query through the connection returned by the
//! backend executor's `conn` method.

use crate::model::ModelError;
use async_trait::async_trait;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Errors returned by the persistence layer.
///
/// Failures that callers are expected to react to get their own variant.  Anything else ends up
/// in `BackendError`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// A write collided with a unique key, such as a duplicate username.
    #[error("Already exists")]
    AlreadyExists,

    /// Any database failure without a more specific variant.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Stored data could not be converted back into model types.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a write was rejected because it would break a reference between two
    /// tables, such as deleting a row that other rows still point to.
    #[error("Foreign key constraint violated")]
    ForeignKeyViolation,

    /// The row targeted by a lookup or by a keyed write does not exist.
    #[error("Entity not found")]
    NotFound,

    /// The database cannot take more work right now, usually because the connection limit was
    /// reached.
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for persistence operations.
pub type DbResult<T> = Result<T, DbError>;

/// Handle to run queries against whichever backend is configured.
///
/// Queries differ in syntax between backends (placeholders, functions), so callers match on the
/// variant and write one query per backend.  The wrapped executor may be a plain pooled
/// connection or an open transaction; callers do not need to care which.
pub enum Executor {
    /// Executor for the PostgreSQL backend.
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresExecutor),

    /// Executor for the SQLite backend.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// An `Executor` bound to an open transaction.
///
/// Dropping this without calling `commit` rolls the transaction back, so any early return via `?`
/// discards partial work.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor to issue queries within the transaction.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Makes all writes issued through this transaction durable.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(e) => e.commit().await,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(e) => e.commit().await,
        }
    }
}

/// A connection pool to one of the supported backends.
#[async_trait]
pub trait Db {
    /// Takes a connection from the pool for queries that do not need a transaction.
    async fn ex(&self) -> DbResult<Executor>;

    /// Opens a transaction.  Nothing is persisted unless the caller commits it.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes all connections to the database.
    async fn close(&self);
}

/// Macros to run the same test body against every backend.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Defines a `#[tokio::test]` called `name` that runs `module::name` on the database returned
    /// by `setup`, optionally tagged with an `extra` attribute such as `#[ignore]`.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Defines one test per `name`, each running `module::name` on a fresh database obtained from
    /// `setup`.
    ///
    /// `setup` must evaluate to an `Arc<dyn Db + Send + Sync>` with the schema already in place.
    /// The optional leading `extra` attribute is applied to every generated test.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}

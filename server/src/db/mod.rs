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

//! Database abstraction in terms of the operations needed by the rental service.
//!
//! Every operation is a free function that takes the `Executor` to run on, which can be backed by
//! a connection or by an open transaction.  Operations that target a single entity by id fail
//! with `DbError::NotFound` when the entity does not exist.

#[cfg(feature = "postgres")]
use stayhub_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use stayhub_core::db::sqlite;
use stayhub_core::db::{DbError, DbResult, Executor};

mod amenities;
pub use amenities::*;
mod bookings;
pub use bookings::*;
mod hosts;
pub use hosts::*;
mod properties;
pub use properties::*;
mod reviews;
pub use reviews::*;
mod users;
pub use users::*;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Checks that a write against a single row, identified by its primary key, touched exactly one
/// row.
fn expect_one_row(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Operation affected more than one row".to_owned())),
    }
}

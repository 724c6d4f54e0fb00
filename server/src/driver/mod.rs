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

//! Business logic for the rental service.
//!
//! Every operation that touches more than one row runs inside a single transaction, so checks on
//! referenced entities and cascading deletes either apply fully or not at all.

use stayhub_authn::driver::TokenAuthority;
use stayhub_core::db::{Db, DbError};
use stayhub_core::driver::DriverError;
use std::sync::Arc;

mod amenities;
mod bookings;
mod hosts;
mod login;
mod properties;
mod reviews;
#[cfg(test)]
pub(crate) mod testutils;
mod users;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Issuer and verifier of access tokens.
    authority: TokenAuthority,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, authority: TokenAuthority) -> Self {
        Self { db, authority }
    }

    /// Returns the token authority used by this driver.
    pub(crate) fn authority(&self) -> &TokenAuthority {
        &self.authority
    }
}

/// Returns a function that converts a `DbError` into a `DriverError`, reporting missing rows as
/// a missing `entity`.
fn not_found(entity: &'static str) -> impl Fn(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::NotFound(format!("{} not found", entity)),
        e => DriverError::from(e),
    }
}

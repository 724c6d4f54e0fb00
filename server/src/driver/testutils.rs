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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use stayhub_authn::driver::{AuthnOptions, TokenAuthority};
use stayhub_core::clocks::testutils::SettableClock;
use stayhub_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::datetime;

/// Secret used to sign tokens in tests.
pub(crate) const TEST_SECRET: &str = "test-secret";

/// Realm used by the token authority in tests.
pub(crate) const TEST_REALM: &str = "test-realm";

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the token authority.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against an in-memory database, signing tokens with `TEST_SECRET`.
    pub(crate) async fn setup() -> Self {
        Self::setup_with_secret(Some(TEST_SECRET)).await
    }

    /// Initializes the driver against an in-memory database, signing tokens with `secret`.
    pub(crate) async fn setup_with_secret(secret: Option<&str>) -> Self {
        let db = db::testutils::setup().await;
        let clock = Arc::from(SettableClock::new(datetime!(2024-03-10 08:00:00 UTC)));
        let authority =
            TokenAuthority::new(secret, clock.clone(), TEST_REALM, AuthnOptions::default());
        let driver = Driver::new(db.clone(), authority);
        Self { db, clock, driver }
    }

    /// Returns a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns the clock used by the token authority.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Returns a copy of the driver.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }
}

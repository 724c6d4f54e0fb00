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

//! Test utilities for the REST API.

use crate::db;
use crate::driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use stayhub_authn::model::{AccessToken, Claims};
use stayhub_core::clocks::testutils::SettableClock;
use stayhub_core::db::{DbResult, Executor};

/// State of a running test.
pub(crate) struct TestContext {
    /// Context of the driver that backs the app.
    driver: driver::testutils::TestContext,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Initializes the app against an in-memory database with a configured token secret.
    pub(crate) async fn setup() -> Self {
        Self::setup_with_secret(Some(driver::testutils::TEST_SECRET)).await
    }

    /// Initializes the app against an in-memory database, signing tokens with `secret`.
    pub(crate) async fn setup_with_secret(secret: Option<&str>) -> Self {
        let driver = driver::testutils::TestContext::setup_with_secret(secret).await;
        let app = app(driver.driver());
        Self { driver, app }
    }

    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    pub(crate) fn clock(&self) -> &SettableClock {
        self.driver.clock()
    }

    /// Issues a valid token for a caller that does not need to exist in the database.
    pub(crate) fn token(&self) -> AccessToken {
        self.driver.driver().authority().issue("test-user-id", "test-user").unwrap()
    }

    /// Verifies a token with the same authority the app uses.
    pub(crate) fn verify(&self, token: &AccessToken) -> Claims {
        self.driver.driver().authority().verify(token).unwrap()
    }

    pub(crate) async fn ex(&self) -> Executor {
        self.driver.ex().await
    }

    pub(crate) async fn create_user(&self, username: &str) -> User {
        db::testutils::create_simple_user(&mut self.ex().await, username).await
    }

    pub(crate) async fn get_user(&self, id: &UserId) -> DbResult<User> {
        db::get_user(&mut self.ex().await, id).await
    }

    pub(crate) async fn create_host(&self, username: &str) -> Host {
        db::testutils::create_simple_host(&mut self.ex().await, username).await
    }

    pub(crate) async fn get_host(&self, id: &HostId) -> DbResult<Host> {
        db::get_host(&mut self.ex().await, id).await
    }

    pub(crate) async fn create_amenity(&self, name: &str) -> Amenity {
        let amenity = NewAmenity { name: name.to_owned() };
        db::create_amenity(&mut self.ex().await, &amenity).await.unwrap()
    }

    pub(crate) async fn get_amenity(&self, id: &AmenityId) -> DbResult<Amenity> {
        db::get_amenity(&mut self.ex().await, id).await
    }

    pub(crate) async fn create_property(
        &self,
        host_id: &HostId,
        title: &str,
        location: &str,
        price_per_night: f64,
        amenity_ids: Vec<AmenityId>,
    ) -> Property {
        db::testutils::create_simple_property(
            &mut self.ex().await,
            host_id,
            title,
            location,
            price_per_night,
            amenity_ids,
        )
        .await
    }

    pub(crate) async fn get_property(&self, id: &PropertyId) -> DbResult<Property> {
        db::get_property(&mut self.ex().await, id).await
    }

    pub(crate) async fn create_booking(
        &self,
        user_id: &UserId,
        property_id: &PropertyId,
    ) -> Booking {
        db::testutils::create_simple_booking(&mut self.ex().await, user_id, property_id).await
    }

    pub(crate) async fn get_booking(&self, id: &BookingId) -> DbResult<Booking> {
        db::get_booking(&mut self.ex().await, id).await
    }

    pub(crate) async fn create_review(&self, user_id: &UserId, property_id: &PropertyId) -> Review {
        db::testutils::create_simple_review(&mut self.ex().await, user_id, property_id).await
    }

    pub(crate) async fn get_review(&self, id: &ReviewId) -> DbResult<Review> {
        db::get_review(&mut self.ex().await, id).await
    }

    /// Creates a host with one property, and a user, which is what most tests about bookings and
    /// reviews need.
    pub(crate) async fn create_stay(&self) -> (User, Property) {
        let user = self.create_user("guest").await;
        let host = self.create_host("owner").await;
        let property = self.create_property(&host.id, "Cabin", "Woods", 80.0, vec![]).await;
        (user, property)
    }
}

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

//! REST interface for the rental service.
//!
//! Reads are public.  Writes require a valid access token, which is checked before the request
//! body is even looked at.

use crate::driver::Driver;
use crate::model::parse_timestamp;
use axum::Router;
use axum::extract::FromRef;
use log::debug;
use serde::{Deserialize, Serialize};
use stayhub_authn::driver::TokenAuthority;
use stayhub_core::rest::{RestError, RestResult, log_request_duration};
use time::OffsetDateTime;

mod amenities_get;
mod amenities_post;
mod amenity_delete;
mod amenity_get;
mod amenity_put;
mod booking_delete;
mod booking_get;
mod booking_put;
mod bookings_get;
mod bookings_post;
mod host_delete;
mod host_get;
mod host_put;
mod hosts_get;
mod hosts_post;
mod login_post;
mod properties_get;
mod properties_post;
mod property_delete;
mod property_get;
mod property_put;
mod review_delete;
mod review_get;
mod review_put;
mod reviews_get;
mod reviews_post;
#[cfg(test)]
mod testutils;
mod user_delete;
mod user_get;
mod user_put;
mod users_get;
mod users_post;

/// Response to operations that only report their outcome, such as deletions.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct MessageResponse {
    /// Human-readable description of the outcome.
    pub(crate) message: String,
}

/// Message returned when a booking carries dates that cannot be parsed.
const INVALID_DATES_MESSAGE: &str =
    "Invalid checkinDate or checkoutDate. Please provide valid dates.";

/// Parses a check-in or check-out date received from a client.
fn parse_booking_date(raw: &str) -> RestResult<OffsetDateTime> {
    parse_timestamp(raw).map_err(|e| {
        debug!("Rejecting booking date: {}", e);
        RestError::InvalidRequest(INVALID_DATES_MESSAGE.to_owned())
    })
}

impl FromRef<Driver> for TokenAuthority {
    fn from_ref(driver: &Driver) -> Self {
        driver.authority().clone()
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/login", post(login_post::handler))
        .route("/users", get(users_get::handler).post(users_post::handler))
        .route(
            "/users/:id",
            get(user_get::handler).put(user_put::handler).delete(user_delete::handler),
        )
        .route("/hosts", get(hosts_get::handler).post(hosts_post::handler))
        .route(
            "/hosts/:id",
            get(host_get::handler).put(host_put::handler).delete(host_delete::handler),
        )
        .route("/properties", get(properties_get::handler).post(properties_post::handler))
        .route(
            "/properties/:id",
            get(property_get::handler).put(property_put::handler).delete(property_delete::handler),
        )
        .route("/amenities", get(amenities_get::handler).post(amenities_post::handler))
        .route(
            "/amenities/:id",
            get(amenity_get::handler).put(amenity_put::handler).delete(amenity_delete::handler),
        )
        .route("/bookings", get(bookings_get::handler).post(bookings_post::handler))
        .route(
            "/bookings/:id",
            get(booking_get::handler).put(booking_put::handler).delete(booking_delete::handler),
        )
        .route("/reviews", get(reviews_get::handler).post(reviews_post::handler))
        .route(
            "/reviews/:id",
            get(review_get::handler).put(review_put::handler).delete(review_delete::handler),
        )
        .layer(axum::middleware::from_fn(log_request_duration))
        .with_state(driver)
}

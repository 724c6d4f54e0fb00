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

//! API to create a booking.

use crate::driver::Driver;
use crate::model::{NewBooking, PropertyId, UserId, truthy};
use crate::rest::{INVALID_DATES_MESSAGE, parse_booking_date};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Number of guests of bookings that do not specify one.
const DEFAULT_NUMBER_OF_GUESTS: i32 = 1;

/// Message sent by the client to the server.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingRequest {
    /// Start of the stay, as an RFC 3339 timestamp or a plain date.  Required.
    #[serde(alias = "startDate")]
    checkin_date: Option<String>,

    /// End of the stay, as an RFC 3339 timestamp or a plain date.  Required.
    #[serde(alias = "endDate")]
    checkout_date: Option<String>,

    /// User making the booking.  Required.
    user_id: Option<UserId>,

    /// Property being booked.  Required.
    property_id: Option<PropertyId>,

    /// Number of guests.
    number_of_guests: Option<i32>,

    /// Total price of the stay.
    total_price: Option<f64>,

    /// Free-form status of the booking.
    booking_status: Option<String>,
}

impl TryFrom<BookingRequest> for NewBooking {
    type Error = RestError;

    fn try_from(request: BookingRequest) -> Result<Self, Self::Error> {
        let (Some(checkin_date), Some(checkout_date)) =
            (request.checkin_date, request.checkout_date)
        else {
            return Err(RestError::InvalidRequest(INVALID_DATES_MESSAGE.to_owned()));
        };
        let start_date = parse_booking_date(&checkin_date)?;
        let end_date = parse_booking_date(&checkout_date)?;

        let (Some(user_id), Some(property_id)) =
            (truthy(request.user_id), truthy(request.property_id))
        else {
            return Err(RestError::InvalidRequest("userId and propertyId are required.".to_owned()));
        };

        Ok(Self {
            start_date,
            end_date,
            user_id,
            property_id,
            number_of_guests: truthy(request.number_of_guests).unwrap_or(DEFAULT_NUMBER_OF_GUESTS),
            total_price: request.total_price,
            booking_status: truthy(request.booking_status),
        })
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<BookingRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let booking = NewBooking::try_from(request)?;
    let booking = driver.create_booking(booking).await?;
    Ok((http::StatusCode::CREATED, Json(booking)))
}

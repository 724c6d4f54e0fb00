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

//! API to modify an existing booking.

use crate::driver::Driver;
use crate::model::{BookingId, BookingUpdate, PropertyId, UserId, falsy_as_none, truthy};
use crate::rest::parse_booking_date;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message sent by the client to the server.  Falsy fields of any JSON type are ignored.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingUpdateRequest {
    /// New start of the stay.
    #[serde(alias = "startDate")]
    #[serde(default, deserialize_with = "falsy_as_none")]
    checkin_date: Option<String>,

    /// New end of the stay.
    #[serde(alias = "endDate")]
    #[serde(default, deserialize_with = "falsy_as_none")]
    checkout_date: Option<String>,

    /// New user that owns the booking.
    #[serde(default, deserialize_with = "falsy_as_none")]
    user_id: Option<UserId>,

    /// New property being booked.
    #[serde(default, deserialize_with = "falsy_as_none")]
    property_id: Option<PropertyId>,

    /// New number of guests.
    #[serde(default, deserialize_with = "falsy_as_none")]
    number_of_guests: Option<i32>,

    /// New total price.
    #[serde(default, deserialize_with = "falsy_as_none")]
    total_price: Option<f64>,

    /// New status.
    #[serde(default, deserialize_with = "falsy_as_none")]
    booking_status: Option<String>,
}

impl TryFrom<BookingUpdateRequest> for BookingUpdate {
    type Error = RestError;

    fn try_from(request: BookingUpdateRequest) -> Result<Self, Self::Error> {
        let start_date = truthy(request.checkin_date).map(|s| parse_booking_date(&s)).transpose()?;
        let end_date = truthy(request.checkout_date).map(|s| parse_booking_date(&s)).transpose()?;
        Ok(Self {
            start_date,
            end_date,
            user_id: truthy(request.user_id),
            property_id: truthy(request.property_id),
            number_of_guests: truthy(request.number_of_guests),
            total_price: truthy(request.total_price),
            booking_status: truthy(request.booking_status),
        })
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BookingId>,
    _: Authenticated,
    JsonBody(request): JsonBody<BookingUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let update = BookingUpdate::try_from(request)?;
    let booking = driver.update_booking(&id, update).await?;
    Ok(Json(booking))
}

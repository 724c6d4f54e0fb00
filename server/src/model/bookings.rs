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

//! The `Booking` entity.

use crate::model::{BookingId, PropertyId, UserId};
use serde::{Deserialize, Serialize};
use stayhub_core::model::{ModelError, ModelResult};
use time::OffsetDateTime;

/// Ensures that the number of guests, if any, is positive.
fn ensure_positive_guests(number_of_guests: Option<i32>) -> ModelResult<()> {
    match number_of_guests {
        Some(n) if n <= 0 => {
            Err(ModelError("numberOfGuests must be a positive integer.".to_owned()))
        }
        _ => Ok(()),
    }
}

/// A reservation of a property by a user.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Identifier of the booking.
    pub id: BookingId,

    /// Check-in time.
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,

    /// Check-out time.
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,

    /// Guest that made the booking.
    pub user_id: UserId,

    /// Booked property.
    pub property_id: PropertyId,

    /// Number of guests.
    pub number_of_guests: i32,

    /// Total price of the stay.
    pub total_price: Option<f64>,

    /// Free-form status, such as "confirmed".
    pub booking_status: Option<String>,
}

/// Data to create a booking.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBooking {
    /// Check-in time.
    pub start_date: OffsetDateTime,

    /// Check-out time.
    pub end_date: OffsetDateTime,

    /// Guest making the booking, which must exist.
    pub user_id: UserId,

    /// Property to book, which must exist.
    pub property_id: PropertyId,

    /// Number of guests.
    pub number_of_guests: i32,

    /// Total price of the stay.
    pub total_price: Option<f64>,

    /// Free-form status.
    pub booking_status: Option<String>,
}

impl NewBooking {
    /// Checks that the number of guests is positive.
    pub fn validate(&self) -> ModelResult<()> {
        ensure_positive_guests(Some(self.number_of_guests))
    }
}

/// Partial modification of a booking.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingUpdate {
    /// New check-in time.
    pub start_date: Option<OffsetDateTime>,

    /// New check-out time.
    pub end_date: Option<OffsetDateTime>,

    /// New guest, which must exist.
    pub user_id: Option<UserId>,

    /// New property, which must exist.
    pub property_id: Option<PropertyId>,

    /// New number of guests.
    pub number_of_guests: Option<i32>,

    /// New total price.
    pub total_price: Option<f64>,

    /// New status.
    pub booking_status: Option<String>,
}

impl BookingUpdate {
    /// Checks that the number of guests, if present, is positive.
    pub fn validate(&self) -> ModelResult<()> {
        ensure_positive_guests(self.number_of_guests)
    }
}

/// Criteria to select bookings in listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingFilter {
    /// Guest that made the bookings.
    pub user_id: Option<UserId>,
}

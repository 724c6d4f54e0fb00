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

//! Operations on bookings.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{Booking, BookingFilter, BookingId, BookingUpdate, NewBooking};
use stayhub_core::driver::DriverResult;

impl Driver {
    /// Gets all bookings that match `filter`.
    pub(crate) async fn list_bookings(self, filter: &BookingFilter) -> DriverResult<Vec<Booking>> {
        let bookings = db::list_bookings(&mut self.db.ex().await?, filter).await?;
        Ok(bookings)
    }

    /// Gets the booking identified by `id`.
    pub(crate) async fn get_booking(self, id: &BookingId) -> DriverResult<Booking> {
        db::get_booking(&mut self.db.ex().await?, id).await.map_err(not_found("Booking"))
    }

    /// Creates a new booking after checking that its user and property exist.
    pub(crate) async fn create_booking(self, booking: NewBooking) -> DriverResult<Booking> {
        booking.validate()?;

        let mut tx = self.db.begin().await?;
        db::get_user(tx.ex(), &booking.user_id).await.map_err(not_found("User"))?;
        db::get_property(tx.ex(), &booking.property_id).await.map_err(not_found("Property"))?;
        let booking = db::create_booking(tx.ex(), &booking).await?;
        tx.commit().await?;
        Ok(booking)
    }

    /// Applies `update` to the booking identified by `id` and returns the modified booking.
    pub(crate) async fn update_booking(
        self,
        id: &BookingId,
        update: BookingUpdate,
    ) -> DriverResult<Booking> {
        update.validate()?;

        let mut tx = self.db.begin().await?;
        db::get_booking(tx.ex(), id).await.map_err(not_found("Booking"))?;
        if let Some(user_id) = update.user_id.as_ref() {
            db::get_user(tx.ex(), user_id).await.map_err(not_found("User"))?;
        }
        if let Some(property_id) = update.property_id.as_ref() {
            db::get_property(tx.ex(), property_id).await.map_err(not_found("Property"))?;
        }
        db::update_booking(tx.ex(), id, &update).await.map_err(not_found("Booking"))?;
        let booking = db::get_booking(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(booking)
    }

    /// Deletes the booking identified by `id` and returns a message describing the deletion.
    pub(crate) async fn delete_booking(self, id: &BookingId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        db::delete_booking(tx.ex(), id).await.map_err(not_found("Booking"))?;
        tx.commit().await?;
        Ok(format!("Booking {} deleted successfully", id))
    }
}

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

//! Persistence of bookings.

use crate::db::expect_one_row;
use crate::model::{
    Booking, BookingFilter, BookingId, BookingUpdate, NewBooking, PropertyId, UserId,
};
use futures::TryStreamExt;
#[cfg(feature = "postgres")]
use stayhub_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use stayhub_core::db::sqlite;
use stayhub_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
#[cfg(feature = "postgres")]
use time::OffsetDateTime;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Booking {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let start_date: OffsetDateTime =
            row.try_get("start_date").map_err(postgres::map_sqlx_error)?;
        let end_date: OffsetDateTime = row.try_get("end_date").map_err(postgres::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let property_id: String = row.try_get("property_id").map_err(postgres::map_sqlx_error)?;
        let number_of_guests: i32 =
            row.try_get("number_of_guests").map_err(postgres::map_sqlx_error)?;
        let total_price: Option<f64> =
            row.try_get("total_price").map_err(postgres::map_sqlx_error)?;
        let booking_status: Option<String> =
            row.try_get("booking_status").map_err(postgres::map_sqlx_error)?;

        Ok(Booking {
            id: BookingId::new(id),
            start_date,
            end_date,
            user_id: UserId::new(user_id),
            property_id: PropertyId::new(property_id),
            number_of_guests,
            total_price,
            booking_status,
        })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Booking {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let start_date_secs: i64 = row.try_get("start_date_secs").map_err(sqlite::map_sqlx_error)?;
        let start_date_nsecs: i64 =
            row.try_get("start_date_nsecs").map_err(sqlite::map_sqlx_error)?;
        let end_date_secs: i64 = row.try_get("end_date_secs").map_err(sqlite::map_sqlx_error)?;
        let end_date_nsecs: i64 = row.try_get("end_date_nsecs").map_err(sqlite::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let property_id: String = row.try_get("property_id").map_err(sqlite::map_sqlx_error)?;
        let number_of_guests: i32 =
            row.try_get("number_of_guests").map_err(sqlite::map_sqlx_error)?;
        let total_price: Option<f64> = row.try_get("total_price").map_err(sqlite::map_sqlx_error)?;
        let booking_status: Option<String> =
            row.try_get("booking_status").map_err(sqlite::map_sqlx_error)?;

        Ok(Booking {
            id: BookingId::new(id),
            start_date: sqlite::build_timestamp(start_date_secs, start_date_nsecs)?,
            end_date: sqlite::build_timestamp(end_date_secs, end_date_nsecs)?,
            user_id: UserId::new(user_id),
            property_id: PropertyId::new(property_id),
            number_of_guests,
            total_price,
            booking_status,
        })
    }
}

/// Creates a new booking and returns it.
pub async fn create_booking(ex: &mut Executor, booking: &NewBooking) -> DbResult<Booking> {
    let id = BookingId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO bookings
                    (id, start_date, end_date, user_id, property_id, number_of_guests,
                    total_price, booking_status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(booking.start_date)
                .bind(booking.end_date)
                .bind(booking.user_id.as_str())
                .bind(booking.property_id.as_str())
                .bind(booking.number_of_guests)
                .bind(booking.total_price)
                .bind(booking.booking_status.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (start_date_secs, start_date_nsecs) = sqlite::unpack_timestamp(booking.start_date);
            let (end_date_secs, end_date_nsecs) = sqlite::unpack_timestamp(booking.end_date);

            let query_str = "
                INSERT INTO bookings
                    (id, start_date_secs, start_date_nsecs, end_date_secs, end_date_nsecs,
                    user_id, property_id, number_of_guests, total_price, booking_status)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(start_date_secs)
                .bind(start_date_nsecs)
                .bind(end_date_secs)
                .bind(end_date_nsecs)
                .bind(booking.user_id.as_str())
                .bind(booking.property_id.as_str())
                .bind(booking.number_of_guests)
                .bind(booking.total_price)
                .bind(booking.booking_status.as_deref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)?;

    Ok(Booking {
        id,
        start_date: booking.start_date,
        end_date: booking.end_date,
        user_id: booking.user_id.clone(),
        property_id: booking.property_id.clone(),
        number_of_guests: booking.number_of_guests,
        total_price: booking.total_price,
        booking_status: booking.booking_status.clone(),
    })
}

/// Gets the booking identified by `id`.
pub async fn get_booking(ex: &mut Executor, id: &BookingId) -> DbResult<Booking> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM bookings WHERE id = $1";
            let raw_booking = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Booking::try_from(raw_booking)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM bookings WHERE id = ?";
            let raw_booking = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Booking::try_from(raw_booking)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all bookings that match `filter`, sorted by check-in time.
pub async fn list_bookings(ex: &mut Executor, filter: &BookingFilter) -> DbResult<Vec<Booking>> {
    let user_id = filter.user_id.as_ref().map(UserId::as_str);

    let mut bookings = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM bookings
                WHERE $1::TEXT IS NULL OR user_id = $1
                ORDER BY start_date, id
            ";
            let mut rows = sqlx::query(query_str).bind(user_id).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                bookings.push(Booking::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM bookings
                WHERE ?1 IS NULL OR user_id = ?1
                ORDER BY start_date_secs, start_date_nsecs, id
            ";
            let mut rows = sqlx::query(query_str).bind(user_id).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                bookings.push(Booking::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(bookings)
}

/// Modifies the booking identified by `id` with the fields present in `update`.
pub async fn update_booking(
    ex: &mut Executor,
    id: &BookingId,
    update: &BookingUpdate,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE bookings SET
                    start_date = COALESCE($2, start_date),
                    end_date = COALESCE($3, end_date),
                    user_id = COALESCE($4, user_id),
                    property_id = COALESCE($5, property_id),
                    number_of_guests = COALESCE($6, number_of_guests),
                    total_price = COALESCE($7, total_price),
                    booking_status = COALESCE($8, booking_status)
                WHERE id = $1
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.start_date)
                .bind(update.end_date)
                .bind(update.user_id.as_ref().map(UserId::as_str))
                .bind(update.property_id.as_ref().map(PropertyId::as_str))
                .bind(update.number_of_guests)
                .bind(update.total_price)
                .bind(update.booking_status.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (start_date_secs, start_date_nsecs) = match update.start_date {
                Some(ts) => {
                    let (secs, nsecs) = sqlite::unpack_timestamp(ts);
                    (Some(secs), Some(nsecs))
                }
                None => (None, None),
            };
            let (end_date_secs, end_date_nsecs) = match update.end_date {
                Some(ts) => {
                    let (secs, nsecs) = sqlite::unpack_timestamp(ts);
                    (Some(secs), Some(nsecs))
                }
                None => (None, None),
            };

            let query_str = "
                UPDATE bookings SET
                    start_date_secs = COALESCE(?, start_date_secs),
                    start_date_nsecs = COALESCE(?, start_date_nsecs),
                    end_date_secs = COALESCE(?, end_date_secs),
                    end_date_nsecs = COALESCE(?, end_date_nsecs),
                    user_id = COALESCE(?, user_id),
                    property_id = COALESCE(?, property_id),
                    number_of_guests = COALESCE(?, number_of_guests),
                    total_price = COALESCE(?, total_price),
                    booking_status = COALESCE(?, booking_status)
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(start_date_secs)
                .bind(start_date_nsecs)
                .bind(end_date_secs)
                .bind(end_date_nsecs)
                .bind(update.user_id.as_ref().map(UserId::as_str))
                .bind(update.property_id.as_ref().map(PropertyId::as_str))
                .bind(update.number_of_guests)
                .bind(update.total_price)
                .bind(update.booking_status.as_deref())
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)
}

/// Deletes the booking identified by `id`.
pub async fn delete_booking(ex: &mut Executor, id: &BookingId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM bookings WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM bookings WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)
}

/// Deletes all bookings of the property `property_id` and returns how many there were.
pub async fn delete_bookings_by_property(
    ex: &mut Executor,
    property_id: &PropertyId,
) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM bookings WHERE property_id = $1";
            let done = sqlx::query(query_str)
                .bind(property_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM bookings WHERE property_id = ?";
            let done = sqlx::query(query_str)
                .bind(property_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

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

//! Persistence of properties and of their links to amenities.

use crate::db::expect_one_row;
use crate::model::{
    Amenity, AmenityId, HostId, NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate,
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

/// Converts a row into a property.  The amenities are loaded separately by the callers.
#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Property {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(postgres::map_sqlx_error)?;
        let price_per_night: f64 =
            row.try_get("price_per_night").map_err(postgres::map_sqlx_error)?;
        let bedroom_count: i32 = row.try_get("bedroom_count").map_err(postgres::map_sqlx_error)?;
        let bath_room_count: i32 =
            row.try_get("bath_room_count").map_err(postgres::map_sqlx_error)?;
        let max_guest_count: i32 =
            row.try_get("max_guest_count").map_err(postgres::map_sqlx_error)?;
        let rating: i32 = row.try_get("rating").map_err(postgres::map_sqlx_error)?;
        let host_id: String = row.try_get("host_id").map_err(postgres::map_sqlx_error)?;

        Ok(Property {
            id: PropertyId::new(id),
            title,
            description,
            location,
            price_per_night,
            bedroom_count,
            bath_room_count,
            max_guest_count,
            rating,
            host_id: HostId::new(host_id),
            amenities: vec![],
        })
    }
}

/// Converts a row into a property.  The amenities are loaded separately by the callers.
#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Property {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let location: String = row.try_get("location").map_err(sqlite::map_sqlx_error)?;
        let price_per_night: f64 =
            row.try_get("price_per_night").map_err(sqlite::map_sqlx_error)?;
        let bedroom_count: i32 = row.try_get("bedroom_count").map_err(sqlite::map_sqlx_error)?;
        let bath_room_count: i32 =
            row.try_get("bath_room_count").map_err(sqlite::map_sqlx_error)?;
        let max_guest_count: i32 =
            row.try_get("max_guest_count").map_err(sqlite::map_sqlx_error)?;
        let rating: i32 = row.try_get("rating").map_err(sqlite::map_sqlx_error)?;
        let host_id: String = row.try_get("host_id").map_err(sqlite::map_sqlx_error)?;

        Ok(Property {
            id: PropertyId::new(id),
            title,
            description,
            location,
            price_per_night,
            bedroom_count,
            bath_room_count,
            max_guest_count,
            rating,
            host_id: HostId::new(host_id),
            amenities: vec![],
        })
    }
}

/// Creates a new property and links it to the amenities listed in `property`.
///
/// Returns the stored property, including its amenities.
pub async fn create_property(ex: &mut Executor, property: &NewProperty) -> DbResult<Property> {
    let id = PropertyId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO properties
                    (id, title, description, location, price_per_night, bedroom_count,
                    bath_room_count, max_guest_count, rating, host_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&property.title)
                .bind(&property.description)
                .bind(&property.location)
                .bind(property.price_per_night)
                .bind(property.bedroom_count)
                .bind(property.bath_room_count)
                .bind(property.max_guest_count)
                .bind(property.rating)
                .bind(property.host_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO properties
                    (id, title, description, location, price_per_night, bedroom_count,
                    bath_room_count, max_guest_count, rating, host_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&property.title)
                .bind(&property.description)
                .bind(&property.location)
                .bind(property.price_per_night)
                .bind(property.bedroom_count)
                .bind(property.bath_room_count)
                .bind(property.max_guest_count)
                .bind(property.rating)
                .bind(property.host_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)?;

    set_property_amenities(ex, &id, &property.amenity_ids).await?;
    get_property(ex, &id).await
}

/// Gets the property identified by `id`, including its amenities.
pub async fn get_property(ex: &mut Executor, id: &PropertyId) -> DbResult<Property> {
    let mut property = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM properties WHERE id = $1";
            let raw_property = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Property::try_from(raw_property)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM properties WHERE id = ?";
            let raw_property = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Property::try_from(raw_property)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    property.amenities = get_property_amenities(ex, id).await?;
    Ok(property)
}

/// Gets all properties that match `filter`, including their amenities.
pub async fn list_properties(
    ex: &mut Executor,
    filter: &PropertyFilter,
) -> DbResult<Vec<Property>> {
    let amenities = if filter.amenities.is_empty() { None } else { Some(&filter.amenities) };

    let mut properties = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM properties
                WHERE
                    ($1::TEXT IS NULL OR strpos(lower(location), lower($1)) > 0)
                    AND ($2::DOUBLE PRECISION IS NULL OR price_per_night = $2)
                    AND ($3::TEXT[] IS NULL OR EXISTS (
                        SELECT 1 FROM property_amenities pa
                            JOIN amenities a ON a.id = pa.amenity_id
                        WHERE pa.property_id = properties.id AND a.name = ANY($3)))
                ORDER BY title, id
            ";
            let mut rows = sqlx::query(query_str)
                .bind(filter.location.as_deref())
                .bind(filter.price_per_night)
                .bind(amenities.cloned())
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                properties.push(Property::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let amenities = match amenities {
                Some(names) => Some(
                    serde_json::to_string(names)
                        .map_err(|e| DbError::BackendError(e.to_string()))?,
                ),
                None => None,
            };
            let query_str = "
                SELECT * FROM properties
                WHERE
                    (?1 IS NULL OR instr(lower(location), lower(?1)) > 0)
                    AND (?2 IS NULL OR price_per_night = ?2)
                    AND (?3 IS NULL OR EXISTS (
                        SELECT 1 FROM property_amenities pa
                            JOIN amenities a ON a.id = pa.amenity_id
                        WHERE pa.property_id = properties.id
                            AND a.name IN (SELECT value FROM json_each(?3))))
                ORDER BY title, id
            ";
            let mut rows = sqlx::query(query_str)
                .bind(filter.location.as_deref())
                .bind(filter.price_per_night)
                .bind(amenities)
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                properties.push(Property::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }

    for property in &mut properties {
        property.amenities = get_property_amenities(ex, &property.id).await?;
    }
    Ok(properties)
}

/// Modifies the property identified by `id` with the scalar fields present in `update`.
///
/// The amenity links are not touched here: use `set_property_amenities` to replace them.
pub async fn update_property(
    ex: &mut Executor,
    id: &PropertyId,
    update: &PropertyUpdate,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE properties SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    location = COALESCE($4, location),
                    price_per_night = COALESCE($5, price_per_night),
                    bedroom_count = COALESCE($6, bedroom_count),
                    bath_room_count = COALESCE($7, bath_room_count),
                    max_guest_count = COALESCE($8, max_guest_count),
                    rating = COALESCE($9, rating),
                    host_id = COALESCE($10, host_id)
                WHERE id = $1
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.title.as_deref())
                .bind(update.description.as_deref())
                .bind(update.location.as_deref())
                .bind(update.price_per_night)
                .bind(update.bedroom_count)
                .bind(update.bath_room_count)
                .bind(update.max_guest_count)
                .bind(update.rating)
                .bind(update.host_id.as_ref().map(HostId::as_str))
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE properties SET
                    title = COALESCE(?, title),
                    description = COALESCE(?, description),
                    location = COALESCE(?, location),
                    price_per_night = COALESCE(?, price_per_night),
                    bedroom_count = COALESCE(?, bedroom_count),
                    bath_room_count = COALESCE(?, bath_room_count),
                    max_guest_count = COALESCE(?, max_guest_count),
                    rating = COALESCE(?, rating),
                    host_id = COALESCE(?, host_id)
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(update.title.as_deref())
                .bind(update.description.as_deref())
                .bind(update.location.as_deref())
                .bind(update.price_per_night)
                .bind(update.bedroom_count)
                .bind(update.bath_room_count)
                .bind(update.max_guest_count)
                .bind(update.rating)
                .bind(update.host_id.as_ref().map(HostId::as_str))
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

/// Deletes the property identified by `id`.  Its amenity links go away with it.
pub async fn delete_property(ex: &mut Executor, id: &PropertyId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM properties WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM properties WHERE id = ?";
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

/// Deletes all properties owned by `host_id` and returns how many there were.
pub async fn delete_properties_by_host(ex: &mut Executor, host_id: &HostId) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM properties WHERE host_id = $1";
            let done = sqlx::query(query_str)
                .bind(host_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM properties WHERE host_id = ?";
            let done = sqlx::query(query_str)
                .bind(host_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Replaces the set of amenities linked to the property `id` with `amenity_ids`.
///
/// Duplicate entries in `amenity_ids` are collapsed.
pub async fn set_property_amenities(
    ex: &mut Executor,
    id: &PropertyId,
    amenity_ids: &[AmenityId],
) -> DbResult<()> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            sqlx::query("DELETE FROM property_amenities WHERE property_id = $1")
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;

            let query_str = "
                INSERT INTO property_amenities (property_id, amenity_id) VALUES ($1, $2)
                ON CONFLICT DO NOTHING
            ";
            for amenity_id in amenity_ids {
                sqlx::query(query_str)
                    .bind(id.as_str())
                    .bind(amenity_id.as_str())
                    .execute(ex.conn())
                    .await
                    .map_err(postgres::map_sqlx_error)?;
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            sqlx::query("DELETE FROM property_amenities WHERE property_id = ?")
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;

            let query_str = "
                INSERT INTO property_amenities (property_id, amenity_id) VALUES (?, ?)
                ON CONFLICT DO NOTHING
            ";
            for amenity_id in amenity_ids {
                sqlx::query(query_str)
                    .bind(id.as_str())
                    .bind(amenity_id.as_str())
                    .execute(ex.conn())
                    .await
                    .map_err(sqlite::map_sqlx_error)?;
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(())
}

/// Gets the amenities linked to the property `id`, sorted by name.
pub async fn get_property_amenities(ex: &mut Executor, id: &PropertyId) -> DbResult<Vec<Amenity>> {
    let mut amenities = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT a.id, a.name FROM amenities a
                    JOIN property_amenities pa ON pa.amenity_id = a.id
                WHERE pa.property_id = $1
                ORDER BY a.name, a.id
            ";
            let mut rows = sqlx::query(query_str).bind(id.as_str()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                amenities.push(Amenity::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT a.id, a.name FROM amenities a
                    JOIN property_amenities pa ON pa.amenity_id = a.id
                WHERE pa.property_id = ?
                ORDER BY a.name, a.id
            ";
            let mut rows = sqlx::query(query_str).bind(id.as_str()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                amenities.push(Amenity::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(amenities)
}

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

//! Persistence of amenities.

use crate::db::expect_one_row;
use crate::model::{Amenity, AmenityId, AmenityUpdate, NewAmenity};
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
impl TryFrom<PgRow> for Amenity {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        Ok(Amenity { id: AmenityId::new(id), name })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Amenity {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        Ok(Amenity { id: AmenityId::new(id), name })
    }
}

/// Creates a new amenity.
pub async fn create_amenity(ex: &mut Executor, amenity: &NewAmenity) -> DbResult<Amenity> {
    let id = AmenityId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO amenities (id, name) VALUES ($1, $2)";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&amenity.name)
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO amenities (id, name) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&amenity.name)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)?;

    Ok(Amenity { id, name: amenity.name.clone() })
}

/// Gets the amenity identified by `id`.
pub async fn get_amenity(ex: &mut Executor, id: &AmenityId) -> DbResult<Amenity> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM amenities WHERE id = $1";
            let raw_amenity = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Amenity::try_from(raw_amenity)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM amenities WHERE id = ?";
            let raw_amenity = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Amenity::try_from(raw_amenity)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all amenities sorted by name.
pub async fn list_amenities(ex: &mut Executor) -> DbResult<Vec<Amenity>> {
    let mut amenities = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM amenities ORDER BY name, id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                amenities.push(Amenity::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM amenities ORDER BY name, id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                amenities.push(Amenity::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(amenities)
}

/// Modifies the amenity identified by `id` with the fields present in `update`.
pub async fn update_amenity(
    ex: &mut Executor,
    id: &AmenityId,
    update: &AmenityUpdate,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE amenities SET name = COALESCE($2, name) WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.name.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE amenities SET name = COALESCE(?, name) WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(update.name.as_deref())
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

/// Deletes the amenity identified by `id`, unlinking it from any property that offers it.
pub async fn delete_amenity(ex: &mut Executor, id: &AmenityId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM amenities WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM amenities WHERE id = ?";
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

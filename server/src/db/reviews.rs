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

//! Persistence of reviews.

use crate::db::expect_one_row;
use crate::model::{NewReview, PropertyId, Review, ReviewId, ReviewUpdate, UserId};
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
impl TryFrom<PgRow> for Review {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let rating: i32 = row.try_get("rating").map_err(postgres::map_sqlx_error)?;
        let comment: String = row.try_get("comment").map_err(postgres::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        let property_id: String = row.try_get("property_id").map_err(postgres::map_sqlx_error)?;

        Ok(Review {
            id: ReviewId::new(id),
            rating,
            comment,
            user_id: UserId::new(user_id),
            property_id: PropertyId::new(property_id),
        })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Review {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let rating: i32 = row.try_get("rating").map_err(sqlite::map_sqlx_error)?;
        let comment: String = row.try_get("comment").map_err(sqlite::map_sqlx_error)?;
        let user_id: String = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        let property_id: String = row.try_get("property_id").map_err(sqlite::map_sqlx_error)?;

        Ok(Review {
            id: ReviewId::new(id),
            rating,
            comment,
            user_id: UserId::new(user_id),
            property_id: PropertyId::new(property_id),
        })
    }
}

/// Creates a new review and returns it.
pub async fn create_review(ex: &mut Executor, review: &NewReview) -> DbResult<Review> {
    let id = ReviewId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO reviews (id, rating, comment, user_id, property_id)
                VALUES ($1, $2, $3, $4, $5)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(review.rating)
                .bind(&review.comment)
                .bind(review.user_id.as_str())
                .bind(review.property_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO reviews (id, rating, comment, user_id, property_id)
                VALUES (?, ?, ?, ?, ?)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(review.rating)
                .bind(&review.comment)
                .bind(review.user_id.as_str())
                .bind(review.property_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    expect_one_row(rows_affected)?;

    Ok(Review {
        id,
        rating: review.rating,
        comment: review.comment.clone(),
        user_id: review.user_id.clone(),
        property_id: review.property_id.clone(),
    })
}

/// Gets the review identified by `id`.
pub async fn get_review(ex: &mut Executor, id: &ReviewId) -> DbResult<Review> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM reviews WHERE id = $1";
            let raw_review = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Review::try_from(raw_review)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM reviews WHERE id = ?";
            let raw_review = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Review::try_from(raw_review)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all reviews.
pub async fn list_reviews(ex: &mut Executor) -> DbResult<Vec<Review>> {
    let mut reviews = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM reviews ORDER BY property_id, id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                reviews.push(Review::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM reviews ORDER BY property_id, id";
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                reviews.push(Review::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(reviews)
}

/// Modifies the review identified by `id` with the fields present in `update`.
pub async fn update_review(
    ex: &mut Executor,
    id: &ReviewId,
    update: &ReviewUpdate,
) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE reviews SET
                    rating = COALESCE($2, rating),
                    comment = COALESCE($3, comment),
                    user_id = COALESCE($4, user_id),
                    property_id = COALESCE($5, property_id)
                WHERE id = $1
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.rating)
                .bind(update.comment.as_deref())
                .bind(update.user_id.as_ref().map(UserId::as_str))
                .bind(update.property_id.as_ref().map(PropertyId::as_str))
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE reviews SET
                    rating = COALESCE(?, rating),
                    comment = COALESCE(?, comment),
                    user_id = COALESCE(?, user_id),
                    property_id = COALESCE(?, property_id)
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(update.rating)
                .bind(update.comment.as_deref())
                .bind(update.user_id.as_ref().map(UserId::as_str))
                .bind(update.property_id.as_ref().map(PropertyId::as_str))
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

/// Deletes the review identified by `id`.
pub async fn delete_review(ex: &mut Executor, id: &ReviewId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM reviews WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM reviews WHERE id = ?";
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

/// Deletes all reviews written by `user_id` and returns how many there were.
pub async fn delete_reviews_by_user(ex: &mut Executor, user_id: &UserId) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM reviews WHERE user_id = $1";
            let done = sqlx::query(query_str)
                .bind(user_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM reviews WHERE user_id = ?";
            let done = sqlx::query(query_str)
                .bind(user_id.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

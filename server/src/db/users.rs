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

//! Persistence of users.

use crate::db::expect_one_row;
use crate::model::{NewUser, User, UserFilter, UserId, UserUpdate};
use futures::TryStreamExt;
use stayhub_authn::model::HashedPassword;
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
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let phone_number: Option<String> =
            row.try_get("phone_number").map_err(postgres::map_sqlx_error)?;
        let profile_picture: Option<String> =
            row.try_get("profile_picture").map_err(postgres::map_sqlx_error)?;

        Ok(User {
            id: UserId::new(id),
            username,
            name,
            password: HashedPassword::new(password),
            email,
            phone_number,
            profile_picture,
        })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let phone_number: Option<String> =
            row.try_get("phone_number").map_err(sqlite::map_sqlx_error)?;
        let profile_picture: Option<String> =
            row.try_get("profile_picture").map_err(sqlite::map_sqlx_error)?;

        Ok(User {
            id: UserId::new(id),
            username,
            name,
            password: HashedPassword::new(password),
            email,
            phone_number,
            profile_picture,
        })
    }
}

/// Creates the user described by `user`, or replaces the user with the same username.
///
/// The optional fields of an existing user are only replaced when `user` provides them.  The
/// `password` is the already-hashed password of the user.  Returns the stored user.
pub async fn upsert_user(
    ex: &mut Executor,
    user: &NewUser,
    password: &HashedPassword,
) -> DbResult<User> {
    let id = UserId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO users
                    (id, username, name, password, email, phone_number, profile_picture)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (username) DO UPDATE SET
                    name = excluded.name,
                    password = excluded.password,
                    email = excluded.email,
                    phone_number = COALESCE(excluded.phone_number, users.phone_number),
                    profile_picture = COALESCE(excluded.profile_picture, users.profile_picture)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&user.username)
                .bind(&user.name)
                .bind(password.as_str())
                .bind(&user.email)
                .bind(user.phone_number.as_deref())
                .bind(user.profile_picture.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO users
                    (id, username, name, password, email, phone_number, profile_picture)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (username) DO UPDATE SET
                    name = excluded.name,
                    password = excluded.password,
                    email = excluded.email,
                    phone_number = COALESCE(excluded.phone_number, users.phone_number),
                    profile_picture = COALESCE(excluded.profile_picture, users.profile_picture)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&user.username)
                .bind(&user.name)
                .bind(password.as_str())
                .bind(&user.email)
                .bind(user.phone_number.as_deref())
                .bind(user.profile_picture.as_deref())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    if rows_affected != 1 {
        return Err(DbError::BackendError("Upsert affected more than one row".to_owned()));
    }
    get_user_by_username(ex, &user.username).await
}

/// Gets the user identified by `id`.
pub async fn get_user(ex: &mut Executor, id: &UserId) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM users WHERE id = $1";
            let raw_user = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM users WHERE id = ?";
            let raw_user = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the user named `username`.
pub async fn get_user_by_username(ex: &mut Executor, username: &str) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM users WHERE username = $1";
            let raw_user = sqlx::query(query_str)
                .bind(username)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM users WHERE username = ?";
            let raw_user = sqlx::query(query_str)
                .bind(username)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(raw_user)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all users that match `filter`, sorted by username.
pub async fn list_users(ex: &mut Executor, filter: &UserFilter) -> DbResult<Vec<User>> {
    let mut users = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM users
                WHERE
                    ($1::TEXT IS NULL OR strpos(lower(username), lower($1)) > 0)
                    AND ($2::TEXT IS NULL OR strpos(lower(email), lower($2)) > 0)
                ORDER BY username
            ";
            let mut rows = sqlx::query(query_str)
                .bind(filter.username.as_deref())
                .bind(filter.email.as_deref())
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM users
                WHERE
                    (?1 IS NULL OR instr(lower(username), lower(?1)) > 0)
                    AND (?2 IS NULL OR instr(lower(email), lower(?2)) > 0)
                ORDER BY username
            ";
            let mut rows = sqlx::query(query_str)
                .bind(filter.username.as_deref())
                .bind(filter.email.as_deref())
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                users.push(User::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(users)
}

/// Modifies the user identified by `id` with the fields present in `update`.
pub async fn update_user(ex: &mut Executor, id: &UserId, update: &UserUpdate) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE users SET
                    username = COALESCE($2, username),
                    email = COALESCE($3, email),
                    name = COALESCE($4, name),
                    phone_number = COALESCE($5, phone_number),
                    profile_picture = COALESCE($6, profile_picture)
                WHERE id = $1
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.username.as_deref())
                .bind(update.email.as_deref())
                .bind(update.name.as_deref())
                .bind(update.phone_number.as_deref())
                .bind(update.profile_picture.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE users SET
                    username = COALESCE(?, username),
                    email = COALESCE(?, email),
                    name = COALESCE(?, name),
                    phone_number = COALESCE(?, phone_number),
                    profile_picture = COALESCE(?, profile_picture)
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(update.username.as_deref())
                .bind(update.email.as_deref())
                .bind(update.name.as_deref())
                .bind(update.phone_number.as_deref())
                .bind(update.profile_picture.as_deref())
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

/// Deletes the user identified by `id`.
///
/// Fails with `DbError::ForeignKeyViolation` if other entities still reference the user.
pub async fn delete_user(ex: &mut Executor, id: &UserId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM users WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM users WHERE id = ?";
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

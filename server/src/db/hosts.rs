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

//! Persistence of hosts.

use crate::db::expect_one_row;
use crate::model::{Host, HostFilter, HostId, HostUpdate, NewHost};
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
impl TryFrom<PgRow> for Host {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let email: Option<String> = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let phone_number: String =
            row.try_get("phone_number").map_err(postgres::map_sqlx_error)?;
        let profile_picture: Option<String> =
            row.try_get("profile_picture").map_err(postgres::map_sqlx_error)?;
        let about_me: Option<String> = row.try_get("about_me").map_err(postgres::map_sqlx_error)?;

        Ok(Host {
            id: HostId::new(id),
            username,
            name,
            email,
            phone_number,
            profile_picture,
            about_me,
        })
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Host {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: String = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let email: Option<String> = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let phone_number: String = row.try_get("phone_number").map_err(sqlite::map_sqlx_error)?;
        let profile_picture: Option<String> =
            row.try_get("profile_picture").map_err(sqlite::map_sqlx_error)?;
        let about_me: Option<String> = row.try_get("about_me").map_err(sqlite::map_sqlx_error)?;

        Ok(Host {
            id: HostId::new(id),
            username,
            name,
            email,
            phone_number,
            profile_picture,
            about_me,
        })
    }
}

/// Creates the host described by `host`, or replaces the host with the same username.
///
/// The optional fields of an existing host are only replaced when `host` provides them.  Returns
/// the stored host.
pub async fn upsert_host(ex: &mut Executor, host: &NewHost) -> DbResult<Host> {
    let id = HostId::generate();

    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO hosts
                    (id, username, name, email, phone_number, profile_picture, about_me)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (username) DO UPDATE SET
                    name = excluded.name,
                    email = COALESCE(excluded.email, hosts.email),
                    phone_number = excluded.phone_number,
                    profile_picture = COALESCE(excluded.profile_picture, hosts.profile_picture),
                    about_me = COALESCE(excluded.about_me, hosts.about_me)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&host.username)
                .bind(&host.name)
                .bind(host.email.as_deref())
                .bind(&host.phone_number)
                .bind(host.profile_picture.as_deref())
                .bind(host.about_me.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO hosts
                    (id, username, name, email, phone_number, profile_picture, about_me)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT (username) DO UPDATE SET
                    name = excluded.name,
                    email = COALESCE(excluded.email, hosts.email),
                    phone_number = excluded.phone_number,
                    profile_picture = COALESCE(excluded.profile_picture, hosts.profile_picture),
                    about_me = COALESCE(excluded.about_me, hosts.about_me)
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(&host.username)
                .bind(&host.name)
                .bind(host.email.as_deref())
                .bind(&host.phone_number)
                .bind(host.profile_picture.as_deref())
                .bind(host.about_me.as_deref())
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
    get_host_by_username(ex, &host.username).await
}

/// Gets the host identified by `id`.
pub async fn get_host(ex: &mut Executor, id: &HostId) -> DbResult<Host> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM hosts WHERE id = $1";
            let raw_host = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Host::try_from(raw_host)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM hosts WHERE id = ?";
            let raw_host = sqlx::query(query_str)
                .bind(id.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Host::try_from(raw_host)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the host named `username`.
pub async fn get_host_by_username(ex: &mut Executor, username: &str) -> DbResult<Host> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM hosts WHERE username = $1";
            let raw_host = sqlx::query(query_str)
                .bind(username)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Host::try_from(raw_host)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM hosts WHERE username = ?";
            let raw_host = sqlx::query(query_str)
                .bind(username)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Host::try_from(raw_host)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all hosts that match `filter`, sorted by username.
pub async fn list_hosts(ex: &mut Executor, filter: &HostFilter) -> DbResult<Vec<Host>> {
    let mut hosts = vec![];
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM hosts
                WHERE $1::TEXT IS NULL OR strpos(lower(username), lower($1)) > 0
                ORDER BY username
            ";
            let mut rows =
                sqlx::query(query_str).bind(filter.name.as_deref()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                hosts.push(Host::try_from(row)?);
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM hosts
                WHERE ?1 IS NULL OR instr(lower(username), lower(?1)) > 0
                ORDER BY username
            ";
            let mut rows =
                sqlx::query(query_str).bind(filter.name.as_deref()).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                hosts.push(Host::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(hosts)
}

/// Modifies the host identified by `id` with the fields present in `update`.
pub async fn update_host(ex: &mut Executor, id: &HostId, update: &HostUpdate) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE hosts SET
                    username = COALESCE($2, username),
                    name = COALESCE($3, name),
                    email = COALESCE($4, email),
                    phone_number = COALESCE($5, phone_number),
                    profile_picture = COALESCE($6, profile_picture),
                    about_me = COALESCE($7, about_me)
                WHERE id = $1
            ";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .bind(update.username.as_deref())
                .bind(update.name.as_deref())
                .bind(update.email.as_deref())
                .bind(update.phone_number.as_deref())
                .bind(update.profile_picture.as_deref())
                .bind(update.about_me.as_deref())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE hosts SET
                    username = COALESCE(?, username),
                    name = COALESCE(?, name),
                    email = COALESCE(?, email),
                    phone_number = COALESCE(?, phone_number),
                    profile_picture = COALESCE(?, profile_picture),
                    about_me = COALESCE(?, about_me)
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(update.username.as_deref())
                .bind(update.name.as_deref())
                .bind(update.email.as_deref())
                .bind(update.phone_number.as_deref())
                .bind(update.profile_picture.as_deref())
                .bind(update.about_me.as_deref())
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

/// Deletes the host identified by `id`.
///
/// Fails with `DbError::ForeignKeyViolation` if any property still belongs to the host.
pub async fn delete_host(ex: &mut Executor, id: &HostId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM hosts WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM hosts WHERE id = ?";
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

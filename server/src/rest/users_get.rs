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

//! API to list users.

use crate::driver::Driver;
use crate::model::{UserFilter, truthy};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_core::rest::{EmptyBody, RestError};

/// Optional criteria accepted in the query string.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct UsersQuery {
    /// Text to look for in usernames.
    username: Option<String>,

    /// Text to look for in email addresses.
    email: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<UsersQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let filter = UserFilter { username: truthy(query.username), email: truthy(query.email) };
    let users = driver.list_users(&filter).await?;
    Ok(Json(users))
}

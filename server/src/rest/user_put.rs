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

//! API to modify an existing user.

use crate::driver::Driver;
use crate::model::{UserId, UserUpdate, falsy_as_none, truthy};
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
pub(crate) struct UserUpdateRequest {
    /// New login name.
    #[serde(default, deserialize_with = "falsy_as_none")]
    username: Option<String>,

    /// New contact email address.
    #[serde(default, deserialize_with = "falsy_as_none")]
    email: Option<String>,

    /// New display name.
    #[serde(default, deserialize_with = "falsy_as_none")]
    name: Option<String>,

    /// New contact phone number.
    #[serde(default, deserialize_with = "falsy_as_none")]
    phone_number: Option<String>,

    /// New profile picture URL.
    #[serde(default, deserialize_with = "falsy_as_none")]
    profile_picture: Option<String>,
}

impl From<UserUpdateRequest> for UserUpdate {
    fn from(request: UserUpdateRequest) -> Self {
        Self {
            username: truthy(request.username),
            email: truthy(request.email),
            name: truthy(request.name),
            phone_number: truthy(request.phone_number),
            profile_picture: truthy(request.profile_picture),
        }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<UserId>,
    _: Authenticated,
    JsonBody(request): JsonBody<UserUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let user = driver.update_user(&id, UserUpdate::from(request)).await?;
    Ok(Json(user))
}

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

//! API to create a user or to replace an existing one with the same username.

use crate::driver::Driver;
use crate::model::{NewUser, truthy};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::model::Password;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message returned when the request lacks any of the required fields.
const MISSING_FIELDS_MESSAGE: &str = "Username, email, password, and name are required";

/// Message sent by the client to the server.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRequest {
    /// Unique login name.  Required.
    username: Option<String>,

    /// Contact email address.  Required.
    email: Option<String>,

    /// Password in the clear.  Required.
    password: Option<String>,

    /// Display name.  Required.
    name: Option<String>,

    /// Contact phone number.
    phone_number: Option<String>,

    /// URL of the profile picture.
    profile_picture: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<UserRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let (Some(username), Some(email), Some(password), Some(name)) = (
        truthy(request.username),
        truthy(request.email),
        truthy(request.password),
        truthy(request.name),
    ) else {
        return Err(RestError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_owned()));
    };
    let password = Password::new(password)?;

    let user = NewUser {
        username,
        name,
        email,
        phone_number: truthy(request.phone_number),
        profile_picture: truthy(request.profile_picture),
    };
    let user = driver.create_user(user, password).await?;
    Ok((http::StatusCode::CREATED, Json(user)))
}

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

//! API to exchange user credentials for an access token.

use crate::driver::Driver;
use crate::model::truthy;
use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use stayhub_authn::model::{AccessToken, Password};
use stayhub_authn::rest::authn_error_to_rest;
use stayhub_core::rest::{JsonBody, RestError};

/// Message returned when the request lacks any of the credentials.
const MISSING_CREDENTIALS_MESSAGE: &str = "Username and password are required";

/// Message sent by the client to the server.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct LoginRequest {
    /// Name of the user logging in.
    username: Option<String>,

    /// Password of the user in the clear.
    password: Option<String>,
}

/// Message sent by the server to the client on a successful login.
#[derive(Deserialize, Serialize)]
pub(crate) struct LoginResponse {
    /// Access token to present in subsequent requests.
    token: AccessToken,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, RestError> {
    let (Some(username), Some(password)) = (truthy(request.username), truthy(request.password))
    else {
        return Err(RestError::InvalidRequest(MISSING_CREDENTIALS_MESSAGE.to_owned()));
    };
    let password = Password::new(password)?;

    let realm = driver.authority().realm();
    let token = driver.login(&username, password).await.map_err(authn_error_to_rest(realm))?;

    Ok(Json(LoginResponse { token }))
}

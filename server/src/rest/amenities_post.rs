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

//! API to create an amenity.

use crate::driver::Driver;
use crate::model::{NewAmenity, truthy};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message sent by the client to the server.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct AmenityRequest {
    /// Name of the amenity.  Required.
    name: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<AmenityRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let Some(name) = truthy(request.name) else {
        return Err(RestError::InvalidRequest("name is required".to_owned()));
    };

    let amenity = driver.create_amenity(NewAmenity { name }).await?;
    Ok((http::StatusCode::CREATED, Json(amenity)))
}

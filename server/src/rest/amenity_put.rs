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

//! API to rename an amenity.

use crate::driver::Driver;
use crate::model::{AmenityId, AmenityUpdate, falsy_as_none, truthy};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message sent by the client to the server.  Falsy fields of any JSON type are ignored.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct AmenityUpdateRequest {
    /// New name of the amenity.
    #[serde(default, deserialize_with = "falsy_as_none")]
    name: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<AmenityId>,
    _: Authenticated,
    JsonBody(request): JsonBody<AmenityUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let update = AmenityUpdate { name: truthy(request.name) };
    let amenity = driver.update_amenity(&id, update).await?;
    Ok(Json(amenity))
}

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

//! API to modify an existing review.

use crate::driver::Driver;
use crate::model::{PropertyId, ReviewId, ReviewUpdate, UserId, falsy_as_none, truthy};
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
pub(crate) struct ReviewUpdateRequest {
    /// New score.
    #[serde(default, deserialize_with = "falsy_as_none")]
    rating: Option<i32>,

    /// New opinion.
    #[serde(default, deserialize_with = "falsy_as_none")]
    comment: Option<String>,

    /// New author.
    #[serde(default, deserialize_with = "falsy_as_none")]
    user_id: Option<UserId>,

    /// New property being reviewed.
    #[serde(default, deserialize_with = "falsy_as_none")]
    property_id: Option<PropertyId>,
}

impl From<ReviewUpdateRequest> for ReviewUpdate {
    fn from(request: ReviewUpdateRequest) -> Self {
        Self {
            rating: truthy(request.rating),
            comment: truthy(request.comment),
            user_id: truthy(request.user_id),
            property_id: truthy(request.property_id),
        }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ReviewId>,
    _: Authenticated,
    JsonBody(request): JsonBody<ReviewUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let review = driver.update_review(&id, ReviewUpdate::from(request)).await?;
    Ok(Json(review))
}

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

//! API to create a review.

use crate::driver::Driver;
use crate::model::{NewReview, PropertyId, UserId, truthy};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message returned when the request lacks any of the required fields.
const MISSING_FIELDS_MESSAGE: &str = "Rating, comment, user ID, and property ID are required";

/// Message sent by the client to the server.  All fields are required.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewRequest {
    /// Score given to the property.
    rating: Option<i32>,

    /// Free-form opinion.
    comment: Option<String>,

    /// Author of the review.
    user_id: Option<UserId>,

    /// Property being reviewed.
    property_id: Option<PropertyId>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let (Some(rating), Some(comment), Some(user_id), Some(property_id)) = (
        truthy(request.rating),
        truthy(request.comment),
        truthy(request.user_id),
        truthy(request.property_id),
    ) else {
        return Err(RestError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_owned()));
    };

    let review = NewReview { rating, comment, user_id, property_id };
    let review = driver.create_review(review).await?;
    Ok((http::StatusCode::CREATED, Json(review)))
}

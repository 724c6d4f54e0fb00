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

//! API to create a property.

use crate::driver::Driver;
use crate::model::{AmenityId, HostId, NewProperty, truthy};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message returned when the request lacks any of the required fields.
const MISSING_FIELDS_MESSAGE: &str = "All fields are required";

/// Message sent by the client to the server.
///
/// All fields are required except for the amenities.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertyRequest {
    /// Short name of the property.
    title: Option<String>,

    /// Long description of the property.
    description: Option<String>,

    /// Free-form location of the property.
    location: Option<String>,

    /// Price of one night.
    price_per_night: Option<f64>,

    /// Number of bedrooms.
    bedroom_count: Option<i32>,

    /// Number of bathrooms.
    bath_room_count: Option<i32>,

    /// Maximum number of guests.
    max_guest_count: Option<i32>,

    /// Rating of the property.
    rating: Option<i32>,

    /// Host that owns the property.
    host_id: Option<HostId>,

    /// Amenities to link to the property.
    amenity_ids: Option<Vec<AmenityId>>,
}

impl TryFrom<PropertyRequest> for NewProperty {
    type Error = RestError;

    fn try_from(request: PropertyRequest) -> Result<Self, Self::Error> {
        let (
            Some(title),
            Some(description),
            Some(location),
            Some(price_per_night),
            Some(bedroom_count),
            Some(bath_room_count),
            Some(max_guest_count),
            Some(rating),
            Some(host_id),
        ) = (
            truthy(request.title),
            truthy(request.description),
            truthy(request.location),
            request.price_per_night,
            request.bedroom_count,
            request.bath_room_count,
            request.max_guest_count,
            request.rating,
            truthy(request.host_id),
        )
        else {
            return Err(RestError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_owned()));
        };

        Ok(Self {
            title,
            description,
            location,
            price_per_night,
            bedroom_count,
            bath_room_count,
            max_guest_count,
            rating,
            host_id,
            amenity_ids: request.amenity_ids.unwrap_or_default(),
        })
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<PropertyRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let property = NewProperty::try_from(request)?;
    let property = driver.create_property(property).await?;
    Ok((http::StatusCode::CREATED, Json(property)))
}

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

//! API to modify an existing property.

use crate::driver::Driver;
use crate::model::{AmenityId, HostId, PropertyId, PropertyUpdate, falsy_as_none, truthy};
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
pub(crate) struct PropertyUpdateRequest {
    /// New short name.
    #[serde(default, deserialize_with = "falsy_as_none")]
    title: Option<String>,

    /// New long description.
    #[serde(default, deserialize_with = "falsy_as_none")]
    description: Option<String>,

    /// New location.
    #[serde(default, deserialize_with = "falsy_as_none")]
    location: Option<String>,

    /// New price of one night.
    #[serde(default, deserialize_with = "falsy_as_none")]
    price_per_night: Option<f64>,

    /// New number of bedrooms.
    #[serde(default, deserialize_with = "falsy_as_none")]
    bedroom_count: Option<i32>,

    /// New number of bathrooms.
    #[serde(default, deserialize_with = "falsy_as_none")]
    bath_room_count: Option<i32>,

    /// New maximum number of guests.
    #[serde(default, deserialize_with = "falsy_as_none")]
    max_guest_count: Option<i32>,

    /// New rating.
    #[serde(default, deserialize_with = "falsy_as_none")]
    rating: Option<i32>,

    /// New owner of the property.
    #[serde(default, deserialize_with = "falsy_as_none")]
    host_id: Option<HostId>,

    /// Amenities that replace the linked ones, even if empty.
    #[serde(default, deserialize_with = "falsy_as_none")]
    amenity_ids: Option<Vec<AmenityId>>,
}

impl From<PropertyUpdateRequest> for PropertyUpdate {
    fn from(request: PropertyUpdateRequest) -> Self {
        Self {
            title: truthy(request.title),
            description: truthy(request.description),
            location: truthy(request.location),
            price_per_night: truthy(request.price_per_night),
            bedroom_count: truthy(request.bedroom_count),
            bath_room_count: truthy(request.bath_room_count),
            max_guest_count: truthy(request.max_guest_count),
            rating: truthy(request.rating),
            host_id: truthy(request.host_id),
            amenity_ids: request.amenity_ids,
        }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<PropertyId>,
    _: Authenticated,
    JsonBody(request): JsonBody<PropertyUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let property = driver.update_property(&id, PropertyUpdate::from(request)).await?;
    Ok(Json(property))
}

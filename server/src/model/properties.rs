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

//! The `Property` entity.

use crate::model::{Amenity, AmenityId, HostId, PropertyId};
use serde::{Deserialize, Serialize};
use stayhub_core::model::{ModelError, ModelResult};

/// Ensures that the numeric `value` of the field called `name` is not negative.
fn ensure_not_negative<T: Default + PartialOrd>(name: &str, value: T) -> ModelResult<()> {
    if value < T::default() {
        return Err(ModelError(format!("{} cannot be negative", name)));
    }
    Ok(())
}

/// A place that can be booked.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Identifier of the property.
    pub id: PropertyId,

    /// Short title.
    pub title: String,

    /// Long description.
    pub description: String,

    /// Free-form location, such as a city name.
    pub location: String,

    /// Price of a night.
    pub price_per_night: f64,

    /// Number of bedrooms.
    pub bedroom_count: i32,

    /// Number of bathrooms.
    pub bath_room_count: i32,

    /// Maximum number of guests.
    pub max_guest_count: i32,

    /// Rating of the property.
    pub rating: i32,

    /// Owner of the property.
    pub host_id: HostId,

    /// Amenities offered by the property, sorted by name.
    pub amenities: Vec<Amenity>,
}

/// Data to create a property.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProperty {
    /// Short title.
    pub title: String,

    /// Long description.
    pub description: String,

    /// Free-form location.
    pub location: String,

    /// Price of a night.
    pub price_per_night: f64,

    /// Number of bedrooms.
    pub bedroom_count: i32,

    /// Number of bathrooms.
    pub bath_room_count: i32,

    /// Maximum number of guests.
    pub max_guest_count: i32,

    /// Rating of the property.
    pub rating: i32,

    /// Owner of the property, which must exist.
    pub host_id: HostId,

    /// Amenities to link to the property, which must exist.
    pub amenity_ids: Vec<AmenityId>,
}

impl NewProperty {
    /// Checks that the numeric fields are in range.
    pub fn validate(&self) -> ModelResult<()> {
        ensure_not_negative("pricePerNight", self.price_per_night)?;
        ensure_not_negative("bedroomCount", self.bedroom_count)?;
        ensure_not_negative("bathRoomCount", self.bath_room_count)?;
        ensure_not_negative("maxGuestCount", self.max_guest_count)?;
        Ok(())
    }
}

/// Partial modification of a property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyUpdate {
    /// New title.
    pub title: Option<String>,

    /// New description.
    pub description: Option<String>,

    /// New location.
    pub location: Option<String>,

    /// New price of a night.
    pub price_per_night: Option<f64>,

    /// New number of bedrooms.
    pub bedroom_count: Option<i32>,

    /// New number of bathrooms.
    pub bath_room_count: Option<i32>,

    /// New maximum number of guests.
    pub max_guest_count: Option<i32>,

    /// New rating.
    pub rating: Option<i32>,

    /// New owner, which must exist.
    pub host_id: Option<HostId>,

    /// Replacement for the whole set of linked amenities, which must exist.
    pub amenity_ids: Option<Vec<AmenityId>>,
}

impl PropertyUpdate {
    /// Checks that the numeric fields, if present, are in range.
    pub fn validate(&self) -> ModelResult<()> {
        if let Some(value) = self.price_per_night {
            ensure_not_negative("pricePerNight", value)?;
        }
        if let Some(value) = self.bedroom_count {
            ensure_not_negative("bedroomCount", value)?;
        }
        if let Some(value) = self.bath_room_count {
            ensure_not_negative("bathRoomCount", value)?;
        }
        if let Some(value) = self.max_guest_count {
            ensure_not_negative("maxGuestCount", value)?;
        }
        Ok(())
    }
}

/// Criteria to select properties in listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyFilter {
    /// Text to look for, case-insensitively, in locations.
    pub location: Option<String>,

    /// Exact price of a night.
    pub price_per_night: Option<f64>,

    /// Names of amenities of which the property must offer at least one.  Empty means any.
    pub amenities: Vec<String>,
}

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

//! The `Amenity` entity.

use crate::model::AmenityId;
use serde::{Deserialize, Serialize};

/// A feature that properties can offer, such as "Wifi".
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Amenity {
    /// Identifier of the amenity.
    pub id: AmenityId,

    /// Name of the amenity.
    pub name: String,
}

/// Data to create an amenity.
#[derive(Clone, Debug, PartialEq)]
pub struct NewAmenity {
    /// Name of the amenity.
    pub name: String,
}

/// Partial modification of an amenity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmenityUpdate {
    /// New name.
    pub name: Option<String>,
}

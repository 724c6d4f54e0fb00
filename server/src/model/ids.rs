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

//! Opaque identifiers for all entities.

use crate::model::Truthy;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a newtype `$name` to identify entities of kind `$what`.
macro_rules! id_type [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Opaque identifier of ", $what, ".")]
        #[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its textual representation.
            ///
            /// Identifiers are opaque, so any string is accepted here.  Strings that were not
            /// previously generated simply do not match any entity.
            pub fn new<S: Into<String>>(s: S) -> Self {
                Self(s.into())
            }

            /// Generates a new random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Returns the textual representation of the identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Truthy for $name {
            fn is_truthy(&self) -> bool {
                !self.0.is_empty()
            }
        }
    }
];

id_type!(AmenityId, "an amenity");
id_type!(BookingId, "a booking");
id_type!(HostId, "a host");
id_type!(PropertyId, "a property");
id_type!(ReviewId, "a review");
id_type!(UserId, "a user");

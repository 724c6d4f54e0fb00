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

//! Data types for the rental service.
//!
//! Entities are plain records that mirror what the API returns.  The `New*` types carry the data
//! needed to create an entity, the `*Update` types carry partial modifications where `None` means
//! "leave unchanged", and the `*Filter` types carry the optional criteria for listings.

mod amenities;
pub use amenities::{Amenity, AmenityUpdate, NewAmenity};
mod bookings;
pub use bookings::{Booking, BookingFilter, BookingUpdate, NewBooking};
mod hosts;
pub use hosts::{Host, HostFilter, HostUpdate, NewHost};
mod ids;
pub use ids::{AmenityId, BookingId, HostId, PropertyId, ReviewId, UserId};
mod properties;
pub use properties::{NewProperty, Property, PropertyFilter, PropertyUpdate};
mod reviews;
pub use reviews::{NewReview, Review, ReviewUpdate};
mod truthy;
pub use truthy::{Truthy, falsy_as_none, parse_timestamp, truthy};
mod users;
pub use users::{NewUser, User, UserFilter, UserUpdate};

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

//! Operations on amenities.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{Amenity, AmenityId, AmenityUpdate, NewAmenity};
use stayhub_core::driver::DriverResult;

impl Driver {
    /// Gets all amenities.
    pub(crate) async fn list_amenities(self) -> DriverResult<Vec<Amenity>> {
        let amenities = db::list_amenities(&mut self.db.ex().await?).await?;
        Ok(amenities)
    }

    /// Gets the amenity identified by `id`.
    pub(crate) async fn get_amenity(self, id: &AmenityId) -> DriverResult<Amenity> {
        db::get_amenity(&mut self.db.ex().await?, id).await.map_err(not_found("Amenity"))
    }

    /// Creates a new amenity.
    pub(crate) async fn create_amenity(self, amenity: NewAmenity) -> DriverResult<Amenity> {
        let mut tx = self.db.begin().await?;
        let amenity = db::create_amenity(tx.ex(), &amenity).await?;
        tx.commit().await?;
        Ok(amenity)
    }

    /// Applies `update` to the amenity identified by `id` and returns the modified amenity.
    pub(crate) async fn update_amenity(
        self,
        id: &AmenityId,
        update: AmenityUpdate,
    ) -> DriverResult<Amenity> {
        let mut tx = self.db.begin().await?;
        db::update_amenity(tx.ex(), id, &update).await.map_err(not_found("Amenity"))?;
        let amenity = db::get_amenity(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(amenity)
    }

    /// Deletes the amenity identified by `id` and returns a message describing the deletion.
    pub(crate) async fn delete_amenity(self, id: &AmenityId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        db::delete_amenity(tx.ex(), id).await.map_err(not_found("Amenity"))?;
        tx.commit().await?;
        Ok(format!("Amenity {} deleted successfully", id))
    }
}

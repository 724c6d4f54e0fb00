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

//! Operations on properties.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{AmenityId, NewProperty, Property, PropertyFilter, PropertyId, PropertyUpdate};
use stayhub_core::db::Executor;
use stayhub_core::driver::DriverResult;

/// Checks that all amenities in `ids` exist.
async fn check_amenities(ex: &mut Executor, ids: &[AmenityId]) -> DriverResult<()> {
    for id in ids {
        db::get_amenity(ex, id).await.map_err(not_found("Amenity"))?;
    }
    Ok(())
}

impl Driver {
    /// Gets all properties that match `filter`.
    pub(crate) async fn list_properties(
        self,
        filter: &PropertyFilter,
    ) -> DriverResult<Vec<Property>> {
        let properties = db::list_properties(&mut self.db.ex().await?, filter).await?;
        Ok(properties)
    }

    /// Gets the property identified by `id`.
    pub(crate) async fn get_property(self, id: &PropertyId) -> DriverResult<Property> {
        db::get_property(&mut self.db.ex().await?, id).await.map_err(not_found("Property"))
    }

    /// Creates a new property after checking that its host and amenities exist.
    pub(crate) async fn create_property(self, property: NewProperty) -> DriverResult<Property> {
        property.validate()?;

        let mut tx = self.db.begin().await?;
        db::get_host(tx.ex(), &property.host_id).await.map_err(not_found("Host"))?;
        check_amenities(tx.ex(), &property.amenity_ids).await?;
        let property = db::create_property(tx.ex(), &property).await?;
        tx.commit().await?;
        Ok(property)
    }

    /// Applies `update` to the property identified by `id` and returns the modified property.
    ///
    /// If `update` carries amenities, they replace the ones linked to the property.
    pub(crate) async fn update_property(
        self,
        id: &PropertyId,
        update: PropertyUpdate,
    ) -> DriverResult<Property> {
        update.validate()?;

        let mut tx = self.db.begin().await?;
        db::get_property(tx.ex(), id).await.map_err(not_found("Property"))?;
        if let Some(host_id) = update.host_id.as_ref() {
            db::get_host(tx.ex(), host_id).await.map_err(not_found("Host"))?;
        }
        if let Some(amenity_ids) = update.amenity_ids.as_ref() {
            check_amenities(tx.ex(), amenity_ids).await?;
        }

        db::update_property(tx.ex(), id, &update).await.map_err(not_found("Property"))?;
        if let Some(amenity_ids) = update.amenity_ids.as_ref() {
            db::set_property_amenities(tx.ex(), id, amenity_ids).await?;
        }

        let property = db::get_property(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(property)
    }

    /// Deletes the property identified by `id` together with its bookings.
    ///
    /// Returns a message describing the deletion.
    pub(crate) async fn delete_property(self, id: &PropertyId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        let property = db::get_property(tx.ex(), id).await.map_err(not_found("Property"))?;
        db::delete_bookings_by_property(tx.ex(), id).await?;
        db::delete_property(tx.ex(), id).await.map_err(not_found("Property"))?;
        tx.commit().await?;
        Ok(format!("Property {} deleted successfully", property.title))
    }
}

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

//! Operations on hosts.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{Host, HostFilter, HostId, HostUpdate, NewHost};
use stayhub_core::driver::DriverResult;

impl Driver {
    /// Gets all hosts that match `filter`.
    pub(crate) async fn list_hosts(self, filter: &HostFilter) -> DriverResult<Vec<Host>> {
        let hosts = db::list_hosts(&mut self.db.ex().await?, filter).await?;
        Ok(hosts)
    }

    /// Gets the host identified by `id`.
    pub(crate) async fn get_host(self, id: &HostId) -> DriverResult<Host> {
        db::get_host(&mut self.db.ex().await?, id).await.map_err(not_found("Host"))
    }

    /// Creates a new host or replaces the existing host with the same username.
    pub(crate) async fn create_host(self, host: NewHost) -> DriverResult<Host> {
        let mut tx = self.db.begin().await?;
        let host = db::upsert_host(tx.ex(), &host).await?;
        tx.commit().await?;
        Ok(host)
    }

    /// Applies `update` to the host identified by `id` and returns the modified host.
    pub(crate) async fn update_host(self, id: &HostId, update: HostUpdate) -> DriverResult<Host> {
        let mut tx = self.db.begin().await?;
        db::update_host(tx.ex(), id, &update).await.map_err(not_found("Host"))?;
        let host = db::get_host(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(host)
    }

    /// Deletes the host identified by `id` together with the properties it owns.
    ///
    /// The bookings and reviews of those properties are not touched, so their presence makes the
    /// whole deletion fail.  Returns a message describing the deletion.
    pub(crate) async fn delete_host(self, id: &HostId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        let host = db::get_host(tx.ex(), id).await.map_err(not_found("Host"))?;
        db::delete_properties_by_host(tx.ex(), id).await?;
        db::delete_host(tx.ex(), id).await.map_err(not_found("Host"))?;
        tx.commit().await?;
        Ok(format!("Host {} and associated properties deleted successfully", host.username))
    }
}

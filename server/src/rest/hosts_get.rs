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

//! API to list hosts.

use crate::driver::Driver;
use crate::model::{HostFilter, truthy};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_core::rest::{EmptyBody, RestError};

/// Optional criteria accepted in the query string.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct HostsQuery {
    /// Text to look for in the usernames of the hosts.
    name: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<HostsQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let filter = HostFilter { name: truthy(query.name) };
    let hosts = driver.list_hosts(&filter).await?;
    Ok(Json(hosts))
}

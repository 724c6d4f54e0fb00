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

//! The `Claims` data type.

use serde::{Deserialize, Serialize};

/// Identity carried by an access token.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Identifier of the authenticated user.
    pub user_id: String,

    /// Username of the authenticated user at the time the token was issued.
    pub username: String,

    /// Issue time, in seconds since the Unix epoch.
    pub iat: i64,

    /// Expiration time, in seconds since the Unix epoch.
    pub exp: i64,
}

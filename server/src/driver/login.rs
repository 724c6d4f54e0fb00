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

//! Extends the driver with the `login` method.

use crate::db;
use crate::driver::Driver;
use stayhub_authn::model::{AccessToken, Password};
use stayhub_core::db::DbError;
use stayhub_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Logs a user with `username` and `password` in and returns a new access token for them.
    pub(crate) async fn login(
        self,
        username: &str,
        password: Password,
    ) -> DriverResult<AccessToken> {
        self.authority.ensure_configured()?;

        let user = match db::get_user_by_username(&mut self.db.ex().await?, username).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                return Err(DriverError::Unauthorized("Invalid credentials".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        let matches =
            password.verify(&user.password).map_err(|e| DriverError::BackendError(e.to_string()))?;
        if !matches {
            return Err(DriverError::Unauthorized("Incorrect password".to_owned()));
        }

        self.authority.issue(user.id.as_str(), &user.username)
    }
}

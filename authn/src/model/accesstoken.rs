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

//! Bearer tokens as presented by clients.

use serde::{Deserialize, Serialize};
use stayhub_core::model::{ModelError, ModelResult};
use std::fmt;

/// An opaque type representing a signed access token.
///
/// Tokens are JSON Web Tokens in their compact form: three base64url segments separated by dots.
/// This type only validates the shape of the token; the signature and the claims are checked by
/// the `TokenAuthority`.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Accepts `token` if it has the shape of a compact JWT.
    pub fn new<S: Into<String>>(token: S) -> ModelResult<Self> {
        let token = token.into();
        if token.split('.').count() != 3 {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        for ch in token.chars() {
            if !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.') {
                return Err(ModelError("Invalid access token".to_owned()));
            }
        }
        Ok(Self(token))
    }

    /// Returns the token in its compact form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed access token")
    }
}

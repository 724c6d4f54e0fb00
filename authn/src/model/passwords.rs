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

//! Passwords in the clear and their bcrypt hashes.

use serde::{Deserialize, Serialize};
use stayhub_core::model::{ModelError, ModelResult};
use std::fmt;

/// Maximum length of a password in bytes, as imposed by bcrypt.
const MAX_PASSWORD_LENGTH: usize = 72;

/// Work factor for bcrypt hashes.  Tests use the minimum to keep them fast.
const HASH_COST: u32 = if cfg!(any(test, feature = "testutils")) { 4 } else { 10 };

/// A password in the clear.  Its `Debug` output is scrubbed so it never ends up in logs.
#[derive(Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
#[cfg_attr(any(test, feature = "testutils"), derive(Clone))]
pub struct Password(String);

impl Password {
    /// Validates `s` as a password.  Empty passwords and those longer than bcrypt accepts are
    /// rejected.
    pub fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(ModelError("Password cannot be empty".to_owned()));
        }
        if s.len() > MAX_PASSWORD_LENGTH {
            return Err(ModelError("Password is too long".to_owned()));
        }
        Ok(Password(s))
    }

    /// Returns the password in the clear.
    #[cfg(any(test, feature = "testutils"))]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hashes the password with a random salt.  Consumes the password because there is no context
    /// in which keeping the password alive once we have generated its hash is correct.
    pub fn hash(self) -> ModelResult<HashedPassword> {
        let hashed = bcrypt::hash(self.0, HASH_COST)
            .map_err(|e| ModelError(format!("Password error: {}", e)))?;
        Ok(HashedPassword::new(hashed))
    }

    /// Checks whether this password produced `hash`.
    pub fn verify(self, hash: &HashedPassword) -> ModelResult<bool> {
        bcrypt::verify(self.0, hash.as_str())
            .map_err(|e| ModelError(format!("Password error: {}", e)))
    }
}

#[cfg(any(test, feature = "testutils"))]
impl From<&'static str> for Password {
    /// Builds a password from a literal in test code.  Panics if it is invalid.
    fn from(s: &'static str) -> Self {
        Password::new(s).expect("Hardcoded passwords must be valid")
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed password")
    }
}

/// A bcrypt hash as stored in the database.  Also scrubbed from `Debug` output.
#[derive(Clone, PartialEq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wraps a hash previously produced by `Password::hash`.
    pub fn new<S: Into<String>>(s: S) -> Self {
        HashedPassword(s.into())
    }

    /// Returns the hash in its bcrypt modular-crypt form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed hash")
    }
}

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

//! Business logic for token-based authentication.

use crate::model::{AccessToken, Claims};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use stayhub_core::clocks::Clock;
use stayhub_core::driver::{DriverError, DriverResult};
use stayhub_core::env::get_optional_var;
use std::sync::Arc;
use std::time::Duration;

/// Default value for the `TOKEN_MAX_AGE` setting when not specified.
const DEFAULT_TOKEN_MAX_AGE_SECONDS: u64 = 7 * 60 * 60;

/// Message returned for any token that fails verification.
const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Configuration options for the token authority.
#[derive(Clone, Debug)]
#[cfg_attr(any(test, feature = "testutils"), derive(PartialEq))]
pub struct AuthnOptions {
    /// The amount of time issued tokens are valid for.
    pub token_max_age: Duration,
}

impl Default for AuthnOptions {
    fn default() -> Self {
        Self { token_max_age: Duration::from_secs(DEFAULT_TOKEN_MAX_AGE_SECONDS) }
    }
}

impl AuthnOptions {
    /// Creates a new set of options from environment variables.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            token_max_age: get_optional_var::<Duration>(prefix, "TOKEN_MAX_AGE")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TOKEN_MAX_AGE_SECONDS)),
        })
    }
}

/// Key material derived from the signing secret.
struct Keys {
    /// Key to sign new tokens with.
    encoding: EncodingKey,

    /// Key to verify the signature of presented tokens.
    decoding: DecodingKey,
}

/// Issues and verifies HS256-signed access tokens.
///
/// The secret is optional so that the service can start without one.  In that case, every
/// operation fails with a backend error.
#[derive(Clone)]
pub struct TokenAuthority {
    /// Keys derived from the signing secret, if configured.
    keys: Option<Arc<Keys>>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Authentication realm to return to requests.
    realm: &'static str,

    /// Options for the token authority.
    opts: AuthnOptions,
}

impl TokenAuthority {
    /// Creates a new authority that signs tokens with `secret`.
    pub fn new(
        secret: Option<&str>,
        clock: Arc<dyn Clock + Send + Sync>,
        realm: &'static str,
        opts: AuthnOptions,
    ) -> Self {
        let keys = secret.map(|secret| {
            Arc::from(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            })
        });
        Self { keys, clock, realm, opts }
    }

    /// Gets the authentication realm.
    pub fn realm(&self) -> &'static str {
        self.realm
    }

    /// Returns the keys or fails if no secret was configured.
    fn keys(&self) -> DriverResult<&Keys> {
        match self.keys.as_ref() {
            Some(keys) => Ok(keys),
            None => Err(DriverError::BackendError("JWT Secret not defined".to_owned())),
        }
    }

    /// Fails if no signing secret was configured.
    pub fn ensure_configured(&self) -> DriverResult<()> {
        self.keys().map(|_| ())
    }

    /// Issues a new token for the user identified by `user_id` and `username`.
    pub fn issue(&self, user_id: &str, username: &str) -> DriverResult<AccessToken> {
        let keys = self.keys()?;

        let iat = self.clock.now_utc().unix_timestamp();
        let max_age = i64::try_from(self.opts.token_max_age.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            user_id: user_id.to_owned(),
            username: username.to_owned(),
            iat,
            exp: iat.saturating_add(max_age),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| DriverError::BackendError(format!("Cannot sign token: {}", e)))?;
        AccessToken::new(token).map_err(|e| DriverError::BackendError(e.to_string()))
    }

    /// Verifies the signature and the expiration time of `token` and returns its claims.
    ///
    /// All failures are reported as the same `Unauthorized` error so that callers cannot tell
    /// tampered tokens apart from expired ones.
    pub fn verify(&self, token: &AccessToken) -> DriverResult<Claims> {
        let keys = self.keys()?;

        // Expiration is checked against our own clock, without leeway, instead of the system time
        // used by the library.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let claims =
            match jsonwebtoken::decode::<Claims>(token.as_str(), &keys.decoding, &validation) {
                Ok(data) => data.claims,
                Err(e) => {
                    debug!("Rejecting token: {}", e);
                    return Err(DriverError::Unauthorized(INVALID_TOKEN_MESSAGE.to_owned()));
                }
            };

        if claims.exp <= self.clock.now_utc().unix_timestamp() {
            debug!("Rejecting expired token for user {}", claims.username);
            return Err(DriverError::Unauthorized(INVALID_TOKEN_MESSAGE.to_owned()));
        }

        Ok(claims)
    }
}

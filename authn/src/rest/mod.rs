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

//! REST building blocks to protect APIs with access tokens.
//!
//! Services put a `TokenAuthority` in their state, make it reachable via `FromRef`, and add an
//! `Authenticated` argument to every handler that requires a valid token.  The `Authenticated`
//! extractor must come before any body extractor so that unauthenticated requests are rejected
//! before their payload is looked at.

use crate::driver::TokenAuthority;
use crate::model::Claims;
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use http::request::Parts;
use stayhub_core::driver::DriverError;
use stayhub_core::rest::RestError;

mod httputils;

pub use httputils::get_bearer_auth;

/// Converts a driver error from an authentication flow into a REST error.
///
/// Authentication failures become `401 Unauthorized` responses with a challenge for `realm`
/// instead of the generic `403 Forbidden` mapping.
pub fn authn_error_to_rest(realm: &'static str) -> impl Fn(DriverError) -> RestError {
    move |e| match e {
        DriverError::Unauthorized(message) => {
            RestError::Unauthorized { scheme: "Bearer", realm, message }
        }
        e => RestError::from(e),
    }
}

/// Extractor for the claims of a valid access token presented in the request.
#[derive(Debug)]
pub struct Authenticated(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    TokenAuthority: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authority = TokenAuthority::from_ref(state);
        let token = get_bearer_auth(&parts.headers, authority.realm())?;
        let claims = authority.verify(&token).map_err(authn_error_to_rest(authority.realm()))?;
        Ok(Authenticated(claims))
    }
}

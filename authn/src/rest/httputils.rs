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

//! Parsing of the `Authorization` header.

use crate::model::AccessToken;
use http::header::HeaderMap;
use stayhub_core::rest::{RestError, RestResult, get_unique_header};

/// Authorization scheme used by access tokens.
const SCHEME: &str = "Bearer";

/// Builds an `Unauthorized` error for the bearer scheme in `realm` with `message`.
fn unauthorized<S: Into<String>>(realm: &'static str, message: S) -> RestError {
    RestError::Unauthorized { scheme: SCHEME, realm, message: message.into() }
}

/// Extracts the bearer token from `headers`.  Every failure is a 401 challenge for `exp_realm`.
pub fn get_bearer_auth(headers: &HeaderMap, exp_realm: &'static str) -> RestResult<AccessToken> {
    let authz = match get_unique_header(headers, &http::header::AUTHORIZATION) {
        Ok(Some(value)) => value,
        Ok(None) => {
            return Err(unauthorized(exp_realm, "No token provided, authorization denied"));
        }
        Err(e) => return Err(unauthorized(exp_realm, e.to_string())),
    };

    let authz = match authz.to_str() {
        Ok(value) => value,
        Err(e) => {
            return Err(unauthorized(
                exp_realm,
                format!("Bad encoding in Authorization header: {}", e),
            ));
        }
    };

    let payload = match authz.split_once(' ') {
        Some((scheme, payload)) if scheme == SCHEME => payload,
        Some(_) => return Err(unauthorized(exp_realm, "Unsupported scheme")),
        None if authz.is_empty() => {
            return Err(unauthorized(exp_realm, "Bad Authorization header: missing scheme"));
        }
        None => return Err(unauthorized(exp_realm, "Bad Authorization header: missing payload")),
    };

    match AccessToken::new(payload) {
        Ok(token) => Ok(token),
        Err(_) => Err(unauthorized(exp_realm, "Invalid or expired token")),
    }
}

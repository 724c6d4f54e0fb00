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

//! REST service for short-term property rentals.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::{info, warn};
use stayhub_authn::driver::{AuthnOptions, TokenAuthority};
use stayhub_core::clocks::Clock;
use stayhub_core::db::Db;
use stayhub_core::env::get_optional_var;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod db;
mod driver;
use driver::Driver;
pub mod model;
mod rest;
use rest::app;

/// Authentication realm reported in the challenges returned by the service.
pub const REALM: &str = "stayhub";

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Service-level configuration options.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ServiceOptions {
    /// Port to listen on.
    pub port: u16,

    /// Secret to sign access tokens with.  Logins and writes fail while this is unset.
    pub jwt_secret: Option<String>,

    /// Options for the token authority.
    pub authn: AuthnOptions,

    /// Endpoint for error telemetry, if any.
    pub sentry_dsn: Option<String>,
}

impl ServiceOptions {
    /// Initializes the service options from the `PORT`, `JWT_*` and `SENTRY_DSN` environment
    /// variables.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: get_optional_var::<u16>("", "PORT")?.unwrap_or(DEFAULT_PORT),
            jwt_secret: get_optional_var::<String>("JWT", "SECRET")?,
            authn: AuthnOptions::from_env("JWT")?,
            sentry_dsn: get_optional_var::<String>("SENTRY", "DSN")?,
        })
    }
}

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// The caller retains ownership of `db` so that it can close it once serving stops.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
    opts: ServiceOptions,
) -> Result<(), Box<dyn Error>> {
    if opts.jwt_secret.is_none() {
        warn!("JWT_SECRET is not set; logins and writes will fail");
    }
    if let Some(dsn) = opts.sentry_dsn.as_ref() {
        info!("Error telemetry requested at {} but not supported; ignoring", dsn);
    }

    let authority = TokenAuthority::new(opts.jwt_secret.as_deref(), clock, REALM, opts.authn);
    let driver = Driver::new(db, authority);
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_service_options_from_env_defaults() {
        temp_env::with_vars_unset(["PORT", "JWT_SECRET", "JWT_TOKEN_MAX_AGE", "SENTRY_DSN"], || {
            let opts = ServiceOptions::from_env().unwrap();
            assert_eq!(
                ServiceOptions {
                    port: 3000,
                    jwt_secret: None,
                    authn: AuthnOptions::default(),
                    sentry_dsn: None,
                },
                opts
            );
        });
    }

    #[test]
    fn test_service_options_from_env_all_present() {
        let overrides = [
            ("PORT", Some("8080")),
            ("JWT_SECRET", Some("s3cr3t")),
            ("JWT_TOKEN_MAX_AGE", Some("30m")),
            ("SENTRY_DSN", Some("https://key@sentry.example.com/1")),
        ];
        temp_env::with_vars(overrides, || {
            let opts = ServiceOptions::from_env().unwrap();
            assert_eq!(
                ServiceOptions {
                    port: 8080,
                    jwt_secret: Some("s3cr3t".to_owned()),
                    authn: AuthnOptions { token_max_age: Duration::from_secs(30 * 60) },
                    sentry_dsn: Some("https://key@sentry.example.com/1".to_owned()),
                },
                opts
            );
        });
    }

    #[test]
    fn test_service_options_from_env_bad_port() {
        temp_env::with_var("PORT", Some("http"), || {
            let err = ServiceOptions::from_env().unwrap_err();
            assert!(err.starts_with("Invalid type in environment variable PORT"));
        });
    }
}

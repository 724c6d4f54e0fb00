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

//! Building blocks for the HTTP layer of a service.
//!
//! All services should implement an `app` function in their `rest` module that returns the
//! `Router` for the application.
//!
//! Each API lives in its own file named `<entity>_<method>.rs` (such as `users_post.rs` for
//! `POST /users`), next to the tests that exercise it.  The tests of an API obtain the method and
//! path under test from a local `route` function so that they cannot accidentally target a
//! different API.
//!
//! Services usually also provide a `testutils::TestContext` that wraps the router and offers
//! direct database access to prepare and inspect state around each request.

use crate::driver::DriverError;
use crate::model::ModelError;
use async_trait::async_trait;
use axum::Json;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Request};
use axum::http::header::AsHeaderName;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Errors reported to API clients, each mapping to one HTTP status code.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RestError {
    /// The caller is known but not allowed to perform the operation (403).
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Anything the client cannot fix (500).  Logged when turned into a response.
    #[error("{0}")]
    InternalError(String),

    /// The request is malformed or fails validation (400).
    #[error("{0}")]
    InvalidRequest(String),

    /// The target of the request, or an entity it references, does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// The request carried a body where none is accepted (413).
    #[error("Content should be empty")]
    PayloadNotEmpty,

    /// The caller did not prove its identity (401).  Carries the challenge to return.
    #[error("{message}")]
    Unauthorized {
        /// Scheme for the `WWW-Authenticate` challenge, such as `Bearer`.
        scheme: &'static str,

        /// Realm for the `WWW-Authenticate` challenge.
        realm: &'static str,

        /// Human-readable reason, returned in the error body.
        message: String,
    },
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(e.to_string()),
            DriverError::Unauthorized(_) => RestError::Forbidden(e.to_string()),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status;
        let mut headers = HeaderMap::new();
        match &self {
            RestError::Forbidden(_) => {
                status = http::StatusCode::FORBIDDEN;
            }
            RestError::InternalError(message) => {
                error!("Request failed with an internal error: {}", message);
                status = http::StatusCode::INTERNAL_SERVER_ERROR;
            }
            RestError::InvalidRequest(_) => {
                status = http::StatusCode::BAD_REQUEST;
            }
            RestError::NotFound(_) => {
                status = http::StatusCode::NOT_FOUND;
            }
            RestError::PayloadNotEmpty => {
                status = http::StatusCode::PAYLOAD_TOO_LARGE;
            }
            RestError::Unauthorized { scheme, realm, message: _ } => {
                status = http::StatusCode::UNAUTHORIZED;
                if let Ok(value) = HeaderValue::from_str(&format!("{} realm=\"{}\"", scheme, realm))
                {
                    headers.insert(http::header::WWW_AUTHENTICATE, value);
                }
            }
        };

        let response = ErrorResponse { message: self.to_string() };

        (status, headers, Json(response)).into_response()
    }
}

/// Result type for REST handlers.
pub type RestResult<T> = Result<T, RestError>;

/// JSON body of every error response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// Description of the failure.
    pub message: String,
}

/// Extractor that rejects requests carrying a body.
///
/// APIs without input take this so that clients sending data by mistake get an error instead of
/// having their payload silently ignored.
pub struct EmptyBody {}

#[async_trait]
impl<S> FromRequest<S> for EmptyBody
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        if req.into_body().is_end_stream() {
            Ok(EmptyBody {})
        } else {
            Err(RestError::PayloadNotEmpty)
        }
    }
}

/// A request body extractor that parses a JSON payload into `T`.
///
/// This behaves like `axum::Json` but reports any rejection (missing content type, syntax errors
/// or type mismatches) as a `RestError` so that clients always get an `ErrorResponse`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = RestError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(e) => Err(RestError::InvalidRequest(e.body_text())),
        }
    }
}

/// Returns the value of header `name`, if present, failing if it was given more than once.
pub fn get_unique_header<K: AsHeaderName + Copy>(
    headers: &HeaderMap,
    name: K,
) -> RestResult<Option<&HeaderValue>> {
    let mut iter = headers.get_all(name).iter();
    let value = iter.next();
    if iter.next().is_some() {
        return Err(RestError::InvalidRequest(format!(
            "Header {} cannot have more than one value",
            name.as_str()
        )));
    }
    Ok(value)
}

/// Middleware that logs every request once it completes, along with its status and duration.
///
/// Install with `axum::middleware::from_fn(log_request_duration)`.
pub async fn log_request_duration(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    info!(
        "{} {} {} - {}ms",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

/// Harness to send requests through a router in tests and check the responses.
#[cfg(feature = "testutils")]
pub mod testutils {
    use super::*;
    use axum::Router;
    use axum::http::{self, HeaderName};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use std::fmt;
    use tower::util::ServiceExt;

    /// Largest response body that tests will read.
    const MAX_BODY_SIZE: usize = 64 * 1024;

    /// Builds and sends one request through a router.
    #[must_use]
    pub struct OneShotBuilder {
        /// Router that handles the request.
        app: Router,

        /// Request under construction.
        builder: axum::http::request::Builder,
    }

    impl OneShotBuilder {
        /// Starts a request for the `(method, uri)` pair, usually obtained from `route()`.
        pub fn new<U: AsRef<str>>(app: Router, (method, uri): (http::Method, U)) -> Self {
            let builder = Request::builder().method(method).uri(uri.as_ref());
            Self { app, builder }
        }

        /// Appends `query`, URL-encoded, to a URI that has no query yet.
        pub fn with_query<Q: Serialize>(mut self, query: Q) -> Self {
            let uri = self.builder.uri_ref().unwrap().to_string();
            assert!(!uri.contains('?'), "URI already contains a query: {}", uri);
            self.builder = self.builder.uri(format!(
                "{}?{}",
                uri,
                serde_urlencoded::to_string(query).unwrap()
            ));
            self
        }

        /// Sets `Authorization: Bearer <token>`.
        pub fn with_bearer_auth<T>(mut self, token: T) -> Self
        where
            T: fmt::Display,
        {
            let value = format!("Bearer {}", token);
            self.builder = self.builder.header(http::header::AUTHORIZATION, value);
            self
        }

        /// Adds an arbitrary header.
        pub fn with_header<K, V>(mut self, name: K, value: V) -> Self
        where
            HeaderName: TryFrom<K>,
            <HeaderName as TryFrom<K>>::Error: Into<http::Error>,
            HeaderValue: TryFrom<V>,
            <HeaderValue as TryFrom<V>>::Error: Into<http::Error>,
        {
            self.builder = self.builder.header(name, value);
            self
        }

        /// Sends the request without a body.
        pub async fn send_empty(self) -> ResponseChecker {
            let request = self.builder.body(axum::body::Body::empty()).unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Sends `text` as a `text/plain` body.
        pub async fn send_text<T: Into<String>>(self, text: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())
                .body(axum::body::Body::from(text.into()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }

        /// Sends `request` serialized as an `application/json` body.
        pub async fn send_json<T: Serialize>(self, request: T) -> ResponseChecker {
            let request = self
                .builder
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(axum::body::Body::from(serde_json::to_vec(&request).unwrap()))
                .unwrap();
            ResponseChecker::from(self.app.oneshot(request).await.unwrap())
        }
    }

    /// Response type produced by the router.
    type HttpResponse = http::Response<axum::body::Body>;

    /// Assertions over the response to a `OneShotBuilder` request.
    #[must_use]
    pub struct ResponseChecker {
        /// Response under inspection.
        response: HttpResponse,

        /// Status the response must have.  Defaults to 200.
        exp_status: http::StatusCode,
    }

    impl From<HttpResponse> for ResponseChecker {
        fn from(response: HttpResponse) -> Self {
            Self { response, exp_status: http::StatusCode::OK }
        }
    }

    impl ResponseChecker {
        /// Expects `status` instead of 200.
        pub fn expect_status(mut self, status: http::StatusCode) -> Self {
            self.exp_status = status;
            self
        }

        /// Checks the status of the response.
        pub fn verify(&self) {
            assert_eq!(self.exp_status, self.response.status());
        }

        /// Checks the status and that the body is empty.
        pub async fn expect_empty(self) {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let body = String::from_utf8(body.to_vec()).unwrap();
            assert!(body.is_empty(), "Body not empty; got {}", body);
        }

        /// Checks the status and that the body is an `ErrorResponse` whose message matches the
        /// `exp_re` regular expression.
        pub async fn expect_error(self, exp_re: &str) {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            let response: ErrorResponse = match serde_json::from_slice(&body) {
                Ok(response) => response,
                Err(e) => {
                    let body = String::from_utf8(body.to_vec()).unwrap();
                    panic!("Invalid error response due to {}; content was {}", e, body);
                }
            };
            let re = regex::Regex::new(exp_re).unwrap();
            assert!(
                re.is_match(&response.message),
                "Response content '{:?}' does not match re '{}'",
                response,
                exp_re
            );
        }

        /// Checks the status and deserializes the body as `T`.
        pub async fn expect_json<T: DeserializeOwned>(self) -> T {
            self.verify();

            let body =
                axum::body::to_bytes(self.response.into_body(), MAX_BODY_SIZE).await.unwrap();
            match serde_json::from_slice::<T>(&body) {
                Ok(value) => value,
                Err(e) => {
                    let body = String::from_utf8(body.to_vec()).unwrap();
                    panic!("Invalid JSON response due to {}; content was {}", e, body);
                }
            }
        }

        /// Checks the status and hands back the raw response, e.g. to inspect headers.
        pub async fn take_response(self) -> HttpResponse {
            self.verify();

            self.response
        }
    }

    /// Defines `test_payload_must_be_json`, which sends non-JSON bodies to a JSON API.
    ///
    /// APIs that authenticate the caller before looking at the body need a valid `bearer` token.
    #[macro_export]
    macro_rules! test_payload_must_be_json {
        ( $app:expr, $route:expr $(, bearer = $token:expr)? ) => {
            #[tokio::test]
            async fn test_payload_must_be_json() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    $( .with_bearer_auth($token) )?
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_error("Content-Type")
                    .await;

                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    $( .with_bearer_auth($token) )?
                    .with_header(axum::http::header::CONTENT_TYPE, "application/json")
                    .send_text("this is not json")
                    .await
                    .expect_status(axum::http::StatusCode::BAD_REQUEST)
                    .expect_error("expected ident")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_json;

    /// Defines `test_payload_must_be_empty`, which sends a body to an API that takes none.
    ///
    /// APIs that authenticate the caller before looking at the body need a valid `bearer` token.
    #[macro_export]
    macro_rules! test_payload_must_be_empty {
        ( $app:expr, $route:expr $(, bearer = $token:expr)? ) => {
            #[tokio::test]
            async fn test_payload_must_be_empty() {
                $crate::rest::testutils::OneShotBuilder::new($app, $route)
                    $( .with_bearer_auth($token) )?
                    .send_text("should not be here")
                    .await
                    .expect_status(axum::http::StatusCode::PAYLOAD_TOO_LARGE)
                    .expect_error("should be empty")
                    .await;
            }
        };
    }

    pub use test_payload_must_be_empty;
}

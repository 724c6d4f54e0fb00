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

//! API to create a host or to replace an existing one with the same username.

use crate::driver::Driver;
use crate::model::{NewHost, truthy};
use axum::Json;
use axum::extract::State;
use axum::http;
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message returned when the request lacks any of the required fields.
const MISSING_FIELDS_MESSAGE: &str = "Username, name, and phoneNumber are required";

/// Message sent by the client to the server.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct HostRequest {
    /// Unique login name.  Required.
    username: Option<String>,

    /// Display name.  Required.
    name: Option<String>,

    /// Contact email address.
    email: Option<String>,

    /// Contact phone number.  Required.
    phone_number: Option<String>,

    /// URL of the profile picture.
    profile_picture: Option<String>,

    /// Free-form presentation.
    about_me: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: Authenticated,
    JsonBody(request): JsonBody<HostRequest>,
) -> Result<(http::StatusCode, impl IntoResponse), RestError> {
    let (Some(username), Some(name), Some(phone_number)) =
        (truthy(request.username), truthy(request.name), truthy(request.phone_number))
    else {
        return Err(RestError::InvalidRequest(MISSING_FIELDS_MESSAGE.to_owned()));
    };

    let host = NewHost {
        username,
        name,
        phone_number,
        email: truthy(request.email),
        profile_picture: truthy(request.profile_picture),
        about_me: truthy(request.about_me),
    };
    let host = driver.create_host(host).await?;
    Ok((http::StatusCode::CREATED, Json(host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::model::Host;
    use crate::rest::testutils::*;
    use stayhub_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/hosts".to_owned())
    }

    fn owner_request() -> HostRequest {
        HostRequest {
            username: Some("owner".to_owned()),
            name: Some("The Owner".to_owned()),
            email: Some("owner@example.com".to_owned()),
            phone_number: Some("555-0123".to_owned()),
            profile_picture: None,
            about_me: Some("I like guests".to_owned()),
        }
    }

    #[tokio::test]
    async fn test_create() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.token())
            .send_json(owner_request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Host>()
            .await;
        assert_eq!("owner", response.username);
        assert_eq!("The Owner", response.name);
        assert_eq!(Some("owner@example.com"), response.email.as_deref());
        assert_eq!("555-0123", response.phone_number);
        assert_eq!(None, response.profile_picture);
        assert_eq!(Some("I like guests"), response.about_me.as_deref());

        assert_eq!(response, context.get_host(&response.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_keeps_omitted_optional_fields() {
        let context = TestContext::setup().await;

        let first = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.token())
            .send_json(owner_request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Host>()
            .await;

        let request = HostRequest {
            name: Some("Renamed".to_owned()),
            email: None,
            about_me: Some(String::new()),
            ..owner_request()
        };
        let second = OneShotBuilder::new(context.app(), route())
            .with_bearer_auth(context.token())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<Host>()
            .await;

        assert_eq!(Host { name: "Renamed".to_owned(), ..first }, second);
        let hosts = db::list_hosts(&mut context.ex().await, &Default::default()).await.unwrap();
        assert_eq!(vec![second], hosts);
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let context = TestContext::setup().await;

        for request in [
            HostRequest::default(),
            HostRequest { username: None, ..owner_request() },
            HostRequest { name: Some(String::new()), ..owner_request() },
            HostRequest { phone_number: None, ..owner_request() },
        ] {
            OneShotBuilder::new(context.app(), route())
                .with_bearer_auth(context.token())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(MISSING_FIELDS_MESSAGE)
                .await;
        }
    }

    #[tokio::test]
    async fn test_no_token() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(owner_request())
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("No token provided")
            .await;

        let hosts = db::list_hosts(&mut context.ex().await, &Default::default()).await.unwrap();
        assert!(hosts.is_empty());
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route(),
        bearer = TestContext::setup().await.token()
    );
}

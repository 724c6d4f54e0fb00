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

//! API to modify an existing host.

use crate::driver::Driver;
use crate::model::{HostId, HostUpdate, falsy_as_none, truthy};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{JsonBody, RestError};

/// Message sent by the client to the server.  Falsy fields of any JSON type are ignored.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct HostUpdateRequest {
    /// New login name.
    #[serde(default, deserialize_with = "falsy_as_none")]
    username: Option<String>,

    /// New display name.
    #[serde(default, deserialize_with = "falsy_as_none")]
    name: Option<String>,

    /// New contact email address.
    #[serde(default, deserialize_with = "falsy_as_none")]
    email: Option<String>,

    /// New contact phone number.
    #[serde(default, deserialize_with = "falsy_as_none")]
    phone_number: Option<String>,

    /// New profile picture URL.
    #[serde(default, deserialize_with = "falsy_as_none")]
    profile_picture: Option<String>,

    /// New presentation.
    #[serde(default, deserialize_with = "falsy_as_none")]
    about_me: Option<String>,
}

impl From<HostUpdateRequest> for HostUpdate {
    fn from(request: HostUpdateRequest) -> Self {
        Self {
            username: truthy(request.username),
            name: truthy(request.name),
            email: truthy(request.email),
            phone_number: truthy(request.phone_number),
            profile_picture: truthy(request.profile_picture),
            about_me: truthy(request.about_me),
        }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<HostId>,
    _: Authenticated,
    JsonBody(request): JsonBody<HostUpdateRequest>,
) -> Result<impl IntoResponse, RestError> {
    let host = driver.update_host(&id, HostUpdate::from(request)).await?;
    Ok(Json(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Host;
    use crate::rest::testutils::*;
    use axum::http;
    use stayhub_core::rest::testutils::*;

    fn route(id: &HostId) -> (http::Method, String) {
        (http::Method::PUT, format!("/hosts/{}", id))
    }

    #[tokio::test]
    async fn test_update() {
        let context = TestContext::setup().await;
        let host = context.create_host("owner").await;

        let request = HostUpdateRequest {
            about_me: Some("Superhost".to_owned()),
            email: Some("owner@example.com".to_owned()),
            phone_number: Some(String::new()),
            ..Default::default()
        };
        let response = OneShotBuilder::new(context.app(), route(&host.id))
            .with_bearer_auth(context.token())
            .send_json(request)
            .await
            .expect_json::<Host>()
            .await;

        let exp_host = Host {
            about_me: Some("Superhost".to_owned()),
            email: Some("owner@example.com".to_owned()),
            ..host
        };
        assert_eq!(exp_host, response);
        assert_eq!(exp_host, context.get_host(&exp_host.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_falsy_values_of_any_type_are_ignored() {
        let context = TestContext::setup().await;
        let host = context.create_host("owner").await;

        let request = serde_json::json!({
            "username": false,
            "name": 0,
            "email": "",
            "phoneNumber": null,
            "aboutMe": false,
        });
        let response = OneShotBuilder::new(context.app(), route(&host.id))
            .with_bearer_auth(context.token())
            .send_json(request)
            .await
            .expect_json::<Host>()
            .await;
        assert_eq!(host, response);
        assert_eq!(host, context.get_host(&host.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        let request = HostUpdateRequest { name: Some("X".to_owned()), ..Default::default() };
        OneShotBuilder::new(context.app(), route(&HostId::new("unknown")))
            .with_bearer_auth(context.token())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Host not found")
            .await;
    }

    #[tokio::test]
    async fn test_no_token() {
        let context = TestContext::setup().await;
        let host = context.create_host("owner").await;

        let request = HostUpdateRequest { name: Some("X".to_owned()), ..Default::default() };
        OneShotBuilder::new(context.app(), route(&host.id))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("No token provided")
            .await;

        assert_eq!(host, context.get_host(&host.id).await.unwrap());
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route(&HostId::new("irrelevant")),
        bearer = TestContext::setup().await.token()
    );
}

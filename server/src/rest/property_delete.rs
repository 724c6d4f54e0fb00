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

//! API to delete a property and its bookings.

use crate::driver::Driver;
use crate::model::PropertyId;
use crate::rest::MessageResponse;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use stayhub_authn::rest::Authenticated;
use stayhub_core::rest::{EmptyBody, RestError};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<PropertyId>,
    _: Authenticated,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let message = driver.delete_property(&id).await?;
    Ok(Json(MessageResponse { message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use stayhub_core::db::DbError;
    use stayhub_core::rest::testutils::*;

    fn route(id: &PropertyId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/properties/{}", id))
    }

    #[tokio::test]
    async fn test_ok_with_bookings() {
        let context = TestContext::setup().await;
        let (user, property) = context.create_stay().await;
        let other = context.create_property(&property.host_id, "Loft", "City", 99.0, vec![]).await;
        let booking1 = context.create_booking(&user.id, &property.id).await;
        let booking2 = context.create_booking(&user.id, &property.id).await;
        let booking3 = context.create_booking(&user.id, &other.id).await;

        let response = OneShotBuilder::new(context.app(), route(&property.id))
            .with_bearer_auth(context.token())
            .send_empty()
            .await
            .expect_json::<MessageResponse>()
            .await;
        assert_eq!("Property Cabin deleted successfully", response.message);

        assert_eq!(DbError::NotFound, context.get_property(&property.id).await.unwrap_err());
        assert_eq!(DbError::NotFound, context.get_booking(&booking1.id).await.unwrap_err());
        assert_eq!(DbError::NotFound, context.get_booking(&booking2.id).await.unwrap_err());
        context.get_property(&other.id).await.unwrap();
        context.get_booking(&booking3.id).await.unwrap();
        context.get_user(&user.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_blocked_by_reviews() {
        let context = TestContext::setup().await;
        let (user, property) = context.create_stay().await;
        let booking = context.create_booking(&user.id, &property.id).await;
        let review = context.create_review(&user.id, &property.id).await;

        OneShotBuilder::new(context.app(), route(&property.id))
            .with_bearer_auth(context.token())
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .verify();

        context.get_property(&property.id).await.unwrap();
        context.get_booking(&booking.id).await.unwrap();
        context.get_review(&review.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(&PropertyId::new("unknown")))
            .with_bearer_auth(context.token())
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Property not found")
            .await;
    }

    #[tokio::test]
    async fn test_no_token() {
        let context = TestContext::setup().await;
        let (user, property) = context.create_stay().await;
        let booking = context.create_booking(&user.id, &property.id).await;

        OneShotBuilder::new(context.app(), route(&property.id))
            .send_empty()
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("No token provided")
            .await;

        context.get_property(&property.id).await.unwrap();
        context.get_booking(&booking.id).await.unwrap();
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(&PropertyId::new("irrelevant")),
        bearer = TestContext::setup().await.token()
    );
}

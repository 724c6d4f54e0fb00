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

//! API to list properties.

use crate::driver::Driver;
use crate::model::{PropertyFilter, truthy};
use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use stayhub_core::rest::{EmptyBody, RestError};

/// Optional criteria accepted in the query string.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PropertiesQuery {
    /// Text to look for in locations.
    location: Option<String>,

    /// Exact price per night to match.
    price_per_night: Option<String>,

    /// Comma-separated names of amenities, any of which must be present.
    amenities: Option<String>,
}

impl TryFrom<PropertiesQuery> for PropertyFilter {
    type Error = RestError;

    fn try_from(query: PropertiesQuery) -> Result<Self, Self::Error> {
        let price_per_night = match truthy(query.price_per_night) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(price) if price.is_finite() => Some(price),
                _ => {
                    return Err(RestError::InvalidRequest(format!(
                        "Invalid pricePerNight '{}'",
                        raw
                    )));
                }
            },
            None => None,
        };

        let amenities = match truthy(query.amenities) {
            Some(raw) => {
                raw.split(',').filter(|name| !name.is_empty()).map(str::to_owned).collect()
            }
            None => vec![],
        };

        Ok(Self { location: truthy(query.location), price_per_night, amenities })
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<PropertiesQuery>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let filter = PropertyFilter::try_from(query)?;
    let properties = driver.list_properties(&filter).await?;
    Ok(Json(properties))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Property;
    use crate::rest::testutils::*;
    use axum::http;
    use stayhub_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/properties".to_owned())
    }

    /// Creates a few properties with different attributes and returns them sorted by title.
    async fn setup_properties(context: &TestContext) -> (Property, Property, Property) {
        let wifi = context.create_amenity("Wifi").await;
        let pool = context.create_amenity("Pool").await;
        let host = context.create_host("owner").await;
        let cabin = context
            .create_property(&host.id, "Cabin", "Black Forest", 80.0, vec![wifi.id.clone()])
            .await;
        let loft = context.create_property(&host.id, "Loft", "Berlin", 120.0, vec![]).await;
        let villa = context
            .create_property(&host.id, "Villa", "Costa Brava", 80.0, vec![wifi.id, pool.id])
            .await;
        (cabin, loft, villa)
    }

    #[tokio::test]
    async fn test_all() {
        let context = TestContext::setup().await;
        let (cabin, loft, villa) = setup_properties(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![cabin, loft, villa], response);
    }

    #[tokio::test]
    async fn test_filter_by_location() {
        let context = TestContext::setup().await;
        let (cabin, _loft, _villa) = setup_properties(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                location: Some("forest".to_owned()),
                ..Default::default()
            })
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![cabin], response);
    }

    #[tokio::test]
    async fn test_filter_by_price() {
        let context = TestContext::setup().await;
        let (cabin, _loft, villa) = setup_properties(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                price_per_night: Some("80".to_owned()),
                ..Default::default()
            })
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![cabin, villa], response);
    }

    #[tokio::test]
    async fn test_filter_by_amenities() {
        let context = TestContext::setup().await;
        let (cabin, _loft, villa) = setup_properties(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                amenities: Some("Pool".to_owned()),
                ..Default::default()
            })
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![villa.clone()], response);

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                amenities: Some("Sauna,Wifi".to_owned()),
                ..Default::default()
            })
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![cabin, villa], response);
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let context = TestContext::setup().await;
        let (_cabin, _loft, villa) = setup_properties(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                location: Some("costa".to_owned()),
                price_per_night: Some("80".to_owned()),
                amenities: Some("Wifi".to_owned()),
            })
            .send_empty()
            .await
            .expect_json::<Vec<Property>>()
            .await;
        assert_eq!(vec![villa], response);
    }

    #[tokio::test]
    async fn test_bad_price() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query(PropertiesQuery {
                price_per_night: Some("cheap".to_owned()),
                ..Default::default()
            })
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Invalid pricePerNight 'cheap'")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}

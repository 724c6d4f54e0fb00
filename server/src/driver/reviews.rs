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

//! Operations on reviews.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{NewReview, Review, ReviewId, ReviewUpdate};
use stayhub_core::driver::DriverResult;

impl Driver {
    /// Gets all reviews.
    pub(crate) async fn list_reviews(self) -> DriverResult<Vec<Review>> {
        let reviews = db::list_reviews(&mut self.db.ex().await?).await?;
        Ok(reviews)
    }

    /// Gets the review identified by `id`.
    pub(crate) async fn get_review(self, id: &ReviewId) -> DriverResult<Review> {
        db::get_review(&mut self.db.ex().await?, id).await.map_err(not_found("Review"))
    }

    /// Creates a new review after checking that its user and property exist.
    pub(crate) async fn create_review(self, review: NewReview) -> DriverResult<Review> {
        let mut tx = self.db.begin().await?;
        db::get_user(tx.ex(), &review.user_id).await.map_err(not_found("User"))?;
        db::get_property(tx.ex(), &review.property_id).await.map_err(not_found("Property"))?;
        let review = db::create_review(tx.ex(), &review).await?;
        tx.commit().await?;
        Ok(review)
    }

    /// Applies `update` to the review identified by `id` and returns the modified review.
    pub(crate) async fn update_review(
        self,
        id: &ReviewId,
        update: ReviewUpdate,
    ) -> DriverResult<Review> {
        let mut tx = self.db.begin().await?;
        db::get_review(tx.ex(), id).await.map_err(not_found("Review"))?;
        if let Some(user_id) = update.user_id.as_ref() {
            db::get_user(tx.ex(), user_id).await.map_err(not_found("User"))?;
        }
        if let Some(property_id) = update.property_id.as_ref() {
            db::get_property(tx.ex(), property_id).await.map_err(not_found("Property"))?;
        }
        db::update_review(tx.ex(), id, &update).await.map_err(not_found("Review"))?;
        let review = db::get_review(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(review)
    }

    /// Deletes the review identified by `id` and returns a message describing the deletion.
    pub(crate) async fn delete_review(self, id: &ReviewId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        db::delete_review(tx.ex(), id).await.map_err(not_found("Review"))?;
        tx.commit().await?;
        Ok(format!("Review with ID {} deleted successfully", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutils::*;
    use crate::driver::testutils::*;
    use crate::model::{PropertyId, UserId};
    use stayhub_core::db::DbError;
    use stayhub_core::driver::DriverError;

    /// Creates a user and a property to attach reviews to.
    async fn setup_references(context: &TestContext) -> (UserId, PropertyId) {
        let mut ex = context.ex().await;
        let user = create_simple_user(&mut ex, "guest").await;
        let host = create_simple_host(&mut ex, "host").await;
        let property = create_simple_property(&mut ex, &host.id, "A", "Lima", 10.0, vec![]).await;
        (user.id, property.id)
    }

    #[tokio::test]
    async fn test_create_review_ok() {
        let context = TestContext::setup().await;
        let (user_id, property_id) = setup_references(&context).await;

        let new_review = NewReview {
            rating: 5,
            comment: "Great".to_owned(),
            user_id: user_id.clone(),
            property_id: property_id.clone(),
        };
        let review = context.driver().create_review(new_review).await.unwrap();
        assert_eq!(
            Review {
                id: review.id.clone(),
                rating: 5,
                comment: "Great".to_owned(),
                user_id,
                property_id,
            },
            review
        );
        assert_eq!(vec![review], context.driver().list_reviews().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_review_unknown_references() {
        let context = TestContext::setup().await;
        let (user_id, property_id) = setup_references(&context).await;

        let new_review = NewReview {
            rating: 5,
            comment: "Great".to_owned(),
            user_id: UserId::new("missing"),
            property_id: property_id.clone(),
        };
        assert_eq!(
            DriverError::NotFound("User not found".to_owned()),
            context.driver().create_review(new_review).await.unwrap_err()
        );

        let new_review = NewReview {
            rating: 5,
            comment: "Great".to_owned(),
            user_id,
            property_id: PropertyId::new("missing"),
        };
        assert_eq!(
            DriverError::NotFound("Property not found".to_owned()),
            context.driver().create_review(new_review).await.unwrap_err()
        );

        assert!(db::list_reviews(&mut context.ex().await).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_review_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Review not found".to_owned()),
            context.driver().get_review(&ReviewId::new("missing")).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_review() {
        let context = TestContext::setup().await;
        let (user_id, property_id) = setup_references(&context).await;

        let review = create_simple_review(&mut context.ex().await, &user_id, &property_id).await;

        let update = ReviewUpdate { comment: Some("Changed".to_owned()), ..Default::default() };
        let updated = context.driver().update_review(&review.id, update).await.unwrap();
        assert_eq!(Review { comment: "Changed".to_owned(), ..review.clone() }, updated);

        let update =
            ReviewUpdate { property_id: Some(PropertyId::new("missing")), ..Default::default() };
        assert_eq!(
            DriverError::NotFound("Property not found".to_owned()),
            context.driver().update_review(&review.id, update).await.unwrap_err()
        );

        assert_eq!(
            DriverError::NotFound("Review not found".to_owned()),
            context
                .driver()
                .update_review(&ReviewId::new("missing"), ReviewUpdate::default())
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_review() {
        let context = TestContext::setup().await;
        let (user_id, property_id) = setup_references(&context).await;

        let review = create_simple_review(&mut context.ex().await, &user_id, &property_id).await;

        let message = context.driver().delete_review(&review.id).await.unwrap();
        assert_eq!(format!("Review with ID {} deleted successfully", review.id), message);
        assert_eq!(
            DbError::NotFound,
            db::get_review(&mut context.ex().await, &review.id).await.unwrap_err()
        );

        assert_eq!(
            DriverError::NotFound("Review not found".to_owned()),
            context.driver().delete_review(&review.id).await.unwrap_err()
        );
    }
}

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

//! Operations on users.

use crate::db;
use crate::driver::{Driver, not_found};
use crate::model::{NewUser, User, UserFilter, UserId, UserUpdate};
use stayhub_authn::model::Password;
use stayhub_core::db::DbError;
use stayhub_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Gets all users that match `filter`.
    pub(crate) async fn list_users(self, filter: &UserFilter) -> DriverResult<Vec<User>> {
        let users = db::list_users(&mut self.db.ex().await?, filter).await?;
        Ok(users)
    }

    /// Gets the user identified by `id`.
    pub(crate) async fn get_user(self, id: &UserId) -> DriverResult<User> {
        db::get_user(&mut self.db.ex().await?, id).await.map_err(not_found("User"))
    }

    /// Creates a new user or replaces the existing user with the same username.
    pub(crate) async fn create_user(self, user: NewUser, password: Password) -> DriverResult<User> {
        let password = password.hash()?;

        let mut tx = self.db.begin().await?;
        let user = db::upsert_user(tx.ex(), &user, &password).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Applies `update` to the user identified by `id` and returns the modified user.
    pub(crate) async fn update_user(self, id: &UserId, update: UserUpdate) -> DriverResult<User> {
        let mut tx = self.db.begin().await?;
        db::update_user(tx.ex(), id, &update).await.map_err(|e| match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(format!(
                "Username {} is already taken",
                update.username.as_deref().unwrap_or_default()
            )),
            e => not_found("User")(e),
        })?;
        let user = db::get_user(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Deletes the user identified by `id` together with the reviews they wrote.
    ///
    /// Returns a message describing the deletion.
    pub(crate) async fn delete_user(self, id: &UserId) -> DriverResult<String> {
        let mut tx = self.db.begin().await?;
        let user = db::get_user(tx.ex(), id).await.map_err(not_found("User"))?;
        db::delete_reviews_by_user(tx.ex(), id).await?;
        db::delete_user(tx.ex(), id).await.map_err(|e| match e {
            DbError::ForeignKeyViolation => DriverError::InvalidInput(
                "Unable to delete user due to foreign key constraints".to_owned(),
            ),
            e => not_found("User")(e),
        })?;
        tx.commit().await?;
        Ok(format!("User {} deleted successfully", user.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutils::*;
    use crate::driver::testutils::*;

    #[tokio::test]
    async fn test_list_users() {
        let context = TestContext::setup().await;

        let user1 = create_simple_user(&mut context.ex().await, "first").await;
        let user2 = create_simple_user(&mut context.ex().await, "second").await;

        let users = context.driver().list_users(&UserFilter::default()).await.unwrap();
        assert_eq!(vec![user1, user2.clone()], users);

        let filter = UserFilter { username: Some("SEC".to_owned()), email: None };
        let users = context.driver().list_users(&filter).await.unwrap();
        assert_eq!(vec![user2], users);
    }

    #[tokio::test]
    async fn test_get_user_ok() {
        let context = TestContext::setup().await;

        let user = create_simple_user(&mut context.ex().await, "someone").await;

        assert_eq!(user, context.driver().get_user(&user.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User not found".to_owned()),
            context.driver().get_user(&UserId::new("missing")).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let context = TestContext::setup().await;

        let new_user = NewUser {
            username: "jdoe".to_owned(),
            name: "John Doe".to_owned(),
            email: "jdoe@example.com".to_owned(),
            phone_number: None,
            profile_picture: None,
        };
        let user =
            context.driver().create_user(new_user, Password::from("secret")).await.unwrap();
        assert_ne!("secret", user.password.as_str());
        assert!(Password::from("secret").verify(&user.password).unwrap());

        let stored = db::get_user(&mut context.ex().await, &user.id).await.unwrap();
        assert_eq!(user, stored);
    }

    #[tokio::test]
    async fn test_create_user_upserts_by_username() {
        let context = TestContext::setup().await;

        let user = create_simple_user(&mut context.ex().await, "jdoe").await;

        let new_user = NewUser {
            username: "jdoe".to_owned(),
            name: "Other name".to_owned(),
            email: "other@example.com".to_owned(),
            phone_number: Some("555-0123".to_owned()),
            profile_picture: None,
        };
        let updated =
            context.driver().create_user(new_user, Password::from("other")).await.unwrap();
        assert_eq!(user.id, updated.id);
        assert_eq!("Other name", updated.name);
        assert_eq!(Some("555-0123"), updated.phone_number.as_deref());

        let users = db::list_users(&mut context.ex().await, &UserFilter::default()).await.unwrap();
        assert_eq!(vec![updated], users);
    }

    #[tokio::test]
    async fn test_update_user_ok() {
        let context = TestContext::setup().await;

        let user = create_simple_user(&mut context.ex().await, "jdoe").await;

        let update = UserUpdate { email: Some("new@example.com".to_owned()), ..Default::default() };
        let updated = context.driver().update_user(&user.id, update).await.unwrap();
        assert_eq!(User { email: "new@example.com".to_owned(), ..user }, updated);
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User not found".to_owned()),
            context
                .driver()
                .update_user(&UserId::new("missing"), UserUpdate::default())
                .await
                .unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_user_username_taken() {
        let context = TestContext::setup().await;

        let user = create_simple_user(&mut context.ex().await, "first").await;
        create_simple_user(&mut context.ex().await, "second").await;

        let update = UserUpdate { username: Some("second".to_owned()), ..Default::default() };
        assert_eq!(
            DriverError::AlreadyExists("Username second is already taken".to_owned()),
            context.driver().update_user(&user.id, update).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_user_removes_reviews() {
        let context = TestContext::setup().await;

        let mut ex = context.ex().await;
        let user = create_simple_user(&mut ex, "guest").await;
        let host = create_simple_host(&mut ex, "host").await;
        let property =
            create_simple_property(&mut ex, &host.id, "Loft", "Lima", 10.0, vec![]).await;
        create_simple_review(&mut ex, &user.id, &property.id).await;
        drop(ex);

        let message = context.driver().delete_user(&user.id).await.unwrap();
        assert_eq!("User guest deleted successfully", message);

        let mut ex = context.ex().await;
        assert_eq!(DbError::NotFound, db::get_user(&mut ex, &user.id).await.unwrap_err());
        assert!(db::list_reviews(&mut ex).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_user_with_bookings() {
        let context = TestContext::setup().await;

        let mut ex = context.ex().await;
        let user = create_simple_user(&mut ex, "guest").await;
        let host = create_simple_host(&mut ex, "host").await;
        let property =
            create_simple_property(&mut ex, &host.id, "Loft", "Lima", 10.0, vec![]).await;
        create_simple_review(&mut ex, &user.id, &property.id).await;
        create_simple_booking(&mut ex, &user.id, &property.id).await;
        drop(ex);

        assert_eq!(
            DriverError::InvalidInput(
                "Unable to delete user due to foreign key constraints".to_owned()
            ),
            context.driver().delete_user(&user.id).await.unwrap_err()
        );

        // The reviews deleted before the failure must come back.
        let mut ex = context.ex().await;
        db::get_user(&mut ex, &user.id).await.unwrap();
        assert_eq!(1, db::list_reviews(&mut ex).await.unwrap().len());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("User not found".to_owned()),
            context.driver().delete_user(&UserId::new("missing")).await.unwrap_err()
        );
    }
}

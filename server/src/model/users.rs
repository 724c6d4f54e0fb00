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

//! The `User` entity.

use crate::model::UserId;
use serde::Serialize;
use stayhub_authn::model::HashedPassword;

/// A guest of the platform.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier of the user.
    pub id: UserId,

    /// Unique login name.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Credential to check logins against.  Never exposed.
    #[serde(skip)]
    pub password: HashedPassword,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.
    pub phone_number: Option<String>,

    /// URL of the profile picture.
    pub profile_picture: Option<String>,
}

/// Data to create or replace a user by username.
///
/// The password travels separately so that it can be hashed without keeping it around.
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    /// Unique login name, which is the key for upserts.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number.  Left untouched on upserts if not provided.
    pub phone_number: Option<String>,

    /// URL of the profile picture.  Left untouched on upserts if not provided.
    pub profile_picture: Option<String>,
}

/// Partial modification of a user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserUpdate {
    /// New login name.
    pub username: Option<String>,

    /// New contact email address.
    pub email: Option<String>,

    /// New display name.
    pub name: Option<String>,

    /// New contact phone number.
    pub phone_number: Option<String>,

    /// New profile picture URL.
    pub profile_picture: Option<String>,
}

/// Criteria to select users in listings.  Text criteria match case-insensitive substrings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    /// Text to look for in usernames.
    pub username: Option<String>,

    /// Text to look for in email addresses.
    pub email: Option<String>,
}

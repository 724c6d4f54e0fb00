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

//! The `Host` entity.

use crate::model::HostId;
use serde::{Deserialize, Serialize};

/// An owner of properties.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    /// Identifier of the host.
    pub id: HostId,

    /// Unique login name.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Contact email address.
    pub email: Option<String>,

    /// Contact phone number.
    pub phone_number: String,

    /// URL of the profile picture.
    pub profile_picture: Option<String>,

    /// Free-form presentation of the host.
    pub about_me: Option<String>,
}

/// Data to create or replace a host by username.
#[derive(Clone, Debug, PartialEq)]
pub struct NewHost {
    /// Unique login name, which is the key for upserts.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Contact phone number.
    pub phone_number: String,

    /// Contact email address.  Left untouched on upserts if not provided.
    pub email: Option<String>,

    /// URL of the profile picture.  Left untouched on upserts if not provided.
    pub profile_picture: Option<String>,

    /// Free-form presentation.  Left untouched on upserts if not provided.
    pub about_me: Option<String>,
}

/// Partial modification of a host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostUpdate {
    /// New login name.
    pub username: Option<String>,

    /// New display name.
    pub name: Option<String>,

    /// New contact email address.
    pub email: Option<String>,

    /// New contact phone number.
    pub phone_number: Option<String>,

    /// New profile picture URL.
    pub profile_picture: Option<String>,

    /// New presentation.
    pub about_me: Option<String>,
}

/// Criteria to select hosts in listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostFilter {
    /// Text to look for, case-insensitively, in usernames.
    pub name: Option<String>,
}

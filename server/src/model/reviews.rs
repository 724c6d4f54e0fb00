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

//! The `Review` entity.

use crate::model::{PropertyId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// An opinion of a user about a property.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Identifier of the review.
    pub id: ReviewId,

    /// Score given to the property.
    pub rating: i32,

    /// Free-form opinion.
    pub comment: String,

    /// Author of the review.
    pub user_id: UserId,

    /// Reviewed property.
    pub property_id: PropertyId,
}

/// Data to create a review.
#[derive(Clone, Debug, PartialEq)]
pub struct NewReview {
    /// Score given to the property.
    pub rating: i32,

    /// Free-form opinion.
    pub comment: String,

    /// Author of the review, which must exist.
    pub user_id: UserId,

    /// Reviewed property, which must exist.
    pub property_id: PropertyId,
}

/// Partial modification of a review.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewUpdate {
    /// New score.
    pub rating: Option<i32>,

    /// New opinion.
    pub comment: Option<String>,

    /// New author, which must exist.
    pub user_id: Option<UserId>,

    /// New reviewed property, which must exist.
    pub property_id: Option<PropertyId>,
}

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

//! High-level data types.
//!
//! All types serialize with camelCase field names, which is what clients of the REST API see.

use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Generates a newtype for the store-assigned identifier of an entity.
macro_rules! entity_id [
    ( $name:ident, $doc:literal ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize, ToSchema)]
        #[serde(transparent)]
        pub(crate) struct $name(i32);

        impl $name {
            /// Creates an identifier from its raw database representation.
            pub(crate) fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw database representation of the identifier.
            pub(crate) fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    }
];

entity_id!(UserId, "Identifier of a user.");
entity_id!(PostId, "Identifier of a post.");
entity_id!(ProfileId, "Identifier of a profile.");

/// A registered user.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    /// Store-assigned identifier.
    id: UserId,

    /// Email address, unique across users.
    #[schema(example = "alice@example.com")]
    email: String,

    /// Display name.
    name: Option<String>,
}

/// Fields required to create a new user.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewUser {
    /// Email address, unique across users.
    #[schema(example = "alice@example.com")]
    email: String,

    /// Display name.
    name: Option<String>,
}

/// Partial update of a user.  Absent fields keep their stored value.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserUpdate {
    /// New email address.
    email: Option<String>,

    /// New display name.
    name: Option<String>,
}

/// A post written by a user.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
    /// Store-assigned identifier.
    id: PostId,

    /// Title of the post.
    title: String,

    /// Body of the post.
    content: Option<String>,

    /// Whether the post is visible to readers.
    published: bool,

    /// The user that wrote the post.
    author_id: UserId,
}

/// Fields required to create a new post.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPost {
    /// Title of the post.
    title: String,

    /// Body of the post.
    content: Option<String>,

    /// Whether the post is visible to readers.  Defaults to false.
    published: Option<bool>,

    /// The user that writes the post.  Must exist.
    author_id: UserId,
}

/// Partial update of a post.  Absent fields keep their stored value.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostUpdate {
    /// New title.
    title: Option<String>,

    /// New body.
    content: Option<String>,

    /// New visibility.
    published: Option<bool>,
}

/// Extra details about a user.  A user has at most one profile.
#[derive(Clone, Constructor, Debug, Getters, PartialEq, Serialize, ToSchema)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Profile {
    /// Store-assigned identifier.
    id: ProfileId,

    /// Free-form biography.
    bio: Option<String>,

    /// The user this profile describes.
    user_id: UserId,
}

/// Fields required to create a new profile.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewProfile {
    /// Free-form biography.
    bio: Option<String>,

    /// The user this profile describes.  Must exist and not have a profile yet.
    user_id: UserId,
}

/// Partial update of a profile.  Absent fields keep their stored value.
#[derive(Deserialize, Getters, ToSchema)]
#[cfg_attr(test, derive(Constructor, Debug, PartialEq, Serialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileUpdate {
    /// New biography.
    bio: Option<String>,
}

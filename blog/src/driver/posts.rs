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

//! Operations on posts.

use crate::db;
use crate::driver::{Driver, not_found_as};
use crate::model::*;
use iii_iv_core::db::DbError;
use iii_iv_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new post.  The author must exist.
    pub(crate) async fn create_post(self, new: NewPost) -> DriverResult<Post> {
        let mut ex = self.db.ex().await?;
        db::create_post(&mut ex, &new).await.map_err(|e| match e {
            DbError::InvalidReference => {
                DriverError::InvalidInput(format!("Author {} does not exist", new.author_id()))
            }
            e => e.into(),
        })
    }

    /// Gets the post identified by `id`.
    pub(crate) async fn get_post(self, id: PostId) -> DriverResult<Post> {
        let mut ex = self.db.ex().await?;
        db::get_post(&mut ex, id).await.map_err(not_found_as("Post"))
    }

    /// Updates the post identified by `id` with the fields present in `update`.
    pub(crate) async fn update_post(self, id: PostId, update: PostUpdate) -> DriverResult<Post> {
        let mut ex = self.db.ex().await?;
        db::update_post(&mut ex, id, &update).await.map_err(not_found_as("Post"))
    }

    /// Deletes the post identified by `id`.
    pub(crate) async fn delete_post(self, id: PostId) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        db::delete_post(&mut ex, id).await.map_err(not_found_as("Post"))
    }
}

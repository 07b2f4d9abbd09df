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

//! Operations on profiles.

use crate::db;
use crate::driver::{Driver, not_found_as};
use crate::model::*;
use iii_iv_core::db::DbError;
use iii_iv_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new profile.  The user must exist and must not have a profile yet.
    pub(crate) async fn create_profile(self, new: NewProfile) -> DriverResult<Profile> {
        let mut ex = self.db.ex().await?;
        db::create_profile(&mut ex, &new).await.map_err(|e| match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(format!(
                "User {} already has a profile",
                new.user_id()
            )),
            DbError::InvalidReference => {
                DriverError::InvalidInput(format!("User {} does not exist", new.user_id()))
            }
            e => e.into(),
        })
    }

    /// Gets the profile identified by `id`.
    pub(crate) async fn get_profile(self, id: ProfileId) -> DriverResult<Profile> {
        let mut ex = self.db.ex().await?;
        db::get_profile(&mut ex, id).await.map_err(not_found_as("Profile"))
    }

    /// Updates the profile identified by `id` with the fields present in `update`.
    pub(crate) async fn update_profile(
        self,
        id: ProfileId,
        update: ProfileUpdate,
    ) -> DriverResult<Profile> {
        let mut ex = self.db.ex().await?;
        db::update_profile(&mut ex, id, &update).await.map_err(not_found_as("Profile"))
    }

    /// Deletes the profile identified by `id`.
    pub(crate) async fn delete_profile(self, id: ProfileId) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        db::delete_profile(&mut ex, id).await.map_err(not_found_as("Profile"))
    }
}

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
use crate::driver::{Driver, not_found_as};
use crate::model::*;
use iii_iv_core::db::DbError;
use iii_iv_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Creates a new user.
    pub(crate) async fn create_user(self, new: NewUser) -> DriverResult<User> {
        let mut ex = self.db.ex().await?;
        db::create_user(&mut ex, &new).await.map_err(|e| match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(format!(
                "A user with email {} already exists",
                new.email()
            )),
            e => e.into(),
        })
    }

    /// Gets the user identified by `id`.
    pub(crate) async fn get_user(self, id: UserId) -> DriverResult<User> {
        let mut ex = self.db.ex().await?;
        db::get_user(&mut ex, id).await.map_err(not_found_as("User"))
    }

    /// Updates the user identified by `id` with the fields present in `update`.
    pub(crate) async fn update_user(self, id: UserId, update: UserUpdate) -> DriverResult<User> {
        let mut ex = self.db.ex().await?;
        db::update_user(&mut ex, id, &update).await.map_err(|e| match e {
            DbError::AlreadyExists => DriverError::AlreadyExists(format!(
                "A user with email {} already exists",
                update.email().as_deref().unwrap_or_default()
            )),
            e => not_found_as("User")(e),
        })
    }

    /// Deletes the user identified by `id`.
    ///
    /// Users that still own posts or a profile cannot be deleted.
    pub(crate) async fn delete_user(self, id: UserId) -> DriverResult<()> {
        let mut ex = self.db.ex().await?;
        db::delete_user(&mut ex, id).await.map_err(|e| match e {
            DbError::InvalidReference => {
                DriverError::InvalidInput(format!("User {} still has posts or a profile", id))
            }
            e => not_found_as("User")(e),
        })
    }
}

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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use iii_iv_core::db::sqlite::SqliteDb;
use iii_iv_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, exposed for direct inspection.
    db: Arc<SqliteDb>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver backed by a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(iii_iv_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Obtains a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a user with `email` and no name.
    pub(crate) async fn create_user(&self, email: &str) -> User {
        db::create_user(&mut self.ex().await, &NewUser::new(email.to_owned(), None)).await.unwrap()
    }

    /// Creates an unpublished post with `title` written by `author_id`.
    pub(crate) async fn create_post(&self, author_id: UserId, title: &str) -> Post {
        let new = NewPost::new(title.to_owned(), Some("Content".to_owned()), None, author_id);
        db::create_post(&mut self.ex().await, &new).await.unwrap()
    }

    /// Creates a profile without a biography for `user_id`.
    pub(crate) async fn create_profile(&self, user_id: UserId) -> Profile {
        db::create_profile(&mut self.ex().await, &NewProfile::new(None, user_id)).await.unwrap()
    }
}

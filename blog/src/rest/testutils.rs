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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use iii_iv_core::db::sqlite::SqliteDb;
use iii_iv_core::db::{Db, DbError, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, exposed for direct inspection.
    db: Arc<SqliteDb>,

    /// The router for the app under test.
    app: Router,
}

impl TestContext {
    /// Initializes an app backed by a fresh in-memory database.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(iii_iv_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let app = app(Driver::new(db.clone()));
        Self { db, app }
    }

    /// Returns a copy of the router for the app under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router for the app under test.
    ///
    /// The database stays alive for as long as the router does.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Creates a user with `email` and no name.
    pub(crate) async fn create_user(&self, email: &str) -> User {
        db::create_user(&mut self.ex().await, &NewUser::new(email.to_owned(), None)).await.unwrap()
    }

    /// Creates an unpublished post with `title` written by `author_id`.
    pub(crate) async fn create_post(&self, author_id: UserId, title: &str) -> Post {
        let new = NewPost::new(title.to_owned(), None, None, author_id);
        db::create_post(&mut self.ex().await, &new).await.unwrap()
    }

    /// Creates a profile with `bio` for `user_id`.
    pub(crate) async fn create_profile(&self, user_id: UserId, bio: Option<&str>) -> Profile {
        let new = NewProfile::new(bio.map(str::to_owned), user_id);
        db::create_profile(&mut self.ex().await, &new).await.unwrap()
    }

    /// Gets the user identified by `id`, if it exists.
    pub(crate) async fn get_user(&self, id: UserId) -> Option<User> {
        match db::get_user(&mut self.ex().await, id).await {
            Ok(user) => Some(user),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the post identified by `id`, if it exists.
    pub(crate) async fn get_post(&self, id: PostId) -> Option<Post> {
        match db::get_post(&mut self.ex().await, id).await {
            Ok(post) => Some(post),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the profile identified by `id`, if it exists.
    pub(crate) async fn get_profile(&self, id: ProfileId) -> Option<Profile> {
        match db::get_profile(&mut self.ex().await, id).await {
            Ok(profile) => Some(profile),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Counts the rows stored in `table`.
    pub(crate) async fn count_rows(&self, table: &str) -> i64 {
        let mut ex = self.ex().await;
        let Executor::Sqlite(conn) = &mut ex else { unreachable!() };
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&mut **conn)
            .await
            .unwrap()
    }
}

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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::model::*;
use iii_iv_core::db::{Db, DbError};

/// Creates a user with `email` and no name, and returns its identifier.
async fn create_test_user(ex: &mut Executor, email: &str) -> UserId {
    let user = create_user(ex, &NewUser::new(email.to_owned(), None)).await.unwrap();
    *user.id()
}

async fn test_init_schema_is_idempotent(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    let id = create_test_user(&mut ex, "a@example.com").await;

    init_schema(&mut ex).await.unwrap();

    assert_eq!("a@example.com", get_user(&mut ex, id).await.unwrap().email());
}

async fn test_users_lifecycle(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let user = create_user(&mut ex, &NewUser::new("a@example.com".to_owned(), None))
        .await
        .unwrap();
    assert_eq!("a@example.com", user.email());
    assert_eq!(&None, user.name());
    assert_eq!(user, get_user(&mut ex, *user.id()).await.unwrap());

    let update = UserUpdate::new(None, Some("Alice".to_owned()));
    let updated = update_user(&mut ex, *user.id(), &update).await.unwrap();
    assert_eq!(User::new(*user.id(), "a@example.com".to_owned(), Some("Alice".to_owned())), updated);
    assert_eq!(updated, get_user(&mut ex, *user.id()).await.unwrap());

    delete_user(&mut ex, *user.id()).await.unwrap();
    assert_eq!(DbError::NotFound, get_user(&mut ex, *user.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_user(&mut ex, *user.id()).await.unwrap_err());
}

async fn test_users_ids_are_distinct(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let id1 = create_test_user(&mut ex, "a@example.com").await;
    let id2 = create_test_user(&mut ex, "b@example.com").await;
    assert_ne!(id1, id2);

    assert_eq!("a@example.com", get_user(&mut ex, id1).await.unwrap().email());
    assert_eq!("b@example.com", get_user(&mut ex, id2).await.unwrap().email());
}

async fn test_users_duplicate_email(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    create_test_user(&mut ex, "a@example.com").await;
    let id = create_test_user(&mut ex, "b@example.com").await;

    assert_eq!(
        DbError::AlreadyExists,
        create_user(&mut ex, &NewUser::new("a@example.com".to_owned(), None)).await.unwrap_err()
    );

    let update = UserUpdate::new(Some("a@example.com".to_owned()), None);
    assert_eq!(DbError::AlreadyExists, update_user(&mut ex, id, &update).await.unwrap_err());
}

async fn test_users_update_not_found(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let update = UserUpdate::new(None, Some("Nobody".to_owned()));
    assert_eq!(
        DbError::NotFound,
        update_user(&mut ex, UserId::new(123), &update).await.unwrap_err()
    );
}

async fn test_users_delete_with_dependents(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let with_post = create_test_user(&mut ex, "a@example.com").await;
    create_post(&mut ex, &NewPost::new("Title".to_owned(), None, None, with_post)).await.unwrap();
    assert_eq!(DbError::InvalidReference, delete_user(&mut ex, with_post).await.unwrap_err());

    let with_profile = create_test_user(&mut ex, "b@example.com").await;
    create_profile(&mut ex, &NewProfile::new(None, with_profile)).await.unwrap();
    assert_eq!(DbError::InvalidReference, delete_user(&mut ex, with_profile).await.unwrap_err());
}

async fn test_posts_lifecycle(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    let author = create_test_user(&mut ex, "a@example.com").await;

    let post = create_post(
        &mut ex,
        &NewPost::new("Title".to_owned(), Some("Body".to_owned()), None, author),
    )
    .await
    .unwrap();
    assert_eq!("Title", post.title());
    assert_eq!(&Some("Body".to_owned()), post.content());
    assert!(!*post.published());
    assert_eq!(author, *post.author_id());
    assert_eq!(post, get_post(&mut ex, *post.id()).await.unwrap());

    let update = PostUpdate::new(Some("New title".to_owned()), None, None);
    let updated = update_post(&mut ex, *post.id(), &update).await.unwrap();
    assert_eq!(
        Post::new(*post.id(), "New title".to_owned(), Some("Body".to_owned()), false, author),
        updated
    );

    let update = PostUpdate::new(None, None, Some(true));
    let updated = update_post(&mut ex, *post.id(), &update).await.unwrap();
    assert!(*updated.published());
    assert_eq!("New title", updated.title());

    delete_post(&mut ex, *post.id()).await.unwrap();
    assert_eq!(DbError::NotFound, get_post(&mut ex, *post.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_post(&mut ex, *post.id()).await.unwrap_err());

    delete_user(&mut ex, author).await.unwrap();
}

async fn test_posts_published_explicitly(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    let author = create_test_user(&mut ex, "a@example.com").await;

    let post = create_post(&mut ex, &NewPost::new("Title".to_owned(), None, Some(true), author))
        .await
        .unwrap();
    assert!(*post.published());
    assert_eq!(&None, post.content());
}

async fn test_posts_unknown_author(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert_eq!(
        DbError::InvalidReference,
        create_post(&mut ex, &NewPost::new("Title".to_owned(), None, None, UserId::new(999)))
            .await
            .unwrap_err()
    );
}

async fn test_posts_update_not_found(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let update = PostUpdate::new(Some("Title".to_owned()), None, None);
    assert_eq!(
        DbError::NotFound,
        update_post(&mut ex, PostId::new(5), &update).await.unwrap_err()
    );
}

async fn test_profiles_lifecycle(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    let user = create_test_user(&mut ex, "a@example.com").await;

    let profile = create_profile(&mut ex, &NewProfile::new(Some("Hi".to_owned()), user))
        .await
        .unwrap();
    assert_eq!(&Some("Hi".to_owned()), profile.bio());
    assert_eq!(user, *profile.user_id());
    assert_eq!(profile, get_profile(&mut ex, *profile.id()).await.unwrap());

    let unchanged = update_profile(&mut ex, *profile.id(), &ProfileUpdate::new(None)).await.unwrap();
    assert_eq!(profile, unchanged);

    let update = ProfileUpdate::new(Some("Bye".to_owned()));
    let updated = update_profile(&mut ex, *profile.id(), &update).await.unwrap();
    assert_eq!(Profile::new(*profile.id(), Some("Bye".to_owned()), user), updated);

    delete_profile(&mut ex, *profile.id()).await.unwrap();
    assert_eq!(DbError::NotFound, get_profile(&mut ex, *profile.id()).await.unwrap_err());
    assert_eq!(DbError::NotFound, delete_profile(&mut ex, *profile.id()).await.unwrap_err());
}

async fn test_profiles_one_per_user(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();
    let user = create_test_user(&mut ex, "a@example.com").await;

    create_profile(&mut ex, &NewProfile::new(None, user)).await.unwrap();
    assert_eq!(
        DbError::AlreadyExists,
        create_profile(&mut ex, &NewProfile::new(Some("Again".to_owned()), user))
            .await
            .unwrap_err()
    );
}

async fn test_profiles_unknown_user(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    assert_eq!(
        DbError::InvalidReference,
        create_profile(&mut ex, &NewProfile::new(None, UserId::new(42))).await.unwrap_err()
    );
}

async fn test_profiles_update_not_found(db: Box<dyn Db + Send + Sync>) {
    let mut ex = db.ex().await.unwrap();

    let update = ProfileUpdate::new(Some("Bio".to_owned()));
    assert_eq!(
        DbError::NotFound,
        update_profile(&mut ex, ProfileId::new(8), &update).await.unwrap_err()
    );
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta])? ) => {
        iii_iv_core::db::testutils::generate_tests!(
            $( #[$extra], )?
            $setup,
            $crate::db::tests,
            test_init_schema_is_idempotent,
            test_users_lifecycle,
            test_users_ids_are_distinct,
            test_users_duplicate_email,
            test_users_update_not_found,
            test_users_delete_with_dependents,
            test_posts_lifecycle,
            test_posts_published_explicitly,
            test_posts_unknown_author,
            test_posts_update_not_found,
            test_profiles_lifecycle,
            test_profiles_one_per_user,
            test_profiles_unknown_user,
            test_profiles_update_not_found
        );
    }
];

mod sqlite {
    use super::*;

    generate_db_tests!({
        let db = iii_iv_core::db::sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        Box::new(db)
    });
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::*;

    generate_db_tests!(
        {
            let db = iii_iv_core::db::postgres::testutils::setup().await;
            init_schema(&mut db.ex().await.unwrap()).await.unwrap();
            Box::new(db)
        },
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

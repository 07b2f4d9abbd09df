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

//! Persistence of posts.

use crate::model::{NewPost, Post, PostId, PostUpdate, UserId};
#[cfg(feature = "postgres")]
use iii_iv_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use iii_iv_core::db::sqlite;
use iii_iv_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Post {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let content: Option<String> = row.try_get("content").map_err(postgres::map_sqlx_error)?;
        let published: bool = row.try_get("published").map_err(postgres::map_sqlx_error)?;
        let author_id: i32 = row.try_get("author_id").map_err(postgres::map_sqlx_error)?;
        Ok(Post::new(PostId::new(id), title, content, published, UserId::new(author_id)))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Post {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let content: Option<String> = row.try_get("content").map_err(sqlite::map_sqlx_error)?;
        let published: bool = row.try_get("published").map_err(sqlite::map_sqlx_error)?;
        let author_id: i32 = row.try_get("author_id").map_err(sqlite::map_sqlx_error)?;
        Ok(Post::new(PostId::new(id), title, content, published, UserId::new(author_id)))
    }
}

/// Creates a new post from `new` and returns it with its assigned identifier.
///
/// Fails with `InvalidReference` if the author does not exist.
pub(crate) async fn create_post(ex: &mut Executor, new: &NewPost) -> DbResult<Post> {
    let published = new.published().unwrap_or(false);
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO posts (title, content, published, author_id)
                VALUES ($1, $2, $3, $4)
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.title().as_str())
                .bind(new.content().as_deref())
                .bind(published)
                .bind(new.author_id().as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO posts (title, content, published, author_id)
                VALUES (?, ?, ?, ?)
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.title().as_str())
                .bind(new.content().as_deref())
                .bind(published)
                .bind(new.author_id().as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the post identified by `id`.
pub(crate) async fn get_post(ex: &mut Executor, id: PostId) -> DbResult<Post> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM posts WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM posts WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Applies the fields present in `update` to the post identified by `id` and returns the result.
pub(crate) async fn update_post(
    ex: &mut Executor,
    id: PostId,
    update: &PostUpdate,
) -> DbResult<Post> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE posts
                SET
                    title = COALESCE($1, title),
                    content = COALESCE($2, content),
                    published = COALESCE($3, published)
                WHERE id = $4
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.title().as_deref())
                .bind(update.content().as_deref())
                .bind(*update.published())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE posts
                SET
                    title = COALESCE(?, title),
                    content = COALESCE(?, content),
                    published = COALESCE(?, published)
                WHERE id = ?
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.title().as_deref())
                .bind(update.content().as_deref())
                .bind(*update.published())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Post::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the post identified by `id`.
pub(crate) async fn delete_post(ex: &mut Executor, id: PostId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM posts WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM posts WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}

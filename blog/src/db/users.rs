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

//! Persistence of users.

use crate::model::{NewUser, User, UserId, UserUpdate};
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
impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;
        let name: Option<String> = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        Ok(User::new(UserId::new(id), email, name))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;
        let name: Option<String> = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        Ok(User::new(UserId::new(id), email, name))
    }
}

/// Creates a new user from `new` and returns it with its assigned identifier.
pub(crate) async fn create_user(ex: &mut Executor, new: &NewUser) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.email().as_str())
                .bind(new.name().as_deref())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (email, name) VALUES (?, ?) RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.email().as_str())
                .bind(new.name().as_deref())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the user identified by `id`.
pub(crate) async fn get_user(ex: &mut Executor, id: UserId) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM users WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM users WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Applies the fields present in `update` to the user identified by `id` and returns the result.
pub(crate) async fn update_user(
    ex: &mut Executor,
    id: UserId,
    update: &UserUpdate,
) -> DbResult<User> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE users
                SET email = COALESCE($1, email), name = COALESCE($2, name)
                WHERE id = $3
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.email().as_deref())
                .bind(update.name().as_deref())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                UPDATE users
                SET email = COALESCE(?, email), name = COALESCE(?, name)
                WHERE id = ?
                RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.email().as_deref())
                .bind(update.name().as_deref())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the user identified by `id`.
///
/// Fails with `InvalidReference` if the user still owns posts or a profile.
pub(crate) async fn delete_user(ex: &mut Executor, id: UserId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM users WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM users WHERE id = ?";
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

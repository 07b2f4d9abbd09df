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

//! Persistence of profiles.

use crate::model::{NewProfile, Profile, ProfileId, ProfileUpdate, UserId};
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
impl TryFrom<PgRow> for Profile {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let bio: Option<String> = row.try_get("bio").map_err(postgres::map_sqlx_error)?;
        let user_id: i32 = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
        Ok(Profile::new(ProfileId::new(id), bio, UserId::new(user_id)))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Profile {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i32 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let bio: Option<String> = row.try_get("bio").map_err(sqlite::map_sqlx_error)?;
        let user_id: i32 = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
        Ok(Profile::new(ProfileId::new(id), bio, UserId::new(user_id)))
    }
}

/// Creates a new profile from `new` and returns it with its assigned identifier.
///
/// Fails with `InvalidReference` if the user does not exist and with `AlreadyExists` if the user
/// already has a profile.
pub(crate) async fn create_profile(ex: &mut Executor, new: &NewProfile) -> DbResult<Profile> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO profiles (bio, user_id) VALUES ($1, $2) RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.bio().as_deref())
                .bind(new.user_id().as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO profiles (bio, user_id) VALUES (?, ?) RETURNING *";
            let row = sqlx::query(query_str)
                .bind(new.bio().as_deref())
                .bind(new.user_id().as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the profile identified by `id`.
pub(crate) async fn get_profile(ex: &mut Executor, id: ProfileId) -> DbResult<Profile> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM profiles WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM profiles WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Applies the fields present in `update` to the profile identified by `id` and returns the
/// result.
pub(crate) async fn update_profile(
    ex: &mut Executor,
    id: ProfileId,
    update: &ProfileUpdate,
) -> DbResult<Profile> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE profiles SET bio = COALESCE($1, bio) WHERE id = $2 RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.bio().as_deref())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE profiles SET bio = COALESCE(?, bio) WHERE id = ? RETURNING *";
            let row = sqlx::query(query_str)
                .bind(update.bio().as_deref())
                .bind(id.as_i32())
                .fetch_one(&mut **ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Profile::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the profile identified by `id`.
pub(crate) async fn delete_profile(ex: &mut Executor, id: ProfileId) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM profiles WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i32())
                .execute(&mut **ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM profiles WHERE id = ?";
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

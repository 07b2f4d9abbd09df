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

//! Business logic for the service.

use iii_iv_core::db::{Db, DbError};
use iii_iv_core::driver::DriverError;
use std::sync::Arc;

mod posts;
mod profiles;
#[cfg(test)]
mod testutils;
mod users;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": each of them issues a single
/// statement against the database.  These operations consume the driver to make it obvious that
/// a request should not chain more than one of them.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Translates a database error into a driver error, naming the missing `entity` when the database
/// could not find the row that an operation targeted.
fn not_found_as(entity: &'static str) -> impl Fn(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::NotFound(format!("{} not found", entity)),
        e => e.into(),
    }
}

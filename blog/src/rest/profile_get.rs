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

//! API to get an existing profile.

use crate::driver::Driver;
use crate::model::{Profile, ProfileId};
use crate::rest::Envelope;
use axum::Json;
use axum::extract::State;
use iii_iv_core::rest::{EmptyBody, ErrorResponse, PathParams, RestResult};

/// Get a profile by id
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    tag = "Profile",
    operation_id = "getProfile",
    params(("id" = i32, Path, description = "Identifier of the profile")),
    responses(
        (status = 200, description = "Profile found", body = Envelope<Profile>),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<i32>,
    _: EmptyBody,
) -> RestResult<Json<Envelope<Profile>>> {
    let profile = driver.get_profile(ProfileId::new(id)).await?;
    Ok(Json(Envelope::new("Profile retrieved successfully", profile)))
}

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

//! API to create a new user.

use crate::driver::Driver;
use crate::model::{NewUser, User};
use crate::rest::Envelope;
use axum::Json;
use axum::extract::State;
use iii_iv_core::rest::{ErrorResponse, JsonBody, RestResult};

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "User",
    operation_id = "createUser",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created", body = Envelope<User>),
        (status = 400, description = "Invalid payload or email already taken", body = ErrorResponse),
        (status = 415, description = "Payload is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(new): JsonBody<NewUser>,
) -> RestResult<Json<Envelope<User>>> {
    let user = driver.create_user(new).await?;
    Ok(Json(Envelope::new("User created successfully", user)))
}

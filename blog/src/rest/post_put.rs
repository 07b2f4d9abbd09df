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

//! API to update an existing post.

use crate::driver::Driver;
use crate::model::{Post, PostId, PostUpdate};
use crate::rest::Envelope;
use axum::Json;
use axum::extract::State;
use iii_iv_core::rest::{ErrorResponse, JsonBody, PathParams, RestResult};

/// Update a post by id
///
/// Fields that are absent or null in the payload keep their stored values.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "Post",
    operation_id = "updatePost",
    params(("id" = i32, Path, description = "Identifier of the post")),
    request_body = PostUpdate,
    responses(
        (status = 200, description = "Post updated", body = Envelope<Post>),
        (status = 400, description = "Invalid payload", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 415, description = "Payload is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    PathParams(id): PathParams<i32>,
    JsonBody(update): JsonBody<PostUpdate>,
) -> RestResult<Json<Envelope<Post>>> {
    let post = driver.update_post(PostId::new(id), update).await?;
    Ok(Json(Envelope::new("Post updated successfully", post)))
}

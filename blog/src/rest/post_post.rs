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

//! API to create a new post.

use crate::driver::Driver;
use crate::model::{NewPost, Post};
use crate::rest::Envelope;
use axum::Json;
use axum::extract::State;
use iii_iv_core::rest::{ErrorResponse, JsonBody, RestResult};

/// Create a new post
#[utoipa::path(
    post,
    path = "/posts",
    tag = "Post",
    operation_id = "createPost",
    request_body = NewPost,
    responses(
        (status = 200, description = "Post created", body = Envelope<Post>),
        (status = 400, description = "Invalid payload or unknown author", body = ErrorResponse),
        (status = 415, description = "Payload is not JSON", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse),
    )
)]
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(new): JsonBody<NewPost>,
) -> RestResult<Json<Envelope<Post>>> {
    let post = driver.create_post(new).await?;
    Ok(Json(Envelope::new("Post created successfully", post)))
}

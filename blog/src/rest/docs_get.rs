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

//! API to serve the interactive documentation.
//!
//! The page pulls the Swagger UI assets from the unpkg CDN at load time, so browsing the docs
//! requires network access to unpkg.com even though the OpenAPI document is served locally.

use axum::response::Html;
use iii_iv_core::rest::EmptyBody;

/// Swagger UI page that loads the OpenAPI document from `/docs/json`.
const DOCS_HTML: &str = include_str!("docs.html");

/// Serves the interactive API documentation.
pub(crate) async fn handler(_: EmptyBody) -> Html<&'static str> {
    Html(DOCS_HTML)
}

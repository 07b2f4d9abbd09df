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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use axum::http::{Method, Uri};
use iii_iv_core::rest::RestError;
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::ToSchema;

mod docs_get;
mod docs_json_get;
mod openapi;
mod post_delete;
mod post_get;
mod post_post;
mod post_put;
mod profile_delete;
mod profile_get;
mod profile_post;
mod profile_put;
mod root_get;
#[cfg(test)]
mod testutils;
mod user_delete;
mod user_get;
mod user_post;
mod user_put;

/// Envelope for successful responses that carry an entity.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Envelope<T> {
    /// Human-readable description of the outcome.
    pub(crate) message: String,

    /// Always true for successful responses.
    pub(crate) success: bool,

    /// The entity affected by the operation.
    pub(crate) data: T,
}

impl<T> Envelope<T> {
    /// Wraps `data` in a successful response described by `message`.
    pub(crate) fn new<M: Into<String>>(message: M, data: T) -> Self {
        Self { message: message.into(), success: true, data }
    }
}

/// Envelope for successful responses that carry no entity.
#[derive(Serialize, ToSchema)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct Ack {
    /// Human-readable description of the outcome.
    pub(crate) message: String,

    /// Always true for successful responses.
    pub(crate) success: bool,
}

impl Ack {
    /// Creates a successful response described by `message`.
    pub(crate) fn new<M: Into<String>>(message: M) -> Self {
        Self { message: message.into(), success: true }
    }
}

/// Answers requests for paths that no route serves.
async fn route_not_found(method: Method, uri: Uri) -> RestError {
    RestError::NotFound(format!("Route {} {} not found", method, uri.path()))
}

/// Answers requests whose method is not served by the route matching their path.
async fn method_not_allowed(method: Method, uri: Uri) -> RestError {
    RestError::MethodNotAllowed(format!("Method {} not allowed on {}", method, uri.path()))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};

    // Requests are logged at info level through the `log` bridge of `tracing`.
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_get::handler))
        .route("/docs", get(docs_get::handler))
        .route("/docs/json", get(docs_json_get::handler))
        .route("/users", post(user_post::handler))
        .route(
            "/users/:id",
            get(user_get::handler).put(user_put::handler).delete(user_delete::handler),
        )
        .route("/posts", post(post_post::handler))
        .route(
            "/posts/:id",
            get(post_get::handler).put(post_put::handler).delete(post_delete::handler),
        )
        .route("/profiles", post(profile_post::handler))
        .route(
            "/profiles/:id",
            get(profile_get::handler).put(profile_put::handler).delete(profile_delete::handler),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(trace)
        .layer(cors)
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use crate::model::*;
    use axum::http::{self, StatusCode};
    use iii_iv_core::rest::testutils::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_e2e_user_flow() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (Method::POST, "/users"))
            .send_json(NewUser::new("e2e@example.com".to_owned(), None))
            .await
            .expect_json::<Envelope<User>>()
            .await;
        let id = *response.data.id();

        let response = OneShotBuilder::new(context.app(), (Method::GET, format!("/users/{}", id)))
            .send_empty()
            .await
            .expect_json::<Envelope<User>>()
            .await;
        assert_eq!(User::new(id, "e2e@example.com".to_owned(), None), response.data);

        let response = OneShotBuilder::new(context.app(), (Method::PUT, format!("/users/{}", id)))
            .send_json(UserUpdate::new(None, Some("X".to_owned())))
            .await
            .expect_json::<Envelope<User>>()
            .await;
        assert_eq!(User::new(id, "e2e@example.com".to_owned(), Some("X".to_owned())), response.data);

        let response =
            OneShotBuilder::new(context.app(), (Method::DELETE, format!("/users/{}", id)))
                .send_empty()
                .await
                .expect_json::<Ack>()
                .await;
        assert_eq!(Ack::new("User deleted successfully"), response);

        OneShotBuilder::new(context.app(), (Method::GET, format!("/users/{}", id)))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("^User not found$")
            .await;
    }

    #[tokio::test]
    async fn test_e2e_post_and_profile_flow() {
        let context = TestContext::setup().await;

        let user = context.create_user("author@example.com").await;

        let post = OneShotBuilder::new(context.app(), (Method::POST, "/posts"))
            .send_json(NewPost::new("Hello".to_owned(), None, None, *user.id()))
            .await
            .expect_json::<Envelope<Post>>()
            .await
            .data;
        let profile = OneShotBuilder::new(context.app(), (Method::POST, "/profiles"))
            .send_json(NewProfile::new(Some("About me".to_owned()), *user.id()))
            .await
            .expect_json::<Envelope<Profile>>()
            .await
            .data;

        OneShotBuilder::new(context.app(), (Method::DELETE, format!("/users/{}", user.id())))
            .send_empty()
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("still has posts or a profile")
            .await;

        OneShotBuilder::new(context.app(), (Method::DELETE, format!("/posts/{}", post.id())))
            .send_empty()
            .await
            .expect_json::<Ack>()
            .await;
        OneShotBuilder::new(context.app(), (Method::DELETE, format!("/profiles/{}", profile.id())))
            .send_empty()
            .await
            .expect_json::<Ack>()
            .await;
        OneShotBuilder::new(context.app(), (Method::DELETE, format!("/users/{}", user.id())))
            .send_empty()
            .await
            .expect_json::<Ack>()
            .await;

        assert!(context.get_user(*user.id()).await.is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (Method::OPTIONS, "/users"))
            .with_header(http::header::ORIGIN, "https://example.com")
            .with_header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .send_empty()
            .await
            .take_response()
            .await;
        assert_eq!(
            "*",
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap()
        );
        let methods = response
            .headers()
            .get(http::header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{} not in {}", method, methods);
        }
    }

    #[tokio::test]
    async fn test_cors_simple_request() {
        let context = TestContext::setup().await;

        let user = context.create_user("a@example.com").await;

        let response =
            OneShotBuilder::new(context.app(), (Method::GET, format!("/users/{}", user.id())))
                .with_header(http::header::ORIGIN, "https://example.com")
                .send_empty()
                .await
                .take_response()
                .await;
        assert_eq!(
            "*",
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap()
        );
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (Method::GET, "/comments"))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("^Route GET /comments not found$")
            .await;
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let context = TestContext::setup().await;

        let user = context.create_user("a@example.com").await;

        OneShotBuilder::new(context.app(), (Method::PATCH, format!("/users/{}", user.id())))
            .send_json(UserUpdate::new(None, Some("X".to_owned())))
            .await
            .expect_status(StatusCode::METHOD_NOT_ALLOWED)
            .expect_error(&format!("^Method PATCH not allowed on /users/{}$", user.id()))
            .await;

        OneShotBuilder::new(context.app(), (Method::GET, "/users"))
            .send_empty()
            .await
            .expect_status(StatusCode::METHOD_NOT_ALLOWED)
            .expect_error("^Method GET not allowed on /users$")
            .await;

        assert_eq!(Some(user.clone()), context.get_user(*user.id()).await);
    }

    /// Sink for the output of a `tracing` subscriber.
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_requests_are_logged() {
        let context = TestContext::setup().await;

        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer({
                let output = output.clone();
                move || output.clone()
            })
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        OneShotBuilder::new(context.app(), (Method::GET, "/users/7"))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("User not found")
            .await;

        let logs = String::from_utf8(output.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("method=GET"), "{}", logs);
        assert!(logs.contains("uri=/users/7"), "{}", logs);
        assert!(logs.contains("status=404"), "{}", logs);
        assert!(logs.contains("latency="), "{}", logs);
    }
}

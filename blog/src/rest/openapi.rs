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

//! OpenAPI description of the REST API.

use super::*;
use utoipa::OpenApi;

/// OpenAPI document for the REST API, served at `/docs/json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        version = "1.0.0",
        description = "CRUD operations on users, their posts and their profiles."
    ),
    paths(
        user_post::handler,
        user_get::handler,
        user_put::handler,
        user_delete::handler,
        post_post::handler,
        post_get::handler,
        post_put::handler,
        post_delete::handler,
        profile_post::handler,
        profile_get::handler,
        profile_put::handler,
        profile_delete::handler,
    ),
    tags(
        (name = "User", description = "Registered users"),
        (name = "Post", description = "Posts written by users"),
        (name = "Profile", description = "Extra details about users"),
    )
)]
pub(crate) struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_operations_documented() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let mut ids = vec![];
        for (path, methods) in doc["paths"].as_object().unwrap() {
            for (method, operation) in methods.as_object().unwrap() {
                ids.push(format!("{} {} {}", method, path, operation["operationId"]));
            }
        }
        ids.sort();
        assert_eq!(
            vec![
                "delete /posts/{id} \"deletePost\"",
                "delete /profiles/{id} \"deleteProfile\"",
                "delete /users/{id} \"deleteUser\"",
                "get /posts/{id} \"getPost\"",
                "get /profiles/{id} \"getProfile\"",
                "get /users/{id} \"getUser\"",
                "post /posts \"createPost\"",
                "post /profiles \"createProfile\"",
                "post /users \"createUser\"",
                "put /posts/{id} \"updatePost\"",
                "put /profiles/{id} \"updateProfile\"",
                "put /users/{id} \"updateUser\"",
            ],
            ids
        );
    }

    #[test]
    fn test_summaries_and_tags() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        let create_user = &doc["paths"]["/users"]["post"];
        assert_eq!("Create a new user", create_user["summary"]);
        assert_eq!(serde_json::json!(["User"]), create_user["tags"]);

        let get_post = &doc["paths"]["/posts/{id}"]["get"];
        assert_eq!("Get a post by id", get_post["summary"]);
        assert_eq!(serde_json::json!(["Post"]), get_post["tags"]);
        assert_eq!("id", get_post["parameters"][0]["name"]);
        assert_eq!("path", get_post["parameters"][0]["in"]);

        let names: Vec<&str> =
            doc["tags"].as_array().unwrap().iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(vec!["User", "Post", "Profile"], names);
    }
}

// src/server/mod.rs
// =============================================================================
// The HTTP passthrough endpoint the portfolio front end calls:
//
//   GET /api/github?username=alice&excludeForks=false&includePrivate=true
//
// Responses:
//   200 { "projects": [...] }
//   400 { "error": "Username parameter is required" }
//   500 { "error": "<what went wrong>" }
//
// Query flags are strings, not booleans, and default the way the site
// expects:
//   excludeForks, excludeArchived, includeContributions: on unless "false"
//   includePrivate, excludeContributions:                off unless "true"
//
// A repeated key is not an error: the first value wins, so
// `?excludeForks=false&excludeForks=true` behaves like `?excludeForks=false`.
//
// includePrivate only works when the SERVER has a token; a client cannot
// unlock private data by asking for it.
//
// This handler is the only place aggregator errors turn into HTTP status
// codes.
//
// Rust concepts:
// - Extractors: axum builds State and Query from the request for us
// - Arc: one AppState shared by every request task
// - let-else: early return when the username is missing
// =============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{error, info};

use crate::github::GitHubClient;
use crate::projects::{fetch_projects, FetchOptions, OverrideTables};

/// Shared, read-only state for every request
#[derive(Debug)]
pub struct AppState {
    pub client: GitHubClient,
    pub token: Option<String>,
    pub overrides: Arc<OverrideTables>,
}

/// Raw query parameters of `/api/github`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProjectsQuery {
    pub username: Option<String>,
    pub exclude_forks: Option<String>,
    pub exclude_archived: Option<String>,
    pub include_private: Option<String>,
    pub include_contributions: Option<String>,
    pub exclude_contributions: Option<String>,
}

impl ProjectsQuery {
    /// Collects the known parameters from decoded query pairs, keeping the
    /// first value of a repeated key and ignoring unknown keys
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "username" => &mut query.username,
                "excludeForks" => &mut query.exclude_forks,
                "excludeArchived" => &mut query.exclude_archived,
                "includePrivate" => &mut query.include_private,
                "includeContributions" => &mut query.include_contributions,
                "excludeContributions" => &mut query.exclude_contributions,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.clone());
            }
        }
        query
    }

    /// Translates the string flags into aggregator options
    pub fn options(&self, has_token: bool, excluded_repos: &[String]) -> FetchOptions {
        FetchOptions {
            exclude_forks: !is_literal(&self.exclude_forks, "false"),
            exclude_archived: !is_literal(&self.exclude_archived, "false"),
            include_private: is_literal(&self.include_private, "true") && has_token,
            excluded_repos: excluded_repos.to_vec(),
            include_contributions: !is_literal(&self.include_contributions, "false"),
            exclude_contributions: is_literal(&self.exclude_contributions, "true"),
        }
    }
}

fn is_literal(value: &Option<String>, literal: &str) -> bool {
    value.as_deref() == Some(literal)
}

/// Builds the router with its shared state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/github", get(github_projects))
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves until the process is stopped
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %listener.local_addr()?, "serving /api/github");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server failed")
}

async fn github_projects(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let query = ProjectsQuery::from_pairs(&pairs);
    let Some(username) = query.username.as_deref().filter(|u| !u.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Username parameter is required");
    };

    let options = query.options(state.token.is_some(), state.overrides.excluded());

    match fetch_projects(
        &state.client,
        username,
        state.token.as_deref(),
        &options,
        &state.overrides,
    )
    .await
    {
        Ok(projects) => (StatusCode::OK, Json(json!({ "projects": projects }))).into_response(),
        Err(e) => {
            error!(username, error = %e, "error in GitHub API route");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Query<Vec<(String, String)>> instead of Query<ProjectsQuery>?
//    - Deriving Deserialize on the struct rejects a repeated key with a
//      plain-text 400
//    - Taking the raw pairs lets from_pairs() keep the first value and
//      always answer in JSON
//
// 2. What does `.into_response()` do?
//    - Both arms of the match must have the same type
//    - IntoResponse turns (StatusCode, Json<..>) into axum's Response
//
// 3. Why `let Some(username) = ... else { return ... };`?
//    - let-else binds the value or runs the else block, which must return
//    - It keeps the happy path unindented
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_json(id: u64, name: &str, fork: bool) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": format!("{} description", name),
            "html_url": format!("https://github.com/alice/{}", name),
            "updated_at": "2024-01-01T00:00:00Z",
            "fork": fork,
            "archived": false,
            "owner": { "login": "alice" }
        })
    }

    // Starts the router on an ephemeral port and returns its base URL
    async fn spawn_app(github: &MockServer, token: Option<&str>, overrides: &str) -> String {
        let state = AppState {
            client: GitHubClient::new(&github.uri()).unwrap(),
            token: token.map(str::to_string),
            overrides: Arc::new(OverrideTables::from_toml_str(overrides).unwrap()),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });

        format!("http://{}", addr)
    }

    async fn get_json(url: &str) -> (u16, serde_json::Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[test]
    fn test_query_defaults() {
        let options = ProjectsQuery::default().options(true, &[]);
        assert!(options.exclude_forks);
        assert!(options.exclude_archived);
        assert!(!options.include_private);
        assert!(options.include_contributions);
        assert!(!options.exclude_contributions);
    }

    #[test]
    fn test_query_only_literal_strings_flip_flags() {
        let query = ProjectsQuery {
            exclude_forks: Some("FALSE".to_string()),
            exclude_archived: Some("false".to_string()),
            include_private: Some("yes".to_string()),
            include_contributions: Some("0".to_string()),
            exclude_contributions: Some("true".to_string()),
            ..ProjectsQuery::default()
        };
        let options = query.options(true, &[]);
        assert!(options.exclude_forks);
        assert!(!options.exclude_archived);
        assert!(!options.include_private);
        assert!(options.include_contributions);
        assert!(options.exclude_contributions);
    }

    #[test]
    fn test_include_private_needs_server_token() {
        let query = ProjectsQuery {
            include_private: Some("true".to_string()),
            ..ProjectsQuery::default()
        };
        assert!(!query.options(false, &[]).include_private);
        assert!(query.options(true, &[]).include_private);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_first_value_wins() {
        let query = ProjectsQuery::from_pairs(&pairs(&[
            ("username", "alice"),
            ("excludeForks", "false"),
            ("excludeForks", "true"),
            ("username", "bob"),
            ("utm_source", "newsletter"),
        ]));
        assert_eq!(
            query,
            ProjectsQuery {
                username: Some("alice".to_string()),
                exclude_forks: Some("false".to_string()),
                ..ProjectsQuery::default()
            }
        );
        assert!(!query.options(false, &[]).exclude_forks);
    }

    #[test]
    fn test_from_pairs_keys_are_case_sensitive() {
        let query = ProjectsQuery::from_pairs(&pairs(&[("ExcludeForks", "false")]));
        assert_eq!(query, ProjectsQuery::default());
    }

    #[tokio::test]
    async fn test_missing_username_is_bad_request() {
        let github = MockServer::start().await;
        let app = spawn_app(&github, None, "").await;

        for url in [format!("{}/api/github", app), format!("{}/api/github?username=", app)] {
            let (status, body) = get_json(&url).await;
            assert_eq!(status, 400);
            assert_eq!(body, json!({ "error": "Username parameter is required" }));
        }
    }

    #[tokio::test]
    async fn test_success_applies_exclusions_and_flags() {
        let github = MockServer::start().await;
        Mock::given(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                repo_json(1, "foo", false),
                repo_json(2, "bar", true),
                repo_json(3, "Hidden", false),
            ])))
            .mount(&github)
            .await;

        let app = spawn_app(&github, None, "excluded = [\"hidden\"]\n").await;

        let (status, body) = get_json(&format!("{}/api/github?username=alice", app)).await;
        assert_eq!(status, 200);
        let ids: Vec<u64> = body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1]);

        let (status, body) =
            get_json(&format!("{}/api/github?username=alice&excludeForks=false", app)).await;
        assert_eq!(status, 200);
        assert_eq!(body["projects"].as_array().unwrap().len(), 2);
        assert_eq!(body["projects"][1]["name"], "bar");
    }

    #[tokio::test]
    async fn test_repeated_query_key_uses_first_value() {
        let github = MockServer::start().await;
        Mock::given(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                repo_json(1, "foo", false),
                repo_json(2, "bar", true),
            ])))
            .mount(&github)
            .await;

        let app = spawn_app(&github, None, "").await;

        let (status, body) = get_json(&format!(
            "{}/api/github?username=alice&excludeForks=false&excludeForks=true",
            app
        ))
        .await;
        assert_eq!(status, 200);
        let names: Vec<&str> = body["projects"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["foo", "bar"]);

        let (status, body) = get_json(&format!(
            "{}/api/github?username=&username=alice",
            app
        ))
        .await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Username parameter is required" }));
    }

    #[tokio::test]
    async fn test_empty_listing_is_success() {
        let github = MockServer::start().await;
        Mock::given(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&github)
            .await;

        let app = spawn_app(&github, None, "").await;
        let (status, body) = get_json(&format!("{}/api/github?username=alice", app)).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "projects": [] }));
    }

    #[tokio::test]
    async fn test_not_found_is_500_naming_the_user() {
        let github = MockServer::start().await;
        Mock::given(path("/users/ghost/repos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&github)
            .await;

        let app = spawn_app(&github, None, "").await;
        let (status, body) = get_json(&format!("{}/api/github?username=ghost", app)).await;
        assert_eq!(status, 500);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("ghost"));
        assert!(message.contains("not found"));
        assert!(!message.contains("rate limit"));
    }

    #[tokio::test]
    async fn test_rate_limit_is_500_with_distinct_message() {
        let github = MockServer::start().await;
        Mock::given(path("/users/alice/repos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&github)
            .await;

        let app = spawn_app(&github, None, "").await;
        let (status, body) = get_json(&format!("{}/api/github?username=alice", app)).await;
        assert_eq!(status, 500);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("rate limit"));
        assert!(!message.contains("not found"));
    }

    #[tokio::test]
    async fn test_private_listing_uses_server_token() {
        let github = MockServer::start().await;
        Mock::given(path("/user/repos"))
            .and(query_param("affiliation", "owner,collaborator,organization_member"))
            .and(header("authorization", "token server-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                repo_json(1, "secret", false),
                {
                    "id": 9,
                    "name": "team-repo",
                    "description": null,
                    "html_url": "https://github.com/acme/team-repo",
                    "updated_at": "2024-01-01T00:00:00Z",
                    "private": true,
                    "owner": { "login": "acme" }
                }
            ])))
            .expect(1)
            .mount(&github)
            .await;

        let app = spawn_app(&github, Some("server-token"), "").await;
        let (status, body) =
            get_json(&format!("{}/api/github?username=alice&includePrivate=true", app)).await;

        assert_eq!(status, 200);
        let projects = body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["isContributed"], false);
        assert_eq!(projects[1]["isContributed"], true);
        assert_eq!(projects[1]["private"], true);
        assert_eq!(projects[1]["description"], "No description available");
    }
}

// src/github/fetch.rs
// =============================================================================
// This module talks to the GitHub REST API to list a user's repositories.
//
// Strategy:
// - Decide which listing endpoint to call (public vs authenticated)
// - Make exactly ONE request (first page, 100 repositories, newest first)
// - Map the HTTP status onto our error taxonomy (404, rate limit, other)
// - Deserialize the JSON body into RemoteRepository structs
//
// Two endpoints are involved:
//   GET /users/{username}/repos   - public repos owned by {username}
//   GET /user/repos               - everything the token's identity can see,
//                                   narrowed by an "affiliation" scope
//
// Pagination: we only ever fetch the first page. GitHub caps a page at 100
// entries; a user with more repositories gets the 100 most recently updated
// ones and a warning in the log.
//
// Rust concepts:
// - async/await: the request is network I/O
// - ? operator: converts reqwest/serde errors via From impls in error.rs
// - Enums with data: Listing carries the affiliation scope only when needed
// =============================================================================

use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::types::RemoteRepository;
use crate::error::{AggregatorError, Result};

/// Where the public GitHub API lives
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub's maximum page size; we request exactly one page of this size
pub const PAGE_SIZE: usize = 100;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Which repositories the authenticated listing should return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    /// Only repositories the identity owns
    Owner,
    /// Owned repos plus those reachable as collaborator or org member
    OwnerCollaboratorOrganization,
}

impl Affiliation {
    /// The value of the `affiliation` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Affiliation::Owner => "owner",
            Affiliation::OwnerCollaboratorOrganization => "owner,collaborator,organization_member",
        }
    }
}

/// The retrieval mode for one aggregator invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// `GET /users/{username}/repos`: public repositories only
    Public { username: String },
    /// `GET /user/repos`: repositories visible to the token's identity
    Authenticated { affiliation: Affiliation },
}

impl Listing {
    /// Chooses the listing endpoint.
    ///
    /// The authenticated listing is only used when we have a token AND the
    /// caller asked for private repositories. In every other case we list the
    /// user's public repositories (the token, if any, is still sent for the
    /// higher rate limit).
    pub fn select(
        username: &str,
        token: Option<&str>,
        include_private: bool,
        include_contributions: bool,
    ) -> Self {
        match token {
            Some(_) if include_private => {
                let affiliation = if include_contributions {
                    Affiliation::OwnerCollaboratorOrganization
                } else {
                    Affiliation::Owner
                };
                Listing::Authenticated { affiliation }
            }
            _ => Listing::Public {
                username: username.to_string(),
            },
        }
    }

    /// Short name of the mode, for log lines
    pub fn mode(&self) -> &'static str {
        match self {
            Listing::Public { .. } => "public",
            Listing::Authenticated { affiliation } => match affiliation {
                Affiliation::Owner => "authenticated (owner)",
                Affiliation::OwnerCollaboratorOrganization => "authenticated (owner+contributions)",
            },
        }
    }
}

/// Thin wrapper around a reqwest client pointed at a GitHub API base URL
///
/// The client is cheap to clone (reqwest::Client is reference counted), so
/// the server keeps one and shares it across requests.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_base: Url,
}

impl GitHubClient {
    /// Builds a client for the given API base (normally DEFAULT_API_BASE;
    /// tests point it at a mock server)
    pub fn new(api_base: &str) -> anyhow::Result<Self> {
        let api_base = Url::parse(api_base)
            .with_context(|| format!("Invalid GitHub API base URL '{}'", api_base))?;

        if api_base.cannot_be_a_base() {
            anyhow::bail!("GitHub API base URL cannot have paths appended: {}", api_base);
        }

        // GitHub rejects requests without a User-Agent header
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, api_base })
    }

    /// Builds the full request URL for a listing, including query parameters
    pub fn listing_url(&self, listing: &Listing) -> Result<Url> {
        let mut url = self.api_base.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AggregatorError::transport("API base URL cannot be a base"))?;
            segments.pop_if_empty();
            match listing {
                Listing::Public { username } => {
                    segments.extend(["users", username.as_str(), "repos"]);
                }
                Listing::Authenticated { .. } => {
                    segments.extend(["user", "repos"]);
                }
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("sort", "updated")
                .append_pair("per_page", &PAGE_SIZE.to_string());
            if let Listing::Authenticated { affiliation } = listing {
                query.append_pair("affiliation", affiliation.as_query());
            }
        }

        Ok(url)
    }

    /// Fetches one page of repositories for the given listing
    ///
    /// Parameters:
    ///   listing: which endpoint to call
    ///   username: the requested user (used in the not-found error)
    ///   token: optional personal access token, sent as `token {token}`
    pub async fn list_repositories(
        &self,
        listing: &Listing,
        username: &str,
        token: Option<&str>,
    ) -> Result<Vec<RemoteRepository>> {
        let url = self.listing_url(listing)?;
        debug!(%url, authenticated = token.is_some(), "requesting repository listing");

        let mut request = self.http.get(url).header(ACCEPT, GITHUB_MEDIA_TYPE);
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("token {}", token));
        }

        let response = request.send().await?;
        check_status(response.status(), username)?;

        let body = response.text().await?;
        let repos: Vec<RemoteRepository> = serde_json::from_str(&body)?;

        if repos.len() >= PAGE_SIZE {
            warn!(
                count = repos.len(),
                "GitHub returned a full page; repositories beyond the first {} are not listed",
                PAGE_SIZE
            );
        }

        Ok(repos)
    }
}

// Maps a GitHub response status onto the aggregator's error taxonomy
//
// - 2xx: fine
// - 404: the user does not exist
// - 403 / 429: GitHub uses these for an exhausted rate limit
// - anything else: transport error carrying the status code
fn check_status(status: StatusCode, username: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    match status {
        StatusCode::NOT_FOUND => Err(AggregatorError::NotFound {
            username: username.to_string(),
        }),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(AggregatorError::RateLimited),
        other => Err(AggregatorError::Transport(format!(
            "GitHub API returned HTTP {}",
            other.as_u16()
        ))),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How does `request.send().await?` become an AggregatorError?
//    - error.rs implements From<reqwest::Error> for AggregatorError
//    - The ? operator calls From::from on the error before returning it
//    - Same story for serde_json::Error when the body is not valid JSON
//
// 2. Why the extra { } blocks in listing_url()?
//    - path_segments_mut() and query_pairs_mut() both borrow `url` mutably
//    - The blocks end those borrows so we can use `url` again afterwards
//
// 3. Why Option<&str> for the token instead of Option<String>?
//    - We only read the token, never keep it
//    - Callers hold an Option<String> and pass `.as_deref()`
// -----------------------------------------------------------------------------

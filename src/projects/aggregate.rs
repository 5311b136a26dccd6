// src/projects/aggregate.rs
// =============================================================================
// The repository aggregator: GitHub repositories in, project cards out.
//
// How it works:
// 1. Pick the listing endpoint (public vs authenticated + affiliation)
// 2. Fetch ONE page of repositories from GitHub
// 3. Work out which repositories are contributions (owned by someone else)
// 4. Drop everything the filter policy rejects
// 5. Merge the override tables into each survivor and emit a Project
//
// Steps 3-5 live in build_projects(), which is pure: no network, no
// environment, no shared mutable state. That is where almost all of the
// tests point.
//
// The output keeps GitHub's order (most recently updated first). Re-sorting
// for display is the caller's business (see pinned.rs).
//
// Rust concepts:
// - Iterator chains: map/filter/map/collect instead of a mutable Vec
// - Moving out of a struct: to_project() takes the repository by value
// =============================================================================

use tracing::{debug, error, info};

use super::filter::{is_contributed, RepoFilter};
use super::model::{FetchOptions, Project, PLACEHOLDER_DESCRIPTION};
use super::overrides::OverrideTables;
use crate::error::Result;
use crate::github::{GitHubClient, Listing, RemoteRepository};

/// Fetches `username`'s repositories and turns them into projects
///
/// Parameters:
///   client: GitHub API client
///   username: whose repositories to list
///   token: optional personal access token (unlocks private repos and
///          contributions when `options.include_private` is set)
///   options: filter switches
///   overrides: curated descriptions, tech stacks, links
///
/// Returns: the projects in GitHub's order. An empty list is a normal
/// outcome, not an error.
pub async fn fetch_projects(
    client: &GitHubClient,
    username: &str,
    token: Option<&str>,
    options: &FetchOptions,
    overrides: &OverrideTables,
) -> Result<Vec<Project>> {
    let listing = Listing::select(
        username,
        token,
        options.include_private,
        options.include_contributions,
    );
    info!(username, listing = listing.mode(), "fetching GitHub repositories");

    let repos = match client.list_repositories(&listing, username, token).await {
        Ok(repos) => repos,
        Err(e) => {
            error!(username, error = %e, "error fetching GitHub repos");
            return Err(e);
        }
    };

    let fetched = repos.len();
    let projects = build_projects(repos, username, token, options, overrides);
    info!(fetched, kept = projects.len(), "built project list");

    Ok(projects)
}

/// Annotates, filters and converts repositories into projects
///
/// Pure transform over the fetched list; preserves input order.
pub fn build_projects(
    repos: Vec<RemoteRepository>,
    username: &str,
    token: Option<&str>,
    options: &FetchOptions,
    overrides: &OverrideTables,
) -> Vec<Project> {
    let filter = RepoFilter::new(options);

    repos
        .into_iter()
        .map(|repo| {
            let contributed = is_contributed(&repo, username, token);
            (repo, contributed)
        })
        .filter(|(repo, contributed)| {
            let keep = filter.keeps(repo, *contributed);
            if !keep {
                debug!(repo = %repo.name, "filtered out");
            }
            keep
        })
        .map(|(repo, contributed)| to_project(repo, contributed, overrides))
        .collect()
}

// Merges the override tables into one repository
//
// Precedence:
//   description: override > GitHub description (if non-empty) > placeholder
//   demo URL:    override > GitHub homepage (if non-empty) > none
//   tech stack, experience link, blog link: override or nothing
fn to_project(repo: RemoteRepository, is_contributed: bool, overrides: &OverrideTables) -> Project {
    let resolved = overrides.resolve(&repo.name);

    let description = match resolved.description {
        Some(custom) => custom.to_string(),
        None => non_empty(repo.description)
            .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string()),
    };

    let demo_url = match resolved.demo_url {
        Some(custom) => Some(custom.to_string()),
        None => non_empty(repo.homepage),
    };

    Project {
        id: repo.id,
        name: repo.name,
        description,
        url: repo.html_url,
        demo_url,
        language: repo.language,
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        updated_at: repo.updated_at,
        topics: repo.topics,
        private: repo.private,
        is_contributed,
        owner: repo.owner.login,
        tech_stack: resolved.tech_stack.map(<[String]>::to_vec),
        experience_link: resolved.experience_link.cloned(),
        blog_link: resolved.blog_url.map(str::to_string),
    }
}

// GitHub sends "" as often as null for an unset description or homepage
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is build_projects() separate from fetch_projects()?
//    - fetch_projects() needs a network; build_projects() does not
//    - Tests can feed hand-made RemoteRepository values straight in
//
// 2. What is `<[String]>::to_vec`?
//    - The method to_vec on the slice type [String], used as a function
//    - It turns Option<&[String]> into Option<Vec<String>> inside map()
// -----------------------------------------------------------------------------

// src/github/mod.rs
// =============================================================================
// This module handles everything that talks to the GitHub REST API.
//
// Submodules:
// - types: serde structs for the JSON GitHub returns
// - fetch: GitHubClient, listing selection and status -> error mapping
//
// Nothing in here knows about override tables or filtering; it hands back
// the raw repositories and the projects module does the rest.
// =============================================================================

mod fetch;
mod types;

pub use fetch::{GitHubClient, Listing, DEFAULT_API_BASE};
pub use types::RemoteRepository;
#[cfg(test)]
pub use types::RepositoryOwner;

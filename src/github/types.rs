// src/github/types.rs
// =============================================================================
// Shapes of the JSON the GitHub REST API returns from the repository
// listing endpoints. Only the fields we actually use are declared; serde
// ignores everything else in the response.
//
// Fields GitHub sometimes leaves out (topics on old API versions, the
// fork/archived flags on trimmed responses) get #[serde(default)] so a
// missing key never fails the whole listing. Collections and strings also
// accept an explicit null, which GitHub sends for repositories whose topics
// were never indexed.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A repository as returned by `GET /users/{user}/repos` or `GET /user/repos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteRepository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_branch: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    pub owner: RepositoryOwner,
}

/// The account that owns a repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryOwner {
    pub login: String,
}

// `null` and a missing key both mean "empty"
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

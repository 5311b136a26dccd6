// src/projects/model.rs
// =============================================================================
// The display-ready records this crate produces, plus the options that
// control which repositories become projects.
//
// Project serializes with camelCase keys because the portfolio front end
// reads it straight out of the /api/github response.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text shown when neither an override nor GitHub provides a description
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// A link from a project card into the work-experience section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceLink {
    pub label: String,
    pub href: String,
}

/// One project card on the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    /// Never empty: override > GitHub description > placeholder
    pub description: String,
    pub url: String,
    pub demo_url: Option<String>,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
    pub topics: Vec<String>,
    pub private: bool,
    pub is_contributed: bool,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tech_stack: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub experience_link: Option<ExperienceLink>,
    pub blog_link: Option<String>,
}

/// Knobs for one aggregator invocation
///
/// The defaults match what the portfolio page asks for: no forks, no
/// archived repositories, public only, contributions included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub exclude_forks: bool,
    pub exclude_archived: bool,
    /// Only honored when a token is available
    pub include_private: bool,
    /// Repository names to drop, matched case-insensitively
    pub excluded_repos: Vec<String>,
    /// Widens the authenticated listing to collaborator/org repositories
    pub include_contributions: bool,
    /// Drops repositories the user does not own
    pub exclude_contributions: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            exclude_forks: true,
            exclude_archived: true,
            include_private: false,
            excluded_repos: Vec::new(),
            include_contributions: true,
            exclude_contributions: false,
        }
    }
}

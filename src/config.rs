// src/config.rs
// =============================================================================
// Process-wide configuration, read ONCE at startup and then passed around
// explicitly. Nothing below main() reads environment variables.
//
// Sources:
// - GITHUB_TOKEN     optional personal access token
// - GITHUB_USERNAME  default user for the `list` command
// - GITHUB_API_URL   optional API base (GitHub Enterprise, tests)
// - an optional TOML file with the override tables
//   (falls back to the tables embedded in the binary)
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::github::DEFAULT_API_BASE;
use crate::projects::OverrideTables;

/// Settings taken from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Personal access token; `None` means public-only behavior
    pub token: Option<String>,
    pub default_username: Option<String>,
    pub api_base: String,
}

impl Settings {
    /// Reads GITHUB_TOKEN, GITHUB_USERNAME and GITHUB_API_URL
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("GITHUB_TOKEN").ok(),
            std::env::var("GITHUB_USERNAME").ok(),
            std::env::var("GITHUB_API_URL").ok(),
        )
    }

    /// Builds settings from raw values. Blank values count as unset, so an
    /// empty GITHUB_TOKEN quietly means "no token" instead of sending an
    /// empty Authorization header.
    pub fn from_values(
        token: Option<String>,
        default_username: Option<String>,
        api_base: Option<String>,
    ) -> Self {
        let token = non_blank(token);
        if token.is_none() {
            debug!("no GitHub token configured; only public repositories are visible");
        }

        Self {
            token,
            default_username: non_blank(default_username),
            api_base: non_blank(api_base).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// The token as a borrowed str, which is what the aggregator wants
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Loads the override tables from `path`, or the embedded defaults if no
/// path is given. A named file that is missing or malformed is an error.
pub fn load_overrides(path: Option<&Path>) -> Result<OverrideTables> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read override file {}", path.display()))?;
            let tables = OverrideTables::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse override file {}", path.display()))?;
            info!(path = %path.display(), "loaded override tables");
            Ok(tables)
        }
        None => OverrideTables::embedded().context("Embedded override tables are invalid"),
    }
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - list:  fetch and print a user's projects (table or JSON)
// - serve: run the /api/github HTTP endpoint
//
// Options that apply to both (override file, API base) live on the top-level
// struct and are marked `global = true` so they can be given before or after
// the subcommand.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - Doc comments (///) become the --help text
// =============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::projects::FetchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-projects",
    version,
    about = "Builds a portfolio's project list from GitHub plus curated overrides",
    long_about = "portfolio-projects lists a user's GitHub repositories as portfolio projects, \
                  merging in locally curated descriptions, tech stacks and links. \
                  Set GITHUB_TOKEN to include private repositories and contributions."
)]
pub struct Cli {
    /// TOML file with override tables (defaults to the built-in tables)
    #[arg(long, global = true, value_name = "FILE")]
    pub overrides: Option<PathBuf>,

    /// GitHub API base URL (defaults to $GITHUB_API_URL or https://api.github.com)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List a user's projects
    ///
    /// Example: portfolio-projects list octocat --json
    List {
        /// GitHub username (defaults to $GITHUB_USERNAME)
        username: Option<String>,

        /// Keep forked repositories
        #[arg(long)]
        include_forks: bool,

        /// Keep archived repositories
        #[arg(long)]
        include_archived: bool,

        /// Include private repositories (needs GITHUB_TOKEN)
        #[arg(long)]
        include_private: bool,

        /// Do not widen the private listing to collaborator/organization repos
        #[arg(long)]
        no_contributions: bool,

        /// Drop repositories owned by someone else
        #[arg(long)]
        exclude_contributions: bool,

        /// Extra repository names to hide (repeatable, case-insensitive)
        #[arg(long = "exclude", value_name = "NAME")]
        exclude: Vec<String>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve GET /api/github over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
}

/// The filter switches of the `list` subcommand
#[derive(Debug, Clone, Default)]
pub struct ListFlags {
    pub include_forks: bool,
    pub include_archived: bool,
    pub include_private: bool,
    pub no_contributions: bool,
    pub exclude_contributions: bool,
    pub exclude: Vec<String>,
}

impl ListFlags {
    /// Converts CLI switches into aggregator options
    ///
    /// `excluded` is the exclusion list from the override tables; names
    /// given with --exclude are added to it.
    pub fn into_options(self, excluded: &[String]) -> FetchOptions {
        let mut excluded_repos = excluded.to_vec();
        excluded_repos.extend(self.exclude);

        FetchOptions {
            exclude_forks: !self.include_forks,
            exclude_archived: !self.include_archived,
            include_private: self.include_private,
            excluded_repos,
            include_contributions: !self.no_contributions,
            exclude_contributions: self.exclude_contributions,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does into_options() take `self` and not `&self`?
//    - The flags are only needed once, to build FetchOptions
//    - Taking ownership lets the --exclude names move into the result
//      instead of being cloned
// -----------------------------------------------------------------------------

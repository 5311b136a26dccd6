// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (RUST_LOG, default "info", written to stderr)
// 2. Parse command-line arguments using clap
// 3. Read the environment ONCE into Settings and load the override tables
// 4. Dispatch to the appropriate subcommand handler
// 5. Exit with proper code (0 = success, 2 = error)
//
// Logs go to stderr so that `list --json` output on stdout can be piped
// straight into other tools.
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - environment + override file
mod error;         // src/error.rs - aggregator error taxonomy
mod github;        // src/github/ - GitHub REST API client
mod projects;      // src/projects/ - repositories -> portfolio projects
mod server;        // src/server/ - the /api/github endpoint

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands, ListFlags};
use config::Settings;
use github::GitHubClient;
use projects::{OverrideTables, Project};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole anyhow context chain on one line
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(api_base) = cli.api_base {
        settings.api_base = api_base;
    }

    let overrides = config::load_overrides(cli.overrides.as_deref())?;
    let client = GitHubClient::new(&settings.api_base)?;

    match cli.command {
        Commands::List {
            username,
            include_forks,
            include_archived,
            include_private,
            no_contributions,
            exclude_contributions,
            exclude,
            json,
        } => {
            let username = username
                .or_else(|| settings.default_username.clone())
                .context("No username given and GITHUB_USERNAME is not set")?;
            let flags = ListFlags {
                include_forks,
                include_archived,
                include_private,
                no_contributions,
                exclude_contributions,
                exclude,
            };
            handle_list(&client, &settings, &overrides, &username, flags, json).await
        }
        Commands::Serve { bind } => handle_serve(client, settings, overrides, bind).await,
    }
}

// Handles the 'list' subcommand
async fn handle_list(
    client: &GitHubClient,
    settings: &Settings,
    overrides: &OverrideTables,
    username: &str,
    flags: ListFlags,
    json: bool,
) -> Result<i32> {
    if flags.include_private && settings.token().is_none() {
        tracing::warn!("--include-private has no effect without GITHUB_TOKEN");
    }

    let options = flags.into_options(overrides.excluded());
    let mut projects =
        projects::fetch_projects(client, username, settings.token(), &options, overrides).await?;

    projects::pin_to_front(&mut projects, overrides.pinned());

    print_results(&projects, json)?;
    Ok(0)
}

// Handles the 'serve' subcommand
async fn handle_serve(
    client: GitHubClient,
    settings: Settings,
    overrides: OverrideTables,
    bind: SocketAddr,
) -> Result<i32> {
    if settings.token.is_none() {
        tracing::info!("GITHUB_TOKEN not set; includePrivate requests will list public repositories only");
    }

    let state = server::AppState {
        client,
        token: settings.token,
        overrides: Arc::new(overrides),
    };
    server::serve(bind, state).await?;
    Ok(0)
}

// Prints the projects either as a table or JSON
fn print_results(projects: &[Project], json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(projects)?;
        println!("{}", json_output);
    } else {
        print_table(projects);
    }
    Ok(())
}

// Prints projects as a human-readable table in the terminal
fn print_table(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects to show.");
        return;
    }

    println!("{:<40} {:<12} {:>6} {:>6}  {:<40}", "NAME", "LANGUAGE", "STARS", "FORKS", "DESCRIPTION");
    println!("{}", "=".repeat(108));

    for project in projects {
        let mut name = truncate(&project.name, 37);
        if project.private {
            name.push_str(" 🔒");
        }
        if project.is_contributed {
            name.push_str(" 🤝");
        }

        println!(
            "{:<40} {:<12} {:>6} {:>6}  {:<40}",
            name,
            project.language.as_deref().unwrap_or("-"),
            project.stars,
            project.forks,
            truncate(&project.description, 40)
        );
    }

    println!();
    println!("📋 Total: {}", projects.len());
}

// Shortens text for a table column, respecting char boundaries
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let shortened: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", shortened)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer description", 10), "a much ...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}

// src/projects/mod.rs
// =============================================================================
// This module turns GitHub repositories into portfolio projects.
//
// Submodules:
// - model: Project, ExperienceLink, FetchOptions
// - overrides: the curated tables (descriptions, tech stacks, links)
// - filter: which repositories are kept
// - aggregate: fetch + annotate + filter + merge, in one pass
// - pinned: moves hand-picked projects to the front for display
// =============================================================================

mod aggregate;
mod filter;
mod model;
mod overrides;
mod pinned;

pub use aggregate::fetch_projects;
pub use model::{FetchOptions, Project};
pub use overrides::OverrideTables;
pub use pinned::pin_to_front;

// src/projects/pinned.rs
// =============================================================================
// Display ordering: pinned projects first.
//
// The portfolio page shows a few hand-picked projects before everything
// else. Pinned names keep the order they have in the pinned list; all other
// projects keep their relative order (GitHub's "most recently updated").
// =============================================================================

use super::model::Project;
use super::overrides::normalize_name;

/// Moves pinned projects to the front, in pinned-list order
pub fn pin_to_front(projects: &mut [Project], pinned: &[String]) {
    if pinned.is_empty() {
        return;
    }

    let pinned: Vec<String> = pinned.iter().map(|name| normalize_name(name)).collect();
    let priority = |project: &Project| {
        let name = normalize_name(&project.name);
        pinned
            .iter()
            .position(|p| *p == name)
            .unwrap_or(usize::MAX)
    };

    // sort_by_cached_key is stable, so unpinned projects keep their order
    projects.sort_by_cached_key(priority);
}

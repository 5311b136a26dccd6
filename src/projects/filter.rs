// src/projects/filter.rs
// =============================================================================
// Decides which repositories survive to become projects.
//
// A repository is kept only if it passes EVERY enabled check:
// - not a fork            (when exclude_forks)
// - not archived          (when exclude_archived)
// - not on the exclusion list, ignoring case (always)
// - not a contribution    (when exclude_contributions)
//
// keeps() is a plain AND of independent predicates, so the order the checks
// run in never changes the result.
// =============================================================================

use super::model::FetchOptions;
use super::overrides::name_in_list;
use crate::github::RemoteRepository;

/// Filter policy for one invocation
#[derive(Debug, Clone, Copy)]
pub struct RepoFilter<'a> {
    exclude_forks: bool,
    exclude_archived: bool,
    exclude_contributions: bool,
    excluded_repos: &'a [String],
}

impl<'a> RepoFilter<'a> {
    pub fn new(options: &'a FetchOptions) -> Self {
        Self {
            exclude_forks: options.exclude_forks,
            exclude_archived: options.exclude_archived,
            exclude_contributions: options.exclude_contributions,
            excluded_repos: &options.excluded_repos,
        }
    }

    /// Should this repository be shown?
    ///
    /// `is_contributed` is computed by the caller (see is_contributed()).
    pub fn keeps(&self, repo: &RemoteRepository, is_contributed: bool) -> bool {
        !(self.exclude_forks && repo.fork)
            && !(self.exclude_archived && repo.archived)
            && !name_in_list(self.excluded_repos, &repo.name)
            && !(self.exclude_contributions && is_contributed)
    }
}

/// True when the repository belongs to someone other than `username`
///
/// Without a token we only ever list `username`'s own public repositories,
/// so nothing counts as a contribution. Owner logins are compared ignoring
/// case, because GitHub logins are case-insensitive.
pub fn is_contributed(repo: &RemoteRepository, username: &str, token: Option<&str>) -> bool {
    token.is_some() && !repo.owner.login.eq_ignore_ascii_case(username)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::RepositoryOwner;

    fn repo(id: u64, name: &str, owner: &str, fork: bool, archived: bool) -> RemoteRepository {
        RemoteRepository {
            id,
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/{}/{}", owner, name),
            homepage: None,
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: "2024-01-01T00:00:00Z".parse().unwrap(),
            topics: vec![],
            default_branch: "main".to_string(),
            private: false,
            fork,
            archived,
            owner: RepositoryOwner {
                login: owner.to_string(),
            },
        }
    }

    #[test]
    fn test_fork_filter() {
        let fork = repo(2, "bar", "alice", true, false);

        let strict = FetchOptions::default();
        assert!(!RepoFilter::new(&strict).keeps(&fork, false));

        let lenient = FetchOptions {
            exclude_forks: false,
            ..FetchOptions::default()
        };
        assert!(RepoFilter::new(&lenient).keeps(&fork, false));
    }

    #[test]
    fn test_archived_filter() {
        let old = repo(3, "old", "alice", false, true);

        assert!(!RepoFilter::new(&FetchOptions::default()).keeps(&old, false));

        let options = FetchOptions {
            exclude_archived: false,
            ..FetchOptions::default()
        };
        assert!(RepoFilter::new(&options).keeps(&old, false));
    }

    #[test]
    fn test_exclusion_wins_regardless_of_other_flags() {
        let options = FetchOptions {
            exclude_forks: false,
            exclude_archived: false,
            excluded_repos: vec!["Secret-Project".to_string()],
            ..FetchOptions::default()
        };
        let filter = RepoFilter::new(&options);

        let mut popular = repo(4, "secret-project", "alice", false, false);
        popular.stargazers_count = 10_000;
        assert!(!filter.keeps(&popular, false));
        assert!(!filter.keeps(&popular, true));
        assert!(!filter.keeps(&repo(5, "SECRET-PROJECT", "bob", true, true), true));
    }

    #[test]
    fn test_contribution_filter() {
        let theirs = repo(6, "shared", "acme", false, false);

        let options = FetchOptions {
            exclude_contributions: true,
            ..FetchOptions::default()
        };
        assert!(!RepoFilter::new(&options).keeps(&theirs, true));
        assert!(RepoFilter::new(&options).keeps(&theirs, false));
        assert!(RepoFilter::new(&FetchOptions::default()).keeps(&theirs, true));
    }

    #[test]
    fn test_filters_commute() {
        // Every combination of flags gives the same survivors as applying the
        // checks one at a time in reverse order.
        let repos = vec![
            (repo(1, "a", "alice", false, false), false),
            (repo(2, "b", "alice", true, false), false),
            (repo(3, "c", "alice", false, true), false),
            (repo(4, "d", "acme", false, false), true),
            (repo(5, "skip", "alice", false, false), false),
            (repo(6, "e", "acme", true, true), true),
        ];

        for mask in 0..8u8 {
            let options = FetchOptions {
                exclude_forks: mask & 1 != 0,
                exclude_archived: mask & 2 != 0,
                exclude_contributions: mask & 4 != 0,
                excluded_repos: vec!["SKIP".to_string()],
                ..FetchOptions::default()
            };
            let filter = RepoFilter::new(&options);

            let combined: Vec<u64> = repos
                .iter()
                .filter(|(r, c)| filter.keeps(r, *c))
                .map(|(r, _)| r.id)
                .collect();

            let stepwise: Vec<u64> = repos
                .iter()
                .filter(|(_, c)| !(options.exclude_contributions && *c))
                .filter(|(r, _)| !name_in_list(&options.excluded_repos, &r.name))
                .filter(|(r, _)| !(options.exclude_archived && r.archived))
                .filter(|(r, _)| !(options.exclude_forks && r.fork))
                .map(|(r, _)| r.id)
                .collect();

            assert_eq!(combined, stepwise, "mask {:03b}", mask);
        }
    }

    #[test]
    fn test_no_contributions_without_token() {
        let theirs = repo(7, "shared", "acme", false, false);
        assert!(!is_contributed(&theirs, "alice", None));
        assert!(is_contributed(&theirs, "alice", Some("t0k")));
    }

    #[test]
    fn test_owner_comparison_ignores_case() {
        let mine = repo(8, "mine", "Alice", false, false);
        assert!(!is_contributed(&mine, "alice", Some("t0k")));
    }
}

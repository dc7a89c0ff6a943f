use crate::github::types::{AccountProfile, RepositorySummary};

/// Everything the views render. Only changed through [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub user: Option<AccountProfile>,
    pub repositories: Vec<RepositorySummary>,
    pub selected_repo: Option<u64>,
    pub readme_content: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    SetLoading(bool),
    SetUser(AccountProfile),
    SetRepositories(Vec<RepositorySummary>),
    SetSelectedRepo(Option<u64>),
    SetReadmeContent(String),
    SetError(Option<String>),
    ClearData,
}

pub fn initial_state() -> AppState {
    AppState {
        user: None,
        repositories: Vec::new(),
        selected_repo: None,
        readme_content: None,
        loading: false,
        error: None,
    }
}

impl Default for AppState {
    fn default() -> Self {
        initial_state()
    }
}

impl AppState {
    pub fn selected(&self) -> Option<&RepositorySummary> {
        let id = self.selected_repo?;
        self.repositories.iter().find(|r| r.id == id)
    }

    pub fn dispatch(&mut self, transition: Transition) {
        *self = reduce(std::mem::take(self), transition);
    }
}

pub fn reduce(state: AppState, transition: Transition) -> AppState {
    match transition {
        Transition::SetLoading(loading) => AppState { loading, ..state },
        Transition::SetUser(user) => AppState {
            user: Some(user),
            error: None,
            ..state
        },
        Transition::SetRepositories(repositories) => {
            // selection must point into the new set
            let keep = state
                .selected_repo
                .filter(|id| repositories.iter().any(|r| r.id == *id));
            let readme_content = if keep.is_some() {
                state.readme_content
            } else {
                None
            };
            AppState {
                repositories,
                selected_repo: keep,
                readme_content,
                error: None,
                ..state
            }
        }
        Transition::SetSelectedRepo(Some(id)) if !state.repositories.iter().any(|r| r.id == id) => {
            tracing::debug!(id, "ignoring selection of unknown repository");
            state
        }
        Transition::SetSelectedRepo(selected_repo) => AppState {
            selected_repo,
            readme_content: None,
            ..state
        },
        Transition::SetReadmeContent(_) if state.selected_repo.is_none() => state,
        Transition::SetReadmeContent(text) => AppState {
            readme_content: Some(text),
            ..state
        },
        Transition::SetError(error) => AppState {
            error,
            loading: false,
            ..state
        },
        Transition::ClearData => initial_state(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn populated() -> AppState {
        let mut state = initial_state();
        state.dispatch(Transition::SetUser(make_profile("octocat")));
        state.dispatch(Transition::SetRepositories(vec![
            make_repo(1, "hello-world", true),
            make_repo(2, "spoon-knife", false),
        ]));
        state.dispatch(Transition::SetSelectedRepo(Some(1)));
        state.dispatch(Transition::SetReadmeContent("# Hello".into()));
        state.dispatch(Transition::SetLoading(true));
        state.dispatch(Transition::SetError(Some("boom".into())));
        state
    }

    #[test]
    fn clear_data_resets_any_state() {
        assert_eq!(reduce(populated(), Transition::ClearData), initial_state());
        assert_eq!(reduce(initial_state(), Transition::ClearData), initial_state());
    }

    #[test]
    fn set_error_forces_loading_off() {
        let state = reduce(
            AppState {
                loading: true,
                ..initial_state()
            },
            Transition::SetError(Some("nope".into())),
        );
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("nope"));
    }

    #[test]
    fn successful_data_clears_error() {
        let state = reduce(
            AppState {
                error: Some("old".into()),
                ..initial_state()
            },
            Transition::SetUser(make_profile("octocat")),
        );
        assert!(state.error.is_none());

        let state = reduce(
            AppState {
                error: Some("old".into()),
                ..initial_state()
            },
            Transition::SetRepositories(vec![]),
        );
        assert!(state.error.is_none());
    }

    #[test]
    fn selection_must_exist() {
        let mut state = initial_state();
        state.dispatch(Transition::SetRepositories(vec![make_repo(1, "a", true)]));
        state.dispatch(Transition::SetSelectedRepo(Some(99)));
        assert_eq!(state.selected_repo, None);

        state.dispatch(Transition::SetSelectedRepo(Some(1)));
        assert_eq!(state.selected().map(|r| r.name.as_str()), Some("a"));
    }

    #[test]
    fn readme_requires_selection() {
        let state = reduce(initial_state(), Transition::SetReadmeContent("text".into()));
        assert!(state.readme_content.is_none());
    }

    #[test]
    fn changing_or_clearing_selection_drops_readme() {
        let state = populated();
        assert_eq!(state.readme_content.as_deref(), Some("# Hello"));

        let switched = reduce(state.clone(), Transition::SetSelectedRepo(Some(2)));
        assert_eq!(switched.selected_repo, Some(2));
        assert!(switched.readme_content.is_none());

        let closed = reduce(state, Transition::SetSelectedRepo(None));
        assert!(closed.selected_repo.is_none());
        assert!(closed.readme_content.is_none());
    }

    #[test]
    fn new_repository_set_drops_stale_selection() {
        let state = reduce(
            populated(),
            Transition::SetRepositories(vec![make_repo(3, "other", false)]),
        );
        assert!(state.selected_repo.is_none());
        assert!(state.readme_content.is_none());

        let kept = reduce(
            populated(),
            Transition::SetRepositories(vec![make_repo(1, "hello-world", true)]),
        );
        assert_eq!(kept.selected_repo, Some(1));
        assert_eq!(kept.readme_content.as_deref(), Some("# Hello"));
    }
}

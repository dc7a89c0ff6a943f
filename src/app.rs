use crate::event::AppEvent;
use crate::filter::RepoFilter;
use crate::github::client::GitHubClient;
use crate::github::loader;
use crate::github::types::RepositorySummary;
use crate::state::{AppState, Transition};
use crate::ui::{
    help_panel::HelpPanel,
    input::{self, Action, InputMode},
    profile_panel::ProfilePanel,
    readme_viewer::{self, ReadmeViewer},
    repo_list::{RepoList, ENTRY_HEIGHT},
    search_bar::SearchBar,
    status_bar::StatusBar,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub const README_UNAVAILABLE: &str = "README not found or could not be loaded.";
const PAGE: usize = 10;
const README_PAGE: u16 = 20;

/// Work the event loop must run off the UI thread. `seq` identifies the
/// request so late answers to superseded ones can be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Search {
        seq: u64,
        handle: String,
    },
    Readme {
        seq: u64,
        repo_id: u64,
        owner: String,
        repo: String,
    },
}

impl Request {
    pub async fn run(self, client: &GitHubClient) -> AppEvent {
        match self {
            Request::Search { seq, handle } => AppEvent::SearchFinished {
                seq,
                result: loader::search(client, &handle).await,
            },
            Request::Readme {
                seq,
                repo_id,
                owner,
                repo,
            } => AppEvent::ReadmeLoaded {
                seq,
                repo_id,
                result: loader::fetch_readme_content(client, &owner, &repo).await,
            },
        }
    }
}

pub struct App {
    pub state: AppState,
    pub mode: InputMode,
    pub query: String,
    pub filter: RepoFilter,
    pub cursor: usize,
    pub list_scroll: usize,
    pub readme_scroll: u16,
    /// Text width of the README viewer at the last draw; 0 before the first.
    pub readme_width: u16,
    pub show_help: bool,
    pub cache_entries: usize,
    pub should_quit: bool,
    search_seq: u64,
    readme_seq: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            mode: InputMode::Search,
            query: String::new(),
            filter: RepoFilter::default(),
            cursor: 0,
            list_scroll: 0,
            readme_scroll: 0,
            readme_width: 0,
            show_help: false,
            cache_entries: 0,
            should_quit: false,
            search_seq: 0,
            readme_seq: 0,
        }
    }

    /// Mode used to interpret the next key press.
    pub fn input_mode(&self) -> InputMode {
        if self.show_help {
            InputMode::Browse
        } else if self.state.selected_repo.is_some() {
            InputMode::Reader
        } else {
            self.mode
        }
    }

    pub fn visible_repos(&self) -> Vec<&RepositorySummary> {
        self.filter.apply(&self.state.repositories)
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Request> {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, self.input_mode());
                self.handle_action(action)
            }
            AppEvent::Resize => None,
            AppEvent::SearchFinished { seq, result } => {
                if seq != self.search_seq {
                    tracing::debug!(seq, current = self.search_seq, "dropping stale search result");
                    return None;
                }
                match result {
                    Ok(results) => {
                        self.state.dispatch(Transition::SetUser(results.profile));
                        self.state
                            .dispatch(Transition::SetRepositories(results.repositories));
                        self.state.dispatch(Transition::SetLoading(false));
                        self.mode = InputMode::Browse;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "search failed");
                        self.state.dispatch(Transition::SetError(Some(e.to_string())));
                        self.mode = InputMode::Search;
                    }
                }
                None
            }
            AppEvent::ReadmeLoaded {
                seq,
                repo_id,
                result,
            } => {
                if seq != self.readme_seq || self.state.selected_repo != Some(repo_id) {
                    tracing::debug!(seq, repo_id, "dropping stale readme");
                    return None;
                }
                let text = result.unwrap_or_else(|e| {
                    tracing::warn!(repo_id, error = %e, "readme fetch failed");
                    README_UNAVAILABLE.to_string()
                });
                self.state.dispatch(Transition::SetReadmeContent(text));
                self.state.dispatch(Transition::SetLoading(false));
                None
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Option<Request> {
        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::None => {}
                _ => self.show_help = false,
            }
            return None;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.move_down(1),
            Action::ScrollUp => self.move_up(1),
            Action::PageDown => self.move_down(PAGE),
            Action::PageUp => self.move_up(PAGE),
            Action::Top => {
                if self.input_mode() == InputMode::Reader {
                    self.readme_scroll = 0;
                } else {
                    self.cursor = 0;
                }
            }
            Action::Bottom => {
                if self.input_mode() == InputMode::Reader {
                    self.readme_scroll = self.readme_max_scroll();
                } else {
                    self.cursor = self.visible_repos().len().saturating_sub(1);
                }
            }
            Action::Select => return self.open_selected(),
            Action::FocusSearch => self.mode = InputMode::Search,
            Action::Filter => self.mode = InputMode::Filter,
            Action::CycleReadmeFilter => {
                self.filter.readme = self.filter.readme.next();
                self.cursor = 0;
            }
            Action::InputChar(c) => {
                if self.mode == InputMode::Filter {
                    self.filter.term.push(c);
                    self.cursor = 0;
                } else {
                    self.query.push(c);
                }
            }
            Action::InputBackspace => {
                if self.mode == InputMode::Filter {
                    self.filter.term.pop();
                    self.cursor = 0;
                } else {
                    self.query.pop();
                }
            }
            Action::InputConfirm => {
                if self.mode == InputMode::Filter {
                    self.mode = InputMode::Browse;
                } else {
                    return self.submit_search();
                }
            }
            Action::InputCancel => {
                if self.mode == InputMode::Filter {
                    self.filter.term.clear();
                    self.cursor = 0;
                }
                self.mode = InputMode::Browse;
            }
            Action::Help => self.show_help = true,
            Action::ClosePopup => self.close_viewer(),
            Action::None => {}
        }
        None
    }

    pub fn submit_search(&mut self) -> Option<Request> {
        let handle = self.query.trim().to_string();
        if handle.is_empty() {
            return None;
        }

        self.search_seq += 1;
        self.state.dispatch(Transition::ClearData);
        self.state.dispatch(Transition::SetLoading(true));
        self.cursor = 0;
        self.list_scroll = 0;
        self.readme_scroll = 0;
        self.mode = InputMode::Browse;

        tracing::info!(handle = %handle, seq = self.search_seq, "search submitted");
        Some(Request::Search {
            seq: self.search_seq,
            handle,
        })
    }

    fn open_selected(&mut self) -> Option<Request> {
        let owner = self.state.user.as_ref()?.login.clone();
        let (repo_id, repo) = {
            let visible = self.visible_repos();
            let repo = visible.get(self.cursor)?;
            (repo.id, repo.name.clone())
        };

        self.readme_seq += 1;
        self.readme_scroll = 0;
        self.state.dispatch(Transition::SetSelectedRepo(Some(repo_id)));
        self.state.dispatch(Transition::SetLoading(true));

        Some(Request::Readme {
            seq: self.readme_seq,
            repo_id,
            owner,
            repo,
        })
    }

    fn close_viewer(&mut self) {
        if self.state.selected_repo.is_none() {
            return;
        }
        self.state.dispatch(Transition::SetSelectedRepo(None));
        if self.state.loading {
            self.state.dispatch(Transition::SetLoading(false));
        }
        self.readme_scroll = 0;
    }

    fn readme_max_scroll(&self) -> u16 {
        let rows = self
            .state
            .readme_content
            .as_deref()
            .map(|t| readme_viewer::rendered_height(t, self.readme_width))
            .unwrap_or(0);
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn move_down(&mut self, step: usize) {
        if self.input_mode() == InputMode::Reader {
            let step = if step > 1 { README_PAGE } else { 1 };
            self.readme_scroll = self
                .readme_scroll
                .saturating_add(step)
                .min(self.readme_max_scroll());
            return;
        }
        let len = self.visible_repos().len();
        if len > 0 {
            self.cursor = (self.cursor + step).min(len - 1);
        }
    }

    fn move_up(&mut self, step: usize) {
        if self.input_mode() == InputMode::Reader {
            let step = if step > 1 { README_PAGE } else { 1 };
            self.readme_scroll = self.readme_scroll.saturating_sub(step);
            return;
        }
        self.cursor = self.cursor.saturating_sub(step);
    }

    fn ensure_scroll_bounds(&mut self, visible_entries: usize) {
        if visible_entries == 0 {
            return;
        }
        if self.cursor >= self.list_scroll + visible_entries {
            self.list_scroll = self.cursor - visible_entries + 1;
        }
        if self.cursor < self.list_scroll {
            self.list_scroll = self.cursor;
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(1)])
            .split(main_chunks[1]);

        let list_inner_height = body_chunks[1].height.saturating_sub(2) as usize;
        self.ensure_scroll_bounds(list_inner_height / ENTRY_HEIGHT);

        if self.state.selected_repo.is_some() {
            self.readme_width = readme_viewer::text_area(size).width;
            self.readme_scroll = self.readme_scroll.min(self.readme_max_scroll());
        }

        let search = SearchBar {
            query: &self.query,
            editing: self.input_mode() == InputMode::Search,
            loading: self.state.loading && self.state.selected_repo.is_none(),
            error: self.state.error.as_deref(),
        };
        frame.render_widget(search, main_chunks[0]);

        let profile = ProfilePanel {
            user: self.state.user.as_ref(),
        };
        frame.render_widget(profile, body_chunks[0]);

        let visible = self.visible_repos();
        let list = RepoList {
            repos: &visible,
            total: self.state.repositories.len(),
            selected: self.cursor,
            scroll: self.list_scroll,
            filter: &self.filter,
            has_user: self.state.user.is_some(),
            focused: self.input_mode() == InputMode::Browse,
        };
        frame.render_widget(list, body_chunks[1]);

        let status = StatusBar {
            handle: self.state.user.as_ref().map(|u| u.login.as_str()),
            repo_count: self.state.repositories.len(),
            visible_count: visible.len(),
            filter: &self.filter,
            mode: self.input_mode(),
            cache_entries: self.cache_entries,
        };
        frame.render_widget(status, main_chunks[2]);

        if let Some(repo) = self.state.selected() {
            let viewer = ReadmeViewer {
                repo_name: &repo.name,
                content: self.state.readme_content.as_deref(),
                loading: self.state.loading,
                scroll: self.readme_scroll,
            };
            frame.render_widget(viewer, size);
        }

        if self.show_help {
            frame.render_widget(HelpPanel, size);
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ServiceError};
    use crate::github::loader::SearchResults;
    use crate::test_utils::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn press(app: &mut App, code: KeyCode) -> Option<Request> {
        app.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn results() -> SearchResults {
        SearchResults {
            profile: make_profile("octocat"),
            repositories: vec![
                make_repo(1, "hello-world", true),
                make_repo(2, "spoon-knife", false),
            ],
        }
    }

    fn loaded_app() -> App {
        let mut app = App::new();
        type_text(&mut app, "octocat");
        let Some(Request::Search { seq, .. }) = press(&mut app, KeyCode::Enter) else {
            panic!("expected search request");
        };
        app.handle_event(AppEvent::SearchFinished {
            seq,
            result: Ok(results()),
        });
        app
    }

    #[test]
    fn submit_trims_handle_and_enters_loading() {
        let mut app = App::new();
        type_text(&mut app, "  octocat ");
        let request = press(&mut app, KeyCode::Enter);

        assert_eq!(
            request,
            Some(Request::Search {
                seq: 1,
                handle: "octocat".into()
            })
        );
        assert!(app.state.loading);
        assert!(app.state.user.is_none());
        assert!(app.state.error.is_none());
    }

    #[test]
    fn blank_submit_is_ignored() {
        let mut app = App::new();
        type_text(&mut app, "   ");
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert!(!app.state.loading);
    }

    #[test]
    fn successful_search_populates_state() {
        let app = loaded_app();
        assert_eq!(app.state.repositories.len(), 2);
        assert_eq!(app.state.user.as_ref().map(|u| u.login.as_str()), Some("octocat"));
        assert!(!app.state.loading);
        assert_eq!(app.input_mode(), InputMode::Browse);
    }

    #[test]
    fn superseded_search_result_is_dropped() {
        let mut app = App::new();
        type_text(&mut app, "first");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));
        for _ in 0..5 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "second");
        press(&mut app, KeyCode::Enter);

        let mut late = results();
        late.profile = make_profile("first");
        app.handle_event(AppEvent::SearchFinished {
            seq: 1,
            result: Ok(late),
        });
        assert!(app.state.user.is_none());
        assert!(app.state.loading);

        let mut fresh = results();
        fresh.profile = make_profile("second");
        app.handle_event(AppEvent::SearchFinished {
            seq: 2,
            result: Ok(fresh),
        });
        assert_eq!(app.state.user.as_ref().map(|u| u.login.as_str()), Some("second"));
        assert!(!app.state.loading);
    }

    #[test]
    fn failed_search_sets_error_and_returns_to_input() {
        let mut app = App::new();
        type_text(&mut app, "ghost");
        press(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::SearchFinished {
            seq: 1,
            result: Err(ServiceError::NotFound),
        });

        assert_eq!(app.state.error.as_deref(), Some("User not found"));
        assert!(!app.state.loading);
        assert_eq!(app.input_mode(), InputMode::Search);
    }

    #[test]
    fn selecting_requests_readme_and_shows_it() {
        let mut app = loaded_app();
        let request = press(&mut app, KeyCode::Enter);
        assert_eq!(
            request,
            Some(Request::Readme {
                seq: 1,
                repo_id: 1,
                owner: "octocat".into(),
                repo: "hello-world".into()
            })
        );
        assert_eq!(app.input_mode(), InputMode::Reader);
        assert!(app.state.loading);

        app.handle_event(AppEvent::ReadmeLoaded {
            seq: 1,
            repo_id: 1,
            result: Ok("# Hello".into()),
        });
        assert_eq!(app.state.readme_content.as_deref(), Some("# Hello"));
        assert!(!app.state.loading);
    }

    #[test]
    fn readme_failure_shows_placeholder() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::ReadmeLoaded {
            seq: 1,
            repo_id: 2,
            result: Err(ServiceError::Readme(FetchError::NotFound)),
        });
        assert_eq!(app.state.readme_content.as_deref(), Some(README_UNAVAILABLE));
    }

    #[test]
    fn closing_viewer_clears_selection_and_drops_late_readme() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        assert!(app.state.selected_repo.is_none());
        assert!(!app.state.loading);

        app.handle_event(AppEvent::ReadmeLoaded {
            seq: 1,
            repo_id: 1,
            result: Ok("late".into()),
        });
        assert!(app.state.readme_content.is_none());
    }

    #[test]
    fn readme_for_previous_selection_is_dropped() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        app.handle_event(AppEvent::ReadmeLoaded {
            seq: 1,
            repo_id: 1,
            result: Ok("stale".into()),
        });
        assert_eq!(app.state.selected_repo, Some(2));
        assert!(app.state.readme_content.is_none());
        assert!(app.state.loading);
    }

    #[test]
    fn bottom_reaches_last_wrapped_row() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Enter);
        app.handle_event(AppEvent::ReadmeLoaded {
            seq: 1,
            repo_id: 1,
            result: Ok("word ".repeat(40)),
        });
        app.readme_width = 20;

        press(&mut app, KeyCode::Char('G'));
        let last = readme_viewer::rendered_height(&"word ".repeat(40), 20) - 1;
        assert!(last >= 9);
        assert_eq!(app.readme_scroll as usize, last);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.readme_scroll as usize, last);
    }

    #[test]
    fn filter_narrows_list_and_resets_cursor() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "spoon");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.cursor, 0);
        let visible: Vec<_> = app.visible_repos().iter().map(|r| r.id).collect();
        assert_eq!(visible, vec![2]);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.visible_repos().len(), 2);
    }

    #[test]
    fn cursor_stays_within_visible_list() {
        let mut app = loaded_app();
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn help_closes_on_any_key() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert!(!app.show_help);
        assert!(app.state.selected_repo.is_none());
    }

    #[tokio::test]
    async fn octocat_search_end_to_end() {
        let server = MockServer::start().await;
        mount_user(&server, user_json("octocat", Some("The Octocat"))).await;
        mount_repos(
            &server,
            "octocat",
            json!([repo_json(1, "hello-world"), repo_json(2, "spoon-knife")]),
        )
        .await;
        mount_readme(&server, "octocat", "hello-world", "# Hello World").await;
        let client = GitHubClient::new(&server.uri(), None, Duration::from_secs(600)).unwrap();

        let mut app = App::new();
        type_text(&mut app, "octocat");
        let request = press(&mut app, KeyCode::Enter).expect("search request");
        let event = request.run(&client).await;
        app.handle_event(event);

        assert_eq!(app.state.repositories.len(), 2);
        assert!(app.state.repositories[0].has_readme);
        assert!(!app.state.repositories[1].has_readme);
        assert!(!app.state.loading);
        assert!(app.state.error.is_none());

        let request = press(&mut app, KeyCode::Enter).expect("readme request");
        let event = request.run(&client).await;
        app.handle_event(event);
        assert_eq!(app.state.readme_content.as_deref(), Some("# Hello World"));
    }

    #[tokio::test]
    async fn rate_limited_search_reports_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        mount_repos(&server, "octocat", json!([])).await;
        let client = GitHubClient::new(&server.uri(), None, Duration::from_secs(600)).unwrap();

        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('s'));
        let request = press(&mut app, KeyCode::Enter).expect("search request");
        let event = request.run(&client).await;
        app.handle_event(event);

        assert_eq!(
            app.state.error.as_deref(),
            Some("Rate limit exceeded. Please try again later.")
        );
        assert!(!app.state.loading);
        assert!(app.state.repositories.is_empty());
    }
}

use crate::error::ServiceError;
use crate::github::loader::SearchResults;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    SearchFinished {
        seq: u64,
        result: Result<SearchResults, ServiceError>,
    },
    ReadmeLoaded {
        seq: u64,
        repo_id: u64,
        result: Result<String, ServiceError>,
    },
}

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// `/users/{handle}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub html_url: String,
}

/// One element of `/users/{handle}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
}

/// `/repos/{owner}/{repo}/readme` response; `content` is base64 with line breaks.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeResponse {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: u64,
    pub login: String,
    pub name: String,
    pub avatar_url: String,
    pub bio: String,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub html_url: String,
}

impl From<UserResponse> for AccountProfile {
    fn from(raw: UserResponse) -> Self {
        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| raw.login.clone());
        Self {
            id: raw.id,
            login: raw.login,
            name,
            avatar_url: raw.avatar_url,
            bio: raw.bio.unwrap_or_default(),
            public_repos: raw.public_repos,
            followers: raw.followers,
            following: raw.following,
            html_url: raw.html_url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadmePresence {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub language: String,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub has_readme: bool,
}

impl RepositorySummary {
    pub fn from_response(raw: RepoResponse, readme: ReadmePresence) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description.unwrap_or_default(),
            language: raw
                .language
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            stargazers_count: raw.stargazers_count,
            forks_count: raw.forks_count,
            updated_at: raw.updated_at,
            html_url: raw.html_url,
            has_readme: readme == ReadmePresence::Present,
        }
    }
}

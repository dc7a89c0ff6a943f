#![cfg(test)]

use crate::github::types::{AccountProfile, RepositorySummary};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn make_profile(login: &str) -> AccountProfile {
    AccountProfile {
        id: 1,
        login: login.to_string(),
        name: login.to_string(),
        avatar_url: format!("https://avatars.example/{login}"),
        bio: String::new(),
        public_repos: 2,
        followers: 10,
        following: 3,
        html_url: format!("https://github.com/{login}"),
    }
}

pub fn make_repo(id: u64, name: &str, has_readme: bool) -> RepositorySummary {
    RepositorySummary {
        id,
        name: name.to_string(),
        description: format!("{name} description"),
        language: "Rust".to_string(),
        stargazers_count: id as u32 * 10,
        forks_count: id as u32,
        updated_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
        html_url: format!("https://github.com/octocat/{name}"),
        has_readme,
    }
}

pub fn user_json(login: &str, name: Option<&str>) -> Value {
    json!({
        "id": 583231,
        "login": login,
        "name": name,
        "avatar_url": format!("https://avatars.example/{login}"),
        "bio": null,
        "public_repos": 2,
        "followers": 42,
        "following": 9,
        "html_url": format!("https://github.com/{login}")
    })
}

pub fn repo_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "language": "Rust",
        "stargazers_count": 5,
        "forks_count": 2,
        "updated_at": "2024-03-05T10:00:00Z",
        "html_url": format!("https://github.com/octocat/{name}")
    })
}

/// README body encoded the way the API wraps it: base64 broken every 60 chars.
pub fn readme_json(text: &str) -> Value {
    let encoded = STANDARD.encode(text);
    let wrapped = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>()
        .join("\n");
    json!({ "content": wrapped, "encoding": "base64" })
}

pub async fn mount_user(server: &MockServer, body: Value) {
    let login = body["login"].as_str().unwrap_or_default().to_string();
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_repos(server: &MockServer, login: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{login}/repos")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_readme(server: &MockServer, login: &str, repo: &str, text: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{login}/{repo}/readme")))
        .respond_with(ResponseTemplate::new(200).set_body_json(readme_json(text)))
        .mount(server)
        .await;
}

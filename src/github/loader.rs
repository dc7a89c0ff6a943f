use crate::error::{FetchError, ServiceError};
use crate::github::client::GitHubClient;
use crate::github::types::{
    AccountProfile, ReadmePresence, ReadmeResponse, RepoResponse, RepositorySummary, UserResponse,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use futures::future::join_all;

pub const REPO_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub profile: AccountProfile,
    pub repositories: Vec<RepositorySummary>,
}

fn user_endpoint(handle: &str) -> String {
    format!("/users/{}", urlencoding::encode(handle))
}

fn repos_endpoint(handle: &str) -> String {
    format!(
        "/users/{}/repos?sort=updated&per_page={REPO_PAGE_SIZE}",
        urlencoding::encode(handle)
    )
}

fn readme_endpoint(handle: &str, repo: &str) -> String {
    format!(
        "/repos/{}/{}/readme",
        urlencoding::encode(handle),
        urlencoding::encode(repo)
    )
}

/// `NotFound` and `RateLimited` keep their own message whichever fetch hits
/// them first; anything else gets the caller's generic wrapper.
fn classified_or(wrap: fn(FetchError) -> ServiceError) -> impl Fn(FetchError) -> ServiceError {
    move |e| match e {
        FetchError::NotFound => ServiceError::NotFound,
        FetchError::RateLimited => ServiceError::RateLimited,
        other => wrap(other),
    }
}

pub async fn fetch_user(client: &GitHubClient, handle: &str) -> Result<AccountProfile, ServiceError> {
    client
        .get_json::<UserResponse>(&user_endpoint(handle))
        .await
        .map(AccountProfile::from)
        .map_err(classified_or(ServiceError::UserData))
}

/// Whether `repo` has a README. The body is fetched but only success counts.
pub async fn probe_readme(client: &GitHubClient, handle: &str, repo: &str) -> ReadmePresence {
    match client
        .get_json::<ReadmeResponse>(&readme_endpoint(handle, repo))
        .await
    {
        Ok(_) => ReadmePresence::Present,
        Err(e) => {
            tracing::debug!(handle, repo, error = %e, "no readme");
            ReadmePresence::Absent
        }
    }
}

/// List `handle`'s repositories, most recently updated first, probing every
/// README concurrently. A failed probe only marks its own repository.
pub async fn fetch_repositories(
    client: &GitHubClient,
    handle: &str,
) -> Result<Vec<RepositorySummary>, ServiceError> {
    let repos = client
        .get_json::<Vec<RepoResponse>>(&repos_endpoint(handle))
        .await
        .map_err(classified_or(ServiceError::Repositories))?;

    let probes = join_all(repos.iter().map(|r| probe_readme(client, handle, &r.name))).await;

    let summaries: Vec<RepositorySummary> = repos
        .into_iter()
        .zip(probes)
        .map(|(raw, presence)| RepositorySummary::from_response(raw, presence))
        .collect();

    tracing::info!(
        handle,
        total = summaries.len(),
        with_readme = summaries.iter().filter(|r| r.has_readme).count(),
        "repositories loaded"
    );
    Ok(summaries)
}

pub async fn fetch_readme_content(
    client: &GitHubClient,
    handle: &str,
    repo: &str,
) -> Result<String, ServiceError> {
    let readme = client
        .get_json::<ReadmeResponse>(&readme_endpoint(handle, repo))
        .await
        .map_err(ServiceError::Readme)?;
    decode_readme(&readme.content).map_err(ServiceError::Readme)
}

/// Decode the API's line-wrapped base64 README body into text.
pub fn decode_readme(content: &str) -> Result<String, FetchError> {
    let compact: String = content.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Profile and repositories together; the first failure wins.
pub async fn search(client: &GitHubClient, handle: &str) -> Result<SearchResults, ServiceError> {
    let (profile, repositories) =
        tokio::try_join!(fetch_user(client, handle), fetch_repositories(client, handle))?;
    Ok(SearchResults {
        profile,
        repositories,
    })
}

use thiserror::Error;

pub const USER_NOT_FOUND: &str = "User not found";
pub const RATE_LIMITED: &str = "Rate limit exceeded. Please try again later.";

#[derive(Error, Debug)]
pub enum LookoutError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, LookoutError>;

/// Classified failure of a single request to the remote API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{}", USER_NOT_FOUND)]
    NotFound,

    #[error("{}", RATE_LIMITED)]
    RateLimited,

    #[error("{0}")]
    Remote(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Failure of an aggregated operation, carrying the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{}", USER_NOT_FOUND)]
    NotFound,

    #[error("{}", RATE_LIMITED)]
    RateLimited,

    #[error("Failed to fetch user data")]
    UserData(#[source] FetchError),

    #[error("Failed to fetch repositories")]
    Repositories(#[source] FetchError),

    #[error("README not found or failed to fetch")]
    Readme(#[source] FetchError),
}

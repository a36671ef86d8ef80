/// Missing or malformed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing repository, expected repo=username/repository")]
    MissingRepository,
    #[error("invalid repository {0:?}, expected username/repository")]
    InvalidRepository(String),
}

/// Failure to list the releases of a repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
    #[error("repository not found")]
    NotFound,
    #[error("rate limited by upstream")]
    RateLimited,
    #[error("{}", network_message(.status, .message))]
    Network {
        status: Option<u16>,
        message: String,
    },
    #[error("unexpected response: {0}")]
    Malformed(String),
}

fn network_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("upstream responded with status {code}"),
        None => format!("unable to reach upstream: {message}"),
    }
}

impl ListingError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Network {
            status,
            message: message.into(),
        }
    }

    /// Maps an upstream HTTP status to the matching failure, `None` on success.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            404 => Some(Self::NotFound),
            403 => Some(Self::RateLimited),
            code => Some(Self::network(Some(code), format!("status {code}"))),
        }
    }
}

/// Failure to fetch an announcement. Never blocks the file listing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnouncementError {
    #[error("announcement responded with status {0}")]
    Status(u16),
    #[error("unable to fetch announcement: {0}")]
    Transport(String),
    #[error("invalid announcement url: {0}")]
    InvalidUrl(String),
    #[error("announcement host {0} is not allowed")]
    Forbidden(String),
}

//! Error types for feed retrieval.

/// Errors from fetching or parsing a profile feed.
#[derive(Debug, thiserror::Error)]
pub enum CommunityError {
    /// Timeout, unreachable host or a broken transfer.
    #[error("network error: {0}")]
    Network(String),

    /// Private, nonexistent or malformed profile feed.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}

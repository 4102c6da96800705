//! Error types for session operations.

use appmanifest_catalog::CatalogError;
use appmanifest_community::CommunityError;
use appmanifest_steam::SteamError;

/// Errors surfaced to the front end.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Community(#[from] CommunityError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Steam(#[from] SteamError),
}

/// Coarse classification a front end can map to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    InvalidProfile,
    NotFound,
    InvalidLibraryPath,
    Io,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Community(CommunityError::Network(_)) => ErrorKind::Network,
            Self::Community(CommunityError::InvalidProfile(_)) => ErrorKind::InvalidProfile,
            Self::Catalog(CatalogError::NotFound(_)) => ErrorKind::NotFound,
            Self::Steam(SteamError::NotFound | SteamError::InvalidAppId(_)) => ErrorKind::NotFound,
            Self::Steam(SteamError::InvalidLibraryPath(..)) => ErrorKind::InvalidLibraryPath,
            Self::Steam(SteamError::Vdf(_) | SteamError::Io(_)) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn kinds_are_distinguishable() {
        let cases = [
            (SessionError::from(CommunityError::Network("x".into())), ErrorKind::Network),
            (
                SessionError::from(CommunityError::InvalidProfile("x".into())),
                ErrorKind::InvalidProfile,
            ),
            (SessionError::from(CatalogError::NotFound("1".into())), ErrorKind::NotFound),
            (SessionError::from(SteamError::NotFound), ErrorKind::NotFound),
            (SessionError::from(SteamError::InvalidAppId("x".into())), ErrorKind::NotFound),
            (
                SessionError::from(SteamError::InvalidLibraryPath(PathBuf::from("/x"), "gone".into())),
                ErrorKind::InvalidLibraryPath,
            ),
        ];
        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn messages_pass_through() {
        let err = SessionError::from(CommunityError::Network("connection refused".into()));
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}

//! Steam-side plumbing: library root detection, the text VDF (KeyValues)
//! format and the `appmanifest_<appid>.acf` writer.

pub mod manifest;
pub mod paths;
#[cfg(target_os = "linux")]
pub mod paths_linux;
#[cfg(target_os = "macos")]
pub mod paths_macos;
#[cfg(target_os = "windows")]
pub mod paths_windows;
pub mod vdf;

use std::path::PathBuf;

// Re-export primary types.
pub use manifest::{FailedWrite, ManifestRecord, ManifestWriter, WriteReport, manifest_filename};
pub use paths::{library_folders, resolve, resolve_from, validate_library_root};
pub use vdf::KeyValues;

/// Errors for Steam operations.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("steam library not found")]
    NotFound,

    #[error("invalid library path {path}: {reason}", path = .0.display(), reason = .1)]
    InvalidLibraryPath(PathBuf, String),

    #[error("invalid app id '{0}'")]
    InvalidAppId(String),

    #[error("VDF parse error: {0}")]
    Vdf(String),

    #[error("I/O error: {0}")]
    Io(String),
}

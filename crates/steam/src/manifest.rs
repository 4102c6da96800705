//! `appmanifest_<appid>.acf` generation.
//!
//! The manifest claims the title is fully installed (`StateFlags` 4) while
//! reporting `buildid` 0, `SizeOnDisk` 0 and no installed depots. On its
//! next start the Steam client finds the content missing and queues the
//! title for download.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::SteamError;
use crate::paths::validate_library_root;
use crate::vdf::{self, KeyValues};

/// Root key of an app manifest document.
const APP_STATE_KEY: &str = "AppState";

/// `StateFlags` value for "fully installed".
pub const STATE_FULLY_INSTALLED: u32 = 4;

/// Placeholder build id; the client replaces it once the download starts.
const PLACEHOLDER_BUILD_ID: &str = "0";

/// Steam universe "Public".
const UNIVERSE_PUBLIC: &str = "1";

/// Returns the manifest filename for an app id.
pub fn manifest_filename(app_id: &str) -> String {
    format!("appmanifest_{app_id}.acf")
}

/// The data written into one manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub app_id: String,
    pub name: String,
    pub install_dir: String,
    pub build_id: String,
    pub state_flags: u32,
}

impl ManifestRecord {
    /// Builds the record for a title queued for download.
    pub fn queued(app_id: impl Into<String>, name: impl Into<String>) -> Self {
        let app_id = app_id.into();
        let name = name.into();
        let install_dir = match sanitize_install_dir(&name) {
            dir if dir.is_empty() => app_id.clone(),
            dir => dir,
        };
        Self {
            app_id,
            name,
            install_dir,
            build_id: PLACEHOLDER_BUILD_ID.into(),
            state_flags: STATE_FULLY_INSTALLED,
        }
    }

    /// Converts the record into its KeyValues block.
    pub fn to_key_values(&self) -> KeyValues {
        KeyValues::new()
            .with_str("appid", &self.app_id)
            .with_str("Universe", UNIVERSE_PUBLIC)
            .with_str("name", &self.name)
            .with_str("StateFlags", self.state_flags.to_string())
            .with_str("installdir", &self.install_dir)
            .with_str("LastUpdated", "0")
            .with_str("UpdateResult", "0")
            .with_str("SizeOnDisk", "0")
            .with_str("buildid", &self.build_id)
            .with_str("LastOwner", "0")
            .with_str("BytesToDownload", "0")
            .with_str("BytesDownloaded", "0")
            .with_str("BytesToStage", "0")
            .with_str("BytesStaged", "0")
            .with_str("AutoUpdateBehavior", "0")
            .with_str("AllowOtherDownloadsWhileRunning", "0")
            .with_str("ScheduledAutoUpdate", "0")
            .with_block("InstalledDepots", KeyValues::new())
    }

    /// Renders the full manifest document.
    pub fn render(&self) -> String {
        vdf::to_string(APP_STATE_KEY, &self.to_key_values())
    }
}

/// Strips characters that are not valid in a directory name on any
/// platform the client runs on.
fn sanitize_install_dir(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect();
    cleaned.trim().trim_end_matches('.').trim_end().to_string()
}

/// One manifest that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedWrite {
    pub app_id: String,
    pub reason: String,
}

/// Outcome of a batch write: every input app id lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedWrite>,
}

impl WriteReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Writes manifests into a validated library root.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    root: PathBuf,
}

impl ManifestWriter {
    /// Creates a writer after checking that `root` is an existing,
    /// writable directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SteamError> {
        let root = root.into();
        validate_library_root(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the destination path for an app id.
    pub fn manifest_path(&self, app_id: &str) -> PathBuf {
        self.root.join(manifest_filename(app_id))
    }

    /// Writes one manifest per record.
    ///
    /// A failing record is reported and the batch continues.
    pub fn write(&self, records: &[ManifestRecord]) -> WriteReport {
        let mut report = WriteReport::default();

        for record in records {
            match self.write_one(record) {
                Ok(path) => {
                    tracing::debug!(app_id = %record.app_id, path = %path.display(), "wrote manifest");
                    report.succeeded.push(record.app_id.clone());
                }
                Err(e) => {
                    tracing::warn!(app_id = %record.app_id, error = %e, "failed to write manifest");
                    report.failed.push(FailedWrite {
                        app_id: record.app_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            root = %self.root.display(),
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "manifest generation finished"
        );
        report
    }

    /// Writes a single manifest through a temp file renamed over the
    /// destination, so readers never see a partial file.
    fn write_one(&self, record: &ManifestRecord) -> Result<PathBuf, SteamError> {
        if record.app_id.is_empty() || !record.app_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SteamError::InvalidAppId(record.app_id.clone()));
        }

        let dest = self.manifest_path(&record.app_id);
        let content = record.render();

        let mut tmp = tempfile::Builder::new()
            .prefix(".appmanifest")
            .tempfile_in(&self.root)
            .map_err(|e| SteamError::Io(format!("failed to create temp file: {e}")))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| SteamError::Io(format!("failed to write manifest: {e}")))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
                .map_err(|e| SteamError::Io(format!("failed to set permissions: {e}")))?;
        }

        tmp.persist(&dest).map_err(|e| {
            SteamError::Io(format!("failed to replace {}: {}", dest.display(), e.error))
        })?;
        Ok(dest)
    }
}

/// Validates `root` and writes every record into it.
///
/// Fails with [`SteamError::InvalidLibraryPath`] before touching the
/// filesystem when the root is unusable.
pub fn write(records: &[ManifestRecord], root: &Path) -> Result<WriteReport, SteamError> {
    Ok(ManifestWriter::new(root)?.write(records))
}

//! Steam library root detection.
//!
//! The library root is the `steamapps` directory the client scans for
//! `appmanifest_*.acf` files. Each platform contributes an ordered list of
//! conventional locations; the first one that exists and is writable wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::SteamError;
use crate::vdf::{self, Value};

/// Name of the library root directory inside a Steam installation.
pub const STEAMAPPS_DIR: &str = "steamapps";

/// Name of the file listing additional library folders.
const LIBRARY_FOLDERS_FILE: &str = "libraryfolders.vdf";

/// Returns the first usable library root among the platform candidates.
pub fn resolve() -> Result<PathBuf, SteamError> {
    resolve_from(&candidates())
}

/// Returns the conventional library roots for this platform, in the order they are tried.
pub fn candidates() -> Vec<PathBuf> {
    platform_candidates()
}

/// Returns the first candidate that exists and is writable.
pub fn resolve_from<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, SteamError> {
    for candidate in candidates {
        let candidate = candidate.as_ref();
        match validate_library_root(candidate) {
            Ok(()) => {
                tracing::debug!(path = %candidate.display(), "found steam library root");
                return Ok(candidate.to_path_buf());
            }
            Err(e) => tracing::debug!(path = %candidate.display(), error = %e, "skipping candidate"),
        }
    }
    Err(SteamError::NotFound)
}

/// Checks that `path` is an existing, writable directory.
///
/// Writability is decided by creating an anonymous temporary file, which is
/// removed as soon as it is dropped, so nothing is left behind on disk. The
/// read-only attribute is not consulted: Windows sets it on customized
/// folders that still accept writes.
pub fn validate_library_root(path: &Path) -> Result<(), SteamError> {
    let invalid = |reason: String| SteamError::InvalidLibraryPath(path.to_path_buf(), reason);

    let meta = fs::metadata(path).map_err(|e| invalid(e.to_string()))?;
    if !meta.is_dir() {
        return Err(invalid("not a directory".into()));
    }

    tempfile::tempfile_in(path).map_err(|e| invalid(format!("not writable: {e}")))?;
    Ok(())
}

/// Lists the library roots declared in `<steamapps>/libraryfolders.vdf`.
///
/// Understands both the current layout (`"0" { "path" "..." }`) and the
/// legacy one (`"1" "D:\\SteamLibrary"`). Each returned path points at the
/// library's `steamapps` directory; existence is not checked.
pub fn library_folders(steamapps: &Path) -> Result<Vec<PathBuf>, SteamError> {
    let file = steamapps.join(LIBRARY_FOLDERS_FILE);
    let content = fs::read_to_string(&file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SteamError::NotFound
        } else {
            SteamError::Io(format!("failed to read {}: {e}", file.display()))
        }
    })?;

    let (_, root) = vdf::parse(&content)?;

    let mut folders = Vec::new();
    for (key, value) in root.iter() {
        if key.parse::<u32>().is_err() {
            continue;
        }
        let path = match value {
            Value::Str(path) => Some(path.as_str()),
            Value::Block(block) => block.get_str("path"),
        };
        if let Some(path) = path.filter(|p| !p.is_empty()) {
            folders.push(PathBuf::from(path).join(STEAMAPPS_DIR));
        }
    }

    Ok(folders)
}

// Platform-specific candidate lists.
#[cfg(target_os = "linux")]
fn platform_candidates() -> Vec<PathBuf> {
    crate::paths_linux::candidates()
}

#[cfg(target_os = "macos")]
fn platform_candidates() -> Vec<PathBuf> {
    crate::paths_macos::candidates()
}

#[cfg(target_os = "windows")]
fn platform_candidates() -> Vec<PathBuf> {
    crate::paths_windows::candidates()
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_candidates() -> Vec<PathBuf> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_from_picks_first_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing").join("steamapps");
        let first = tmp.path().join("a").join("steamapps");
        let second = tmp.path().join("b").join("steamapps");
        fs::create_dir_all(&first).unwrap();
        fs::create_dir_all(&second).unwrap();

        let found = resolve_from(&[&missing, &first, &second]).unwrap();
        assert_eq!(found, first);
    }

    #[test]
    fn resolve_from_none_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = resolve_from(&[tmp.path().join("nope")]).unwrap_err();
        assert!(matches!(err, SteamError::NotFound));
    }

    #[test]
    fn resolve_from_empty_list() {
        let empty: [PathBuf; 0] = [];
        assert!(matches!(resolve_from(&empty), Err(SteamError::NotFound)));
    }

    #[test]
    fn resolve_from_skips_files() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("steamapps");
        fs::write(&file, b"not a dir").unwrap();
        assert!(matches!(resolve_from(&[&file]), Err(SteamError::NotFound)));
    }

    #[test]
    fn validate_rejects_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let err = validate_library_root(&tmp.path().join("missing")).unwrap_err();
        assert!(matches!(err, SteamError::InvalidLibraryPath(..)));
    }

    #[test]
    fn validate_leaves_directory_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        validate_library_root(tmp.path()).unwrap();
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn validate_follows_actual_writability() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("steamapps");
        fs::create_dir(&root).unwrap();
        fs::set_permissions(&root, fs::Permissions::from_mode(0o555)).unwrap();

        // Mode bits alone do not decide: root can still write here.
        let writable = tempfile::tempfile_in(&root).is_ok();
        let result = validate_library_root(&root);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(result.is_ok(), writable, "{result:?}");
        if let Err(SteamError::InvalidLibraryPath(_, reason)) = result {
            assert!(reason.starts_with("not writable"), "{reason}");
        }
    }

    #[test]
    fn library_folders_current_format() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(LIBRARY_FOLDERS_FILE),
            r#""libraryfolders"
{
	"0"
	{
		"path"		"/home/user/.local/share/Steam"
		"label"		""
		"apps"
		{
			"228980"		"123"
		}
	}
	"1"
	{
		"path"		"/mnt/games/SteamLibrary"
	}
}
"#,
        )
        .unwrap();

        let folders = library_folders(tmp.path()).unwrap();
        assert_eq!(
            folders,
            vec![
                PathBuf::from("/home/user/.local/share/Steam").join("steamapps"),
                PathBuf::from("/mnt/games/SteamLibrary").join("steamapps"),
            ]
        );
    }

    #[test]
    fn library_folders_legacy_format() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join(LIBRARY_FOLDERS_FILE),
            "\"LibraryFolders\"\n{\n\t\"TimeNextStatsReport\"\t\t\"1700000000\"\n\t\"1\"\t\t\"/data/steam\"\n}\n",
        )
        .unwrap();

        let folders = library_folders(tmp.path()).unwrap();
        assert_eq!(folders, vec![PathBuf::from("/data/steam").join("steamapps")]);
    }

    #[test]
    fn library_folders_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(matches!(
            library_folders(tmp.path()),
            Err(SteamError::NotFound)
        ));
    }

    #[test]
    fn candidates_end_in_steamapps() {
        for candidate in candidates() {
            assert!(candidate.ends_with(STEAMAPPS_DIR), "{}", candidate.display());
        }
    }
}

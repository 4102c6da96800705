use std::path::PathBuf;

use crate::paths::STEAMAPPS_DIR;

/// Returns the library root candidates on macOS.
pub(crate) fn candidates() -> Vec<PathBuf> {
    let Some(home) = std::env::var_os("HOME").map(PathBuf::from) else {
        return Vec::new();
    };

    vec![
        home.join("Library")
            .join("Application Support")
            .join("Steam")
            .join(STEAMAPPS_DIR),
    ]
}

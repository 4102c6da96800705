use std::path::PathBuf;

use crate::paths::STEAMAPPS_DIR;

/// Returns the library root candidates on Linux/Unix systems.
pub(crate) fn candidates() -> Vec<PathBuf> {
    let Some(home) = home_dir() else {
        return Vec::new();
    };

    let flatpak = home.join(".var").join("app").join("com.valvesoftware.Steam");

    [
        // Primary location: ~/.steam/steam
        home.join(".steam").join("steam"),
        home.join(".local").join("share").join("Steam"),
        flatpak.join(".local").join("share").join("Steam"),
        flatpak.join(".steam").join("steam"),
    ]
    .into_iter()
    .map(|base| base.join(STEAMAPPS_DIR))
    .collect()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

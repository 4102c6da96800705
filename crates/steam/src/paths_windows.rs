use std::path::PathBuf;

use crate::paths::STEAMAPPS_DIR;

/// Returns the library root candidates on Windows.
///
/// The registry install path comes first; the default install folders
/// cover machines where the key is missing.
pub(crate) fn candidates() -> Vec<PathBuf> {
    let mut bases = Vec::new();

    // Try 64-bit registry first, then the 32-bit view.
    for subkey in [r"SOFTWARE\Wow6432Node\Valve\Steam", r"SOFTWARE\Valve\Steam"] {
        if let Some(path) = read_steam_registry(subkey) {
            if !bases.contains(&path) {
                bases.push(path);
            }
        }
    }

    for default in [r"C:\Program Files (x86)\Steam", r"C:\Program Files\Steam"] {
        let path = PathBuf::from(default);
        if !bases.contains(&path) {
            bases.push(path);
        }
    }

    bases.into_iter().map(|b| b.join(STEAMAPPS_DIR)).collect()
}

fn read_steam_registry(subkey: &str) -> Option<PathBuf> {
    use winreg::RegKey;
    use winreg::enums::HKEY_LOCAL_MACHINE;

    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
    let key = hklm.open_subkey(subkey).ok()?;
    let install_path: String = key.get_value("InstallPath").ok()?;
    Some(PathBuf::from(install_path))
}

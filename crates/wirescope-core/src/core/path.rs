use crate::core::error::{WireError, WireResult};
use std::path::{Path, PathBuf};

/// Snapshot file names looked up by [`find_snapshot`], in priority order.
pub const SNAPSHOT_FILES: [&str; 3] = ["wiring.yaml", "wiring.yml", "wiring.json"];

/// Get the Wirescope home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\wirescope
/// - Linux: ~/.config/wirescope
/// - macOS: ~/Library/Application Support/wirescope
pub fn wirescope_home() -> WireResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| WireError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("wirescope"))
}

/// Get the config file path (`<home>/config.yaml`)
pub fn config_file() -> WireResult<PathBuf> {
    Ok(wirescope_home()?.join("config.yaml"))
}

/// Find a wiring snapshot by walking up from `start`
pub fn find_snapshot(start: &Path) -> WireResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        for name in SNAPSHOT_FILES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }

        if let Some(parent) = current.parent() {
            current = parent.to_path_buf();
        } else {
            return Err(WireError::Path(
                "Could not find wiring.yaml or wiring.json in current directory or parents"
                    .to_string(),
            ));
        }
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> WireResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

//! File System Utilities
//!
//! Configuration and log directory management.

use crate::constants::{CONFIG_FILE_NAME, CONFIG_PATH_ENV};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "dailydaily", "library-catalog").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/library-catalog/` or `$XDG_CONFIG_HOME/library-catalog/`
/// - **macOS**: `~/Library/Application Support/com.dailydaily.library-catalog/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\dailydaily\library-catalog\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let config_dir = dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Resolve the config file path: `$LIBRARY_CATALOG_CONFIG` first, then the
/// platform config directory
pub fn resolve_config_path() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(get_or_create_config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Make sure a log directory exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    if !dir.is_dir() {
        return Err(Error::Invalid {
            message: format!("{} is not a directory", dir.display()),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root.path().join("logs").join("catalog");

        ensure_dir(&nested).expect("create");
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_dir(&nested).expect("exists");
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let root = tempfile::tempdir().expect("tempdir");
        let file = root.path().join("not-a-dir");
        fs::write(&file, "x").expect("write");

        assert!(ensure_dir(&file).is_err());
    }
}

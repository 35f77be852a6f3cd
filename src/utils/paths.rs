//! Path Resolution
//!
//! Resolves where the memory database lives. The `MNEMO_DB_PATH`
//! environment variable overrides the default per-user location
//! (`~/.mnemo/memories.db`).

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "MNEMO_DB_PATH";

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the mnemo data directory (~/.mnemo/)
pub fn mnemo_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".mnemo"))
}

/// Get the database file path.
///
/// Uses `MNEMO_DB_PATH` when set, otherwise `~/.mnemo/memories.db`.
pub fn database_path() -> AppResult<PathBuf> {
    if let Ok(custom) = std::env::var(DB_PATH_ENV) {
        if !custom.trim().is_empty() {
            return Ok(PathBuf::from(custom));
        }
    }
    Ok(mnemo_dir()?.join("memories.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir() {
        let home = home_dir();
        assert!(home.is_ok());
    }

    #[test]
    fn test_default_database_path() {
        // Only meaningful when the override is not set in the environment
        if std::env::var(DB_PATH_ENV).is_err() {
            let path = database_path().unwrap();
            assert!(path.to_string_lossy().contains(".mnemo"));
            assert!(path.to_string_lossy().ends_with("memories.db"));
        }
    }

    #[test]
    fn test_mnemo_dir() {
        let dir = mnemo_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".mnemo"));
    }

    #[test]
    fn test_ensure_dir_creates_missing_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Already existing is fine too
        ensure_dir(&nested).unwrap();
    }
}

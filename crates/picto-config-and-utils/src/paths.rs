//! File system paths for PictoAmigos.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Name of the per-user runtime directory under the home directory.
const BASE_DIR_NAME: &str = ".pictoamigos";

/// Locations of everything PictoAmigos keeps on disk.
#[derive(Debug, Clone)]
pub struct Paths {
    base_dir: PathBuf,
}

impl Paths {
    /// Rooted at `~/.pictoamigos`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::NoHomeDir)?;
        Ok(Self::with_base_dir(home.join(BASE_DIR_NAME)))
    }

    /// Rooted elsewhere, e.g. a temp dir in tests or `--base-dir`.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.pictoamigos).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.pictoamigos/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory holding one JSON file per persisted key (~/.pictoamigos/storage).
    pub fn storage_dir(&self) -> PathBuf {
        self.base_dir.join("storage")
    }

    /// Get the logs directory (~/.pictoamigos/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the JSONL log file path (~/.pictoamigos/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dev.jsonl")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_hang_off_base_dir() {
        let paths = Paths::with_base_dir(PathBuf::from("/tmp/picto"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/picto/config.json"));
        assert_eq!(paths.storage_dir(), PathBuf::from("/tmp/picto/storage"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/picto/logs/dev.jsonl"));
    }

    #[test]
    fn ensure_dirs_creates_tree() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().join("nested"));
        paths.ensure_dirs().unwrap();

        assert!(paths.storage_dir().is_dir());
        assert!(paths.logs_dir().is_dir());
    }
}

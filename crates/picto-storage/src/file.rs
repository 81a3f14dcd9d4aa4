//! Directory-backed store: one `<key>.json` file per key.

use crate::{KeyValueStore, StorageError, StorageResult};
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed storage rooted at a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    /// Serializes writers within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock();
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::trace!(key, path = %path.display(), "stored record");
        Ok(())
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let path = self.path_for(key)?;
        let _guard = self.write_lock.lock();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

//! Flat key-value persistence.
//!
//! Every persisted record is a single JSON document stored under an opaque
//! string key. Backends:
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`JsonFileStore`]: one `<key>.json` file per key in a directory
//!
//! Readers go through [`snapshot`] helpers, which treat a missing or corrupt
//! record as "no saved state".

mod file;
mod keys;
mod memory;
pub mod snapshot;
mod traits;

pub use file::JsonFileStore;
pub use keys::StorageKeys;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Key cannot be mapped onto the backend (e.g. contains a path separator)
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

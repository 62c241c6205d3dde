//! Content loading: local overrides, session cache, remote fetch, fallbacks.

pub mod cache;
pub mod fetcher;
pub mod key;
pub mod storage;

pub use cache::ContentCache;
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use key::ResourceKey;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("Override {key} is not valid JSON: {reason}")]
    MalformedOverride { key: String, reason: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ContentResult<T> = Result<T, ContentError>;

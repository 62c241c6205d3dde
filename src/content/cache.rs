//! Override-first content resolution with an in-memory cache and fallbacks.

use super::fetcher::Fetcher;
use super::key::ResourceKey;
use super::storage::Storage;
use super::{ContentError, ContentResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Resolves content collections for one session.
///
/// Lookup order is fixed: local override, cached value, remote fetch,
/// caller fallback. Whatever answers the lookup is written into the cache.
/// Concurrent lookups of an uncached key are not coalesced; each may fetch.
pub struct ContentCache {
    fetcher: Arc<dyn Fetcher>,
    storage: Arc<dyn Storage>,
    cache: RwLock<HashMap<ResourceKey, Value>>,
}

impl ContentCache {
    pub fn new(fetcher: Arc<dyn Fetcher>, storage: Arc<dyn Storage>) -> Self {
        Self {
            fetcher,
            storage,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve `key`, falling back to `fallback` when every other path fails.
    ///
    /// A `null` fallback is treated as absent.
    #[instrument(skip(self, fallback), fields(key = %key))]
    pub async fn resolve(&self, key: &ResourceKey, fallback: Option<Value>) -> ContentResult<Value> {
        match self.try_resolve(key).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(locator = %key.locator(), error = %e, "Failed to load data");
                match fallback.filter(|value| !value.is_null()) {
                    Some(value) => {
                        self.store(key, value.clone()).await;
                        Ok(value)
                    }
                    None => Err(e),
                }
            }
        }
    }

    async fn try_resolve(&self, key: &ResourceKey) -> ContentResult<Value> {
        let stored = self.storage.get_item(&key.override_key())?;
        // An empty stored value means no override.
        if let Some(raw) = stored.filter(|raw| !raw.is_empty()) {
            let value: Value =
                serde_json::from_str(&raw).map_err(|e| ContentError::MalformedOverride {
                    key: key.override_key(),
                    reason: e.to_string(),
                })?;
            debug!("Using local override");
            self.store(key, value.clone()).await;
            return Ok(value);
        }

        if let Some(value) = self.cache.read().await.get(key).cloned() {
            debug!("Cache hit");
            return Ok(value);
        }

        debug!("Cache miss, fetching");
        let value = self.fetcher.fetch(&key.locator()).await?;
        self.store(key, value.clone()).await;
        Ok(value)
    }

    async fn store(&self, key: &ResourceKey, value: Value) {
        self.cache.write().await.insert(key.clone(), value);
    }

    /// Currently cached value for `key`, without touching overrides or the network.
    pub async fn cached(&self, key: &ResourceKey) -> Option<Value> {
        self.cache.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    /// Drop every cached value. Overrides and stored records are untouched.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
        info!("Content cache cleared");
    }

    /// Store `value` as the local override for `key`.
    pub fn set_override(&self, key: &ResourceKey, value: &Value) -> ContentResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| ContentError::MalformedOverride {
            key: key.override_key(),
            reason: e.to_string(),
        })?;
        self.storage.set_item(&key.override_key(), &raw)?;
        info!(key = %key, "Override stored");
        Ok(())
    }

    pub fn remove_override(&self, key: &ResourceKey) -> ContentResult<()> {
        self.storage.remove_item(&key.override_key())?;
        info!(key = %key, "Override removed");
        Ok(())
    }
}

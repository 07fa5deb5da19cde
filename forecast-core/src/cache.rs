//! Time-bounded storage for forecast results.
//!
//! [`CacheStore`] is the storage seam (`get` / `put` / `clear`); [`MemoryStore`]
//! is the process-wide in-memory implementation. [`ForecastCache`] layers the
//! get-or-populate policy on top of any store.

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use std::{
    fmt::Debug,
    future::Future,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::debug;

use crate::model::ForecastResult;

const MAX_ENTRIES: u64 = 10_000;

#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Return the value under `key` if it has not expired.
    async fn get(&self, key: &str) -> Option<ForecastResult>;

    /// Store `value` under `key`, replacing any previous entry, for `ttl`.
    async fn put(&self, key: &str, value: ForecastResult, ttl: Duration);

    /// Drop every entry.
    async fn clear(&self);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: ForecastResult,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct EntryTtl;

impl Expiry<String, CacheEntry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory TTL store backed by `moka`.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Cache<String, CacheEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .build();

        Self { inner }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<ForecastResult> {
        self.inner.get(key).await.map(|entry| entry.result)
    }

    async fn put(&self, key: &str, value: ForecastResult, ttl: Duration) {
        self.inner.insert(key.to_owned(), CacheEntry { result: value, ttl }).await;
    }

    async fn clear(&self) {
        self.inner.invalidate_all();
    }
}

/// Get-or-populate wrapper shared by every request in the process.
///
/// Concurrent misses on the same key are not coalesced; each may reach the
/// provider.
#[derive(Debug, Clone)]
pub struct ForecastCache {
    store: Arc<dyn CacheStore>,
}

impl ForecastCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Return the fresh entry for `key`, or run `compute` once and keep its result for `ttl`.
    ///
    /// Only successful forecasts are stored. An `Err` from `compute` is returned
    /// as-is and a [`ForecastResult::Failure`] is passed through uncached, so the
    /// next request for the same key goes upstream again.
    pub async fn fetch_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<ForecastResult, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ForecastResult, E>>,
    {
        if let Some(hit) = self.store.get(key).await {
            debug!(key, "forecast cache hit");
            return Ok(hit);
        }

        debug!(key, "forecast cache miss");
        let result = compute().await?;

        if result.is_success() {
            self.store.put(key, result.clone(), ttl).await;
            debug!(key, ttl_secs = ttl.as_secs(), "forecast cached");
        } else {
            debug!(key, "provider failure not cached");
        }

        Ok(result)
    }

    pub async fn clear(&self) {
        self.store.clear().await;
    }
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}

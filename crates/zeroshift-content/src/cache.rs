//! In-process cache for fetched content, keyed by `(model, options)`.
//!
//! Entries are fresh for [`STALENESS_WINDOW`], then stale. Stale entries are
//! still served — the service layer spawns a background refresh while the
//! reader gets the old list. Inserts are last-write-wins: an overwrite is an
//! idempotent re-fetch of the same key, so no cross-key coordination exists.
//!
//! # Thread safety
//!
//! The entry map sits behind a `tokio::sync::RwLock`; the in-flight refresh
//! set behind a `Mutex`. Both critical sections are tiny (a map lookup or
//! insert), so contention is a non-issue at marketing-site traffic.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::model::{ContentItem, FetchOptions};

/// How long a cached fetch result is served without a refresh attempt.
pub const STALENESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Cache key: content model plus the canonicalized fetch options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    model: String,
    limit: u32,
    offset: u32,
    query: Option<String>,
}

impl CacheKey {
    #[must_use]
    pub fn new(model: &str, options: &FetchOptions) -> Self {
        Self {
            model: model.to_owned(),
            limit: options.limit_or_default(),
            offset: options.offset_or_default(),
            // serde_json renders maps in a stable order, so equal filters
            // canonicalize to equal strings.
            query: options.query.as_ref().map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

struct CacheEntry {
    items: Vec<ContentItem>,
    fetched_at: Instant,
}

/// Outcome of a cache lookup.
#[derive(Debug, PartialEq)]
pub enum CacheLookup {
    /// A result inside the staleness window — serve as-is.
    Fresh(Vec<ContentItem>),
    /// An outdated result — serve it, but kick off a background refresh.
    Stale(Vec<ContentItem>),
    /// Nothing cached for this key.
    Miss,
}

/// Content cache with a fixed staleness window.
pub struct ContentCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    refreshing: Mutex<HashSet<CacheKey>>,
    staleness: Duration,
}

impl ContentCache {
    #[must_use]
    pub fn new(staleness: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            refreshing: Mutex::new(HashSet::new()),
            staleness,
        }
    }

    pub async fn lookup(&self, key: &CacheKey) -> CacheLookup {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.fetched_at.elapsed() < self.staleness => {
                CacheLookup::Fresh(entry.items.clone())
            }
            Some(entry) => CacheLookup::Stale(entry.items.clone()),
            None => CacheLookup::Miss,
        }
    }

    /// Insert (or overwrite) the result for a key. Last write wins.
    pub async fn insert(&self, key: CacheKey, items: Vec<ContentItem>) {
        let entry = CacheEntry {
            items,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Claim the refresh slot for a key. Returns `false` when another task is
    /// already refreshing it, so at most one refresh per key is in flight.
    pub async fn begin_refresh(&self, key: &CacheKey) -> bool {
        self.refreshing.lock().await.insert(key.clone())
    }

    /// Release the refresh slot claimed by [`Self::begin_refresh`].
    pub async fn end_refresh(&self, key: &CacheKey) {
        self.refreshing.lock().await.remove(key);
    }

    /// Drop entries older than `max_age`, returning how many were removed.
    /// Driven by the server's periodic janitor task.
    pub async fn evict_expired(&self, max_age: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < max_age);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(STALENESS_WINDOW)
    }
}

//! Cached content fetching: the client plus the staleness-window cache.
//!
//! This is what page-rendering callers talk to. A fresh cache hit never
//! touches the network; a stale hit is served immediately while one detached
//! task re-fetches the key; a miss fetches through the retrying client. A
//! failed background refresh keeps the stale entry in place — stale content
//! beats no content on a marketing page.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheKey, CacheLookup, ContentCache};
use crate::client::CmsClient;
use crate::error::ContentError;
use crate::model::{ContentItem, FetchOptions};

/// Cached, retrying access to the CMS content space.
#[derive(Clone)]
pub struct ContentService {
    client: Arc<CmsClient>,
    cache: Arc<ContentCache>,
}

impl ContentService {
    /// Build a service with the default staleness window.
    #[must_use]
    pub fn new(client: CmsClient) -> Self {
        Self::with_cache(client, ContentCache::default())
    }

    /// Build a service around a specific cache (shorter windows in tests).
    #[must_use]
    pub fn with_cache(client: CmsClient, cache: ContentCache) -> Self {
        Self {
            client: Arc::new(client),
            cache: Arc::new(cache),
        }
    }

    /// The cache, exposed for the server's eviction janitor.
    #[must_use]
    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Fetch the entries of a content model, serving from cache when possible.
    ///
    /// Errors only surface on a cache miss; with a stale entry present the
    /// caller always gets content and the refresh happens off the request
    /// path.
    pub async fn entries(
        &self,
        model: &str,
        options: &FetchOptions,
    ) -> Result<Vec<ContentItem>, ContentError> {
        let key = CacheKey::new(model, options);

        match self.cache.lookup(&key).await {
            CacheLookup::Fresh(items) => Ok(items),
            CacheLookup::Stale(items) => {
                self.spawn_refresh(key, options.clone());
                Ok(items)
            }
            CacheLookup::Miss => {
                let items = self.client.fetch_entries(model, options).await?;
                self.cache.insert(key, items.clone()).await;
                Ok(items)
            }
        }
    }

    /// Fetch a single entry by id. Uncached — entry ids are not stable across
    /// fetches. A no-op returning `Ok(None)` when `id` is `None`.
    pub async fn entry(
        &self,
        model: &str,
        id: Option<&str>,
    ) -> Result<Option<ContentItem>, ContentError> {
        self.client.fetch_entry(model, id).await
    }

    /// Re-fetch a stale key off the request path. At most one refresh per key
    /// runs at a time; latecomers keep serving the stale entry.
    fn spawn_refresh(&self, key: CacheKey, options: FetchOptions) {
        let client = Arc::clone(&self.client);
        let cache = Arc::clone(&self.cache);

        tokio::spawn(async move {
            if !cache.begin_refresh(&key).await {
                return;
            }

            match client.fetch_entries(key.model(), &options).await {
                Ok(items) => {
                    debug!(model = key.model(), count = items.len(), "stale content refreshed");
                    cache.insert(key.clone(), items).await;
                }
                Err(err) => {
                    warn!(
                        model = key.model(),
                        error = %err,
                        "background content refresh failed, stale entry retained"
                    );
                }
            }

            cache.end_refresh(&key).await;
        });
    }
}

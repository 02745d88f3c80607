//! Feed query engine.

use tracing::{debug, instrument};

use vigil_core::traits::FeedSource;
use vigil_core::{PAGE_SIZE, Prayer, Result};

use crate::cache::{FeedCache, FeedKey};

/// Paginated feed reads over one selected source, backed by the shared
/// cache.
///
/// The source is chosen once per identity-mode resolution; the engine
/// never branches on mode itself. Overlapping fetches for the same
/// cursor are not de-duplicated here; the caller keeps a single fetch
/// in flight at a time.
pub struct FeedQuery<S> {
    source: S,
    key: FeedKey,
    cache: FeedCache,
}

impl<S: FeedSource> FeedQuery<S> {
    /// Create a query engine for one cache key over one source.
    pub fn new(source: S, key: FeedKey, cache: FeedCache) -> Self {
        Self { source, key, cache }
    }

    /// Returns the cache key this engine reads and writes.
    pub fn key(&self) -> &FeedKey {
        &self.key
    }

    /// Returns all cached records, flattened, newest first.
    pub fn prayers(&self) -> Vec<Prayer> {
        self.cache.prayers(&self.key)
    }

    /// Whether a further page may exist.
    ///
    /// True until a fetched page comes back shorter than the window
    /// size. A key that has never been fetched counts as having a next
    /// page (the first one).
    pub fn has_next(&self) -> bool {
        match self.cache.state(&self.key) {
            Some(state) => !state.terminal,
            None => true,
        }
    }

    /// Fetch the first page from the source, replacing any cached
    /// pages for this key.
    ///
    /// On failure the cached state is left untouched; no partial page
    /// is ever committed.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let page = self.source.fetch_page(0).await?;
        let terminal = page.len() < PAGE_SIZE;
        debug!(len = page.len(), terminal, "Fetched first page");
        self.cache.reset(&self.key, page, terminal);
        Ok(())
    }

    /// Advance pagination by one step.
    ///
    /// A stale or never-fetched entry refetches from the start; a
    /// terminal entry is left alone. Returns whether a fetch happened.
    #[instrument(skip(self))]
    pub async fn next_page(&self) -> Result<bool> {
        let state = self.cache.state(&self.key);

        let state = match state {
            None => {
                self.refresh().await?;
                return Ok(true);
            }
            Some(state) if state.stale => {
                debug!("Entry is stale, refetching from the start");
                self.refresh().await?;
                return Ok(true);
            }
            Some(state) => state,
        };

        if state.terminal {
            return Ok(false);
        }

        let offset = (state.page_count * PAGE_SIZE) as u32;
        let page = self.source.fetch_page(offset).await?;
        let terminal = page.len() < PAGE_SIZE;
        debug!(offset, len = page.len(), terminal, "Fetched page");
        self.cache.push_page(&self.key, page, terminal);
        Ok(true)
    }
}

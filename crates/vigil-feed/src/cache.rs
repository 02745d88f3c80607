//! Shared feed cache.
//!
//! Cached pages are shared between the query engine (writer on fetch)
//! and the submission engine (writer on optimistic insert and
//! rollback). Every mutation replaces page vectors instead of editing
//! them in place, so a consumer holding a previous page reference never
//! observes a half-updated page.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vigil_core::{IdentityMode, OrgId, Prayer};

/// One cached feed page, shared by reference.
pub type Page = Arc<Vec<Prayer>>;

/// Key of one cached feed: the organization scope plus the identity
/// mode discriminant, so switching between guest and authenticated
/// views never reuses pages across modes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeedKey {
    organization_id: Option<OrgId>,
    mode: &'static str,
}

impl FeedKey {
    /// Derive the cache key for a resolved identity mode.
    pub fn for_mode(mode: &IdentityMode) -> Self {
        Self {
            organization_id: mode.organization_id().cloned(),
            mode: mode.discriminant(),
        }
    }

    /// Returns the organization scope of this key, if any.
    pub fn organization_id(&self) -> Option<&OrgId> {
        self.organization_id.as_ref()
    }
}

#[derive(Clone, Debug, Default)]
struct Entry {
    pages: Vec<Page>,
    stale: bool,
    terminal: bool,
}

/// An opaque undo token: the cached entry exactly as it was when the
/// snapshot was taken.
#[derive(Debug)]
pub struct CacheSnapshot {
    entry: Option<Entry>,
}

/// Observed pagination state of one cached feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryState {
    /// Number of pages fetched so far.
    pub page_count: usize,
    /// Whether a settled submission marked the entry for refetch.
    pub stale: bool,
    /// Whether the last fetched page was short (no next page exists).
    pub terminal: bool,
}

/// The cached feed state for all keys, cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct FeedCache {
    inner: Arc<Mutex<HashMap<FeedKey, Entry>>>,
}

impl FeedCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached pages for `key`, newest first.
    pub fn pages(&self, key: &FeedKey) -> Vec<Page> {
        let entries = self.inner.lock().unwrap();
        entries.get(key).map(|e| e.pages.clone()).unwrap_or_default()
    }

    /// Returns all cached records for `key`, flattened, newest first.
    pub fn prayers(&self, key: &FeedKey) -> Vec<Prayer> {
        self.pages(key)
            .iter()
            .flat_map(|page| page.iter().cloned())
            .collect()
    }

    /// Returns the pagination state for `key`, if an entry exists.
    pub fn state(&self, key: &FeedKey) -> Option<EntryState> {
        let entries = self.inner.lock().unwrap();
        entries.get(key).map(|e| EntryState {
            page_count: e.pages.len(),
            stale: e.stale,
            terminal: e.terminal,
        })
    }

    /// Replace the entry for `key` with a freshly fetched first page.
    pub fn reset(&self, key: &FeedKey, first_page: Vec<Prayer>, terminal: bool) {
        let mut entries = self.inner.lock().unwrap();
        entries.insert(
            key.clone(),
            Entry {
                pages: vec![Arc::new(first_page)],
                stale: false,
                terminal,
            },
        );
    }

    /// Append a fetched page to the entry for `key`.
    pub fn push_page(&self, key: &FeedKey, page: Vec<Prayer>, terminal: bool) {
        let mut entries = self.inner.lock().unwrap();
        let entry = entries.entry(key.clone()).or_default();
        entry.pages.push(Arc::new(page));
        entry.terminal = terminal;
    }

    /// Capture the entry for `key` for a later [`FeedCache::restore`].
    pub fn snapshot(&self, key: &FeedKey) -> CacheSnapshot {
        let entries = self.inner.lock().unwrap();
        CacheSnapshot {
            entry: entries.get(key).cloned(),
        }
    }

    /// Restore the entry for `key` to a previously captured snapshot.
    ///
    /// This is a full replace, not a merge: anything written after the
    /// snapshot is discarded.
    pub fn restore(&self, key: &FeedKey, snapshot: CacheSnapshot) {
        let mut entries = self.inner.lock().unwrap();
        match snapshot.entry {
            Some(entry) => {
                entries.insert(key.clone(), entry);
            }
            None => {
                entries.remove(key);
            }
        }
    }

    /// Prepend an optimistic placeholder to the first cached page.
    ///
    /// A key that has never been fetched has nothing to patch; the
    /// record then first appears via the post-settle refetch. Returns
    /// whether the placeholder became visible.
    pub fn prepend_optimistic(&self, key: &FeedKey, prayer: Prayer) -> bool {
        let mut entries = self.inner.lock().unwrap();
        let Some(entry) = entries.get_mut(key) else {
            return false;
        };
        let Some(first) = entry.pages.first() else {
            return false;
        };

        let mut page = Vec::with_capacity(first.len() + 1);
        page.push(prayer);
        page.extend(first.iter().cloned());
        entry.pages[0] = Arc::new(page);
        true
    }

    /// Mark the entry for `key` as stale so the next access refetches
    /// from the authoritative source. Cached pages stay readable until
    /// then.
    pub fn invalidate(&self, key: &FeedKey) {
        let mut entries = self.inner.lock().unwrap();
        if let Some(entry) = entries.get_mut(key) {
            entry.stale = true;
        }
    }
}

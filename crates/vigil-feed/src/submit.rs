//! Submission engine.

use chrono::Utc;
use tracing::{debug, instrument, warn};

use vigil_core::traits::FeedSource;
use vigil_core::{AuthorProfile, Prayer, PrayerDraft, PrayerId, Result, UserId};

use crate::cache::{FeedCache, FeedKey};

/// Optimistic prayer submission over one selected source.
///
/// A submission validates locally, makes the pending record visible in
/// the shared cache before the write settles, rolls the cache back on
/// failure, and marks the key stale either way so the next read
/// replaces the placeholder with the authoritative record.
///
/// Concurrent submissions against the same key each snapshot whatever
/// state exists at that moment; an interleaved rollback can therefore
/// discard another submission's optimistic insert. The post-settle
/// refetch restores the authoritative view.
pub struct Submission<S> {
    source: S,
    key: FeedKey,
    cache: FeedCache,
    author: UserId,
}

impl<S: FeedSource> Submission<S> {
    /// Create a submission engine for one cache key over one source,
    /// attributing placeholders to `author`.
    pub fn new(source: S, key: FeedKey, cache: FeedCache, author: UserId) -> Self {
        Self {
            source,
            key,
            cache,
            author,
        }
    }

    /// Submit a new prayer request.
    ///
    /// Empty or whitespace-only content is rejected before any cache
    /// mutation or I/O. On write failure the cache is restored to its
    /// pre-submit state and the error is returned for user-facing
    /// reporting; nothing is retried.
    #[instrument(skip(self, content), fields(author = %self.author))]
    pub async fn submit(
        &self,
        content: impl Into<String>,
        is_anonymous: bool,
    ) -> Result<Prayer> {
        let draft = PrayerDraft::new(
            content,
            is_anonymous,
            self.key.organization_id().cloned(),
        )?;

        let snapshot = self.cache.snapshot(&self.key);

        let placeholder = Prayer {
            id: PrayerId::temporary(),
            content: draft.content().to_string(),
            is_anonymous: draft.is_anonymous(),
            created_at: Utc::now(),
            organization_id: draft.organization_id().cloned(),
            user_id: self.author.clone(),
            prayer_count: 0,
            profiles: Some(AuthorProfile::own()),
        };
        let visible = self.cache.prepend_optimistic(&self.key, placeholder);
        debug!(visible, "Optimistic insert applied");

        match self.source.create(&draft).await {
            Ok(prayer) => {
                self.cache.invalidate(&self.key);
                debug!(id = %prayer.id, "Submission settled");
                Ok(prayer)
            }
            Err(e) => {
                warn!(error = %e, "Submission failed, rolling back");
                self.cache.restore(&self.key, snapshot);
                self.cache.invalidate(&self.key);
                Err(e)
            }
        }
    }
}

//! Feed source trait.

use async_trait::async_trait;

use crate::prayer::{Prayer, PrayerDraft};
use crate::Result;

/// Number of records in a full feed page.
pub const PAGE_SIZE: usize = 10;

/// A backing store that can produce and accept prayer records for one
/// resolved identity context.
///
/// Implementations exist for organization-scoped and personal remote
/// feeds and for the local guest store; the caller selects one per
/// identity-mode resolution rather than branching per operation.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the window of records starting at `offset`, newest first.
    ///
    /// A returned page shorter than [`PAGE_SIZE`] (including empty) is
    /// terminal; callers must not fetch past it.
    async fn fetch_page(&self, offset: u32) -> Result<Vec<Prayer>>;

    /// Write a new record to the backing store and return the
    /// authoritative record.
    async fn create(&self, draft: &PrayerDraft) -> Result<Prayer>;
}

//! Guest prayer store.
//!
//! For sessions without an account, prayers live in the local key-value
//! store as a JSON-encoded list under a fixed key, newest first. The
//! list substitutes for the remote store: reads degrade to empty rather
//! than failing, writes persist before returning.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};

use vigil_core::error::{Error, StorageError};
use vigil_core::traits::{FeedSource, GUEST_PRAYERS_KEY, KeyValue};
use vigil_core::{AuthorProfile, Prayer, PrayerDraft, PrayerId, Result, UserId};

/// Locally stored prayers for a guest session.
#[derive(Debug, Clone)]
pub struct GuestStore<K> {
    kv: K,
}

impl<K: KeyValue> GuestStore<K> {
    /// Create a guest store over the given key-value backend.
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Read all locally stored prayers, newest first.
    ///
    /// A missing, unreadable, or corrupt list degrades to empty; the
    /// guest feed must keep working even if local storage is damaged.
    #[instrument(skip(self))]
    pub async fn prayers(&self) -> Vec<Prayer> {
        let raw = match self.kv.get(GUEST_PRAYERS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read guest prayers");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(prayers) => prayers,
            Err(e) => {
                warn!(error = %e, "Corrupt guest prayer list, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist a new guest prayer and return the stored record.
    ///
    /// Guest records are always personal: the stored record carries a
    /// null organization regardless of the draft, the `guest` user id
    /// sentinel, and the "Guest" display profile.
    #[instrument(skip(self, draft))]
    pub async fn save(&self, draft: &PrayerDraft) -> Result<Prayer> {
        let now = Utc::now();
        let prayer = Prayer {
            id: PrayerId::guest_at(now),
            content: draft.content().to_string(),
            is_anonymous: draft.is_anonymous(),
            created_at: now,
            organization_id: None,
            user_id: UserId::guest(),
            prayer_count: 0,
            profiles: Some(AuthorProfile::guest()),
        };

        let mut prayers = self.prayers().await;
        prayers.insert(0, prayer.clone());

        let encoded = serde_json::to_string(&prayers).map_err(|e| {
            Error::Storage(StorageError::Write {
                message: e.to_string(),
            })
        })?;
        self.kv.set(GUEST_PRAYERS_KEY, &encoded).await?;

        debug!(id = %prayer.id, "Saved guest prayer");

        Ok(prayer)
    }

    /// Remove all locally stored prayers.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.kv.remove(GUEST_PRAYERS_KEY).await
    }
}

/// The guest store is its own feed source: one unbounded page at
/// offset 0, nothing after it.
#[async_trait]
impl<K: KeyValue> FeedSource for GuestStore<K> {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<Prayer>> {
        if offset > 0 {
            return Ok(Vec::new());
        }
        Ok(self.prayers().await)
    }

    async fn create(&self, draft: &PrayerDraft) -> Result<Prayer> {
        self.save(draft).await
    }
}

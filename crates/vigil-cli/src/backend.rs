//! Feed backend selection.

use async_trait::async_trait;

use vigil_core::traits::FeedSource;
use vigil_core::{IdentityMode, Prayer, PrayerDraft, Result};
use vigil_feed::SessionManager;
use vigil_local::{FileKv, GuestStore};
use vigil_remote::{OrgFeed, PersonalFeed, RemoteAuth};

/// The feed source selected for one resolved identity mode.
///
/// Selection happens exactly once per resolution; everything
/// downstream just sees a [`FeedSource`].
pub enum AppBackend {
    Org(OrgFeed),
    Personal(PersonalFeed),
    Guest(GuestStore<FileKv>),
}

impl AppBackend {
    /// Pick the backend for a resolved mode, or `None` when there is
    /// no identity to read or write as.
    pub fn for_mode(
        mode: &IdentityMode,
        manager: &SessionManager<RemoteAuth, FileKv>,
        kv: &FileKv,
    ) -> Option<Self> {
        match mode {
            IdentityMode::Guest => Some(AppBackend::Guest(GuestStore::new(kv.clone()))),
            IdentityMode::Authenticated {
                organization_id, ..
            } => {
                let session = manager.auth().session()?;
                match organization_id {
                    Some(org) => Some(AppBackend::Org(OrgFeed::new(session, org.clone()))),
                    None => Some(AppBackend::Personal(PersonalFeed::new(session))),
                }
            }
            IdentityMode::Unauthenticated => None,
        }
    }
}

#[async_trait]
impl FeedSource for AppBackend {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<Prayer>> {
        match self {
            AppBackend::Org(feed) => feed.fetch_page(offset).await,
            AppBackend::Personal(feed) => feed.fetch_page(offset).await,
            AppBackend::Guest(store) => store.fetch_page(offset).await,
        }
    }

    async fn create(&self, draft: &PrayerDraft) -> Result<Prayer> {
        match self {
            AppBackend::Org(feed) => feed.create(draft).await,
            AppBackend::Personal(feed) => feed.create(draft).await,
            AppBackend::Guest(store) => store.create(draft).await,
        }
    }
}

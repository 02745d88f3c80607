//! Remote feed sources.

use async_trait::async_trait;

use vigil_core::traits::FeedSource;
use vigil_core::{OrgId, Prayer, PrayerDraft, Result};

use crate::session::RemoteSession;

/// Feed source for an organization's shared feed.
#[derive(Debug, Clone)]
pub struct OrgFeed {
    session: RemoteSession,
    organization_id: OrgId,
}

impl OrgFeed {
    /// Create a source scoped to the given organization.
    pub fn new(session: RemoteSession, organization_id: OrgId) -> Self {
        Self {
            session,
            organization_id,
        }
    }
}

#[async_trait]
impl FeedSource for OrgFeed {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<Prayer>> {
        self.session
            .list_organization_page(&self.organization_id, offset)
            .await
    }

    async fn create(&self, draft: &PrayerDraft) -> Result<Prayer> {
        self.session.insert_prayer(draft).await
    }
}

/// Feed source for an account with no organization: the user's own
/// prayers.
#[derive(Debug, Clone)]
pub struct PersonalFeed {
    session: RemoteSession,
}

impl PersonalFeed {
    /// Create a source scoped to the session user's own records.
    pub fn new(session: RemoteSession) -> Self {
        Self { session }
    }
}

#[async_trait]
impl FeedSource for PersonalFeed {
    async fn fetch_page(&self, offset: u32) -> Result<Vec<Prayer>> {
        self.session.list_personal_page(offset).await
    }

    async fn create(&self, draft: &PrayerDraft) -> Result<Prayer> {
        self.session.insert_prayer(draft).await
    }
}

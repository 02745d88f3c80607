//! Authenticated remote session.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument};

use vigil_core::error::BackendError;
use vigil_core::{AccessToken, OrgId, Prayer, PrayerDraft, RefreshToken, Result, UserId};

use crate::client::RestClient;

/// Wire shape of a token refresh response.
#[derive(Debug, serde::Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: String,
}

/// Row sent when inserting a prayer.
///
/// The author id is set explicitly; the write path never relies on the
/// service inferring it from the token.
#[derive(Debug, serde::Serialize)]
struct NewPrayerRow<'a> {
    content: &'a str,
    is_anonymous: bool,
    organization_id: Option<&'a str>,
    user_id: &'a str,
}

/// Row returned by the profile organization lookup.
#[derive(Debug, serde::Deserialize)]
struct ProfileRow {
    organization_id: Option<OrgId>,
}

/// An authenticated session against the remote service.
///
/// Cheap to clone; clones share token state, so a refresh through one
/// handle is visible to all.
#[derive(Clone)]
pub struct RemoteSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    user_id: UserId,
    client: RestClient,
    tokens: RwLock<SessionTokens>,
}

struct SessionTokens {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
}

impl RemoteSession {
    pub(crate) fn new(
        client: RestClient,
        user_id: UserId,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                user_id,
                client,
                tokens: RwLock::new(SessionTokens {
                    access_token,
                    refresh_token,
                }),
            }),
        }
    }

    /// Restore a session from persisted tokens.
    pub fn from_persisted(
        client: RestClient,
        user_id: UserId,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
    ) -> Self {
        Self::new(client, user_id, access_token, refresh_token)
    }

    /// Returns the user id associated with this session.
    pub fn user_id(&self) -> &UserId {
        &self.inner.user_id
    }

    /// Exchange the refresh token for a new token pair.
    #[instrument(skip(self), fields(user = %self.inner.user_id))]
    pub async fn refresh(&self) -> Result<()> {
        info!("Refreshing session");

        let refresh_token = {
            let tokens = self.inner.tokens.read().unwrap();
            tokens
                .refresh_token
                .as_ref()
                .map(|t| t.as_str().to_string())
        };

        let refresh_token = refresh_token.ok_or(BackendError::SessionExpired)?;

        let response: RefreshResponse = self
            .inner
            .client
            .auth_post(
                "token",
                &[("grant_type", "refresh_token")],
                &serde_json::json!({ "refresh_token": refresh_token }),
                None,
            )
            .await?;

        {
            let mut tokens = self.inner.tokens.write().unwrap();
            tokens.access_token = AccessToken::new(response.access_token);
            tokens.refresh_token = Some(RefreshToken::new(response.refresh_token));
        }

        debug!("Session refreshed");
        Ok(())
    }

    /// Export the current access token for persistence.
    pub fn access_token(&self) -> AccessToken {
        let tokens = self.inner.tokens.read().unwrap();
        tokens.access_token.clone()
    }

    /// Export the current refresh token for persistence.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        let tokens = self.inner.tokens.read().unwrap();
        tokens.refresh_token.clone()
    }

    fn bearer(&self) -> String {
        let tokens = self.inner.tokens.read().unwrap();
        tokens.access_token.as_str().to_string()
    }

    /// Fetch one page of an organization's feed, newest first.
    #[instrument(skip(self), fields(user = %self.inner.user_id, %organization_id))]
    pub async fn list_organization_page(
        &self,
        organization_id: &OrgId,
        offset: u32,
    ) -> Result<Vec<Prayer>> {
        debug!("Listing organization prayers");
        self.inner
            .client
            .select_rows(
                "prayers",
                &[
                    ("select", "*,profiles(full_name,avatar_url)".to_string()),
                    (
                        "organization_id",
                        format!("eq.{}", organization_id.as_str()),
                    ),
                    ("order", "created_at.desc".to_string()),
                ],
                page_window(offset),
                &self.bearer(),
            )
            .await
    }

    /// Fetch one page of the session user's personal prayers, newest
    /// first.
    #[instrument(skip(self), fields(user = %self.inner.user_id))]
    pub async fn list_personal_page(&self, offset: u32) -> Result<Vec<Prayer>> {
        debug!("Listing personal prayers");
        self.inner
            .client
            .select_rows(
                "prayers",
                &[
                    ("select", "*,profiles(full_name,avatar_url)".to_string()),
                    ("user_id", format!("eq.{}", self.inner.user_id.as_str())),
                    ("order", "created_at.desc".to_string()),
                ],
                page_window(offset),
                &self.bearer(),
            )
            .await
    }

    /// Insert a new prayer authored by the session user and return the
    /// stored record.
    #[instrument(skip(self, draft), fields(user = %self.inner.user_id))]
    pub async fn insert_prayer(&self, draft: &PrayerDraft) -> Result<Prayer> {
        debug!("Inserting prayer");
        let row = NewPrayerRow {
            content: draft.content(),
            is_anonymous: draft.is_anonymous(),
            organization_id: draft.organization_id().map(OrgId::as_str),
            user_id: self.inner.user_id.as_str(),
        };
        self.inner
            .client
            .insert_row("prayers", &row, &self.bearer())
            .await
    }

    /// Look up the organization of the session user's profile.
    #[instrument(skip(self), fields(user = %self.inner.user_id))]
    pub async fn organization_id(&self) -> Result<Option<OrgId>> {
        let rows: Vec<ProfileRow> = self
            .inner
            .client
            .select_rows(
                "profiles",
                &[
                    ("select", "organization_id".to_string()),
                    ("id", format!("eq.{}", self.inner.user_id.as_str())),
                ],
                (0, 0),
                &self.bearer(),
            )
            .await?;

        Ok(rows.into_iter().next().and_then(|row| row.organization_id))
    }
}

/// The row window for a page starting at `offset`.
fn page_window(offset: u32) -> (u32, u32) {
    (offset, offset + (vigil_core::PAGE_SIZE as u32) - 1)
}

impl std::fmt::Debug for RemoteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSession")
            .field("user_id", &self.inner.user_id)
            .field("service", &self.inner.client.service().as_str())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_covers_one_page() {
        assert_eq!(page_window(0), (0, 9));
        assert_eq!(page_window(10), (10, 19));
        assert_eq!(page_window(20), (20, 29));
    }
}

//! Remote auth gateway.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use vigil_core::error::{BackendError, Error};
use vigil_core::traits::{AuthGateway, AuthenticatedUser};
use vigil_core::{AccessToken, Credentials, InviteCode, RefreshToken, Result, SignUp, UserId};

use crate::client::RestClient;
use crate::session::RemoteSession;

/// Wire shape of a password-grant token response.
#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: TokenUser,
}

#[derive(Debug, serde::Deserialize)]
struct TokenUser {
    id: String,
}

/// Request body for account creation, with the profile display
/// metadata the service copies into the account.
#[derive(Debug, serde::Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, serde::Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
    avatar_url: String,
}

/// Request body for the organization-join procedure.
#[derive(Debug, serde::Serialize)]
struct JoinRequest<'a> {
    code: &'a str,
}

/// Account lifecycle operations against the remote service.
///
/// Holds the active session, if any; `sign_in` establishes one and
/// `sign_out` drops it. A session restored from persisted tokens can be
/// installed with [`RemoteAuth::with_session`].
pub struct RemoteAuth {
    client: RestClient,
    session: RwLock<Option<RemoteSession>>,
}

impl RemoteAuth {
    /// Create a gateway with no active session.
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            session: RwLock::new(None),
        }
    }

    /// Create a gateway seeded with a restored session.
    pub fn with_session(client: RestClient, session: RemoteSession) -> Self {
        Self {
            client,
            session: RwLock::new(Some(session)),
        }
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<RemoteSession> {
        self.session.read().unwrap().clone()
    }

    fn require_session(&self) -> Result<RemoteSession> {
        self.session()
            .ok_or_else(|| Error::Backend(BackendError::NotAuthenticated))
    }
}

#[async_trait]
impl AuthGateway for RemoteAuth {
    #[instrument(skip(self, signup), fields(email = signup.email()))]
    async fn sign_up(&self, signup: &SignUp) -> Result<()> {
        info!("Creating account");

        let request = SignUpRequest {
            email: signup.email(),
            password: signup.password(),
            data: SignUpMetadata {
                full_name: signup.full_name(),
                avatar_url: signup.avatar_url(),
            },
        };

        let _: serde_json::Value = self
            .client
            .auth_post("signup", &[], &request, None)
            .await?;

        Ok(())
    }

    #[instrument(skip(self, credentials), fields(email = credentials.email()))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthenticatedUser> {
        info!("Signing in");

        let response: TokenResponse = self
            .client
            .auth_post(
                "token",
                &[("grant_type", "password")],
                &serde_json::json!({
                    "email": credentials.email(),
                    "password": credentials.password(),
                }),
                None,
            )
            .await
            .map_err(|e| match e {
                // The token endpoint reports bad credentials as a 400
                // invalid-grant.
                Error::Backend(BackendError::Api(api)) if api.status == 400 => {
                    Error::Backend(BackendError::InvalidCredentials)
                }
                other => other,
            })?;

        let user_id = UserId::new(response.user.id)?;
        let session = RemoteSession::new(
            self.client.clone(),
            user_id.clone(),
            AccessToken::new(response.access_token),
            Some(RefreshToken::new(response.refresh_token)),
        );

        let organization_id = session.organization_id().await?;

        *self.session.write().unwrap() = Some(session);

        Ok(AuthenticatedUser {
            user_id,
            organization_id,
        })
    }

    #[instrument(skip(self))]
    async fn sign_out(&self) -> Result<()> {
        let session = self.session.write().unwrap().take();

        if let Some(session) = session {
            let token = session.access_token();
            // Best effort: the local session is gone either way.
            if let Err(e) = self
                .client
                .auth_post_no_response("logout", Some(token.as_str()))
                .await
            {
                warn!(error = %e, "Remote logout failed");
            }
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>> {
        let Some(session) = self.session() else {
            return Ok(None);
        };

        // Validate the restored tokens against the service; one refresh
        // attempt if the access token has gone stale.
        let token = session.access_token();
        let valid = match self
            .client
            .auth_get::<serde_json::Value>("user", token.as_str())
            .await
        {
            Ok(_) => true,
            Err(Error::Backend(BackendError::Api(api))) if api.is_auth_error() => {
                debug!("Access token rejected, attempting refresh");
                match session.refresh().await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!(error = %e, "Session refresh failed");
                        false
                    }
                }
            }
            Err(e) => return Err(e),
        };

        if !valid {
            *self.session.write().unwrap() = None;
            return Ok(None);
        }

        let organization_id = session.organization_id().await?;

        Ok(Some(AuthenticatedUser {
            user_id: session.user_id().clone(),
            organization_id,
        }))
    }

    #[instrument(skip(self), fields(%code))]
    async fn join_organization(&self, code: &InviteCode) -> Result<()> {
        let session = self.require_session()?;
        let token = session.access_token();

        self.client
            .rpc(
                "join_organization_by_code",
                &JoinRequest {
                    code: code.as_str(),
                },
                token.as_str(),
            )
            .await
    }
}

impl std::fmt::Debug for RemoteAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteAuth")
            .field("service", &self.client.service().as_str())
            .field("session", &self.session.read().unwrap().is_some())
            .finish()
    }
}

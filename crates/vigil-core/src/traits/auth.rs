//! Auth gateway trait.

use async_trait::async_trait;

use crate::credentials::{Credentials, SignUp};
use crate::types::{InviteCode, OrgId, UserId};
use crate::Result;

/// The resolved identity of an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account's user id.
    pub user_id: UserId,
    /// The organization the account's profile belongs to, if any.
    pub organization_id: Option<OrgId>,
}

/// Account lifecycle operations against the remote auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create a new account with profile display metadata.
    async fn sign_up(&self, signup: &SignUp) -> Result<()>;

    /// Authenticate and establish a session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthenticatedUser>;

    /// End the active session. A no-op when none is active.
    async fn sign_out(&self) -> Result<()>;

    /// Resolve the currently active session, if any, including the
    /// profile's organization membership.
    async fn current_user(&self) -> Result<Option<AuthenticatedUser>>;

    /// Join an organization by invite code (onboarding).
    async fn join_organization(&self, code: &InviteCode) -> Result<()>;
}

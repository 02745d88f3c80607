//! Session and identity-mode management.

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use vigil_core::traits::{AuthGateway, GUEST_FLAG_KEY, KeyValue};
use vigil_core::{Credentials, IdentityMode, InviteCode, Result, SignUp};

/// Tracks the current identity mode and exposes mode transitions.
///
/// Resolution order on startup: an active authenticated session wins,
/// then the durable guest flag, then unauthenticated. Every transition
/// is published as one atomic update through a watch channel, so
/// observers never see a mixed guest/authenticated window.
pub struct SessionManager<A, K> {
    auth: A,
    kv: K,
    mode: watch::Sender<IdentityMode>,
}

impl<A: AuthGateway, K: KeyValue> SessionManager<A, K> {
    /// Create a manager over an auth gateway and a durable store.
    ///
    /// The mode starts as unauthenticated until [`resolve`] runs.
    ///
    /// [`resolve`]: SessionManager::resolve
    pub fn new(auth: A, kv: K) -> Self {
        let (mode, _) = watch::channel(IdentityMode::Unauthenticated);
        Self { auth, kv, mode }
    }

    /// Returns the auth gateway this manager drives.
    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Returns the currently published identity mode.
    pub fn current_mode(&self) -> IdentityMode {
        self.mode.borrow().clone()
    }

    /// Subscribe to identity-mode changes.
    pub fn subscribe(&self) -> watch::Receiver<IdentityMode> {
        self.mode.subscribe()
    }

    /// Resolve the identity mode from the gateway and the durable
    /// guest flag, publish it, and return it.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Result<IdentityMode> {
        let mode = if let Some(user) = self.auth.current_user().await? {
            IdentityMode::Authenticated {
                user_id: user.user_id,
                organization_id: user.organization_id,
            }
        } else if self.guest_flag().await {
            IdentityMode::Guest
        } else {
            IdentityMode::Unauthenticated
        };

        debug!(mode = mode.discriminant(), "Resolved identity mode");
        self.publish(mode.clone());
        Ok(mode)
    }

    /// Enter guest mode: set the durable flag and publish the mode.
    #[instrument(skip(self))]
    pub async fn enter_guest_mode(&self) -> Result<()> {
        self.kv.set(GUEST_FLAG_KEY, "true").await?;
        info!("Entered guest mode");
        self.publish(IdentityMode::Guest);
        Ok(())
    }

    /// Create a new account. Does not sign in.
    pub async fn sign_up(&self, signup: &SignUp) -> Result<()> {
        self.auth.sign_up(signup).await
    }

    /// Sign in and publish the authenticated mode.
    ///
    /// Guest status is cleared as part of the same transition; the
    /// published update goes straight from the previous mode to
    /// authenticated.
    #[instrument(skip(self, credentials))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<IdentityMode> {
        let user = self.auth.sign_in(credentials).await?;

        if let Err(e) = self.kv.remove(GUEST_FLAG_KEY).await {
            // The flag only matters when no session exists; observable
            // mode is already authenticated.
            warn!(error = %e, "Failed to clear guest flag");
        }

        let mode = IdentityMode::Authenticated {
            user_id: user.user_id,
            organization_id: user.organization_id,
        };
        info!("Signed in");
        self.publish(mode.clone());
        Ok(mode)
    }

    /// Sign out: end any remote session, clear the guest flag, and
    /// publish the unauthenticated mode.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await?;
        self.kv.remove(GUEST_FLAG_KEY).await?;
        info!("Signed out");
        self.publish(IdentityMode::Unauthenticated);
        Ok(())
    }

    /// Join an organization by invite code, then re-resolve the mode
    /// so the new membership is reflected.
    #[instrument(skip(self), fields(%code))]
    pub async fn join_organization(&self, code: &InviteCode) -> Result<IdentityMode> {
        self.auth.join_organization(code).await?;
        self.resolve().await
    }

    /// Read the durable guest flag; a damaged store counts as not
    /// guest.
    async fn guest_flag(&self) -> bool {
        match self.kv.get(GUEST_FLAG_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Failed to read guest flag");
                false
            }
        }
    }

    fn publish(&self, mode: IdentityMode) {
        self.mode.send_replace(mode);
    }
}

//! Session manager tests over stub auth and in-memory storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vigil_core::error::{BackendError, Error};
use vigil_core::traits::{AuthGateway, AuthenticatedUser, GUEST_FLAG_KEY, KeyValue};
use vigil_core::{Credentials, IdentityMode, InviteCode, OrgId, Result, SignUp, UserId};
use vigil_feed::SessionManager;

#[derive(Clone, Default)]
struct MemoryKv {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

#[async_trait]
impl KeyValue for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct StubAuth {
    inner: Arc<Mutex<StubState>>,
}

#[derive(Default)]
struct StubState {
    current: Option<AuthenticatedUser>,
    known_password: Option<String>,
}

impl StubAuth {
    fn with_account(password: &str) -> Self {
        let stub = Self::default();
        stub.inner.lock().unwrap().known_password = Some(password.to_string());
        stub
    }

    fn with_active_session(user: AuthenticatedUser) -> Self {
        let stub = Self::default();
        stub.inner.lock().unwrap().current = Some(user);
        stub
    }
}

#[async_trait]
impl AuthGateway for StubAuth {
    async fn sign_up(&self, signup: &SignUp) -> Result<()> {
        self.inner.lock().unwrap().known_password = Some(signup.password().to_string());
        Ok(())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthenticatedUser> {
        let mut state = self.inner.lock().unwrap();
        if state.known_password.as_deref() != Some(credentials.password()) {
            return Err(Error::Backend(BackendError::InvalidCredentials));
        }
        let user = AuthenticatedUser {
            user_id: UserId::new("u-1").unwrap(),
            organization_id: None,
        };
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        self.inner.lock().unwrap().current = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthenticatedUser>> {
        Ok(self.inner.lock().unwrap().current.clone())
    }

    async fn join_organization(&self, code: &InviteCode) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        let Some(user) = state.current.as_mut() else {
            return Err(Error::Backend(BackendError::NotAuthenticated));
        };
        user.organization_id = Some(OrgId::new(format!("org-{}", code.as_str())).unwrap());
        Ok(())
    }
}

fn authed_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: UserId::new("u-1").unwrap(),
        organization_id: Some(OrgId::new("org-1").unwrap()),
    }
}

#[tokio::test]
async fn defaults_to_unauthenticated() {
    let manager = SessionManager::new(StubAuth::default(), MemoryKv::default());
    let mode = manager.resolve().await.unwrap();
    assert_eq!(mode, IdentityMode::Unauthenticated);
}

#[tokio::test]
async fn durable_guest_flag_resolves_to_guest() {
    let kv = MemoryKv::default();
    kv.set(GUEST_FLAG_KEY, "true").await.unwrap();

    let manager = SessionManager::new(StubAuth::default(), kv);
    assert_eq!(manager.resolve().await.unwrap(), IdentityMode::Guest);
}

#[tokio::test]
async fn active_session_supersedes_guest_flag() {
    let kv = MemoryKv::default();
    kv.set(GUEST_FLAG_KEY, "true").await.unwrap();

    let manager = SessionManager::new(StubAuth::with_active_session(authed_user()), kv);
    let mode = manager.resolve().await.unwrap();

    assert!(mode.is_authenticated());
    assert_eq!(mode.organization_id(), Some(&OrgId::new("org-1").unwrap()));
}

#[tokio::test]
async fn enter_guest_mode_is_durable() {
    let kv = MemoryKv::default();
    let manager = SessionManager::new(StubAuth::default(), kv.clone());

    manager.enter_guest_mode().await.unwrap();
    assert_eq!(manager.current_mode(), IdentityMode::Guest);

    // A fresh manager over the same storage resolves back to guest.
    let restarted = SessionManager::new(StubAuth::default(), kv);
    assert_eq!(restarted.resolve().await.unwrap(), IdentityMode::Guest);
}

#[tokio::test]
async fn sign_in_clears_guest_status_in_one_transition() {
    let kv = MemoryKv::default();
    let manager = SessionManager::new(StubAuth::with_account("secret123"), kv.clone());
    manager.enter_guest_mode().await.unwrap();

    let mut modes = manager.subscribe();
    modes.mark_unchanged();

    let mode = manager
        .sign_in(&Credentials::new("alice@church.example", "secret123"))
        .await
        .unwrap();

    assert!(mode.is_authenticated());
    assert_eq!(kv.get(GUEST_FLAG_KEY).await.unwrap(), None);

    // Exactly one observable transition, straight to authenticated.
    assert!(modes.has_changed().unwrap());
    assert!(modes.borrow_and_update().is_authenticated());
    assert!(!modes.has_changed().unwrap());
}

#[tokio::test]
async fn rejected_credentials_leave_mode_untouched() {
    let manager = SessionManager::new(StubAuth::with_account("secret123"), MemoryKv::default());
    manager.enter_guest_mode().await.unwrap();

    let err = manager
        .sign_in(&Credentials::new("alice@church.example", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Backend(BackendError::InvalidCredentials)
    ));
    assert_eq!(manager.current_mode(), IdentityMode::Guest);
}

#[tokio::test]
async fn sign_out_clears_both_session_and_guest_flag() {
    let kv = MemoryKv::default();
    kv.set(GUEST_FLAG_KEY, "true").await.unwrap();

    let manager = SessionManager::new(StubAuth::with_active_session(authed_user()), kv.clone());
    manager.resolve().await.unwrap();

    manager.sign_out().await.unwrap();
    assert_eq!(manager.current_mode(), IdentityMode::Unauthenticated);
    assert_eq!(kv.get(GUEST_FLAG_KEY).await.unwrap(), None);

    // Nothing left to resolve back into.
    assert_eq!(
        manager.resolve().await.unwrap(),
        IdentityMode::Unauthenticated
    );
}

#[tokio::test]
async fn joining_an_organization_updates_membership() {
    let manager = SessionManager::new(StubAuth::with_account("secret123"), MemoryKv::default());
    let mode = manager
        .sign_in(&Credentials::new("alice@church.example", "secret123"))
        .await
        .unwrap();
    assert_eq!(mode.organization_id(), None);

    let code = InviteCode::new("abc123").unwrap();
    let mode = manager.join_organization(&code).await.unwrap();
    assert_eq!(
        mode.organization_id(),
        Some(&OrgId::new("org-ABC123").unwrap())
    );
}

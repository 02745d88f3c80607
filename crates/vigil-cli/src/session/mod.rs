//! Session wiring for commands.

pub mod storage;

use anyhow::Result;
use tracing::warn;

use vigil_feed::SessionManager;
use vigil_local::FileKv;
use vigil_remote::RemoteAuth;

use crate::config::{self, ServiceOptions};

/// Everything a command needs: the session manager over the remote
/// gateway and the local durable store.
pub struct App {
    pub manager: SessionManager<RemoteAuth, FileKv>,
    pub kv: FileKv,
}

/// Build the app context: resolve the service, restore any persisted
/// session, and open the local store.
pub async fn init(options: &ServiceOptions) -> Result<App> {
    let client = config::client(options)?;

    let session = match storage::load_session(&client).await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable session file");
            None
        }
    };
    let auth = match session {
        Some(session) => RemoteAuth::with_session(client, session),
        None => RemoteAuth::new(client),
    };

    let kv = FileKv::new(storage::store_root()?);

    Ok(App {
        manager: SessionManager::new(auth, kv.clone()),
        kv,
    })
}

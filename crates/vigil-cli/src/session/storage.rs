//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use vigil_core::{AccessToken, RefreshToken, UserId};
use vigil_remote::{RemoteSession, RestClient};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user_id: String,
    access_token: String,
    refresh_token: Option<String>,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "vigil").context("Could not determine config directory")
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Get the root directory for the local key-value store.
pub fn store_root() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    Ok(dirs.data_dir().join("store"))
}

/// Save a session to disk.
pub async fn save_session(session: &RemoteSession) -> Result<()> {
    let stored = StoredSession {
        user_id: session.user_id().to_string(),
        access_token: session.access_token().as_str().to_string(),
        refresh_token: session.refresh_token().map(|t| t.as_str().to_string()),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load a session from disk.
pub async fn load_session(client: &RestClient) -> Result<Option<RemoteSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let user_id = UserId::new(&stored.user_id).context("Invalid user id in session")?;
    let access_token = AccessToken::new(stored.access_token);
    let refresh_token = stored.refresh_token.map(RefreshToken::new);

    Ok(Some(RemoteSession::from_persisted(
        client.clone(),
        user_id,
        access_token,
        refresh_token,
    )))
}

/// Clear the stored session.
pub async fn clear_session() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}

//! Durable key-value store trait.

use async_trait::async_trait;

use crate::Result;

/// Key of the durable guest-mode flag.
pub const GUEST_FLAG_KEY: &str = "guest_mode";

/// Key of the serialized guest prayer list.
pub const GUEST_PRAYERS_KEY: &str = "guest_prayers";

/// A durable string key-value store.
///
/// Values survive process restarts. Used for the guest-mode flag and
/// the serialized guest prayer list.
#[async_trait]
pub trait KeyValue: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value under `key`. A no-op when absent.
    async fn remove(&self, key: &str) -> Result<()>;
}

//! vigil-local - Durable local storage and the guest prayer store.

mod guest;
mod kv;

pub use guest::GuestStore;
pub use kv::FileKv;

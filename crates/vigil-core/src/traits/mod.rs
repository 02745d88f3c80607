//! Core traits for feed, auth, and durable-storage behavior.

mod auth;
mod kv;
mod source;

pub use auth::{AuthGateway, AuthenticatedUser};
pub use kv::{GUEST_FLAG_KEY, GUEST_PRAYERS_KEY, KeyValue};
pub use source::{FeedSource, PAGE_SIZE};

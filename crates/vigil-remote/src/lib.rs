//! vigil-remote - Remote service backend.

mod auth;
mod client;
mod feed;
mod session;

pub use auth::RemoteAuth;
pub use client::RestClient;
pub use feed::{OrgFeed, PersonalFeed};
pub use session::RemoteSession;

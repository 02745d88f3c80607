//! vigil-feed - Feed cache, pagination, and optimistic submission.
//!
//! The engines here are generic over [`FeedSource`]; pick a source for
//! the resolved identity mode once, then read through [`FeedQuery`]
//! and write through [`Submission`]. Both share a [`FeedCache`], which
//! is what makes a pending submission visible in the feed before the
//! backing write settles.
//!
//! [`FeedSource`]: vigil_core::traits::FeedSource

mod cache;
mod query;
mod session;
mod submit;

pub use cache::{CacheSnapshot, EntryState, FeedCache, FeedKey, Page};
pub use query::FeedQuery;
pub use session::SessionManager;
pub use submit::Submission;

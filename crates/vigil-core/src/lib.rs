//! vigil-core - Core types and traits for the vigil prayer-feed toolkit.

pub mod credentials;
pub mod error;
pub mod identity;
pub mod prayer;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, SignUp};
pub use error::{ApiError, BackendError, Error, StorageError, ValidationError};
pub use identity::IdentityMode;
pub use prayer::{AuthorProfile, Prayer, PrayerDraft, PrayerId};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{
    AuthGateway, AuthenticatedUser, FeedSource, GUEST_FLAG_KEY, GUEST_PRAYERS_KEY, KeyValue,
    PAGE_SIZE,
};
pub use types::{GUEST_USER_ID, InviteCode, OrgId, ServiceUrl, UserId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

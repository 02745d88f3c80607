//! Prayer record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Error, ValidationError};
use crate::types::{OrgId, UserId};

/// Prefix of ids assigned to optimistic placeholder records.
const TEMP_ID_PREFIX: &str = "temp-";

/// Prefix of ids assigned to locally authored guest records.
const GUEST_ID_PREFIX: &str = "guest-";

/// A prayer record identifier.
///
/// Authoritative records carry an id assigned by the remote service.
/// Guest records carry a locally assigned, time-based id. Optimistic
/// placeholders carry a distinguishable temporary id that is replaced by
/// refetching, never rewritten in place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrayerId(String);

impl PrayerId {
    /// Wrap a service-assigned id.
    pub fn remote(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Mint a fresh temporary id for an optimistic placeholder.
    pub fn temporary() -> Self {
        Self(format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4()))
    }

    /// Mint a guest-origin id from the given creation time.
    ///
    /// Millisecond precision keeps ids monotonically distinguishable for
    /// records authored on one device.
    pub fn guest_at(at: DateTime<Utc>) -> Self {
        Self(format!("{}{}", GUEST_ID_PREFIX, at.timestamp_millis()))
    }

    /// Returns true for optimistic placeholder ids.
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    /// Returns true for guest-origin ids.
    pub fn is_guest(&self) -> bool {
        self.0.starts_with(GUEST_ID_PREFIX)
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Denormalized author display info embedded in a prayer record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    /// The author's display name.
    pub full_name: String,
    /// The author's avatar URL; may be empty.
    #[serde(default)]
    pub avatar_url: String,
}

impl AuthorProfile {
    /// Create a new author profile.
    pub fn new(full_name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            avatar_url: avatar_url.into(),
        }
    }

    /// The stand-in profile attached to guest-authored prayers.
    pub fn guest() -> Self {
        Self::new("Guest", "")
    }

    /// The stand-in profile attached to optimistic placeholders.
    pub fn own() -> Self {
        Self::new("Me", "")
    }
}

/// A posted prayer request.
///
/// The serialized form is the wire shape shared by the remote service
/// and the local guest store: snake_case fields with the author profile
/// embedded under `profiles`.
///
/// Records are immutable once created except for `prayer_count`, which
/// only the backing store increments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prayer {
    /// Unique record id.
    pub id: PrayerId,
    /// The request text.
    pub content: String,
    /// When true, the author identity must not be rendered.
    pub is_anonymous: bool,
    /// Submission timestamp (server clock for remote records, client
    /// clock for guest and placeholder records).
    pub created_at: DateTime<Utc>,
    /// Owning organization; `None` for personal records.
    pub organization_id: Option<OrgId>,
    /// The posting identity; the `guest` sentinel for guest records.
    pub user_id: UserId,
    /// Acknowledgement counter, incremented only by the backing store.
    #[serde(default)]
    pub prayer_count: u32,
    /// Author display info; absent when the record carries no author
    /// relation.
    #[serde(default)]
    pub profiles: Option<AuthorProfile>,
}

impl Prayer {
    /// Returns the name to render for this prayer's author.
    ///
    /// Anonymous prayers always render as "Anonymous"; records without
    /// an embedded profile fall back to "Unknown".
    pub fn author_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else {
            self.profiles
                .as_ref()
                .map(|p| p.full_name.as_str())
                .filter(|name| !name.is_empty())
                .unwrap_or("Unknown")
        }
    }
}

/// A validated, not-yet-submitted prayer request.
///
/// Construction rejects empty or whitespace-only content, so a draft in
/// hand is always submittable without further checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrayerDraft {
    content: String,
    is_anonymous: bool,
    organization_id: Option<OrgId>,
}

impl PrayerDraft {
    /// Create a new draft, validating the content.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyContent`] if the content is empty
    /// or whitespace-only. No I/O happens here or anywhere before a
    /// draft exists.
    pub fn new(
        content: impl Into<String>,
        is_anonymous: bool,
        organization_id: Option<OrgId>,
    ) -> Result<Self, Error> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        Ok(Self {
            content,
            is_anonymous,
            organization_id,
        })
    }

    /// Returns the request text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns whether the author asked to stay anonymous.
    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    /// Returns the target organization, if any.
    pub fn organization_id(&self) -> Option<&OrgId> {
        self.organization_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_prayer() -> Prayer {
        Prayer {
            id: PrayerId::remote("p-1"),
            content: "Pray for my exam".to_string(),
            is_anonymous: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap(),
            organization_id: None,
            user_id: UserId::guest(),
            prayer_count: 0,
            profiles: Some(AuthorProfile::guest()),
        }
    }

    #[test]
    fn id_prefixes() {
        assert!(PrayerId::temporary().is_temporary());
        let at = Utc.with_ymd_and_hms(2024, 5, 4, 12, 0, 0).unwrap();
        let guest = PrayerId::guest_at(at);
        assert!(guest.is_guest());
        assert_eq!(guest.as_str(), format!("guest-{}", at.timestamp_millis()));
        assert!(!PrayerId::remote("abc").is_temporary());
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_value(sample_prayer()).unwrap();
        assert_eq!(json["id"], "p-1");
        assert_eq!(json["content"], "Pray for my exam");
        assert_eq!(json["is_anonymous"], false);
        assert_eq!(json["organization_id"], serde_json::Value::Null);
        assert_eq!(json["user_id"], "guest");
        assert_eq!(json["prayer_count"], 0);
        assert_eq!(json["profiles"]["full_name"], "Guest");
        assert_eq!(json["profiles"]["avatar_url"], "");
    }

    #[test]
    fn deserializes_without_profile() {
        let prayer: Prayer = serde_json::from_value(serde_json::json!({
            "id": "p-2",
            "content": "Healing for Sam",
            "is_anonymous": true,
            "created_at": "2024-05-04T12:00:00Z",
            "organization_id": "org-1",
            "user_id": "u-1",
            "prayer_count": 3
        }))
        .unwrap();
        assert!(prayer.profiles.is_none());
        assert_eq!(prayer.prayer_count, 3);
    }

    #[test]
    fn author_name_rules() {
        let mut prayer = sample_prayer();
        assert_eq!(prayer.author_name(), "Guest");

        prayer.is_anonymous = true;
        assert_eq!(prayer.author_name(), "Anonymous");

        prayer.is_anonymous = false;
        prayer.profiles = None;
        assert_eq!(prayer.author_name(), "Unknown");
    }

    #[test]
    fn draft_rejects_blank_content() {
        assert!(PrayerDraft::new("", false, None).is_err());
        assert!(PrayerDraft::new("   \n\t", false, None).is_err());
        assert!(PrayerDraft::new("Pray for my exam", false, None).is_ok());
    }
}

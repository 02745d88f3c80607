//! User identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ValidationError};

/// The sentinel user id carried by locally authored guest prayers.
pub const GUEST_USER_ID: &str = "guest";

/// A validated user identifier.
///
/// For remote accounts this is the id assigned by the auth service. For
/// locally authored guest prayers it is the literal sentinel `"guest"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create a new user id, validating that it is non-empty.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ValidationError::Field {
                field: "user id",
                value: s,
                reason: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(Self(s))
    }

    /// Returns the sentinel id used for guest-authored prayers.
    pub fn guest() -> Self {
        Self(GUEST_USER_ID.to_string())
    }

    /// Returns true if this is the guest sentinel.
    pub fn is_guest(&self) -> bool {
        self.0 == GUEST_USER_ID
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_sentinel() {
        let guest = UserId::guest();
        assert_eq!(guest.as_str(), "guest");
        assert!(guest.is_guest());
    }

    #[test]
    fn remote_id_is_not_guest() {
        let user = UserId::new("4c6e1a2b-0f1d-4b8e-9c2a-7d5e3f8a9b10").unwrap();
        assert!(!user.is_guest());
    }

    #[test]
    fn empty_user_id_rejected() {
        assert!(UserId::new("").is_err());
    }
}

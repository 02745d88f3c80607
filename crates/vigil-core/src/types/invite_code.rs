//! Organization invite code type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ValidationError};

/// A validated organization invite code.
///
/// Codes are short alphanumeric strings handed out by an organization.
/// They are normalized to uppercase on construction, matching how the
/// service compares them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteCode(String);

impl InviteCode {
    /// Minimum accepted code length.
    pub const MIN_LEN: usize = 3;
    /// Maximum accepted code length.
    pub const MAX_LEN: usize = 6;

    /// Create a new invite code, validating length and character set.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let raw = s.as_ref().trim();

        if raw.len() < Self::MIN_LEN || raw.len() > Self::MAX_LEN {
            return Err(ValidationError::Field {
                field: "invite code",
                value: raw.to_string(),
                reason: format!(
                    "must be {} to {} characters",
                    Self::MIN_LEN,
                    Self::MAX_LEN
                ),
            }
            .into());
        }

        if !raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::Field {
                field: "invite code",
                value: raw.to_string(),
                reason: "must be alphanumeric".to_string(),
            }
            .into());
        }

        Ok(Self(raw.to_ascii_uppercase()))
    }

    /// Returns the normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InviteCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_uppercased() {
        let code = InviteCode::new("ab12c").unwrap();
        assert_eq!(code.as_str(), "AB12C");
    }

    #[test]
    fn code_length_bounds() {
        assert!(InviteCode::new("ab").is_err());
        assert!(InviteCode::new("abcdefg").is_err());
        assert!(InviteCode::new("abc").is_ok());
        assert!(InviteCode::new("abcdef").is_ok());
    }

    #[test]
    fn non_alphanumeric_rejected() {
        assert!(InviteCode::new("ab-1").is_err());
        assert!(InviteCode::new("ab 1").is_err());
    }
}

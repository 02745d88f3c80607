//! Identity mode.

use crate::types::{OrgId, UserId};

/// Which data-access path governs the current session.
///
/// Exactly one mode is active at a time. An authenticated session always
/// supersedes guest status in observable state; the session manager
/// publishes transitions as single atomic updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityMode {
    /// No account and no guest flag.
    Unauthenticated,
    /// Local-only guest session.
    Guest,
    /// Signed-in account, optionally belonging to an organization.
    Authenticated {
        user_id: UserId,
        organization_id: Option<OrgId>,
    },
}

impl IdentityMode {
    /// Stable discriminant string, used in feed cache keys so cached
    /// pages are never reused across modes.
    pub fn discriminant(&self) -> &'static str {
        match self {
            IdentityMode::Unauthenticated => "unauthenticated",
            IdentityMode::Guest => "guest",
            IdentityMode::Authenticated { .. } => "authenticated",
        }
    }

    /// Returns true for the guest mode.
    pub fn is_guest(&self) -> bool {
        matches!(self, IdentityMode::Guest)
    }

    /// Returns true for an authenticated session.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, IdentityMode::Authenticated { .. })
    }

    /// Returns the authenticated user id, if any.
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            IdentityMode::Authenticated { user_id, .. } => Some(user_id),
            _ => None,
        }
    }

    /// Returns the organization of the authenticated session, if any.
    pub fn organization_id(&self) -> Option<&OrgId> {
        match self {
            IdentityMode::Authenticated {
                organization_id, ..
            } => organization_id.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_distinct() {
        let authed = IdentityMode::Authenticated {
            user_id: UserId::new("u-1").unwrap(),
            organization_id: None,
        };
        let mut seen = vec![
            IdentityMode::Unauthenticated.discriminant(),
            IdentityMode::Guest.discriminant(),
            authed.discriminant(),
        ];
        seen.dedup();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn organization_only_for_authenticated() {
        let org = OrgId::new("org-1").unwrap();
        let authed = IdentityMode::Authenticated {
            user_id: UserId::new("u-1").unwrap(),
            organization_id: Some(org.clone()),
        };
        assert_eq!(authed.organization_id(), Some(&org));
        assert_eq!(IdentityMode::Guest.organization_id(), None);
    }
}

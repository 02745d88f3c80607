//! Core identifier types.
//!
//! These types enforce format invariants at construction time so that
//! invalid identifiers never travel through the feed or submission paths.

mod invite_code;
mod org_id;
mod service_url;
mod user_id;

pub use invite_code::InviteCode;
pub use org_id::OrgId;
pub use service_url::ServiceUrl;
pub use user_id::{GUEST_USER_ID, UserId};

//! Request middleware.
//!
//! - [`auth`]: bearer-token extraction and verification
//! - [`role`]: role allow-list enforcement
//!
//! The token check always runs before the role check: `require_roles` builds
//! on the [`auth::AuthUser`] extractor, so a missing header fails with 401 and
//! a bad token with 403 before any role lookup happens.

pub mod auth;
pub mod role;

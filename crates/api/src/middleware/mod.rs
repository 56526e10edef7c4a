//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the user behind a JWT Bearer token.
//! - [`rbac::RequireEditor`] -- any signed-in editor (superusers included).
//! - [`rbac::RequireSuperuser`] -- superusers only.

pub mod auth;
pub mod rbac;

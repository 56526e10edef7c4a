//! Well-known role name constants.
//!
//! The role is derived from `users.is_superuser` at login and embedded in the
//! JWT `role` claim.

/// Privileged editor: saves are approved immediately.
pub const ROLE_SUPERUSER: &str = "superuser";

/// Unprivileged editor: saves wait for a superuser's approval.
pub const ROLE_EDITOR: &str = "editor";

/// Map the stored capability flag to its role name.
pub fn role_for(is_superuser: bool) -> &'static str {
    if is_superuser {
        ROLE_SUPERUSER
    } else {
        ROLE_EDITOR
    }
}

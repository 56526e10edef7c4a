//! Role-based access control extractors.
//!
//! Each wraps [`AuthUser`] and rejects requests whose role is insufficient,
//! so authorization is enforced by handler signatures. Both also reload the
//! account so a deactivated user loses access before their token expires.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracker_core::error::CoreError;
use tracker_core::roles::{ROLE_EDITOR, ROLE_SUPERUSER};
use tracker_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject tokens whose account was deleted (401) or deactivated (403).
async fn ensure_active(state: &AppState, user: &AuthUser) -> Result<(), AppError> {
    match UserRepo::is_active(&state.pool, user.user_id).await? {
        Some(true) => Ok(()),
        Some(false) => Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        ))),
        None => Err(AppError::Core(CoreError::Unauthorized(
            "User no longer exists".into(),
        ))),
    }
}

/// Requires the `superuser` role. Rejects with 403 otherwise.
pub struct RequireSuperuser(pub AuthUser);

impl FromRequestParts<AppState> for RequireSuperuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_superuser() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Superuser role required".into(),
            )));
        }
        ensure_active(state, &user).await?;
        Ok(RequireSuperuser(user))
    }
}

/// Requires an editor or superuser. Rejects tokens carrying any other role.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_EDITOR && user.role != ROLE_SUPERUSER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Editor role required".into(),
            )));
        }
        ensure_active(state, &user).await?;
        Ok(RequireEditor(user))
    }
}

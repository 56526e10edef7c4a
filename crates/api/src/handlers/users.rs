//! Handlers for `/admin/users` (editor account management).
//!
//! All handlers require the superuser role via [`RequireSuperuser`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_db::models::user::{CreateUser, UserResponse};
use tracker_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireSuperuser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// New accounts are plain editors unless stated otherwise.
    #[serde(default)]
    pub is_superuser: bool,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("User", id))
}

fn hashed(password: &str) -> AppResult<String> {
    validate_password_strength(password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: users.iter().map(UserResponse::from).collect(),
    }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireSuperuser(_admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| not_found(user_id))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// POST /api/v1/admin/users
///
/// Create an account. The password is strength-checked and stored as an
/// Argon2id hash; a taken username is a 409.
pub async fn create_user(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    input.validate()?;
    let username = input.username.trim();
    if username.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Username must not be blank".into(),
        )));
    }
    let password_hash = hashed(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            email: input.email,
            password_hash,
            is_superuser: input.is_superuser,
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        role = user.role(),
        created_by = admin.user_id,
        "User created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserResponse::from(&user),
        }),
    ))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Soft-deactivate an account. Its existing tokens stop working at once.
pub async fn deactivate_user(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if user_id == admin.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot deactivate your own account".into(),
        )));
    }
    if !UserRepo::deactivate(&state.pool, user_id).await? {
        return Err(not_found(user_id));
    }

    tracing::info!(user_id, deactivated_by = admin.user_id, "User deactivated");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
pub async fn reset_password(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let password_hash = hashed(&input.new_password)?;
    if !UserRepo::update_password(&state.pool, user_id, &password_hash).await? {
        return Err(not_found(user_id));
    }

    tracing::info!(user_id, reset_by = admin.user_id, "Password reset");

    Ok(StatusCode::NO_CONTENT)
}

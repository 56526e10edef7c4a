//! Create the first superuser from the environment on startup.
//!
//! | Env Var               | Required | Notes                               |
//! |-----------------------|----------|-------------------------------------|
//! | `BOOTSTRAP_USERNAME`  | no       | Nothing happens when unset          |
//! | `BOOTSTRAP_PASSWORD`  | with it  | At least 12 characters              |
//! | `BOOTSTRAP_EMAIL`     | no       | Defaults to an empty address        |
//!
//! An existing account with the same username is left untouched.

use tracker_db::models::user::CreateUser;
use tracker_db::repositories::UserRepo;
use tracker_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength};

/// Settings for the bootstrap account.
#[derive(Debug, Clone)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl BootstrapUser {
    /// Returns `None` when `BOOTSTRAP_USERNAME` is not set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_USERNAME")
            .ok()
            .filter(|u| !u.trim().is_empty())?;
        Some(Self {
            username,
            password: std::env::var("BOOTSTRAP_PASSWORD").unwrap_or_default(),
            email: std::env::var("BOOTSTRAP_EMAIL").unwrap_or_default(),
        })
    }
}

/// Outcome of [`ensure_superuser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("{0}")]
    WeakPassword(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create `user` as an active superuser unless the username is taken.
pub async fn ensure_superuser(
    pool: &DbPool,
    user: &BootstrapUser,
) -> Result<BootstrapOutcome, BootstrapError> {
    if UserRepo::find_by_username(pool, &user.username).await?.is_some() {
        return Ok(BootstrapOutcome::AlreadyExists);
    }
    validate_password_strength(&user.password).map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&user.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let created = UserRepo::create(
        pool,
        &CreateUser {
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash,
            is_superuser: true,
        },
    )
    .await?;
    tracing::info!(user_id = created.id, username = %created.username, "Bootstrap superuser created");
    Ok(BootstrapOutcome::Created)
}

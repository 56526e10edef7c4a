//! Strategic theme entity and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `themes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Theme {
    pub id: DbId,
    pub title: String,
    pub title_ga: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a theme.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTheme {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub title_ga: Option<String>,
}

/// DTO for updating a theme. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTheme {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub title_ga: Option<String>,
}

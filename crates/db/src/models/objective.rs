//! Objective entity and DTOs. Objectives belong to exactly one theme.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `objectives` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Objective {
    pub id: DbId,
    pub theme_id: DbId,
    pub title: String,
    pub title_ga: Option<String>,
    pub description: String,
    pub description_ga: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an objective.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateObjective {
    pub theme_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub title_ga: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_ga: Option<String>,
}

/// DTO for updating an objective. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateObjective {
    pub theme_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub title_ga: Option<String>,
    pub description: Option<String>,
    pub description_ga: Option<String>,
}

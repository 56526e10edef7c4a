//! Repository for the `objectives` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::objective::{CreateObjective, Objective, UpdateObjective};

const COLUMNS: &str = "id, theme_id, title, title_ga, description, description_ga, \
                        created_at, updated_at";

/// Provides CRUD operations for objectives.
pub struct ObjectiveRepo;

impl ObjectiveRepo {
    /// Insert a new objective, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateObjective) -> Result<Objective, sqlx::Error> {
        let query = format!(
            "INSERT INTO objectives (theme_id, title, title_ga, description, description_ga)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(input.theme_id)
            .bind(&input.title)
            .bind(&input.title_ga)
            .bind(&input.description)
            .bind(&input.description_ga)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objectives WHERE id = $1");
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List objectives ordered by title, optionally restricted to one theme.
    pub async fn list(
        pool: &PgPool,
        theme_id: Option<DbId>,
    ) -> Result<Vec<Objective>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objectives
             WHERE ($1::BIGINT IS NULL OR theme_id = $1)
             ORDER BY title"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(theme_id)
            .fetch_all(pool)
            .await
    }

    /// Update an objective. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateObjective,
    ) -> Result<Option<Objective>, sqlx::Error> {
        let query = format!(
            "UPDATE objectives SET
                theme_id = COALESCE($2, theme_id),
                title = COALESCE($3, title),
                title_ga = COALESCE($4, title_ga),
                description = COALESCE($5, description),
                description_ga = COALESCE($6, description_ga)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Objective>(&query)
            .bind(id)
            .bind(input.theme_id)
            .bind(&input.title)
            .bind(&input.title_ga)
            .bind(&input.description)
            .bind(&input.description_ga)
            .fetch_optional(pool)
            .await
    }

    /// Delete an objective and (via cascade) its actions.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM objectives WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

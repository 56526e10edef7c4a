//! Repository for the `themes` table.

use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::theme::{CreateTheme, Theme, UpdateTheme};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, title_ga, created_at, updated_at";

/// Provides CRUD operations for themes.
pub struct ThemeRepo;

impl ThemeRepo {
    /// Insert a new theme, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTheme) -> Result<Theme, sqlx::Error> {
        let query = format!(
            "INSERT INTO themes (title, title_ga)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theme>(&query)
            .bind(&input.title)
            .bind(&input.title_ga)
            .fetch_one(pool)
            .await
    }

    /// Find a theme by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Theme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM themes WHERE id = $1");
        sqlx::query_as::<_, Theme>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all themes ordered by title.
    pub async fn list(pool: &PgPool) -> Result<Vec<Theme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM themes ORDER BY title");
        sqlx::query_as::<_, Theme>(&query).fetch_all(pool).await
    }

    /// Update a theme. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTheme,
    ) -> Result<Option<Theme>, sqlx::Error> {
        let query = format!(
            "UPDATE themes SET
                title = COALESCE($2, title),
                title_ga = COALESCE($3, title_ga)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theme>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.title_ga)
            .fetch_optional(pool)
            .await
    }

    /// Delete a theme. Objectives and their actions cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM themes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

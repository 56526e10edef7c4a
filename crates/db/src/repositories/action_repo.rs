//! Repository for the `actions` table.
//!
//! Writes take an [`ActionWrite`] produced after the workflow transition has
//! run, so every stored status/approval combination went through
//! `tracker_core::workflow::apply_edit`.

use sqlx::PgPool;
use tracker_core::action_status::{ActionStatus, StatusId};
use tracker_core::types::DbId;

use crate::models::action::{
    Action, ActionFilter, ActionWithObjective, ActionWrite, RoadmapCandidate,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, objective_id, title, small_description, small_description_ga, \
                        description, description_ga, update_text, update_text_ga, status_id, \
                        is_approved, is_ga_approved, progress_started_at, created_by, \
                        updated_by, created_at, updated_at";

/// [`COLUMNS`] qualified with the `a` alias, for queries joining `objectives o`.
const JOINED_COLUMNS: &str = "a.id, a.objective_id, a.title, a.small_description, \
                               a.small_description_ga, a.description, a.description_ga, \
                               a.update_text, a.update_text_ga, a.status_id, a.is_approved, \
                               a.is_ga_approved, a.progress_started_at, a.created_by, \
                               a.updated_by, a.created_at, a.updated_at";

/// Provides data access for actions.
pub struct ActionRepo;

impl ActionRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a new action, returning the created row.
    pub async fn create(pool: &PgPool, input: &ActionWrite<'_>) -> Result<Action, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions (objective_id, title, small_description, small_description_ga,
                                  description, description_ga, update_text, update_text_ga,
                                  status_id, is_approved, is_ga_approved, progress_started_at,
                                  created_by, updated_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(input.objective_id)
            .bind(input.title)
            .bind(&input.content.small_description)
            .bind(&input.content.small_description_ga)
            .bind(&input.content.description)
            .bind(&input.content.description_ga)
            .bind(&input.content.update)
            .bind(&input.content.update_ga)
            .bind(input.state.status.id())
            .bind(input.state.is_approved)
            .bind(input.state.is_ga_approved)
            .bind(input.state.progress_started_at)
            .bind(input.state.created_by)
            .bind(input.state.updated_by)
            .fetch_one(pool)
            .await
    }

    /// Overwrite every mutable column of an action. `created_by` and
    /// `created_at` are never touched; `updated_at` is refreshed by trigger.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save(
        pool: &PgPool,
        id: DbId,
        input: &ActionWrite<'_>,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET
                objective_id = $2,
                title = $3,
                small_description = $4,
                small_description_ga = $5,
                description = $6,
                description_ga = $7,
                update_text = $8,
                update_text_ga = $9,
                status_id = $10,
                is_approved = $11,
                is_ga_approved = $12,
                progress_started_at = $13,
                updated_by = $14
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(input.objective_id)
            .bind(input.title)
            .bind(&input.content.small_description)
            .bind(&input.content.small_description_ga)
            .bind(&input.content.description)
            .bind(&input.content.description_ga)
            .bind(&input.content.update)
            .bind(&input.content.update_ga)
            .bind(input.state.status.id())
            .bind(input.state.is_approved)
            .bind(input.state.is_ga_approved)
            .bind(input.state.progress_started_at)
            .bind(input.state.updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete an action by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Admin reads
    // -----------------------------------------------------------------------

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actions WHERE id = $1");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List actions ordered by ID, narrowed by `filter`.
    pub async fn list(pool: &PgPool, filter: &ActionFilter) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions
             WHERE (NOT $1 OR is_approved)
               AND ($2::BIGINT IS NULL OR objective_id = $2)
               AND ($3::SMALLINT IS NULL OR status_id = $3)
               AND ($4::BOOLEAN IS NULL OR is_approved = $4)
               AND ($5::BIGINT IS NULL OR updated_by = $5)
               AND ($6::TEXT IS NULL
                    OR title ILIKE $6
                    OR small_description ILIKE $6
                    OR description ILIKE $6
                    OR update_text ILIKE $6)
             ORDER BY id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(filter.approved_only)
            .bind(filter.objective_id)
            .bind(filter.status.map(ActionStatus::id))
            .bind(filter.is_approved)
            .bind(filter.updated_by)
            .bind(filter.search_pattern())
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Public listing
    // -----------------------------------------------------------------------

    /// Count actions in `status`, optionally under one theme.
    pub async fn count_by_status(
        pool: &PgPool,
        status: ActionStatus,
        theme_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM actions a
             JOIN objectives o ON o.id = a.objective_id
             WHERE a.status_id = $1
               AND ($2::BIGINT IS NULL OR o.theme_id = $2)",
        )
        .bind(status.id())
        .bind(theme_id)
        .fetch_one(pool)
        .await
    }

    /// One page of actions in `status` (ascending ID) with objective titles.
    pub async fn list_by_status_page(
        pool: &PgPool,
        status: ActionStatus,
        theme_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActionWithObjective>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS},
                    o.title AS objective_title, o.title_ga AS objective_title_ga
             FROM actions a
             JOIN objectives o ON o.id = a.objective_id
             WHERE a.status_id = $1
               AND ($2::BIGINT IS NULL OR o.theme_id = $2)
             ORDER BY a.id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ActionWithObjective>(&query)
            .bind(status.id())
            .bind(theme_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Theme details
    // -----------------------------------------------------------------------

    /// Approved actions under a theme, ordered by ID.
    pub async fn list_approved_for_theme(
        pool: &PgPool,
        theme_id: DbId,
    ) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM actions a
             JOIN objectives o ON o.id = a.objective_id
             WHERE o.theme_id = $1 AND a.is_approved
             ORDER BY a.id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(theme_id)
            .fetch_all(pool)
            .await
    }

    /// `(status_id, count)` over approved actions under a theme.
    pub async fn approved_status_counts_for_theme(
        pool: &PgPool,
        theme_id: DbId,
    ) -> Result<Vec<(StatusId, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (StatusId, i64)>(
            "SELECT a.status_id, COUNT(*)
             FROM actions a
             JOIN objectives o ON o.id = a.objective_id
             WHERE o.theme_id = $1 AND a.is_approved
             GROUP BY a.status_id",
        )
        .bind(theme_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Roadmap
    // -----------------------------------------------------------------------

    /// Approved actions that can appear on the `year` chart: progress started
    /// in the year, or last updated (UTC) in the year.
    pub async fn roadmap_candidates(
        pool: &PgPool,
        year: i32,
    ) -> Result<Vec<RoadmapCandidate>, sqlx::Error> {
        sqlx::query_as::<_, RoadmapCandidate>(
            "SELECT status_id, is_approved, progress_started_at, updated_at
             FROM actions
             WHERE is_approved
               AND (
                    (progress_started_at >= make_date($1, 1, 1)
                     AND progress_started_at < make_date($1 + 1, 1, 1))
                 OR (updated_at >= make_timestamptz($1, 1, 1, 0, 0, 0, 'UTC')
                     AND updated_at < make_timestamptz($1 + 1, 1, 1, 0, 0, 0, 'UTC'))
               )",
        )
        .bind(year)
        .fetch_all(pool)
        .await
    }
}

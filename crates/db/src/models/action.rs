//! Action entity, read projections and DTOs.
//!
//! Progress text is stored in `update_text` / `update_text_ga` (`update` is a
//! reserved word in SQL) and exposed as `update` / `update_ga` in JSON.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::action_status::{ActionStatus, StatusId};
use tracker_core::roadmap::RoadmapAction;
use tracker_core::types::{Date, DbId, Timestamp};
use tracker_core::workflow::{ActionContent, ActionSnapshot, ActionState};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Action {
    pub id: DbId,
    pub objective_id: DbId,
    pub title: String,
    pub small_description: String,
    pub small_description_ga: Option<String>,
    pub description: String,
    pub description_ga: Option<String>,
    #[serde(rename = "update")]
    pub update_text: String,
    #[serde(rename = "update_ga")]
    pub update_text_ga: Option<String>,
    pub status_id: StatusId,
    pub is_approved: bool,
    pub is_ga_approved: bool,
    pub progress_started_at: Option<Date>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Action {
    /// Lifecycle status. Unknown IDs (not possible under the FK) read as
    /// NOT_STARTED.
    pub fn status(&self) -> ActionStatus {
        ActionStatus::from_id(self.status_id).unwrap_or_default()
    }

    pub fn content(&self) -> ActionContent {
        ActionContent {
            small_description: self.small_description.clone(),
            small_description_ga: self.small_description_ga.clone(),
            description: self.description.clone(),
            description_ga: self.description_ga.clone(),
            update: self.update_text.clone(),
            update_ga: self.update_text_ga.clone(),
        }
    }

    /// Workflow view of the stored row, the input to `apply_edit`.
    pub fn snapshot(&self) -> ActionSnapshot {
        ActionSnapshot {
            state: ActionState {
                status: self.status(),
                is_approved: self.is_approved,
                is_ga_approved: self.is_ga_approved,
                progress_started_at: self.progress_started_at,
                created_by: self.created_by,
                updated_by: self.updated_by,
            },
            content: self.content(),
        }
    }
}

/// An Action joined with the titles of its objective, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct ActionWithObjective {
    #[sqlx(flatten)]
    pub action: Action,
    pub objective_title: String,
    pub objective_title_ga: Option<String>,
}

/// The columns the roadmap aggregation needs.
#[derive(Debug, Clone, FromRow)]
pub struct RoadmapCandidate {
    pub status_id: StatusId,
    pub is_approved: bool,
    pub progress_started_at: Option<Date>,
    pub updated_at: Timestamp,
}

impl From<RoadmapCandidate> for RoadmapAction {
    fn from(row: RoadmapCandidate) -> Self {
        RoadmapAction {
            status: ActionStatus::from_id(row.status_id).unwrap_or_default(),
            is_approved: row.is_approved,
            progress_started_at: row.progress_started_at,
            updated_at: row.updated_at,
        }
    }
}

/// Admin listing filters. Every `Some` narrows the result.
#[derive(Debug, Clone, Default)]
pub struct ActionFilter {
    /// Hide unapproved rows regardless of `is_approved`.
    pub approved_only: bool,
    pub objective_id: Option<DbId>,
    pub status: Option<ActionStatus>,
    pub is_approved: Option<bool>,
    pub updated_by: Option<DbId>,
    /// Case-insensitive substring over title, summary, description and
    /// progress text.
    pub search: Option<String>,
}

impl ActionFilter {
    /// `search` as an `ILIKE` pattern with wildcards in the input escaped.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        Some(pattern)
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating an Action.
///
/// `status` is a token (`not_started`, `in_progress`, `completed`) validated
/// by the handler so that unknown values surface as a validation error.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAction {
    pub objective_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub small_description: String,
    pub small_description_ga: Option<String>,
    #[serde(default)]
    pub description: String,
    pub description_ga: Option<String>,
    #[serde(default)]
    pub update: String,
    pub update_ga: Option<String>,
    pub status: Option<String>,
    pub is_ga_approved: Option<bool>,
}

/// DTO for editing an Action. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAction {
    pub objective_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub small_description: Option<String>,
    pub small_description_ga: Option<String>,
    pub description: Option<String>,
    pub description_ga: Option<String>,
    pub update: Option<String>,
    pub update_ga: Option<String>,
    pub status: Option<String>,
    pub is_ga_approved: Option<bool>,
}

impl UpdateAction {
    /// Overlay the submitted text fields on the stored content.
    pub fn merge_content(&self, stored: &ActionContent) -> ActionContent {
        fn pick(new: &Option<String>, old: &str) -> String {
            new.clone().unwrap_or_else(|| old.to_string())
        }
        fn pick_opt(new: &Option<String>, old: &Option<String>) -> Option<String> {
            new.clone().or_else(|| old.clone())
        }
        ActionContent {
            small_description: pick(&self.small_description, &stored.small_description),
            small_description_ga: pick_opt(&self.small_description_ga, &stored.small_description_ga),
            description: pick(&self.description, &stored.description),
            description_ga: pick_opt(&self.description_ga, &stored.description_ga),
            update: pick(&self.update, &stored.update),
            update_ga: pick_opt(&self.update_ga, &stored.update_ga),
        }
    }
}

/// Fully resolved row values to write after the workflow has run.
#[derive(Debug, Clone)]
pub struct ActionWrite<'a> {
    pub objective_id: DbId,
    pub title: &'a str,
    pub content: &'a ActionContent,
    pub state: &'a ActionState,
}

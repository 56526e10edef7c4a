//! Public status-filtered action listing.
//!
//! Serves the dashboard's "Completed / In Progress / Not Started" lists.
//! There is no approval filter on the rows themselves; progress text is
//! blanked by the bilingual resolver when the Action is not approved.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use tracker_core::action_status::ActionStatus;
use tracker_core::language::{resolve_update, BilingualText, Language};
use tracker_core::pagination::{parse_page_param, Page, DEFAULT_PAGE_SIZE};
use tracker_core::types::DbId;
use tracker_db::models::action::ActionWithObjective;
use tracker_db::repositories::ActionRepo;

use crate::error::AppResult;
use crate::query::ActionListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One Action with every text field resolved for the requested language.
#[derive(Debug, Serialize)]
pub struct ActionListItem {
    pub id: DbId,
    pub title: String,
    pub small_description: String,
    pub description: String,
    /// Localized status label.
    pub status: &'static str,
    pub objective_title: String,
    /// Empty string when the progress text is not approved.
    pub update: String,
}

impl ActionListItem {
    fn resolve(row: &ActionWithObjective, language: Language) -> Self {
        let a = &row.action;
        Self {
            id: a.id,
            title: a.title.clone(),
            small_description: BilingualText::new(
                &a.small_description,
                a.small_description_ga.as_deref(),
            )
            .resolve(language)
            .to_string(),
            description: BilingualText::new(&a.description, a.description_ga.as_deref())
                .resolve(language)
                .to_string(),
            status: a.status().label(language),
            objective_title: BilingualText::new(
                &row.objective_title,
                row.objective_title_ga.as_deref(),
            )
            .resolve(language)
            .to_string(),
            update: resolve_update(
                &a.update_text,
                a.update_text_ga.as_deref(),
                language,
                a.is_approved,
                a.is_ga_approved,
            )
            .to_string(),
        }
    }
}

/// A page of Actions in one status.
#[derive(Debug, Serialize)]
pub struct ActionListResponse {
    /// Localized list heading; empty for an unknown status.
    pub status_title: String,
    pub actions: Vec<ActionListItem>,
    pub count: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl ActionListResponse {
    fn empty() -> Self {
        let page = Page::resolve(1, 0, DEFAULT_PAGE_SIZE);
        Self {
            status_title: String::new(),
            actions: Vec::new(),
            count: 0,
            current_page: page.number,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            has_previous: page.has_previous(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/actions?status=&theme_id=&page=&lang=
pub async fn list_actions(
    State(state): State<AppState>,
    Query(params): Query<ActionListParams>,
) -> AppResult<Json<ActionListResponse>> {
    let token = params.status.clone().unwrap_or_default();
    list_in_status(&state, &token, &params).await.map(Json)
}

/// GET /api/v1/actions/filter/{status}?theme_id=&page=&lang=
pub async fn list_actions_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
    Query(params): Query<ActionListParams>,
) -> AppResult<Json<ActionListResponse>> {
    list_in_status(&state, &status, &params).await.map(Json)
}

async fn list_in_status(
    state: &AppState,
    token: &str,
    params: &ActionListParams,
) -> AppResult<ActionListResponse> {
    let language = params.language();
    let theme_id = params.theme_id()?;

    let Some(status) = ActionStatus::parse_token(token) else {
        tracing::debug!(status = token, "Unknown listing status, returning empty page");
        return Ok(ActionListResponse::empty());
    };

    let count = ActionRepo::count_by_status(&state.pool, status, theme_id).await?;
    let page = Page::resolve(
        parse_page_param(params.page.as_deref()),
        count,
        DEFAULT_PAGE_SIZE,
    );
    let rows = ActionRepo::list_by_status_page(
        &state.pool,
        status,
        theme_id,
        page.limit(),
        page.offset(),
    )
    .await?;

    Ok(ActionListResponse {
        status_title: status.list_title(language).to_string(),
        actions: rows
            .iter()
            .map(|row| ActionListItem::resolve(row, language))
            .collect(),
        count: page.count,
        current_page: page.number,
        total_pages: page.total_pages,
        has_next: page.has_next(),
        has_previous: page.has_previous(),
    })
}

//! Public roadmap chart data.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use tracker_core::roadmap::{build_roadmap, resolve_chart_year, RoadmapAction, RoadmapPayload};
use tracker_db::repositories::ActionRepo;

use crate::error::AppResult;
use crate::query::RoadmapParams;
use crate::state::AppState;

/// GET /api/v1/roadmap?year=
///
/// An invalid or out-of-range year silently falls back to the default year.
pub async fn get_roadmap(
    State(state): State<AppState>,
    Query(params): Query<RoadmapParams>,
) -> AppResult<Json<RoadmapPayload>> {
    let today = Utc::now().date_naive();
    let year = resolve_chart_year(params.year.as_deref(), today);

    let actions: Vec<RoadmapAction> = ActionRepo::roadmap_candidates(&state.pool, year)
        .await?
        .into_iter()
        .map(RoadmapAction::from)
        .collect();

    Ok(Json(build_roadmap(&actions, year, today)))
}

//! Unauthenticated dashboard routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{actions, roadmap, themes};
use crate::state::AppState;

/// ```text
/// GET /actions                   -> list_actions
/// GET /actions/filter/{status}   -> list_actions_by_status
/// GET /themes/{id}/details       -> theme_details
/// GET /roadmap                   -> get_roadmap
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/actions", get(actions::list_actions))
        .route(
            "/actions/filter/{status}",
            get(actions::list_actions_by_status),
        )
        .route("/themes/{id}/details", get(themes::theme_details))
        .route("/roadmap", get(roadmap::get_roadmap))
}

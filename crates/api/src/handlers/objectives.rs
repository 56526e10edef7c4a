//! Editorial CRUD for objectives.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_db::models::objective::{CreateObjective, UpdateObjective};
use tracker_db::repositories::ObjectiveRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireEditor, RequireSuperuser};
use crate::query::ObjectiveFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Objective", id))
}

/// GET /api/v1/admin/objectives?theme_id=
pub async fn list_objectives(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<ObjectiveFilterParams>,
) -> AppResult<impl IntoResponse> {
    let objectives = ObjectiveRepo::list(&state.pool, params.theme_id).await?;
    Ok(Json(DataResponse { data: objectives }))
}

/// GET /api/v1/admin/objectives/{id}
pub async fn get_objective(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(objective_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let objective = ObjectiveRepo::find_by_id(&state.pool, objective_id)
        .await?
        .ok_or_else(|| not_found(objective_id))?;
    Ok(Json(DataResponse { data: objective }))
}

/// POST /api/v1/admin/objectives
pub async fn create_objective(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Json(input): Json<CreateObjective>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let objective = ObjectiveRepo::create(&state.pool, &input).await?;

    tracing::info!(
        objective_id = objective.id,
        theme_id = objective.theme_id,
        user_id = admin.user_id,
        "Objective created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: objective })))
}

/// PUT /api/v1/admin/objectives/{id}
pub async fn update_objective(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(objective_id): Path<DbId>,
    Json(input): Json<UpdateObjective>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let objective = ObjectiveRepo::update(&state.pool, objective_id, &input)
        .await?
        .ok_or_else(|| not_found(objective_id))?;

    tracing::info!(objective_id, user_id = admin.user_id, "Objective updated");

    Ok(Json(DataResponse { data: objective }))
}

/// DELETE /api/v1/admin/objectives/{id}
pub async fn delete_objective(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(objective_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ObjectiveRepo::delete(&state.pool, objective_id).await? {
        return Err(not_found(objective_id));
    }

    tracing::info!(objective_id, user_id = admin.user_id, "Objective deleted");

    Ok(StatusCode::NO_CONTENT)
}

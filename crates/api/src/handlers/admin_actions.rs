//! Editorial endpoints for Actions.
//!
//! Every write runs through [`apply_edit`] before it reaches the database,
//! so status derivation and the approval rules hold for all edits. Editors
//! without the superuser role only ever see approved Actions here and may
//! only change the progress text.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use tracker_core::action_status::ActionStatus;
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_core::workflow::{apply_edit, ActionContent, SubmittedEdit};
use tracker_db::models::action::{
    Action, ActionFilter, ActionWrite, CreateAction, UpdateAction,
};
use tracker_db::repositories::{ActionRepo, UserRepo};
use tracker_events::{TrackerEvent, UpdateSubmitted};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireEditor, RequireSuperuser};
use crate::query::ActionFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Action", id))
}

/// Parse an optional status token, falling back to `default` when absent.
fn parse_status(token: Option<&str>, default: ActionStatus) -> Result<ActionStatus, CoreError> {
    match token {
        None => Ok(default),
        Some(t) => ActionStatus::parse_token(t).ok_or_else(|| CoreError::unknown_status(t)),
    }
}

/// Username shown in the approval email. The Action is already saved when
/// this runs, so a failed lookup falls back to the user id.
async fn editor_display_name(state: &AppState, user_id: DbId) -> String {
    match UserRepo::find_by_id(&state.pool, user_id).await {
        Ok(Some(user)) => user.username,
        Ok(None) => format!("user {user_id}"),
        Err(e) => {
            tracing::warn!(user_id, error = %e, "Failed to load editor for approval notice");
            format!("user {user_id}")
        }
    }
}

/// Load an Action the user is allowed to see. Unapproved Actions are hidden
/// from editors without the superuser role.
async fn find_visible(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Action> {
    let action = ActionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if !user.is_superuser() && !action.is_approved {
        return Err(not_found(id));
    }
    Ok(action)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/actions?objective_id=&status=&is_approved=&updated_by=&search=
pub async fn list_actions(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Query(params): Query<ActionFilterParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ActionFilter {
        approved_only: !user.is_superuser(),
        objective_id: params.objective_id,
        status: params.status()?,
        is_approved: params.is_approved,
        updated_by: params.updated_by,
        search: params.search,
    };
    let actions = ActionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: actions }))
}

/// GET /api/v1/admin/actions/{id}
pub async fn get_action(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let action = find_visible(&state, &user, action_id).await?;
    Ok(Json(DataResponse { data: action }))
}

/// POST /api/v1/admin/actions
pub async fn create_action(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Json(input): Json<CreateAction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let status = parse_status(input.status.as_deref(), ActionStatus::NotStarted)?;

    let editor = admin.editor();
    let edit = SubmittedEdit {
        status,
        content: ActionContent {
            small_description: input.small_description.clone(),
            small_description_ga: input.small_description_ga.clone(),
            description: input.description.clone(),
            description_ga: input.description_ga.clone(),
            update: input.update.clone(),
            update_ga: input.update_ga.clone(),
        },
        is_ga_approved: input.is_ga_approved,
    }
    .editable_by(&editor, None);
    let outcome = apply_edit(None, &editor, &edit, Utc::now().date_naive());

    let action = ActionRepo::create(
        &state.pool,
        &ActionWrite {
            objective_id: input.objective_id,
            title: &input.title,
            content: &outcome.content,
            state: &outcome.state,
        },
    )
    .await?;

    tracing::info!(
        action_id = action.id,
        objective_id = action.objective_id,
        status = action.status().token(),
        user_id = admin.user_id,
        "Action created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

/// PUT /api/v1/admin/actions/{id}
///
/// Superusers may change any field and their save approves the Action.
/// Other editors may only change `update` / `update_ga`; a change to either
/// publishes `action.update_submitted` for the approval notifier.
pub async fn update_action(
    RequireEditor(user): RequireEditor,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
    Json(input): Json<UpdateAction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let current = find_visible(&state, &user, action_id).await?;
    let snapshot = current.snapshot();
    let status = parse_status(input.status.as_deref(), snapshot.state.status)?;

    let editor = user.editor();
    let edit = SubmittedEdit {
        status,
        content: input.merge_content(&snapshot.content),
        is_ga_approved: input.is_ga_approved,
    }
    .editable_by(&editor, Some(&snapshot));
    let outcome = apply_edit(Some(&snapshot), &editor, &edit, Utc::now().date_naive());

    let (objective_id, title) = if editor.is_privileged {
        (
            input.objective_id.unwrap_or(current.objective_id),
            input.title.as_deref().unwrap_or(&current.title),
        )
    } else {
        (current.objective_id, current.title.as_str())
    };

    let saved = ActionRepo::save(
        &state.pool,
        action_id,
        &ActionWrite {
            objective_id,
            title,
            content: &outcome.content,
            state: &outcome.state,
        },
    )
    .await?
    .ok_or_else(|| not_found(action_id))?;

    tracing::info!(
        action_id,
        editor_id = user.user_id,
        status = saved.status().token(),
        is_approved = saved.is_approved,
        is_ga_approved = saved.is_ga_approved,
        "Action updated",
    );

    if let Some(notice) = outcome.notice {
        let editor_username = editor_display_name(&state, user.user_id).await;
        let languages: Vec<&str> = notice.languages.iter().map(|l| l.code()).collect();
        tracing::info!(
            action_id,
            editor_id = user.user_id,
            languages = ?languages,
            "Progress update submitted for approval",
        );
        state.event_bus.publish(TrackerEvent::update_submitted(
            user.user_id,
            &UpdateSubmitted {
                action_id,
                action_title: saved.title.clone(),
                editor_username,
                languages: notice.languages,
            },
        ));
    }

    Ok(Json(DataResponse { data: saved }))
}

/// DELETE /api/v1/admin/actions/{id}
pub async fn delete_action(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(action_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ActionRepo::delete(&state.pool, action_id).await? {
        return Err(not_found(action_id));
    }

    tracing::info!(action_id, user_id = admin.user_id, "Action deleted");

    Ok(StatusCode::NO_CONTENT)
}

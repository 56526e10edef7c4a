//! Handlers for strategic themes: the public details modal and the
//! editorial CRUD endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracker_core::action_status::StatusCounts;
use tracker_core::error::CoreError;
use tracker_core::language::{resolve_update, BilingualText};
use tracker_core::types::DbId;
use tracker_db::models::theme::{CreateTheme, UpdateTheme};
use tracker_db::repositories::{ActionRepo, ObjectiveRepo, ThemeRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireEditor, RequireSuperuser};
use crate::query::LangParams;
use crate::render::{theme_details_fragment, theme_not_found, ActionView, ObjectiveView};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public theme details
// ---------------------------------------------------------------------------

/// Body of `GET /themes/{id}/details`.
#[derive(Debug, Serialize)]
pub struct ThemeDetailsResponse {
    pub html_content: String,
    pub title: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub not_found: bool,
}

/// GET /api/v1/themes/{id}/details?lang=
///
/// Counters and objective listing for one theme, over approved Actions only.
/// An unknown theme is a 404 carrying a displayable message, not an error
/// envelope.
pub async fn theme_details(
    State(state): State<AppState>,
    Path(theme_id): Path<DbId>,
    Query(params): Query<LangParams>,
) -> AppResult<Response> {
    let language = params.language();

    let Some(theme) = ThemeRepo::find_by_id(&state.pool, theme_id).await? else {
        let (html_content, title) = theme_not_found(language);
        let body = ThemeDetailsResponse {
            html_content,
            title: title.to_string(),
            not_found: true,
        };
        return Ok((StatusCode::NOT_FOUND, Json(body)).into_response());
    };

    let objectives = ObjectiveRepo::list(&state.pool, Some(theme.id)).await?;
    let actions = ActionRepo::list_approved_for_theme(&state.pool, theme.id).await?;
    let counts = StatusCounts::from_rows(
        &ActionRepo::approved_status_counts_for_theme(&state.pool, theme.id).await?,
    );

    let views: Vec<ObjectiveView<'_>> = objectives
        .iter()
        .map(|objective| ObjectiveView {
            title: BilingualText::new(&objective.title, objective.title_ga.as_deref())
                .resolve(language),
            actions: actions
                .iter()
                .filter(|a| a.objective_id == objective.id)
                .map(|a| ActionView {
                    title: &a.title,
                    status: a.status(),
                    small_description: BilingualText::new(
                        &a.small_description,
                        a.small_description_ga.as_deref(),
                    )
                    .resolve(language),
                    update: resolve_update(
                        &a.update_text,
                        a.update_text_ga.as_deref(),
                        language,
                        a.is_approved,
                        a.is_ga_approved,
                    ),
                })
                .collect(),
        })
        .collect();

    let body = ThemeDetailsResponse {
        html_content: theme_details_fragment(&counts, &views, language),
        title: BilingualText::new(&theme.title, theme.title_ga.as_deref())
            .resolve(language)
            .to_string(),
        not_found: false,
    };
    Ok(Json(body).into_response())
}

// ---------------------------------------------------------------------------
// Editorial CRUD
// ---------------------------------------------------------------------------

fn theme_not_found_error(id: DbId) -> AppError {
    AppError::Core(CoreError::not_found("Theme", id))
}

/// GET /api/v1/admin/themes
pub async fn list_themes(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let themes = ThemeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: themes }))
}

/// GET /api/v1/admin/themes/{id}
pub async fn get_theme(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(theme_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let theme = ThemeRepo::find_by_id(&state.pool, theme_id)
        .await?
        .ok_or_else(|| theme_not_found_error(theme_id))?;
    Ok(Json(DataResponse { data: theme }))
}

/// POST /api/v1/admin/themes
pub async fn create_theme(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Json(input): Json<CreateTheme>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let theme = ThemeRepo::create(&state.pool, &input).await?;

    tracing::info!(theme_id = theme.id, user_id = admin.user_id, "Theme created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: theme })))
}

/// PUT /api/v1/admin/themes/{id}
pub async fn update_theme(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(theme_id): Path<DbId>,
    Json(input): Json<UpdateTheme>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let theme = ThemeRepo::update(&state.pool, theme_id, &input)
        .await?
        .ok_or_else(|| theme_not_found_error(theme_id))?;

    tracing::info!(theme_id, user_id = admin.user_id, "Theme updated");

    Ok(Json(DataResponse { data: theme }))
}

/// DELETE /api/v1/admin/themes/{id}
///
/// Cascades to the theme's objectives and their actions.
pub async fn delete_theme(
    RequireSuperuser(admin): RequireSuperuser,
    State(state): State<AppState>,
    Path(theme_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ThemeRepo::delete(&state.pool, theme_id).await? {
        return Err(theme_not_found_error(theme_id));
    }

    tracing::info!(theme_id, user_id = admin.user_id, "Theme deleted");

    Ok(StatusCode::NO_CONTENT)
}

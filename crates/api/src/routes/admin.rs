//! Route definitions for the editorial `/admin` API.
//!
//! Role checks live in the handler extractors.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{admin_actions, objectives, themes, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET, POST          /themes            -> list_themes, create_theme
/// GET, PUT, DELETE   /themes/{id}       -> get_theme, update_theme, delete_theme
/// GET, POST          /objectives        -> list_objectives, create_objective
/// GET, PUT, DELETE   /objectives/{id}   -> get_objective, update_objective, delete_objective
/// GET, POST          /actions           -> list_actions, create_action
/// GET, PUT, DELETE   /actions/{id}      -> get_action, update_action, delete_action
/// GET, POST          /users             -> list_users, create_user
/// GET, DELETE        /users/{id}        -> get_user, deactivate_user
/// POST               /users/{id}/reset-password -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/themes",
            get(themes::list_themes).post(themes::create_theme),
        )
        .route(
            "/themes/{id}",
            get(themes::get_theme)
                .put(themes::update_theme)
                .delete(themes::delete_theme),
        )
        .route(
            "/objectives",
            get(objectives::list_objectives).post(objectives::create_objective),
        )
        .route(
            "/objectives/{id}",
            get(objectives::get_objective)
                .put(objectives::update_objective)
                .delete(objectives::delete_objective),
        )
        .route(
            "/actions",
            get(admin_actions::list_actions).post(admin_actions::create_action),
        )
        .route(
            "/actions/{id}",
            get(admin_actions::get_action)
                .put(admin_actions::update_action)
                .delete(admin_actions::delete_action),
        )
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user).delete(users::deactivate_user),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
}

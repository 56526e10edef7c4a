pub mod admin;
pub mod auth;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /actions                                 status listing (public)
/// /actions/filter/{status}                 status listing, status in path
/// /themes/{id}/details                     theme details modal (public)
/// /roadmap                                 roadmap chart data (public)
///
/// /auth/login                              login (public)
/// /auth/me                                 current user (requires auth)
///
/// /admin/themes                            list (editor), create (superuser)
/// /admin/themes/{id}                       get (editor), update, delete
/// /admin/objectives                        list (editor), create (superuser)
/// /admin/objectives/{id}                   get (editor), update, delete
/// /admin/actions                           list (editor), create (superuser)
/// /admin/actions/{id}                      get, update (editor), delete
/// /admin/users                             list, create (superuser)
/// /admin/users/{id}                        get, deactivate (superuser)
/// /admin/users/{id}/reset-password         reset password (superuser)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}

//! Integration tests for the public dashboard endpoints: status listing,
//! theme details and the roadmap.

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, NaiveDate, Utc};
use common::{body_json, get};
use sqlx::PgPool;
use tracker_core::action_status::ActionStatus;
use tracker_core::workflow::{ActionContent, ActionState};
use tracker_db::models::action::ActionWrite;
use tracker_db::models::objective::CreateObjective;
use tracker_db::models::theme::CreateTheme;
use tracker_db::repositories::{ActionRepo, ObjectiveRepo, ThemeRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_theme(pool: &PgPool, title: &str, title_ga: Option<&str>) -> i64 {
    ThemeRepo::create(
        pool,
        &CreateTheme {
            title: title.to_string(),
            title_ga: title_ga.map(str::to_string),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_objective(pool: &PgPool, theme_id: i64, title: &str) -> i64 {
    ObjectiveRepo::create(
        pool,
        &CreateObjective {
            theme_id,
            title: title.to_string(),
            title_ga: None,
            description: String::new(),
            description_ga: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_action(
    pool: &PgPool,
    objective_id: i64,
    title: &str,
    content: ActionContent,
    state: ActionState,
) -> i64 {
    ActionRepo::create(
        pool,
        &ActionWrite {
            objective_id,
            title,
            content: &content,
            state: &state,
        },
    )
    .await
    .unwrap()
    .id
}

fn state(status: ActionStatus, is_approved: bool) -> ActionState {
    ActionState {
        status,
        is_approved,
        ..Default::default()
    }
}

fn content(update: &str, update_ga: Option<&str>) -> ActionContent {
    ActionContent {
        small_description: "Short summary".into(),
        small_description_ga: Some("Achoimre ghearr".into()),
        update: update.into(),
        update_ga: update_ga.map(str::to_string),
        ..Default::default()
    }
}

async fn backfill(pool: &PgPool, id: i64, started: Option<NaiveDate>, updated_at: &str) {
    let updated_at: chrono::DateTime<Utc> = updated_at.parse().unwrap();
    sqlx::query("UPDATE actions SET progress_started_at = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(started)
        .bind(updated_at)
        .execute(pool)
        .await
        .unwrap();
}

// ---------------------------------------------------------------------------
// Status listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_blanks_unapproved_updates(pool: PgPool) {
    let theme = seed_theme(&pool, "Digital", None).await;
    let objective = seed_objective(&pool, theme, "Portal").await;
    seed_action(
        &pool,
        objective,
        "Approved",
        content("<p>Done</p>", None),
        state(ActionStatus::Completed, true),
    )
    .await;
    seed_action(
        &pool,
        objective,
        "Pending",
        content("<p>Secret</p>", None),
        state(ActionStatus::Completed, false),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/actions?status=completed").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status_title"], "Completed Actions");
    assert_eq!(json["count"], 2);
    assert_eq!(json["actions"][0]["title"], "Approved");
    assert_eq!(json["actions"][0]["update"], "<p>Done</p>");
    assert_eq!(json["actions"][0]["status"], "Completed");
    assert_eq!(json["actions"][0]["objective_title"], "Portal");
    assert_eq!(json["actions"][1]["title"], "Pending");
    assert_eq!(json["actions"][1]["update"], "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn irish_update_needs_irish_approval(pool: PgPool) {
    let theme = seed_theme(&pool, "Digital", None).await;
    let objective = seed_objective(&pool, theme, "Portal").await;
    seed_action(
        &pool,
        objective,
        "Not GA approved",
        content("English text", Some("Téacs Gaeilge")),
        state(ActionStatus::InProgress, true),
    )
    .await;
    seed_action(
        &pool,
        objective,
        "GA approved",
        content("English text", Some("Téacs Gaeilge")),
        ActionState {
            is_ga_approved: true,
            ..state(ActionStatus::InProgress, true)
        },
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/actions?status=in_progress&lang=ga").await).await;

    assert_eq!(json["status_title"], "Gníomhartha Ar Siúl");
    assert_eq!(json["actions"][0]["update"], "English text");
    assert_eq!(json["actions"][1]["update"], "Téacs Gaeilge");
    assert_eq!(json["actions"][0]["status"], "Ar Siúl");
    // Descriptions are not gated on Irish approval.
    assert_eq!(json["actions"][0]["small_description"], "Achoimre ghearr");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_returns_empty_page(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/actions?status=archived").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status_title"], "");
    assert_eq!(json["count"], 0);
    assert_eq!(json["actions"], serde_json::json!([]));
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["total_pages"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pages_are_clamped(pool: PgPool) {
    let theme = seed_theme(&pool, "Skills", None).await;
    let objective = seed_objective(&pool, theme, "Training").await;
    for n in 0..12 {
        seed_action(
            &pool,
            objective,
            &format!("Action {n:02}"),
            ActionContent::default(),
            state(ActionStatus::NotStarted, true),
        )
        .await;
    }
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/actions/filter/not_started?page=2").await).await;
    assert_eq!(json["actions"].as_array().unwrap().len(), 2);
    assert_eq!(json["current_page"], 2);
    assert_eq!(json["has_previous"], true);
    assert_eq!(json["has_next"], false);

    let json = body_json(get(app.clone(), "/api/v1/actions/filter/not_started?page=99").await).await;
    assert_eq!(json["current_page"], 2);

    let json = body_json(get(app, "/api/v1/actions/filter/not_started?page=abc").await).await;
    assert_eq!(json["current_page"], 1);
    assert_eq!(json["actions"].as_array().unwrap().len(), 10);
    assert_eq!(json["actions"][0]["title"], "Action 00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn listing_filters_by_theme(pool: PgPool) {
    let t1 = seed_theme(&pool, "One", None).await;
    let t2 = seed_theme(&pool, "Two", None).await;
    let o1 = seed_objective(&pool, t1, "O1").await;
    let o2 = seed_objective(&pool, t2, "O2").await;
    seed_action(&pool, o1, "In one", ActionContent::default(), state(ActionStatus::Completed, true)).await;
    seed_action(&pool, o2, "In two", ActionContent::default(), state(ActionStatus::Completed, true)).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app.clone(), &format!("/api/v1/actions?status=completed&theme_id={t2}")).await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["actions"][0]["title"], "In two");

    let response = get(app, "/api/v1/actions?status=completed&theme_id=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Theme details
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_theme_returns_not_found_message(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/themes/999/details").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Theme Not Found");
    assert_eq!(json["not_found"], true);
    assert!(json["html_content"]
        .as_str()
        .unwrap()
        .contains("does not exist"));

    let json = body_json(get(app, "/api/v1/themes/999/details?lang=ga").await).await;
    assert_eq!(json["title"], "Téama Gan Aimsiú");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn theme_details_count_only_approved_actions(pool: PgPool) {
    let theme = seed_theme(&pool, "Connectivity", Some("Nascacht")).await;
    let objective = seed_objective(&pool, theme, "Broadband").await;
    seed_action(
        &pool,
        objective,
        "Fibre rollout",
        content("<p>All towns connected</p>", None),
        state(ActionStatus::Completed, true),
    )
    .await;
    seed_action(
        &pool,
        objective,
        "Hidden pilot",
        content("<p>Draft</p>", None),
        state(ActionStatus::InProgress, false),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app.clone(), &format!("/api/v1/themes/{theme}/details")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Connectivity");
    assert!(json.get("not_found").is_none());
    let html = json["html_content"].as_str().unwrap();
    assert!(html.contains("Action Progress"));
    assert!(html.contains("data-target=\"1\""));
    assert!(html.contains("100%"));
    assert!(html.contains("Fibre rollout"));
    assert!(html.contains("All towns connected"));
    assert!(!html.contains("Hidden pilot"));

    let json = body_json(get(app, &format!("/api/v1/themes/{theme}/details?lang=ga")).await).await;
    assert_eq!(json["title"], "Nascacht");
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn roadmap_aggregates_requested_year(pool: PgPool) {
    let theme = seed_theme(&pool, "Roadmap", None).await;
    let objective = seed_objective(&pool, theme, "Delivery").await;

    let started = seed_action(&pool, objective, "Started", ActionContent::default(), state(ActionStatus::InProgress, true)).await;
    let finished = seed_action(&pool, objective, "Finished", ActionContent::default(), state(ActionStatus::Completed, true)).await;
    let hidden = seed_action(&pool, objective, "Hidden", ActionContent::default(), state(ActionStatus::Completed, false)).await;

    backfill(&pool, started, NaiveDate::from_ymd_opt(2024, 3, 10), "2024-03-12T09:00:00Z").await;
    backfill(&pool, finished, None, "2024-06-01T09:00:00Z").await;
    backfill(&pool, hidden, NaiveDate::from_ymd_opt(2024, 1, 5), "2024-01-06T09:00:00Z").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/roadmap?year=2024").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["chart_year"], 2024);
    assert_eq!(json["chart_labels_en"][0], "January");
    assert_eq!(json["chart_data_started"][2], 1);
    assert_eq!(json["chart_data_continued"][5], 1);
    assert_eq!(json["chart_data_completed"][5], 1);
    assert_eq!(json["started_total_year"], 1);
    assert_eq!(json["continued_total_year"], 1);
    assert_eq!(json["completed_total_year"], 1);
    assert_eq!(json["in_progress_total_year"], 2);
    assert_eq!(json["year_options"][0], 2024);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn roadmap_invalid_year_falls_back_to_default(pool: PgPool) {
    let expected = Utc::now().year().max(2026);
    let app = common::build_test_app(pool);

    for query in ["?year=1999", "?year=abc", ""] {
        let json = body_json(get(app.clone(), &format!("/api/v1/roadmap{query}")).await).await;
        assert_eq!(json["chart_year"], expected, "query {query:?}");
        assert_eq!(json["completed_total_year"], 0);
    }
}

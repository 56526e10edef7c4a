use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker_api::auth::bootstrap::{ensure_superuser, BootstrapUser};
use tracker_api::config::ServerConfig;
use tracker_api::notifications::ApprovalNotifier;
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_events::{EmailConfig, EmailDelivery, EventBus};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tracker_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = tracker_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    tracker_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    tracker_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Bootstrap superuser ---
    if let Some(user) = BootstrapUser::from_env() {
        match ensure_superuser(&pool, &user).await {
            Ok(outcome) => tracing::info!(username = %user.username, ?outcome, "Bootstrap superuser checked"),
            Err(e) => tracing::error!(error = %e, username = %user.username, "Bootstrap superuser failed"),
        }
    }

    // --- Event bus and approval notifier ---
    let event_bus = Arc::new(EventBus::default());

    let email = EmailConfig::from_env().map(EmailDelivery::new);
    if email.is_none() {
        tracing::warn!("SMTP_HOST not set, approval emails are disabled");
    }
    let notifier = ApprovalNotifier::new(pool.clone(), email, config.admin_base_url.clone());
    let notifier_handle = tokio::spawn(notifier.run(event_bus.subscribe()));
    tracing::info!("Approval notifier started");

    // --- App state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // The router (and its AppState clone) is gone; dropping the last bus
    // handle closes the channel and ends the notifier loop.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, notifier_handle).await.is_err() {
        tracing::warn!("Approval notifier did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

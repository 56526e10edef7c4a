use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: tracker_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Post-commit domain events (consumed by the approval notifier).
    pub event_bus: Arc<tracker_events::EventBus>,
}

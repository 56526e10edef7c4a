//! Progress tracker API server library.
//!
//! Exposes config, state, error handling, routes and the approval notifier
//! so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod notifications;
pub mod query;
pub mod render;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

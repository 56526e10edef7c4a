//! Domain logic for the digital strategy progress tracker.
//!
//! This crate has no database or HTTP dependencies. Repositories load rows,
//! hand plain values to the functions here, and persist whatever comes back.

pub mod action_status;
pub mod error;
pub mod html;
pub mod language;
pub mod pagination;
pub mod roadmap;
pub mod roles;
pub mod types;
pub mod workflow;

//! Approval notifications for editor updates.
//!
//! The [`ApprovalNotifier`] subscribes to the event bus and emails every
//! active superuser when an editor submits progress text for approval.

pub mod router;

pub use router::ApprovalNotifier;

//! Event bus and outbound delivery for the progress tracker.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TrackerEvent`]: the domain event envelope published after writes.
//! - [`delivery`]: outbound channels (SMTP email).

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, TrackerEvent, UpdateSubmitted, ACTION_UPDATE_SUBMITTED};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, EmailMessage};

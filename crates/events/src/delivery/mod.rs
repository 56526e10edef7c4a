//! Outbound delivery channels used by notification consumers.

pub mod email;

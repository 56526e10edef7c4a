pub mod actions;
pub mod admin_actions;
pub mod auth;
pub mod objectives;
pub mod roadmap;
pub mod themes;
pub mod users;

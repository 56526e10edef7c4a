//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_repo;
pub mod objective_repo;
pub mod theme_repo;
pub mod user_repo;

pub use action_repo::ActionRepo;
pub use objective_repo::ObjectiveRepo;
pub use theme_repo::ThemeRepo;
pub use user_repo::UserRepo;

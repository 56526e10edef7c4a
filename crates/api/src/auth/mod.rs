//! Authentication primitives for editor accounts.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`bootstrap`] -- first superuser account from the environment.

pub mod bootstrap;
pub mod jwt;
pub mod password;

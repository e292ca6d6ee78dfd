//! API request handlers.

/// Login handler.
pub mod auth;
/// Student record handlers (list, get, register, update).
pub mod students;

//! Credential store.
//!
//! Students live in a single libsql table behind the [`StudentStore`] trait:
//! - `:memory:` - ephemeral SQLite, used by the test suite
//! - a file path - local SQLite
//! - `libsql://` / `https://` - remote Turso (needs the `turso` feature)
//!
//! [`DisconnectedStore`] stands in when the database cannot be reached at
//! startup.

#![allow(missing_docs)]

pub mod disconnected;
pub mod traits;
pub mod turso;

// Re-exports
pub use disconnected::DisconnectedStore;
pub use traits::{open_store, DatabaseProvider, StudentStore};
pub use turso::TursoClient;

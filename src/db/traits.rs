//! Database abstraction traits
//!
//! This module provides the `StudentStore` trait that abstracts over the
//! credential store backends (in-memory SQLite, file-based SQLite, remote
//! Turso) and the provider enum that picks one from a connection string.
//!
//! # Example
//!
//! ```rust,ignore
//! use student_registry::db::DatabaseProvider;
//!
//! let store = DatabaseProvider::from_url(":memory:", None)?.create_store().await?;
//! let students = store.list_students().await?;
//! ```

use super::disconnected::DisconnectedStore;
use crate::types::{AppError, Result, Student};
use crate::utils::config::DatabaseConfig;
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires the `turso` feature to connect)
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Classifies a connection string.
    ///
    /// `:memory:` (or an empty string) is in-memory, `libsql://`, `https://`
    /// and `http://` URLs are remote and need an auth token, anything else is
    /// a file path.
    pub fn from_url(url: &str, auth_token: Option<&str>) -> Result<Self> {
        let url = url.trim();

        if url.is_empty() || url == ":memory:" {
            return Ok(DatabaseProvider::Memory);
        }

        let is_remote = ["libsql://", "https://", "http://"]
            .iter()
            .any(|scheme| url.starts_with(scheme));

        if is_remote {
            let auth_token = auth_token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AppError::Internal(format!(
                        "DATABASE_AUTH_TOKEN is required for remote database {}",
                        url
                    ))
                })?;

            return Ok(DatabaseProvider::Turso {
                url: url.to_string(),
                auth_token: auth_token.to_string(),
            });
        }

        Ok(DatabaseProvider::SQLite {
            path: url.to_string(),
        })
    }

    /// Create a store from this provider configuration
    pub async fn create_store(&self) -> Result<Arc<dyn StudentStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                let client =
                    super::turso::TursoClient::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(client))
            }
            #[cfg(not(feature = "turso"))]
            DatabaseProvider::Turso { url, .. } => Err(AppError::Database(format!(
                "{} is a remote database; rebuild with the `turso` feature",
                url
            ))),
        }
    }

    /// Short label for logs. Never includes the auth token.
    pub fn describe(&self) -> String {
        match self {
            DatabaseProvider::Memory => "in-memory".to_string(),
            DatabaseProvider::SQLite { path } => format!("sqlite:{}", path),
            DatabaseProvider::Turso { url, .. } => url.clone(),
        }
    }
}

/// Opens the configured store.
///
/// Any failure, including a connection string that can't be used, is
/// returned when `config.required` is set. Otherwise it is logged and the
/// server runs on a [`DisconnectedStore`].
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn StudentStore>> {
    let opened = match DatabaseProvider::from_url(&config.url, config.auth_token.as_deref()) {
        Ok(provider) => {
            tracing::info!(database = %provider.describe(), "opening database");
            provider.create_store().await
        }
        Err(e) => Err(e),
    };

    match opened {
        Ok(store) => {
            tracing::info!("database connected");
            Ok(store)
        }
        Err(e) if config.required => Err(e),
        Err(e) => {
            tracing::error!(error = %e, "failed to open database, continuing without it");
            Ok(Arc::new(DisconnectedStore::new(e.to_string())))
        }
    }
}

/// The credential store: persistent student records.
///
/// Implementations enforce one student per email and report a clash as
/// [`AppError::Conflict`].
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert a new student. The caller supplies the id.
    async fn create_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Student>;

    /// Get a student by ID
    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>>;

    /// Get a student by email
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;

    /// All students, oldest first
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Overwrite name, email and password hash; `None` if `id` is unknown
    async fn update_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Student>>;
}

// ============== Implement StudentStore for TursoClient ==============

#[async_trait]
impl StudentStore for super::turso::TursoClient {
    async fn create_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Student> {
        super::turso::TursoClient::create_student(self, id, name, email, password_hash).await
    }

    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        super::turso::TursoClient::get_student_by_id(self, id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        super::turso::TursoClient::get_student_by_email(self, email).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        super::turso::TursoClient::list_students(self).await
    }

    async fn update_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Student>> {
        super::turso::TursoClient::update_student(self, id, name, email, password_hash).await
    }
}

//! # Student Registry
//!
//! A small student-account service: register a student, authenticate with a
//! bearer token, then read and update student records.
//!
//! ## Overview
//!
//! The crate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `student-registry` binary
//! 2. **As a library** - Mount [`app`] in your own Axum application
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use student_registry::{
//!     app, auth::{jwt::TokenService, password::PasswordService},
//!     db::DatabaseProvider, AppState,
//! };
//! use std::sync::Arc;
//!
//! let store = DatabaseProvider::Memory.create_store().await?;
//! let state = AppState {
//!     store,
//!     token_service: Arc::new(TokenService::new(&secret)),
//!     password_service: Arc::new(PasswordService::default()),
//! };
//! let router = app(state);
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST handlers and routes
//! - [`auth`] - Password hashing, tokens and the auth middleware
//! - [`db`] - Credential store (libsql)
//! - [`types`] - Request/response types and error handling
//! - [`utils`] - Configuration
//! - [`cli`] - Command-line flags and terminal output

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Password hashing, bearer tokens and middleware.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// Credential store.
pub mod db;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration utilities.
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use db::{DatabaseProvider, StudentStore};
pub use types::{AppError, Result};
pub use utils::config::Config;

use crate::auth::{jwt::TokenService, password::PasswordService};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential store
    pub store: Arc<dyn StudentStore>,
    /// Token issuer/verifier
    pub token_service: Arc<TokenService>,
    /// Password hasher
    pub password_service: Arc<PasswordService>,
}

/// Builds the full router: API routes, health check and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(api::routes::create_router(state.token_service.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

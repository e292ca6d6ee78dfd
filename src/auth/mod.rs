//! Credential handling and the bearer-token gate
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing with a tunable cost
//! - [`auth::jwt`](crate::auth::jwt) - one-day HS256 tokens binding a student id
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware and the `AuthStudent` extractor
//!
//! # Flow
//!
//! Registration hashes the password, stores the student and returns a token
//! from [`TokenService::issue`](jwt::TokenService::issue). Protected routes sit
//! behind [`auth_middleware`](middleware::auth_middleware), which verifies the
//! token and injects the student id:
//!
//! ```ignore
//! use student_registry::auth::middleware::AuthStudent;
//!
//! async fn protected_handler(AuthStudent { student_id }: AuthStudent) -> String {
//!     format!("Hello, {}!", student_id)
//! }
//! ```
//!
//! Verification failures never say which check failed: a bad signature, a
//! garbled payload and an expired token all produce `401 Invalid token`.

/// Token issuance and verification.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Password hashing and verification.
pub mod password;

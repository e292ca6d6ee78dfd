//! HTTP API Handlers and Routes
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `POST /students` - Register a student, returns `{token}` (public)
//! - `POST /auth/login` - Exchange email and password for `{token}` (public)
//! - `GET /students` - List students (auth)
//! - `GET /students/{id}` - Get one student (auth)
//! - `PUT /students/{id}` - Replace name, email and password (auth)
//! - `GET /health` - Health check, mounted by the binary
//!
//! # Authentication
//!
//! Protected endpoints require a token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Errors are returned as `{"message": "..."}`.
//!
//! # OpenAPI Documentation
//!
//! [`ApiDoc`] collects the handler annotations. When the `swagger-ui`
//! feature is enabled the binary serves it at `/swagger-ui/`.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

use crate::types::{LoginRequest, MessageResponse, StudentRequest, StudentResponse, TokenResponse};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

/// OpenAPI document for the student API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::students::list_students,
        handlers::students::get_student,
        handlers::students::create_student,
        handlers::students::update_student,
        handlers::auth::login,
    ),
    components(schemas(
        StudentRequest,
        StudentResponse,
        LoginRequest,
        TokenResponse,
        MessageResponse
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "students", description = "Student records"),
        (name = "auth", description = "Token issuance")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

use crate::api::handlers::{auth, students};
use crate::auth::jwt::TokenService;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Student and auth routes; everything except registration and login
/// passes through the auth middleware.
pub fn create_router(token_service: Arc<TokenService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/students", post(students::create_student))
        .route("/auth/login", post(auth::login));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/students", get(students::list_students))
        .route(
            "/students/{id}",
            get(students::get_student).put(students::update_student),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(token_service.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}

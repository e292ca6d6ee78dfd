use crate::auth::jwt::TokenService;
use crate::types::{AppError, MessageResponse};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Identity injected by [`auth_middleware`] for the rest of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStudent {
    /// Verified student id from the token
    pub student_id: String,
}

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
///
/// Never touches the store: the only effect on success is inserting
/// [`AuthStudent`] into the request extensions.
pub async fn auth_middleware(
    token_service: Arc<TokenService>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        tracing::debug!(path = %req.uri().path(), "missing bearer token");
        return unauthorized("Unauthorized");
    };

    let student_id = match token_service.verify(token) {
        Ok(id) => id,
        Err(_) => return unauthorized("Invalid token"),
    };

    req.extensions_mut().insert(AuthStudent { student_id });

    next.run(req).await
}

/// Token from `Authorization: <scheme> <token>`; the scheme matches
/// `Bearer` in any case.
fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(char::is_whitespace)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    Some(token.trim()).filter(|t| !t.is_empty())
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

impl<S> FromRequestParts<S> for AuthStudent
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthStudent>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}

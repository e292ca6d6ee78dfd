use crate::{
    types::{AppError, LoginRequest, Result, TokenResponse},
    AppState,
};
use axum::{extract::State, Json};

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = crate::types::MessageResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let email = payload.email.trim();

    // Unknown emails still pay for a hash so both failures take as long.
    let Some(student) = state.store.get_student_by_email(email).await? else {
        state.password_service.verify_missing(payload.password).await?;
        return Err(invalid_credentials());
    };

    if !state
        .password_service
        .verify(payload.password, student.password_hash)
        .await?
    {
        tracing::debug!(student_id = %student.id, "login rejected");
        return Err(invalid_credentials());
    }

    let token = state.token_service.issue(&student.id)?;

    Ok(Json(TokenResponse { token }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

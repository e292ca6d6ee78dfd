//! Student record handlers.
//!
//! `POST /students` is public so that a student can register before holding
//! a token. The other routes sit behind the auth gate but do not compare the
//! caller's id with the record being read or changed.

use crate::{
    auth::middleware::AuthStudent,
    types::{AppError, Result, StudentRequest, StudentResponse, TokenResponse},
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

/// List all students.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students, without password hashes", body = Vec<StudentResponse>),
        (status = 401, description = "Missing or invalid token", body = crate::types::MessageResponse)
    ),
    tag = "students",
    security(("bearer" = []))
)]
pub async fn list_students(
    State(state): State<AppState>,
    _caller: AuthStudent,
) -> Result<Json<Vec<StudentResponse>>> {
    let students = state.store.list_students().await?;

    Ok(Json(
        students.into_iter().map(StudentResponse::from).collect(),
    ))
}

/// Get a single student.
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student record", body = StudentResponse),
        (status = 401, description = "Missing or invalid token", body = crate::types::MessageResponse),
        (status = 404, description = "Student not found", body = crate::types::MessageResponse)
    ),
    tag = "students",
    security(("bearer" = []))
)]
pub async fn get_student(
    State(state): State<AppState>,
    _caller: AuthStudent,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>> {
    let student = state
        .store
        .get_student_by_id(&id)
        .await?
        .ok_or_else(AppError::student_not_found)?;

    Ok(Json(student.into()))
}

/// Register a new student and return a token for it.
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Student registered", body = TokenResponse),
        (status = 400, description = "Missing name, email or password", body = crate::types::MessageResponse),
        (status = 409, description = "Email already registered", body = crate::types::MessageResponse)
    ),
    tag = "students"
)]
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<StudentRequest>,
) -> Result<Json<TokenResponse>> {
    let fields = payload.into_fields()?;

    if state
        .store
        .get_student_by_email(&fields.email)
        .await?
        .is_some()
    {
        return Err(AppError::email_taken());
    }

    let password_hash = state.password_service.hash(fields.password).await?;

    let student_id = Uuid::new_v4().to_string();
    let student = state
        .store
        .create_student(&student_id, &fields.name, &fields.email, &password_hash)
        .await?;

    let token = state.token_service.issue(&student.id)?;

    tracing::info!(student_id = %student.id, "student registered");

    Ok(Json(TokenResponse { token }))
}

/// Replace a student's name, email and password.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Updated student", body = StudentResponse),
        (status = 400, description = "Missing name, email or password", body = crate::types::MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::types::MessageResponse),
        (status = 404, description = "Student not found", body = crate::types::MessageResponse),
        (status = 409, description = "Email belongs to another student", body = crate::types::MessageResponse)
    ),
    tag = "students",
    security(("bearer" = []))
)]
pub async fn update_student(
    State(state): State<AppState>,
    AuthStudent { student_id: caller }: AuthStudent,
    Path(id): Path<String>,
    Json(payload): Json<StudentRequest>,
) -> Result<Json<StudentResponse>> {
    let fields = payload.into_fields()?;

    let password_hash = state.password_service.hash(fields.password).await?;

    let student = state
        .store
        .update_student(&id, &fields.name, &fields.email, &password_hash)
        .await?
        .ok_or_else(AppError::student_not_found)?;

    tracing::info!(student_id = %student.id, updated_by = %caller, "student updated");

    Ok(Json(student.into()))
}

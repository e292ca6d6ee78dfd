use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Student Types =============

/// A stored student record, including the password hash.
///
/// Never serialized directly: handlers convert it into [`StudentResponse`]
/// before anything leaves the process.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Public view of a student. Has no field for the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            email: s.email,
        }
    }
}

/// Body of `POST /students` and `PUT /students/{id}`.
///
/// Fields are optional at the serde level so a missing field is reported
/// with the same 400 as an empty one.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct StudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A [`StudentRequest`] that passed the presence check.
#[derive(Debug)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl StudentRequest {
    /// Requires name, email and password to be present and non-blank.
    ///
    /// Name and email are trimmed; the password is kept as typed.
    pub fn into_fields(self) -> Result<StudentFields> {
        let password = self.password.filter(|p| !p.trim().is_empty());

        match (present(self.name), present(self.email), password) {
            (Some(name), Some(email), Some(password)) => Ok(StudentFields {
                name,
                email,
                password,
            }),
            _ => Err(AppError::InvalidInput(
                "name, email and password are required".to_string(),
            )),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ============= Authentication Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// JWT claims. `studentId` matches the field name clients already decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "studentId")]
    pub student_id: String,
    pub iat: usize,
    pub exp: usize,
}

/// Error body shared by every failing route.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn student_not_found() -> Self {
        AppError::NotFound("Student not found".to_string())
    }

    pub fn email_taken() -> Self {
        AppError::Conflict("Email already registered".to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            AppError::Hash(detail) => {
                tracing::error!(error = %detail, "password hashing failed");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unavailable(detail) => {
                tracing::warn!(error = %detail, "request rejected, database unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Database unavailable".to_string(),
                )
            }
            AppError::Database(detail) | AppError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, axum::Json(MessageResponse { message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

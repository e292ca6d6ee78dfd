use super::traits::StudentStore;
use crate::types::{AppError, Result, Student};
use async_trait::async_trait;

/// Stand-in store used when the database could not be opened at startup.
///
/// Every call fails with [`AppError::Unavailable`], so the server stays up and
/// unauthenticated routes keep working.
#[derive(Debug, Clone)]
pub struct DisconnectedStore {
    reason: String,
}

impl DisconnectedStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable<T>(&self) -> Result<T> {
        Err(AppError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl StudentStore for DisconnectedStore {
    async fn create_student(
        &self,
        _id: &str,
        _name: &str,
        _email: &str,
        _password_hash: &str,
    ) -> Result<Student> {
        self.unavailable()
    }

    async fn get_student_by_id(&self, _id: &str) -> Result<Option<Student>> {
        self.unavailable()
    }

    async fn get_student_by_email(&self, _email: &str) -> Result<Option<Student>> {
        self.unavailable()
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.unavailable()
    }

    async fn update_student(
        &self,
        _id: &str,
        _name: &str,
        _email: &str,
        _password_hash: &str,
    ) -> Result<Option<Student>> {
        self.unavailable()
    }
}

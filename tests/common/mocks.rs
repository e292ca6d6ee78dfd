//! Mock store implementations for testing.
//!
//! Shared across test files so each one doesn't re-implement `StudentStore`.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use student_registry::db::{StudentStore, TursoClient};
use student_registry::types::{AppError, Result, Student};

/// Wraps a real in-memory store and counts every call that reaches it.
///
/// Lets tests prove that a request was rejected before the store was
/// touched.
pub struct CountingStore {
    inner: TursoClient,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    /// Returns the store and a handle to its call counter.
    pub async fn new() -> (Self, Arc<AtomicUsize>) {
        let inner = TursoClient::new_memory()
            .await
            .expect("Failed to create in-memory database");
        let calls = Arc::new(AtomicUsize::new(0));

        (
            Self {
                inner,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StudentStore for CountingStore {
    async fn create_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Student> {
        self.hit();
        self.inner.create_student(id, name, email, password_hash).await
    }

    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        self.hit();
        self.inner.get_student_by_id(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.hit();
        self.inner.get_student_by_email(email).await
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        self.hit();
        self.inner.list_students().await
    }

    async fn update_student(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<Student>> {
        self.hit();
        self.inner
            .update_student(id, name, email, password_hash)
            .await
    }
}

/// A store whose every operation fails like a dropped connection would.
pub struct FailingStore;

#[async_trait]
impl StudentStore for FailingStore {
    async fn create_student(
        &self,
        _id: &str,
        _name: &str,
        _email: &str,
        _password_hash: &str,
    ) -> Result<Student> {
        Err(AppError::Database("connection reset".to_string()))
    }

    async fn get_student_by_id(&self, _id: &str) -> Result<Option<Student>> {
        Err(AppError::Database("connection reset".to_string()))
    }

    async fn get_student_by_email(&self, _email: &str) -> Result<Option<Student>> {
        Err(AppError::Database("connection reset".to_string()))
    }

    async fn list_students(&self) -> Result<Vec<Student>> {
        Err(AppError::Database("connection reset".to_string()))
    }

    async fn update_student(
        &self,
        _id: &str,
        _name: &str,
        _email: &str,
        _password_hash: &str,
    ) -> Result<Option<Student>> {
        Err(AppError::Database("connection reset".to_string()))
    }
}

#![allow(dead_code)]

pub mod mocks;

use axum_test::TestServer;
use std::sync::Arc;
use student_registry::{
    app,
    auth::{
        jwt::TokenService,
        password::{HashCost, PasswordService},
    },
    db::{StudentStore, TursoClient},
    AppState,
};

pub const TEST_SECRET: &str = "test_jwt_secret_key_for_testing_only";

/// Cheapest Argon2 parameters, so registration in tests stays fast.
pub fn test_password_service() -> PasswordService {
    PasswordService::new(HashCost {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    })
    .expect("test hash parameters should be valid")
}

pub fn test_state(store: Arc<dyn StudentStore>) -> AppState {
    AppState {
        store,
        token_service: Arc::new(TokenService::new(TEST_SECRET)),
        password_service: Arc::new(test_password_service()),
    }
}

/// Test server over the full router and the given store.
pub fn server_with_store(store: Arc<dyn StudentStore>) -> TestServer {
    TestServer::new(app(test_state(store))).expect("Failed to create test server")
}

/// Test server over the full router and a fresh in-memory database.
pub async fn create_test_server() -> TestServer {
    let store = TursoClient::new_memory()
        .await
        .expect("Failed to create in-memory database");
    server_with_store(Arc::new(store))
}

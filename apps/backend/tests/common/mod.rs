//! Common test utilities and fixtures for integration tests.
//!
//! The context runs the full router against an in-memory store, so these
//! tests need no database.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;
use chrono::Utc;

use betukereso_backend::db::{MemoryStore, Store};
use betukereso_backend::models::Child;
use betukereso_backend::{build_router, AppState};

/// Test context holding the store behind the router.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone()));
        Self { store, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Start a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Insert a child directly into the store.
    pub async fn create_test_child(&self, name: &str) -> Child {
        let child = Child::new(name, Utc::now()).expect("valid test name");
        self.store
            .insert_child(&child)
            .await
            .expect("Failed to create test child");
        child
    }
}

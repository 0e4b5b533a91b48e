//! Test helpers: build AppState and router for integration tests.
//!
//! The router is wired to in-memory collaborators, so these tests run without
//! Docker. Run from workspace root: `cargo test -p audiogate-api`.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;
pub mod logs;
pub mod storage;

use audiogate_api::{build_router, AppState};
use audiogate_core::{
    Config, DatabaseConfig, LogFormat, ServiceConfig, StorageBackend, StorageConfig,
};
use axum_test::TestServer;
use fixtures::{InMemoryAudioRepository, InMemoryUserDirectory};
use std::sync::Arc;
use storage::RecordingStorage;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_ISSUER: &str = "auth_service";
pub const MAX_AUDIO_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Test application: server plus handles on the fakes behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub users: Arc<InMemoryUserDirectory>,
    pub audio: Arc<InMemoryAudioRepository>,
    pub storage: Arc<RecordingStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config() -> Config {
    Config(Box::new(ServiceConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        request_timeout_secs: 30,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiry_hours: 24,
        jwt_issuer: TEST_ISSUER.to_string(),
        max_audio_size_bytes: MAX_AUDIO_SIZE_BYTES,
        log_format: LogFormat::Console,
        database: DatabaseConfig {
            url: "postgresql://postgres@localhost:5432/auth_db".to_string(),
            max_connections: 1,
            timeout_seconds: 1,
        },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            s3_access_key_id: None,
            s3_secret_access_key: None,
            s3_use_path_style: true,
            local_storage_path: Some("/tmp/audiogate-test".to_string()),
            local_storage_base_url: Some("http://localhost:8080/files".to_string()),
        },
    }))
}

/// Setup test app backed by in-memory fakes.
pub async fn setup_test_app() -> TestApp {
    let users = Arc::new(InMemoryUserDirectory::default());
    let audio = Arc::new(InMemoryAudioRepository::default());
    let storage = Arc::new(RecordingStorage::default());

    let state = Arc::new(AppState::new(
        create_test_config(),
        users.clone(),
        audio.clone(),
        storage.clone(),
    ));

    let server =
        TestServer::new(build_router(state.clone())).expect("Failed to create test server");

    TestApp {
        server,
        state,
        users,
        audio,
        storage,
    }
}

pub mod test_with_server;

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Utc;
use hobby_server::{
    config::AppConfig,
    entities::word_bank::WordBank,
    interfaces::clock::ManualClock,
    middleware::mw_ctx::{create_ctx_state, CtxState},
};
use tempfile::TempDir;

#[allow(dead_code)]
pub const MASTER_CODE: &str = "test-master";
#[allow(dead_code)]
pub const SESSION_SECRET: &str = "test-session-secret";
#[allow(dead_code)]
pub const SESSION_KEY: &str = "hobby_session";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub ctx_state: Arc<CtxState>,
    pub config: AppConfig,
    pub clock: Arc<ManualClock>,
    // snapshot files live here; dropped with the app
    pub dir: TempDir,
}

#[allow(dead_code)]
pub fn test_config(dir: &TempDir) -> AppConfig {
    AppConfig {
        port: 0,
        data_file: dir.path().join("data.json"),
        codes_file: dir.path().join("codes.json"),
        master_code: MASTER_CODE.to_string(),
        session_key: SESSION_KEY.to_string(),
        session_secret: SESSION_SECRET.to_string(),
        code_ttl_hours: 24,
        cors_origins: vec!["https://allowed.example".to_string()],
    }
}

/// Starts a server over fresh snapshot files. `seed` is written as the word bank
/// snapshot first; `None` leaves the file missing so the defaults get seeded.
#[allow(dead_code)]
pub fn create_test_app(seed: Option<&WordBank>) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = test_config(&dir);
    if let Some(seed) = seed {
        std::fs::write(&config.data_file, serde_json::to_string(seed).unwrap()).unwrap();
    }

    let clock = Arc::new(ManualClock::new(Utc::now()));
    let ctx_state = create_ctx_state(&config, clock.clone()).expect("state loads");
    let routes_all = hobby_server::init::main_router(&ctx_state, &config);
    let server = TestServer::new(routes_all).expect("Failed to create test server");

    TestApp {
        server,
        ctx_state,
        config,
        clock,
        dir,
    }
}

#[allow(dead_code)]
pub fn read_snapshot(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

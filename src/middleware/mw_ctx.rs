use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::entities::{access_code::CodeSnapshot, word_bank::WordBank};
use crate::interfaces::clock::SystemClock;
use crate::middleware::error::AppResult;
use crate::services::code_registry::{CodeRegistry, CodeSettings, SharedClock};
use crate::services::word_store::WordStore;
use crate::utils::file::json_snapshot_file::JsonSnapshotFile;

/// Process-wide state handed to every handler. Each store sits behind its own
/// lock so a mutation and its snapshot write finish before the next request
/// touching the same store proceeds.
pub struct CtxState {
    pub words: Mutex<WordStore>,
    pub codes: Mutex<CodeRegistry>,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CTX STATE HERE :)")
    }
}

impl CtxState {
    pub fn new(words: WordStore, codes: CodeRegistry) -> Arc<Self> {
        Arc::new(Self {
            words: Mutex::new(words),
            codes: Mutex::new(codes),
        })
    }
}

pub fn code_settings(config: &AppConfig) -> CodeSettings {
    CodeSettings {
        code_ttl: Duration::hours(config.code_ttl_hours as i64),
        master_code: config.master_code.clone(),
        session_key: config.session_key.clone(),
        session_secret: config.session_secret.clone(),
    }
}

/// Loads both snapshots from the configured files.
pub fn create_ctx_state(config: &AppConfig, clock: SharedClock) -> AppResult<Arc<CtxState>> {
    let words = WordStore::load(Arc::new(JsonSnapshotFile::<WordBank>::new(
        &config.data_file,
    )))?;
    let codes = CodeRegistry::load(
        Arc::new(JsonSnapshotFile::<CodeSnapshot>::new(&config.codes_file)),
        clock,
        code_settings(config),
    )?;
    Ok(CtxState::new(words, codes))
}

pub fn create_default_ctx_state(config: &AppConfig) -> AppResult<Arc<CtxState>> {
    create_ctx_state(config, Arc::new(SystemClock))
}

use std::sync::Arc;

use chrono::Duration;
use tracing::{error, info, warn};

use crate::{
    entities::access_code::{AccessCode, CodeSnapshot, IssuedCode, SessionGrant},
    interfaces::{clock::Clock, snapshot_storage::SnapshotStorage},
    middleware::error::{AppError, AppResult},
    utils::{
        generate::{generate_access_code, ACCESS_CODE_LEN},
        secret::secrets_match,
        time_utils::describe_ttl,
    },
};

pub type CodeStorage = Arc<dyn SnapshotStorage<CodeSnapshot> + Send + Sync>;
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CodeSettings {
    pub code_ttl: Duration,
    pub master_code: String,
    pub session_key: String,
    pub session_secret: String,
}

/// Short-lived access codes. Codes are checked for expiry lazily: every issue and
/// verify sweeps stale entries first.
pub struct CodeRegistry {
    codes: Vec<AccessCode>,
    storage: CodeStorage,
    clock: SharedClock,
    settings: CodeSettings,
}

impl CodeRegistry {
    pub fn load(storage: CodeStorage, clock: SharedClock, settings: CodeSettings) -> AppResult<Self> {
        let codes = storage.load()?.unwrap_or_default().codes;
        info!("->> loaded {} access code(s)", codes.len());
        let mut registry = Self {
            codes,
            storage,
            clock,
            settings,
        };
        registry.sweep_expired()?;
        Ok(registry)
    }

    pub fn codes(&self) -> &[AccessCode] {
        &self.codes
    }

    pub fn sweep_expired(&mut self) -> AppResult<usize> {
        let live = self.live_codes();
        let removed = self.codes.len() - live.len();
        if removed > 0 {
            self.commit(live)?;
            info!("->> swept {removed} expired access code(s)");
        }
        Ok(removed)
    }

    /// Open issuance, no credential needed.
    pub fn issue(&mut self) -> AppResult<IssuedCode> {
        let mut codes = self.live_codes();
        let code = AccessCode {
            code: generate_access_code(ACCESS_CODE_LEN),
            created_at: self.clock.now(),
        };
        codes.push(code.clone());
        self.commit(codes)?;
        info!("->> issued access code");

        Ok(IssuedCode {
            code: code.code,
            expires_in: describe_ttl(self.settings.code_ttl),
        })
    }

    pub fn issue_privileged(&mut self, master_code: &str) -> AppResult<IssuedCode> {
        self.check_master(master_code)?;
        self.issue()
    }

    /// Never-issued and expired codes are reported identically.
    pub fn verify(&mut self, code: &str) -> AppResult<SessionGrant> {
        self.sweep_expired()?;
        let now = self.clock.now();
        let found = self
            .codes
            .iter()
            .any(|c| !c.is_expired(now, self.settings.code_ttl) && secrets_match(&c.code, code));
        if !found {
            warn!("->> access code rejected");
            return Err(AppError::InvalidOrExpired);
        }

        Ok(SessionGrant {
            session_key: self.settings.session_key.clone(),
            session_value: self.settings.session_secret.clone(),
        })
    }

    pub fn verify_session(&self, session_value: &str) -> AppResult<()> {
        if secrets_match(&self.settings.session_secret, session_value) {
            Ok(())
        } else {
            warn!("->> session value rejected");
            Err(AppError::InvalidOrExpired)
        }
    }

    pub fn revoke(&mut self, master_code: &str, code: &str) -> AppResult<String> {
        self.check_master(master_code)?;
        let index = self
            .codes
            .iter()
            .position(|c| c.code == code)
            .ok_or_else(|| AppError::NotFound {
                ident: "Code".to_string(),
            })?;

        let mut codes = self.codes.clone();
        let revoked = codes.remove(index);
        self.commit(codes)?;
        info!("->> revoked access code");
        Ok(revoked.code)
    }

    fn check_master(&self, master_code: &str) -> AppResult<()> {
        if secrets_match(&self.settings.master_code, master_code) {
            Ok(())
        } else {
            warn!("->> master code rejected");
            Err(AppError::Unauthorized)
        }
    }

    fn live_codes(&self) -> Vec<AccessCode> {
        let now = self.clock.now();
        self.codes
            .iter()
            .filter(|c| !c.is_expired(now, self.settings.code_ttl))
            .cloned()
            .collect()
    }

    fn commit(&mut self, codes: Vec<AccessCode>) -> AppResult<()> {
        let snapshot = CodeSnapshot { codes };
        self.storage.save(&snapshot).inspect_err(|e| {
            error!("->> access code snapshot write failed, change discarded: {e:?}")
        })?;
        self.codes = snapshot.codes;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        interfaces::clock::ManualClock,
        services::word_store::tests::{FailingSnapshot, MemorySnapshot},
    };

    const MASTER: &str = "master-secret";

    fn settings() -> CodeSettings {
        CodeSettings {
            code_ttl: Duration::hours(24),
            master_code: MASTER.to_string(),
            session_key: "hobby_session".to_string(),
            session_secret: "session-secret".to_string(),
        }
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        ))
    }

    fn registry() -> (CodeRegistry, Arc<MemorySnapshot<CodeSnapshot>>, Arc<ManualClock>) {
        let storage = Arc::new(MemorySnapshot::<CodeSnapshot>::default());
        let clock = clock();
        let registry = CodeRegistry::load(storage.clone(), clock.clone(), settings()).unwrap();
        (registry, storage, clock)
    }

    #[test]
    fn issued_code_verifies_until_expiry() {
        let (mut registry, _, clock) = registry();
        let issued = registry.issue().unwrap();
        assert_eq!(issued.expires_in, "24 hours");

        let grant = registry.verify(&issued.code).unwrap();
        assert_eq!(grant.session_key, "hobby_session");
        assert_eq!(grant.session_value, "session-secret");

        clock.advance(Duration::hours(24));
        assert!(registry.verify(&issued.code).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            registry.verify(&issued.code).unwrap_err(),
            AppError::InvalidOrExpired
        );
        assert!(registry.codes().is_empty());
    }

    #[test]
    fn unknown_and_expired_codes_fail_alike() {
        let (mut registry, _, clock) = registry();
        let issued = registry.issue().unwrap();
        clock.advance(Duration::hours(25));
        let expired = registry.verify(&issued.code).unwrap_err();
        let unknown = registry.verify("never-issued").unwrap_err();
        assert_eq!(expired, unknown);
        assert_eq!(expired.to_string(), unknown.to_string());
    }

    #[test]
    fn issue_sweeps_and_persists_once() {
        let (mut registry, storage, clock) = registry();
        registry.issue().unwrap();
        clock.advance(Duration::hours(30));
        let fresh = registry.issue().unwrap();

        let saved = storage.load().unwrap().unwrap();
        assert_eq!(saved.codes.len(), 1);
        assert_eq!(saved.codes[0].code, fresh.code);
        assert_eq!(*storage.writes.lock().unwrap(), 2);
    }

    #[test]
    fn sweep_without_expired_codes_does_not_write() {
        let (mut registry, storage, _) = registry();
        registry.issue().unwrap();
        assert_eq!(registry.sweep_expired().unwrap(), 0);
        assert_eq!(*storage.writes.lock().unwrap(), 1);
    }

    #[test]
    fn load_sweeps_stale_snapshot() {
        let clock = clock();
        let now = clock.now();
        let storage = Arc::new(MemorySnapshot::<CodeSnapshot>::default());
        *storage.saved.lock().unwrap() = Some(CodeSnapshot {
            codes: vec![
                AccessCode {
                    code: "old".into(),
                    created_at: now - Duration::hours(48),
                },
                AccessCode {
                    code: "new".into(),
                    created_at: now - Duration::hours(1),
                },
            ],
        });
        let registry = CodeRegistry::load(storage.clone(), clock, settings()).unwrap();
        assert_eq!(registry.codes().len(), 1);
        assert_eq!(registry.codes()[0].code, "new");
        assert_eq!(storage.load().unwrap().unwrap().codes.len(), 1);
    }

    #[test]
    fn privileged_issue_requires_master() {
        let (mut registry, storage, _) = registry();
        assert_eq!(
            registry.issue_privileged("wrong").unwrap_err(),
            AppError::Unauthorized
        );
        assert!(registry.codes().is_empty());
        assert_eq!(*storage.writes.lock().unwrap(), 0);

        let issued = registry.issue_privileged(MASTER).unwrap();
        assert!(registry.verify(&issued.code).is_ok());
    }

    #[test]
    fn revoke_with_wrong_master_is_unauthorized_regardless_of_code() {
        let (mut registry, _, _) = registry();
        let issued = registry.issue().unwrap();
        assert_eq!(
            registry.revoke("wrong", &issued.code).unwrap_err(),
            AppError::Unauthorized
        );
        assert_eq!(
            registry.revoke("wrong", "missing").unwrap_err(),
            AppError::Unauthorized
        );
        assert!(registry.verify(&issued.code).is_ok());
    }

    #[test]
    fn revoke_removes_code() {
        let (mut registry, _, _) = registry();
        let issued = registry.issue().unwrap();
        assert_eq!(registry.revoke(MASTER, &issued.code).unwrap(), issued.code);
        assert!(registry.verify(&issued.code).is_err());
        assert_eq!(
            registry.revoke(MASTER, &issued.code).unwrap_err(),
            AppError::NotFound {
                ident: "Code".into()
            }
        );
    }

    #[test]
    fn session_value_is_plain_equality() {
        let (registry, _, _) = registry();
        assert!(registry.verify_session("session-secret").is_ok());
        assert_eq!(
            registry.verify_session("nope").unwrap_err(),
            AppError::InvalidOrExpired
        );
    }

    #[test]
    fn failed_write_issues_nothing() {
        let storage = Arc::new(FailingSnapshot::<CodeSnapshot>(None));
        let mut registry = CodeRegistry::load(storage, clock(), settings()).unwrap();
        assert!(matches!(
            registry.issue(),
            Err(AppError::Persistence { .. })
        ));
        assert!(registry.codes().is_empty());
    }
}

use crate::middleware::error::AppResult;

/// Whole-document persistence: every `save` replaces the previous snapshot.
pub trait SnapshotStorage<T> {
    /// `Ok(None)` when no snapshot has been written yet.
    fn load(&self) -> AppResult<Option<T>>;
    fn save(&self, value: &T) -> AppResult<()>;
}

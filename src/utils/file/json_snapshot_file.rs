use std::{
    fs::File,
    io::{ErrorKind, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::{
    interfaces::snapshot_storage::SnapshotStorage,
    middleware::error::{AppError, AppResult},
    utils::dir_utils::ensure_parent_dir_exists,
};

/// Pretty-printed JSON document rewritten in full on every save.
///
/// Writes go to `<file>.tmp` first and are renamed over the target once synced,
/// so a crash mid-write leaves the previous snapshot intact.
#[derive(Debug)]
pub struct JsonSnapshotFile<T> {
    path: PathBuf,
    _data: PhantomData<fn() -> T>,
}

impl<T> JsonSnapshotFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _data: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl<T: Serialize + DeserializeOwned> SnapshotStorage<T> for JsonSnapshotFile<T> {
    fn load(&self) -> AppResult<Option<T>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&content).map_err(|e| AppError::Serde {
            source: format!("{}: {e}", self.path.display()),
        })?;
        Ok(Some(value))
    }

    fn save(&self, value: &T) -> AppResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        ensure_parent_dir_exists(&self.path)?;

        let tmp_path = self.tmp_path();
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        debug!("->> snapshot written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::word_bank::WordBank;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonSnapshotFile::<WordBank>::new(dir.path().join("data.json"));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn save_replaces_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonSnapshotFile::<WordBank>::new(dir.path().join("nested/data.json"));

        let mut bank = WordBank::new();
        bank.insert("game".into(), vec!["마크".into(), "롤".into()]);
        storage.save(&bank).unwrap();

        bank.remove("game");
        bank.insert("food".into(), vec!["피자".into()]);
        storage.save(&bank).unwrap();

        assert_eq!(storage.load().unwrap(), Some(bank));
        assert!(!storage.tmp_path().exists());
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = JsonSnapshotFile::<WordBank>::new(&path);
        assert!(matches!(storage.load(), Err(AppError::Serde { .. })));
    }
}

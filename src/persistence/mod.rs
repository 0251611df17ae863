//! High score storage backends
//!
//! - `FileStore`: JSON file, written to a temp file then renamed over the target
//! - `MemoryStore`: in-process, optionally failing (tests, headless runs)
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::highscores::{HighScoreRecord, HighScoreStore};

/// High score kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> Result<Option<HighScoreRecord>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string(record)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High score {} saved to {}", record.high_score, self.path.display());
        Ok(())
    }
}

/// High score kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<HighScoreRecord>,
    /// Simulates unavailable storage: every load and save fails
    unavailable: bool,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: HighScoreRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn record(&self) -> Option<HighScoreRecord> {
        self.record
    }

    /// Number of successful saves
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<HighScoreRecord>> {
        if self.unavailable {
            return Err(Error::StorageUnavailable("memory store disabled".into()));
        }
        Ok(self.record)
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<()> {
        if self.unavailable {
            return Err(Error::StorageUnavailable("memory store disabled".into()));
        }
        self.record = Some(*record);
        self.saves += 1;
        Ok(())
    }
}

/// High score kept in browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    const STORAGE_KEY: &'static str = "po5_highscore";

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::StorageUnavailable("LocalStorage not accessible".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<HighScoreRecord>> {
        let storage = Self::storage()?;
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => Ok(Some(serde_json::from_str(&json)?)),
            Ok(None) => Ok(None),
            Err(_) => Err(Error::StorageUnavailable("LocalStorage read failed".into())),
        }
    }

    fn save(&mut self, record: &HighScoreRecord) -> Result<()> {
        let storage = Self::storage()?;
        let json = serde_json::to_string(record)?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| Error::StorageUnavailable("LocalStorage write failed".into()))?;
        log::info!("High score {} saved", record.high_score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("po5-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_missing_file_is_none() {
        let dir = scratch_dir("missing");
        let store = FileStore::new(dir.join("highscore.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = scratch_dir("save");
        let mut store = FileStore::new(dir.join("nested").join("highscore.json"));
        store.save(&HighScoreRecord::new(1234)).unwrap();
        assert_eq!(store.load().unwrap(), Some(HighScoreRecord::new(1234)));
        assert!(!store.tmp_path().exists());

        store.save(&HighScoreRecord::new(2000)).unwrap();
        assert_eq!(store.load().unwrap().map(|r| r.high_score), Some(2000));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = scratch_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("highscore.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(Error::Serde(_))));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::unavailable();
        assert!(store.load().is_err());
        assert!(store.save(&HighScoreRecord::new(1)).is_err());
        assert_eq!(store.saves(), 0);
        assert_eq!(store.record(), None);
    }
}

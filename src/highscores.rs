//! High score record
//!
//! A single integer survives between sessions. Where it is kept is up to the
//! [`HighScoreStore`] backend (see [`crate::persistence`]).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The persisted high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

impl HighScoreRecord {
    pub fn new(high_score: u64) -> Self {
        Self { high_score }
    }

    /// Check if a score beats this record
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.high_score
    }
}

/// Storage backend for the high score record
pub trait HighScoreStore: fmt::Debug {
    /// Load the stored record, `Ok(None)` if nothing has been saved yet
    fn load(&self) -> Result<Option<HighScoreRecord>>;

    /// Overwrite the stored record
    fn save(&mut self, record: &HighScoreRecord) -> Result<()>;
}

/// What the store held at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedHighScore {
    pub record: HighScoreRecord,
    /// `false` when a record may exist but could not be read. It must not be
    /// overwritten with a score that was never compared against it.
    pub writable: bool,
}

/// Load the stored high score, falling back to zero on any failure.
///
/// A missing or corrupt record may be replaced. Storage that could not be read
/// at all is left alone for the rest of the run.
pub fn load_or_default(store: &dyn HighScoreStore) -> LoadedHighScore {
    let (record, writable) = match store.load() {
        Ok(Some(record)) => {
            log::info!("Loaded high score {}", record.high_score);
            (record, true)
        }
        Ok(None) => {
            log::info!("No high score found, starting fresh");
            (HighScoreRecord::default(), true)
        }
        Err(Error::Serde(e)) => {
            log::warn!("Stored high score is corrupt, starting from 0: {e}");
            (HighScoreRecord::default(), true)
        }
        Err(e) => {
            log::warn!("Failed to load high score, starting from 0 without saving: {e}");
            (HighScoreRecord::default(), false)
        }
    };
    LoadedHighScore { record, writable }
}

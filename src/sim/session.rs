//! Score, high score and game-over bookkeeping for a session

use crate::highscores::{self, HighScoreRecord, HighScoreStore};

/// Outcome counters for the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub spawned: u32,
    pub generated: u32,
    pub overcome: u32,
    pub ascended: u32,
}

/// Result of a successful [`SessionState::add_score`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub score: u64,
    /// Set when this change raised the high score
    pub high_score: Option<u64>,
}

/// Session bookkeeping; `high_score` survives [`SessionState::reset_game`]
#[derive(Debug, Clone)]
pub struct SessionState {
    score: u64,
    high_score: u64,
    game_over: bool,
    /// High score when the session started, to tell whether it was beaten
    baseline: u64,
    /// Cleared when the stored record could not be read; nothing is saved then
    writable: bool,
    pub stats: SessionStats,
}

impl SessionState {
    pub fn new(high_score: u64) -> Self {
        Self {
            score: 0,
            high_score,
            game_over: false,
            baseline: high_score,
            writable: true,
            stats: SessionStats::default(),
        }
    }

    /// Start from the stored record; storage failures start from zero
    pub fn load(store: &dyn HighScoreStore) -> Self {
        let loaded = highscores::load_or_default(store);
        Self {
            writable: loaded.writable,
            ..Self::new(loaded.record.high_score)
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Whether this session has beaten the high score it started with
    pub fn is_new_record(&self) -> bool {
        HighScoreRecord::new(self.baseline).qualifies(self.score)
    }

    /// Add points. Ignored once the game is over.
    pub fn add_score(&mut self, amount: u64) -> Option<ScoreChange> {
        if self.game_over {
            return None;
        }
        self.score = self.score.saturating_add(amount);

        let mut change = ScoreChange {
            score: self.score,
            high_score: None,
        };
        if self.score > self.high_score {
            self.high_score = self.score;
            change.high_score = Some(self.high_score);
        }
        Some(change)
    }

    /// End the session, persisting a new record. Returns `false` if already over.
    ///
    /// A failed write is logged; the in-memory high score stays authoritative.
    pub fn trigger_game_over(&mut self, store: &mut dyn HighScoreStore) -> bool {
        if self.game_over {
            return false;
        }
        self.game_over = true;
        log::info!(
            "Game over: score {} (high score {})",
            self.score,
            self.high_score
        );

        if self.is_new_record() {
            log::info!("New high score: {}", self.high_score);
            if !self.writable {
                log::warn!("Stored high score was unreadable; not overwriting it");
            } else if let Err(e) = store.save(&HighScoreRecord::new(self.high_score)) {
                log::warn!("Failed to persist high score {}: {e}", self.high_score);
            }
        }
        true
    }

    /// Clear score and game-over for a new session
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.game_over = false;
        self.baseline = self.high_score;
        self.stats = SessionStats::default();
    }
}

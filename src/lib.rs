//! Po5 - A five-element physics merge game
//!
//! Core modules:
//! - `sim`: Deterministic rule engine (relations, ball lifecycle, scoring, danger)
//! - `persistence`: High score storage backends
//! - `highscores`: The persisted high score record
//! - `tuning`: Data-driven game balance
//!
//! Physics, rendering and audio playback live outside this crate. The physics
//! engine feeds body positions and contact pairs in through [`sim::TickInput`];
//! the presentation layer drains [`sim::GameEvent`]s after every tick.

pub mod error;
pub mod highscores;
pub mod persistence;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::{HighScoreRecord, HighScoreStore};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the physics step)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Score for a generating contact (subject feeds the target)
    pub const GENERATE_SCORE: u64 = 10;
    /// Score for an overcoming contact (subject destroys the target)
    pub const OVERCOME_SCORE: u64 = 50;
    /// Bonus for a ball ascending past the level cap
    pub const ASCENSION_BONUS: u64 = 100;
    /// Highest level a ball can hold; one more upgrade ascends it
    pub const MAX_LEVEL: u32 = 3;

    /// Minimum time between two accepted drops (seconds)
    pub const SPAWN_COOLDOWN: f32 = 0.5;
    /// Sustained danger-zone occupancy that ends the session (seconds)
    pub const DANGER_TIME_LIMIT: f32 = 2.0;
    /// Balls slower than this (px/s) count as settled in the danger zone
    pub const SETTLE_SPEED: f32 = 15.0;

    /// Exit animation length for a consumed ball (seconds)
    pub const DEATH_EXIT_DURATION: f32 = 0.15;
    /// Exit animation length for an ascending ball (seconds)
    pub const ASCENSION_EXIT_DURATION: f32 = 0.3;

    /// Container dimensions (y grows downward)
    pub const CONTAINER_WIDTH: f32 = 720.0;
    pub const CONTAINER_HEIGHT: f32 = 1280.0;
    /// Height at which new balls are dropped
    pub const SPAWN_HEIGHT: f32 = 100.0;
    /// Default danger band just below the spawn height
    pub const DANGER_LINE_TOP: f32 = 160.0;
    pub const DANGER_LINE_BOTTOM: f32 = 200.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 32.0;
}

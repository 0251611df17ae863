//! Notifications for the presentation and audio layers
//!
//! Fire-and-forget: the simulation queues them during a tick and the host
//! drains them with [`super::GameState::drain_events`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::state::BallId;

/// Cue tags for the audio/animation collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Generating contact: subject consumed, target promoted
    Generate,
    /// Overcoming contact: target destroyed
    Overcome,
    /// Ball ascended past the level cap
    Ascend,
    /// Session ended
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Generate => "generate",
            SoundCue::Overcome => "overcome",
            SoundCue::Ascend => "ascend",
            SoundCue::GameOver => "game_over",
        }
    }
}

/// How a ball leaves the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitKind {
    /// Consumed by a generating or overcoming contact
    Death,
    /// Promoted past the level cap
    Ascension,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    HighScoreChanged(u64),
    GameEnded { score: u64, new_record: bool },
    NextElementChanged(Element),
    /// Spawn cooldown elapsed
    SpawnReady,
    BallSpawned { id: BallId, element: Element, pos: Vec2 },
    BallLeveled { id: BallId, level: u32 },
    /// Ball stopped colliding; play its exit for `duration` seconds
    ExitRequested { id: BallId, kind: ExitKind, duration: f32 },
    /// Exit elapsed and the ball left the arena
    BallRemoved { id: BallId },
    Cue(SoundCue),
}

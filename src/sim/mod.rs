//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No physics, rendering or platform dependencies

pub mod danger;
pub mod element;
pub mod event;
pub mod lifecycle;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use danger::{DangerMonitor, DangerStatus, DangerZone};
pub use element::{ELEMENT_COUNT, Element, Relation, compare};
pub use event::{ExitKind, GameEvent, SoundCue};
pub use lifecycle::{ContactOutcome, UpgradeOutcome};
pub use session::{ScoreChange, SessionState, SessionStats};
pub use spawn::SpawnScheduler;
pub use state::{Ball, BallId, BallPhase, GamePhase, GameState};
pub use tick::{BodySync, TickInput, tick};

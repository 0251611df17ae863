//! Game state and core simulation types
//!
//! `GameState` is the single owner of every ball and of the per-session
//! components. The physics engine only ever refers to balls by [`BallId`].

use glam::Vec2;

use super::danger::DangerMonitor;
use super::element::Element;
use super::event::{ExitKind, GameEvent};
use super::session::SessionState;
use super::spawn::SpawnScheduler;
use crate::error::Result;
use crate::highscores::HighScoreStore;
use crate::tuning::Tuning;

pub type BallId = u32;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Session ended; waiting for a reset
    GameOver,
}

/// Ball lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallPhase {
    /// Eligible for rule resolution (unless inert)
    Active,
    /// Collision disabled; removed once the exit animation has played
    Dying { kind: ExitKind, remaining: f32 },
}

/// An element ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: BallId,
    pub(crate) element: Element,
    pub(crate) level: u32,
    /// Set once terminal resolution begins; never cleared
    pub(crate) processed: bool,
    /// Pre-placed ball that never takes part in rule resolution
    pub(crate) inert: bool,
    pub(crate) phase: BallPhase,
    /// Set by the first body sync; until then `pos`/`vel` are only the drop values
    pub(crate) synced: bool,
    /// Owned by the physics engine, mirrored here each tick
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(id: BallId, element: Element, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            element,
            level: 0,
            processed: false,
            inert: false,
            phase: BallPhase::Active,
            synced: false,
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    /// Whether the physics engine has reported this body yet
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Whether the physics engine should still collide this body
    pub fn is_collidable(&self) -> bool {
        !self.processed
    }

    /// Whether this ball may take part in rule resolution
    pub fn can_resolve(&self) -> bool {
        !self.processed && !self.inert
    }

    /// Count down the exit animation. Returns `true` once it has elapsed.
    pub(crate) fn advance_exit(&mut self, dt: f32) -> bool {
        match &mut self.phase {
            BallPhase::Active => false,
            BallPhase::Dying { remaining, .. } => {
                *remaining -= dt;
                *remaining <= 0.0
            }
        }
    }
}

/// Complete simulation context
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub tuning: Tuning,
    /// Balls in the arena (sorted by id for determinism)
    pub balls: Vec<Ball>,
    pub session: SessionState,
    pub spawner: SpawnScheduler,
    pub danger: DangerMonitor,
    store: Box<dyn HighScoreStore>,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: BallId,
}

impl GameState {
    /// Create a new game state; the high score is read from `store`.
    ///
    /// Fails with [`crate::Error::InvalidTuning`] if `tuning` does not validate.
    pub fn new(seed: u64, tuning: Tuning, store: Box<dyn HighScoreStore>) -> Result<Self> {
        tuning.validate()?;
        let session = SessionState::load(store.as_ref());
        let spawner = SpawnScheduler::new(seed, tuning.spawn_cooldown);
        let danger = DangerMonitor::new(
            tuning.danger_zone,
            tuning.danger_time_limit,
            tuning.settle_speed,
        );
        log::info!("New game (seed {seed}, high score {})", session.high_score());

        Ok(Self {
            seed,
            time_ticks: 0,
            phase: GamePhase::Playing,
            tuning,
            balls: Vec::new(),
            session,
            spawner,
            danger,
            store,
            events: Vec::new(),
            next_id: 1,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> BallId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.index_of(id).map(|i| &self.balls[i])
    }

    pub(crate) fn index_of(&self, id: BallId) -> Option<usize> {
        self.balls.binary_search_by_key(&id, |b| b.id).ok()
    }

    /// Element the next drop will use (for the preview)
    pub fn next_element(&self) -> Element {
        self.spawner.next_element()
    }

    /// Normalized danger level in [0, 1]
    pub fn danger_level(&self) -> f32 {
        self.danger.risk_level()
    }

    /// Take all notifications queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drop a ball at horizontal position `x`.
    ///
    /// Rejected while the spawn cooldown runs or the game is not being played.
    pub fn request_spawn(&mut self, x: f32) -> Option<(BallId, Element)> {
        let session_over = self.session.is_game_over() || self.phase != GamePhase::Playing;
        let element = self.spawner.request_spawn(session_over)?;

        let r = self.tuning.ball_radius;
        // `tuning` is public, so avoid `clamp`'s min <= max panic if it was edited
        let x = x.min(self.tuning.container_width - r).max(r);
        let pos = Vec2::new(x, self.tuning.spawn_height);

        let id = self.next_entity_id();
        self.balls.push(Ball::new(id, element, pos, r));
        self.session.stats.spawned += 1;

        let preview = self.spawner.next_element();
        self.push_event(GameEvent::BallSpawned { id, element, pos });
        self.push_event(GameEvent::NextElementChanged(preview));
        log::debug!("Spawned {element} ball {id} at x={x:.1}");
        Some((id, element))
    }

    /// Place an inert ball that never takes part in rule resolution
    pub fn place_inert(&mut self, element: Element, pos: Vec2) -> BallId {
        let id = self.next_entity_id();
        let mut ball = Ball::new(id, element, pos, self.tuning.ball_radius);
        ball.inert = true;
        self.balls.push(ball);
        id
    }

    /// Mirror a body's position and velocity from the physics engine
    pub fn sync_body(&mut self, id: BallId, pos: Vec2, vel: Vec2) {
        if let Some(i) = self.index_of(id) {
            let ball = &mut self.balls[i];
            ball.pos = pos;
            ball.vel = vel;
            ball.synced = true;
        }
    }

    /// Add points and queue the matching notifications
    pub(crate) fn award(&mut self, amount: u64) {
        if let Some(change) = self.session.add_score(amount) {
            self.push_event(GameEvent::ScoreChanged(change.score));
            if let Some(high) = change.high_score {
                self.push_event(GameEvent::HighScoreChanged(high));
            }
        }
    }

    /// End the session. Idempotent.
    pub fn trigger_game_over(&mut self) {
        if !self.session.trigger_game_over(self.store.as_mut()) {
            return;
        }
        self.phase = GamePhase::GameOver;
        let ended = GameEvent::GameEnded {
            score: self.session.score(),
            new_record: self.session.is_new_record(),
        };
        self.push_event(ended);
        self.push_event(GameEvent::Cue(super::SoundCue::GameOver));
    }

    /// Start a new session: clear the arena, score and timers; keep the high score
    pub fn reset_game(&mut self) {
        self.session.reset_game();
        self.danger.reset();
        self.spawner.reset();
        self.balls.clear();
        self.phase = GamePhase::Playing;
        log::info!("Session reset (high score {})", self.session.high_score());

        let preview = self.spawner.next_element();
        self.push_event(GameEvent::ScoreChanged(0));
        self.push_event(GameEvent::NextElementChanged(preview));
    }

    /// Ensure balls are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.balls.sort_by_key(|b| b.id);
    }
}

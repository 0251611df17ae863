//! Fixed timestep simulation tick
//!
//! Order within a step: body sync, contact resolution, spawn cooldown and
//! drop request, exit sweep, then the danger check.

use glam::Vec2;

use super::danger::DangerStatus;
use super::event::GameEvent;
use super::state::{BallId, GamePhase, GameState};

/// Position and velocity of one body, as reported by the physics engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySync {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Drop request at this horizontal position (tap/click)
    pub spawn_x: Option<f32>,
    /// Body overlaps reported since the last tick, in event order
    pub contacts: Vec<(BallId, BallId)>,
    /// Latest body state from the physics engine
    pub bodies: Vec<BodySync>,
    /// Pause toggle
    pub pause: bool,
    /// Start a new session
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.reset_game();
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    for body in &input.bodies {
        state.sync_body(body.id, body.pos, body.vel);
    }

    for &(a, b) in &input.contacts {
        state.resolve_contact(a, b);
    }

    if state.spawner.advance(dt) {
        state.push_event(GameEvent::SpawnReady);
    }
    if let Some(x) = input.spawn_x {
        state.request_spawn(x);
    }

    sweep_exits(state, dt);

    let session_over = state.session.is_game_over();
    match state.danger.update(state.balls.iter(), dt, session_over) {
        DangerStatus::Expired => state.trigger_game_over(),
        DangerStatus::Disabled
        | DangerStatus::Clear
        | DangerStatus::Rising
        | DangerStatus::Idle => {}
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Remove balls whose exit animation has elapsed
fn sweep_exits(state: &mut GameState, dt: f32) {
    let mut removed: Vec<BallId> = Vec::new();
    state.balls.retain_mut(|ball| {
        if ball.advance_exit(dt) {
            removed.push(ball.id);
            false
        } else {
            true
        }
    });
    for id in removed {
        state.push_event(GameEvent::BallRemoved { id });
    }
}

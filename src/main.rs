//! Po5 headless runner
//!
//! Plays one seeded session with a toy stacking model standing in for the
//! physics engine, and logs what the rule engine decides.
//!
//! Environment:
//! - `PO5_SEED`: run seed (default 2024)
//! - `PO5_TUNING`: path to a tuning JSON file (defaults otherwise)
//! - `RUST_LOG`: log filter, e.g. `RUST_LOG=debug`

#[cfg(not(target_arch = "wasm32"))]
mod toy {
    use std::collections::HashSet;

    use glam::Vec2;
    use po5::consts::CONTAINER_HEIGHT;
    use po5::sim::{BallId, BodySync, GameState};

    const GRAVITY: f32 = 980.0;

    struct Body {
        id: BallId,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
    }

    /// Balls fall straight down and rest on the floor or on whatever they hit
    #[derive(Default)]
    pub struct ToyPhysics {
        bodies: Vec<Body>,
        touching: HashSet<(BallId, BallId)>,
    }

    impl ToyPhysics {
        pub fn add(&mut self, id: BallId, pos: Vec2, radius: f32) {
            self.bodies.push(Body {
                id,
                pos,
                vel: Vec2::ZERO,
                radius,
            });
        }

        /// Advance bodies; returns their new state and newly started contacts
        pub fn step(&mut self, state: &GameState, dt: f32) -> (Vec<BodySync>, Vec<(BallId, BallId)>) {
            self.bodies
                .retain(|b| state.ball(b.id).is_some_and(|ball| ball.is_collidable()));

            for body in &mut self.bodies {
                body.vel.y += GRAVITY * dt;
                body.pos += body.vel * dt;
                if body.pos.y + body.radius >= CONTAINER_HEIGHT {
                    body.pos.y = CONTAINER_HEIGHT - body.radius;
                    body.vel = Vec2::ZERO;
                }
            }

            let mut contacts = Vec::new();
            let mut now_touching = HashSet::new();
            for i in 0..self.bodies.len() {
                for j in (i + 1)..self.bodies.len() {
                    let (lo, hi) = self.bodies.split_at_mut(j);
                    let (a, b) = (&mut lo[i], &mut hi[0]);
                    let delta = b.pos - a.pos;
                    let reach = a.radius + b.radius;
                    if delta.length_squared() > reach * reach {
                        continue;
                    }

                    let pair = (a.id.min(b.id), a.id.max(b.id));
                    if !self.touching.contains(&pair) {
                        contacts.push((a.id, b.id));
                    }
                    now_touching.insert(pair);

                    // The upper ball comes to rest on the lower one
                    let normal = delta.try_normalize().unwrap_or(Vec2::Y);
                    let push = reach - delta.length();
                    if a.pos.y < b.pos.y {
                        a.pos -= normal * push;
                        a.vel = Vec2::ZERO;
                    } else {
                        b.pos += normal * push;
                        b.vel = Vec2::ZERO;
                    }
                }
            }
            self.touching = now_touching;

            let bodies = self
                .bodies
                .iter()
                .map(|b| BodySync {
                    id: b.id,
                    pos: b.pos,
                    vel: b.vel,
                })
                .collect();
            (bodies, contacts)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use po5::Tuning;
    use po5::consts::*;
    use po5::persistence::FileStore;
    use po5::sim::{GameEvent, GameState, TickInput, tick};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    env_logger::init();
    log::info!("Po5 (headless) starting...");

    let seed = std::env::var("PO5_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    let tuning = match std::env::var("PO5_TUNING") {
        Ok(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring tuning file {path}: {e}");
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };
    let store = FileStore::new(std::env::temp_dir().join("po5").join("highscore.json"));

    let width = tuning.container_width;
    let mut state = match GameState::new(seed, tuning, Box::new(store)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start a session: {e}");
            std::process::exit(1);
        }
    };
    let mut physics = toy::ToyPhysics::default();
    let mut taps = Pcg32::seed_from_u64(seed ^ 0x5EED);

    // Three minutes of play at most
    let max_ticks = (180.0 / SIM_DT) as u64;
    let mut input = TickInput::default();
    for t in 0..max_ticks {
        if t % 45 == 0 {
            input.spawn_x = Some(taps.random_range(0.0..width));
        }
        tick(&mut state, &input, SIM_DT);
        input = TickInput::default();

        for event in state.drain_events() {
            match event {
                GameEvent::BallSpawned { id, element, pos } => {
                    log::debug!("drop {element} #{id} at {:.0}", pos.x);
                    if let Some(ball) = state.ball(id) {
                        physics.add(id, pos, ball.radius);
                    }
                }
                GameEvent::Cue(cue) => log::debug!("cue: {}", cue.as_str()),
                GameEvent::HighScoreChanged(high) => log::debug!("high score {high}"),
                GameEvent::GameEnded { score, new_record } => {
                    log::info!("Game ended with {score} points (new record: {new_record})");
                }
                _ => {}
            }
        }
        if state.session.is_game_over() {
            break;
        }

        let (bodies, contacts) = physics.step(&state, SIM_DT);
        input.bodies = bodies;
        input.contacts = contacts;
    }

    let stats = &state.session.stats;
    println!(
        "score {} | high score {} | drops {} | generate {} | overcome {} | ascend {} | {:.1}s",
        state.session.score(),
        state.session.high_score(),
        stats.spawned,
        stats.generated,
        stats.overcome,
        stats.ascended,
        state.time_ticks as f32 * SIM_DT,
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Po5 core loaded; the host page drives GameState through the library API");
}

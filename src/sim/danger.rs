//! Danger-line monitor
//!
//! Each step the monitor scans the balls overlapping its zone. A ball counts
//! only once it has settled (speed below the threshold), so balls falling
//! through the zone on their way down never start the clock. Balls the
//! physics engine has not reported yet are skipped as well. The timer
//! accumulates while any settled ball is present and snaps back to zero on the
//! first step without one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Ball;

/// Axis-aligned monitored region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerZone {
    pub min: Vec2,
    pub max: Vec2,
}

impl DangerZone {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Whether a circle at `pos` overlaps the zone
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        let closest = pos.clamp(self.min, self.max);
        closest.distance_squared(pos) <= radius * radius
    }
}

/// What the monitor concluded this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerStatus {
    /// No zone configured
    Disabled,
    /// No settled ball in the zone; timer is zero
    Clear,
    /// Settled ball present; timer running
    Rising,
    /// Time limit reached this step (reported once per session)
    Expired,
    /// Session already over; nothing to do
    Idle,
}

#[derive(Debug, Clone)]
pub struct DangerMonitor {
    zone: Option<DangerZone>,
    time_limit: f32,
    settle_speed: f32,
    risk_timer: f32,
    fired: bool,
}

impl DangerMonitor {
    pub fn new(zone: Option<DangerZone>, time_limit: f32, settle_speed: f32) -> Self {
        if zone.is_none() {
            log::warn!("No danger zone configured - danger detection disabled");
        }
        Self {
            zone,
            time_limit,
            settle_speed,
            risk_timer: 0.0,
            fired: false,
        }
    }

    pub fn zone(&self) -> Option<&DangerZone> {
        self.zone.as_ref()
    }

    /// Seconds of continuous settled occupancy
    pub fn risk_timer(&self) -> f32 {
        self.risk_timer
    }

    /// Normalized risk in [0, 1] for presentation
    pub fn risk_level(&self) -> f32 {
        if self.time_limit <= 0.0 {
            return 0.0;
        }
        (self.risk_timer / self.time_limit).clamp(0.0, 1.0)
    }

    /// Advance one step
    pub fn update<'a>(
        &mut self,
        balls: impl IntoIterator<Item = &'a Ball>,
        dt: f32,
        session_over: bool,
    ) -> DangerStatus {
        if session_over || self.fired {
            return DangerStatus::Idle;
        }
        let Some(zone) = self.zone else {
            self.risk_timer = 0.0;
            return DangerStatus::Disabled;
        };

        let occupied = balls.into_iter().any(|b| self.qualifies(&zone, b));
        if !occupied {
            self.risk_timer = 0.0;
            return DangerStatus::Clear;
        }

        self.risk_timer += dt;
        if self.risk_timer >= self.time_limit {
            self.fired = true;
            log::info!("Danger line held for {:.2}s", self.risk_timer);
            DangerStatus::Expired
        } else {
            DangerStatus::Rising
        }
    }

    /// Clear the timer for a new session
    pub fn reset(&mut self) {
        self.risk_timer = 0.0;
        self.fired = false;
    }

    fn qualifies(&self, zone: &DangerZone, ball: &Ball) -> bool {
        !ball.is_processed()
            && ball.is_synced()
            && ball.speed() < self.settle_speed
            && zone.overlaps(ball.pos, ball.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Element;
    use proptest::prelude::*;

    const DT: f32 = 0.1;
    const EMPTY: [Ball; 0] = [];

    fn zone() -> DangerZone {
        DangerZone::new(Vec2::new(0.0, 100.0), Vec2::new(500.0, 150.0))
    }

    fn monitor() -> DangerMonitor {
        DangerMonitor::new(Some(zone()), 1.0, 10.0)
    }

    fn ball_at(id: u32, y: f32, speed: f32) -> Ball {
        let mut ball = Ball::new(id, Element::Wood, Vec2::new(250.0, y), 20.0);
        ball.vel = Vec2::new(0.0, speed);
        ball.synced = true;
        ball
    }

    #[test]
    fn test_zone_overlap_uses_radius() {
        let z = zone();
        assert!(z.overlaps(Vec2::new(250.0, 125.0), 1.0));
        assert!(z.overlaps(Vec2::new(250.0, 90.0), 15.0));
        assert!(!z.overlaps(Vec2::new(250.0, 60.0), 15.0));
    }

    #[test]
    fn test_settled_ball_accumulates() {
        let mut m = monitor();
        let balls = [ball_at(1, 125.0, 0.0)];
        assert_eq!(m.update(&balls, DT, false), DangerStatus::Rising);
        assert_eq!(m.update(&balls, DT, false), DangerStatus::Rising);
        assert!((m.risk_timer() - 0.2).abs() < 1e-5);
        assert!((m.risk_level() - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_falling_ball_does_not_count() {
        let mut m = monitor();
        let balls = [ball_at(1, 125.0, 400.0)];
        assert_eq!(m.update(&balls, DT, false), DangerStatus::Clear);
        assert_eq!(m.risk_timer(), 0.0);
    }

    #[test]
    fn test_unsynced_ball_does_not_count() {
        let mut m = monitor();
        // Just dropped: zero velocity, but the physics engine has not moved it yet
        let ball = Ball::new(1, Element::Wood, Vec2::new(250.0, 125.0), 20.0);
        assert_eq!(m.update([&ball], DT, false), DangerStatus::Clear);
        assert_eq!(m.risk_timer(), 0.0);
    }

    #[test]
    fn test_processed_ball_does_not_count() {
        let mut m = monitor();
        let mut ball = ball_at(1, 125.0, 0.0);
        ball.processed = true;
        assert_eq!(m.update([&ball], DT, false), DangerStatus::Clear);
    }

    #[test]
    fn test_inert_ball_counts() {
        let mut m = monitor();
        let mut ball = ball_at(1, 125.0, 0.0);
        ball.inert = true;
        assert_eq!(m.update([&ball], DT, false), DangerStatus::Rising);
    }

    #[test]
    fn test_absence_resets_timer() {
        let mut m = monitor();
        let present = [ball_at(1, 125.0, 0.0)];
        for _ in 0..5 {
            m.update(&present, DT, false);
        }
        assert!(m.risk_timer() > 0.4);
        assert_eq!(m.update(&EMPTY, DT, false), DangerStatus::Clear);
        assert_eq!(m.risk_timer(), 0.0);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut m = monitor();
        let balls = [ball_at(1, 125.0, 0.0)];
        let statuses: Vec<_> = (0..30).map(|_| m.update(&balls, DT, false)).collect();
        let expired = statuses.iter().filter(|s| **s == DangerStatus::Expired).count();
        assert_eq!(expired, 1);
        // 10 steps of 0.1 reach the 1.0 limit (allow one step of float slack)
        let first = statuses.iter().position(|s| *s == DangerStatus::Expired).unwrap();
        assert!(first == 9 || first == 10, "expired at step {first}");
    }

    #[test]
    fn test_idle_when_session_over() {
        let mut m = monitor();
        let balls = [ball_at(1, 125.0, 0.0)];
        assert_eq!(m.update(&balls, DT, true), DangerStatus::Idle);
        assert_eq!(m.risk_timer(), 0.0);
    }

    #[test]
    fn test_missing_zone_disables_detection() {
        let mut m = DangerMonitor::new(None, 1.0, 10.0);
        let balls = [ball_at(1, 125.0, 0.0)];
        for _ in 0..50 {
            assert_eq!(m.update(&balls, DT, false), DangerStatus::Disabled);
        }
        assert_eq!(m.risk_level(), 0.0);
    }

    #[test]
    fn test_reset_rearms() {
        let mut m = monitor();
        let balls = [ball_at(1, 125.0, 0.0)];
        while m.update(&balls, DT, false) != DangerStatus::Expired {}
        assert_eq!(m.update(&balls, DT, false), DangerStatus::Idle);
        m.reset();
        assert_eq!(m.risk_timer(), 0.0);
        assert_eq!(m.update(&balls, DT, false), DangerStatus::Rising);
    }

    proptest! {
        #[test]
        fn prop_empty_step_zeroes_timer(steps in prop::collection::vec(any::<bool>(), 1..40)) {
            let mut m = DangerMonitor::new(Some(zone()), 1000.0, 10.0);
            let balls = [ball_at(1, 125.0, 0.0)];
            for occupied in steps {
                if occupied {
                    m.update(&balls, DT, false);
                    prop_assert!(m.risk_timer() > 0.0);
                } else {
                    m.update(&EMPTY, DT, false);
                    prop_assert_eq!(m.risk_timer(), 0.0);
                }
                prop_assert!((0.0..=1.0).contains(&m.risk_level()));
            }
        }
    }
}

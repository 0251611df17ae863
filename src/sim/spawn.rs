//! Drop scheduling: next-element preview and the cooldown between drops

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::element::Element;

/// Keeps the upcoming element one drop ahead and rate-limits drops
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    next_element: Element,
    spawn_allowed: bool,
    cooldown_remaining: f32,
    cooldown: f32,
    rng: Pcg32,
}

impl SpawnScheduler {
    pub fn new(seed: u64, cooldown: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let next_element = draw(&mut rng);
        Self {
            next_element,
            spawn_allowed: true,
            cooldown_remaining: 0.0,
            cooldown,
            rng,
        }
    }

    /// Element the next accepted drop will use
    pub fn next_element(&self) -> Element {
        self.next_element
    }

    pub fn spawn_allowed(&self) -> bool {
        self.spawn_allowed
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Accept a drop if allowed, returning the element to spawn.
    ///
    /// On acceptance a fresh preview element is drawn and the cooldown starts.
    pub fn request_spawn(&mut self, session_over: bool) -> Option<Element> {
        if !self.spawn_allowed || session_over {
            return None;
        }
        let element = self.next_element;
        self.next_element = draw(&mut self.rng);
        self.spawn_allowed = false;
        self.cooldown_remaining = self.cooldown;
        Some(element)
    }

    /// Advance the cooldown. Returns `true` on the step drops become allowed again.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.spawn_allowed {
            return false;
        }
        self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        if self.cooldown_remaining <= 0.0 {
            self.spawn_allowed = true;
            return true;
        }
        false
    }

    /// Allow drops immediately; the preview element is kept
    pub fn reset(&mut self) {
        self.spawn_allowed = true;
        self.cooldown_remaining = 0.0;
    }
}

fn draw(rng: &mut Pcg32) -> Element {
    Element::ALL[rng.random_range(0..Element::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_rejected_during_cooldown() {
        let mut spawner = SpawnScheduler::new(7, 0.5);
        let preview = spawner.next_element();

        assert_eq!(spawner.request_spawn(false), Some(preview));
        assert!(!spawner.spawn_allowed());
        assert_eq!(spawner.request_spawn(false), None);

        // Still cooling down after 0.3s
        assert!(!spawner.advance(0.3));
        assert_eq!(spawner.request_spawn(false), None);

        assert!(spawner.advance(0.3));
        assert!(spawner.spawn_allowed());
        assert!(spawner.request_spawn(false).is_some());
    }

    #[test]
    fn test_accepted_drop_uses_previewed_element() {
        let mut spawner = SpawnScheduler::new(99, 0.0);
        for _ in 0..20 {
            let preview = spawner.next_element();
            assert_eq!(spawner.request_spawn(false), Some(preview));
            spawner.advance(0.016);
        }
    }

    #[test]
    fn test_rejected_when_session_over() {
        let mut spawner = SpawnScheduler::new(1, 0.5);
        let preview = spawner.next_element();
        assert_eq!(spawner.request_spawn(true), None);
        assert!(spawner.spawn_allowed());
        assert_eq!(spawner.next_element(), preview);
    }

    #[test]
    fn test_zero_cooldown_still_blocks_same_step() {
        let mut spawner = SpawnScheduler::new(3, 0.0);
        assert!(spawner.request_spawn(false).is_some());
        assert_eq!(spawner.request_spawn(false), None);
        assert!(spawner.advance(0.016));
        assert!(spawner.request_spawn(false).is_some());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SpawnScheduler::new(2024, 0.0);
        let mut b = SpawnScheduler::new(2024, 0.0);
        for _ in 0..50 {
            assert_eq!(a.request_spawn(false), b.request_spawn(false));
            a.advance(1.0);
            b.advance(1.0);
        }
    }

    #[test]
    fn test_draws_cover_all_elements() {
        let mut spawner = SpawnScheduler::new(5, 0.0);
        let mut seen = [false; 5];
        for _ in 0..500 {
            if let Some(e) = spawner.request_spawn(false) {
                seen[e.ordinal() as usize] = true;
            }
            spawner.advance(1.0);
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_reset_allows_immediate_drop() {
        let mut spawner = SpawnScheduler::new(11, 5.0);
        spawner.request_spawn(false);
        spawner.reset();
        assert!(spawner.spawn_allowed());
        assert_eq!(spawner.cooldown_remaining(), 0.0);
    }
}

//! Ball lifecycle: contact resolution, death, promotion and ascension
//!
//! A contact is resolved once, synchronously, inside a single call. Every
//! terminal transition sets `processed` and disables collision before anything
//! else can observe the ball, so a contact re-reported later in the same step
//! hits the guards and does nothing.

use super::element::{Relation, compare};
use super::event::{ExitKind, GameEvent, SoundCue};
use super::state::{BallId, BallPhase, GameState};

/// What a contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// A guard rejected the contact (processed, inert, unknown or self contact)
    Ignored,
    /// Same or unrelated elements: plain physical bounce
    Bounce(Relation),
    /// Subject fed itself to the target
    Generated {
        consumed: BallId,
        promoted: BallId,
        ascended: bool,
    },
    /// Subject destroyed the target
    Overcame { victor: BallId, consumed: BallId },
}

/// Result of promoting a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Ball was processed, inert or unknown
    Ignored,
    LevelUp(u32),
    /// Already at the level cap: the ball ascended instead
    Ascended,
}

impl GameState {
    /// Resolve an unordered contact between `a` and `b`.
    ///
    /// The pair is oriented so the subject is the ball whose element acts on
    /// the other (generates or overcomes it). For two different elements
    /// exactly one orientation acts, so the outcome never depends on which
    /// body the physics engine reported first.
    pub fn resolve_contact(&mut self, a: BallId, b: BallId) -> ContactOutcome {
        let (Some(ea), Some(eb)) = (
            self.ball(a).map(|ball| ball.element),
            self.ball(b).map(|ball| ball.element),
        ) else {
            return ContactOutcome::Ignored;
        };

        if compare(eb, ea).is_action() {
            self.on_collision(b, a)
        } else {
            self.on_collision(a, b)
        }
    }

    /// Resolve a contact from `subject`'s point of view only.
    pub fn on_collision(&mut self, subject: BallId, other: BallId) -> ContactOutcome {
        if subject == other {
            return ContactOutcome::Ignored;
        }
        let (Some(si), Some(oi)) = (self.index_of(subject), self.index_of(other)) else {
            return ContactOutcome::Ignored;
        };

        let (me, them) = (&self.balls[si], &self.balls[oi]);
        if me.processed || me.inert || them.processed || them.inert {
            return ContactOutcome::Ignored;
        }
        let (mine, theirs) = (me.element, them.element);
        let counting = !self.session.is_game_over();

        match compare(mine, theirs) {
            Relation::Generating => {
                log::debug!("[generate] {mine} #{subject} -> {theirs} #{other}");
                if counting {
                    self.session.stats.generated += 1;
                }
                self.push_event(GameEvent::Cue(SoundCue::Generate));
                let points = self.tuning.generate_score;
                self.award(points);

                self.kill(si, ExitKind::Death);
                let ascended = self.promote(oi) == UpgradeOutcome::Ascended;
                ContactOutcome::Generated {
                    consumed: subject,
                    promoted: other,
                    ascended,
                }
            }
            Relation::Overcoming => {
                log::debug!("[overcome] {mine} #{subject} -> {theirs} #{other}");
                if counting {
                    self.session.stats.overcome += 1;
                }
                self.push_event(GameEvent::Cue(SoundCue::Overcome));
                let points = self.tuning.overcome_score;
                self.award(points);

                self.kill(oi, ExitKind::Death);
                ContactOutcome::Overcame {
                    victor: subject,
                    consumed: other,
                }
            }
            relation @ (Relation::Same | Relation::None) => ContactOutcome::Bounce(relation),
        }
    }

    /// Consume a ball. Returns `false` if it was already processed, inert or unknown.
    pub fn die(&mut self, id: BallId) -> bool {
        match self.index_of(id) {
            Some(i) if self.balls[i].can_resolve() => {
                self.kill(i, ExitKind::Death);
                true
            }
            _ => false,
        }
    }

    /// Promote a ball by one level, ascending it past the cap.
    pub fn upgrade(&mut self, id: BallId) -> UpgradeOutcome {
        match self.index_of(id) {
            Some(i) => self.promote(i),
            None => UpgradeOutcome::Ignored,
        }
    }

    fn promote(&mut self, i: usize) -> UpgradeOutcome {
        let max_level = self.tuning.max_level;
        let ball = &mut self.balls[i];
        if !ball.can_resolve() {
            return UpgradeOutcome::Ignored;
        }
        if ball.level >= max_level {
            self.ascend(i);
            return UpgradeOutcome::Ascended;
        }

        ball.level += 1;
        let (id, level) = (ball.id, ball.level);
        self.push_event(GameEvent::BallLeveled { id, level });
        UpgradeOutcome::LevelUp(level)
    }

    fn ascend(&mut self, i: usize) {
        let id = self.balls[i].id;
        log::debug!("[ascend] #{id}");
        if !self.session.is_game_over() {
            self.session.stats.ascended += 1;
        }
        self.kill(i, ExitKind::Ascension);
        self.push_event(GameEvent::Cue(SoundCue::Ascend));
        let bonus = self.tuning.ascension_bonus;
        self.award(bonus);
    }

    /// Terminal transition: mark processed, stop colliding, request the exit
    fn kill(&mut self, i: usize, kind: ExitKind) {
        let duration = match kind {
            ExitKind::Death => self.tuning.death_exit_duration,
            ExitKind::Ascension => self.tuning.ascension_exit_duration,
        };
        let ball = &mut self.balls[i];
        ball.processed = true;
        ball.phase = BallPhase::Dying {
            kind,
            remaining: duration,
        };
        let id = ball.id;
        self.push_event(GameEvent::ExitRequested { id, kind, duration });
    }
}

//! Rule validators: one module per rule of the SSL rulebook subset.
//!
//! A validator is a small state machine fed one snapshot per tick. All
//! private state (cooldowns, one-shot flags, interference timers) is
//! cleared only by `reset`, which the scheduler calls when the validator
//! re-enters the eligible set on a phase change.

mod aimless_kick;
mod attacker_double_touched_ball;
mod attacker_in_defense_area;
mod attacker_too_close_to_defense_area;
mod ball_left_goal_line;
mod ball_left_touch_line;
mod bot_crashing;
mod bot_dribbled_ball_too_far;
mod bot_interfered_placement;
mod bot_kicked_ball_too_fast;
mod bot_too_fast_in_stop;
mod boundary_crossing;
mod defender_in_defense_area;
mod defender_too_close_to_kick_point;
mod penalty_kick_failed;
mod placement_succeeded;
mod possible_goal;

pub use aimless_kick::AimlessKick;
pub use attacker_double_touched_ball::AttackerDoubleTouchedBall;
pub use attacker_in_defense_area::AttackerInDefenseArea;
pub use attacker_too_close_to_defense_area::AttackerTooCloseToDefenseArea;
pub use ball_left_goal_line::BallLeftGoalLine;
pub use ball_left_touch_line::BallLeftTouchLine;
pub use bot_crashing::BotCrashing;
pub use bot_dribbled_ball_too_far::BotDribbledBallTooFar;
pub use bot_interfered_placement::BotInterferedPlacement;
pub use bot_kicked_ball_too_fast::BotKickedBallTooFast;
pub use bot_too_fast_in_stop::BotTooFastInStop;
pub use boundary_crossing::BoundaryCrossing;
pub use defender_in_defense_area::DefenderInDefenseArea;
pub use defender_too_close_to_kick_point::DefenderTooCloseToKickPoint;
pub use penalty_kick_failed::PenaltyKickFailed;
pub use placement_succeeded::PlacementSucceeded;
pub use possible_goal::PossibleGoal;

use crate::violation::Violation;
use crate::world::GameSnapshot;
use std::collections::HashMap;
use std::hash::Hash;

/// Default re-report suppression window, seconds.
pub const GRACE_PERIOD: f64 = 2.0;

/// One rule. `validate` runs once per tick while the validator is in the
/// scheduler's eligible set and returns at most one violation.
pub trait RuleValidator: Send {
    /// Stable identifier used for scheduling, logging, and deactivation.
    fn name(&self) -> &'static str;

    /// Whether this rule applies in the snapshot's phase.
    fn is_active(&self, snapshot: &GameSnapshot) -> bool;

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation>;

    /// Called on (re-)admission to the eligible set. Stateless validators
    /// keep the default no-op.
    fn reset(&mut self, _snapshot: &GameSnapshot) {}
}

/// Per-key grace periods. A key that triggered within the last `grace`
/// seconds is suppressed; triggering refreshes the window.
#[derive(Debug)]
pub(crate) struct Cooldowns<K> {
    grace: f64,
    last: HashMap<K, f64>,
}

impl<K: Eq + Hash> Cooldowns<K> {
    pub fn new(grace: f64) -> Self {
        Self {
            grace,
            last: HashMap::new(),
        }
    }

    /// Whether `key` is clear to trigger at `now`.
    pub fn ready(&self, key: &K, now: f64) -> bool {
        match self.last.get(key) {
            Some(&last) => now - last >= self.grace,
            None => true,
        }
    }

    pub fn trigger(&mut self, key: K, now: f64) {
        self.last.insert(key, now);
    }

    /// Whether `key` is clear to trigger at `now`. Records the trigger.
    pub fn try_trigger(&mut self, key: K, now: f64) -> bool {
        if self.ready(&key, now) {
            self.trigger(key, now);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{RobotId, TeamColor};

    #[test]
    fn test_cooldown_suppresses_within_grace() {
        let mut cooldowns = Cooldowns::new(2.0);
        let key = RobotId::new(TeamColor::Blue, 1);
        assert!(cooldowns.try_trigger(key, 10.0));
        assert!(!cooldowns.try_trigger(key, 11.0));
        assert!(!cooldowns.try_trigger(key, 11.9));
        assert!(cooldowns.try_trigger(key, 12.0));
    }

    #[test]
    fn test_cooldown_keys_are_independent() {
        let mut cooldowns = Cooldowns::new(2.0);
        assert!(cooldowns.try_trigger(TeamColor::Blue, 0.0));
        assert!(cooldowns.try_trigger(TeamColor::Yellow, 0.1));
        assert!(!cooldowns.try_trigger(TeamColor::Blue, 1.0));
    }

    #[test]
    fn test_clear_forgets_history() {
        let mut cooldowns = Cooldowns::new(2.0);
        assert!(cooldowns.try_trigger(0u8, 0.0));
        cooldowns.clear();
        assert!(cooldowns.try_trigger(0u8, 0.5));
    }
}

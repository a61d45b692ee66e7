//! Failed penalty kick: the defending goalkeeper turned the ball away.
//!
//! A save shows up as a touch by the keeper that bends the ball path by
//! a quarter turn or more.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState, TouchId};
use std::collections::HashSet;

/// Minimum deflection for a save, degrees.
pub const MIN_DEFLECTION: f32 = 90.0;

pub struct PenaltyKickFailed {
    judged: HashSet<TouchId>,
}

impl PenaltyKickFailed {
    pub fn new() -> Self {
        Self {
            judged: HashSet::new(),
        }
    }
}

impl Default for PenaltyKickFailed {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for PenaltyKickFailed {
    fn name(&self) -> &'static str {
        "penalty_kick_failed"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state == GameState::Penalty
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let kicking_team = snapshot.state_for_team?;
        let keeper = snapshot.team(kicking_team.opponent()).goalkeeper_id();

        for touch in snapshot.finished_touches() {
            if touch.by != keeper || self.judged.contains(&touch.id) {
                continue;
            }
            self.judged.insert(touch.id);

            let deflection = match touch.deflection_angle() {
                Some(angle) => angle,
                None => continue,
            };
            if deflection < MIN_DEFLECTION {
                continue;
            }
            let location = touch.end_location.unwrap_or(touch.start_location);
            return Some(Violation::PenaltyKickFailed {
                by_team: kicking_team,
                location: location.xy(),
            });
        }
        None
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.judged.clear();
    }
}

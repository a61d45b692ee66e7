//! Aimless kick: a ball kicked from the kicker's own half that crosses
//! the opponent's goal line without a goal. Division B only.

use super::{RuleValidator, GRACE_PERIOD};
use crate::config::Division;
use crate::field::Side;
use crate::violation::Violation;
use crate::world::GameSnapshot;

pub struct AimlessKick {
    last_triggered: Option<f64>,
}

impl AimlessKick {
    pub fn new() -> Self {
        Self {
            last_triggered: None,
        }
    }
}

impl Default for AimlessKick {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for AimlessKick {
    fn name(&self) -> &'static str {
        "aimless_kick"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.division == Division::B && snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let left = snapshot.field.line("LeftGoalLine")?;
        let right = snapshot.field.line("RightGoalLine")?;

        let position = snapshot.ball.position;
        let crossed_side = if position.x < left.p1.x {
            Side::Left
        } else if position.x > right.p1.x {
            Side::Right
        } else {
            return None;
        };

        let kick = snapshot.last_started_touch()?;
        let kicker_side = snapshot.team(kick.by.team).side;
        // Only a kick toward the far goal line counts.
        if crossed_side == kicker_side {
            return None;
        }
        let from_own_half = snapshot
            .field
            .is_in_own_half(kicker_side, kick.start_location.xy())?;
        if !from_own_half {
            return None;
        }

        if let Some(last) = self.last_triggered {
            if snapshot.time - last < GRACE_PERIOD {
                return None;
            }
        }
        self.last_triggered = Some(snapshot.time);
        Some(Violation::AimlessKick {
            by_team: kick.by.team,
            by_bot: kick.by.id,
            location: position.xy(),
            kick_location: kick.start_location.xy(),
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.last_triggered = None;
    }
}

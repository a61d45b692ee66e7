//! Ball crossed a goal line (the short sides of the field).
//!
//! Goals also cross the goal line; disambiguating the two events is the
//! game controller's job, not ours.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, TeamColor};

pub struct BallLeftGoalLine {
    cooldowns: Cooldowns<TeamColor>,
}

impl BallLeftGoalLine {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for BallLeftGoalLine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BallLeftGoalLine {
    fn name(&self) -> &'static str {
        "ball_left_goal_line"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let left = snapshot.field.line("LeftGoalLine")?;
        let right = snapshot.field.line("RightGoalLine")?;

        let position = snapshot.ball.position;
        if position.x >= left.p1.x && position.x <= right.p1.x {
            return None;
        }

        let by_team = snapshot.last_started_touch()?.by.team;
        if !self.cooldowns.try_trigger(by_team, snapshot.time) {
            return None;
        }
        Some(Violation::BallLeftGoalLine {
            by_team,
            location: position.xy(),
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

//! Ball crossed a touch line (the long sides of the field).

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, TeamColor};

pub struct BallLeftTouchLine {
    cooldowns: Cooldowns<TeamColor>,
}

impl BallLeftTouchLine {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for BallLeftTouchLine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BallLeftTouchLine {
    fn name(&self) -> &'static str {
        "ball_left_touch_line"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let top = snapshot.field.line("TopTouchLine")?;
        let bottom = snapshot.field.line("BottomTouchLine")?;

        let position = snapshot.ball.position;
        if position.y <= top.p1.y && position.y >= bottom.p1.y {
            return None;
        }

        let by_team = snapshot.last_started_touch()?.by.team;
        if !self.cooldowns.try_trigger(by_team, snapshot.time) {
            return None;
        }
        Some(Violation::BallLeftTouchLine {
            by_team,
            location: position.xy(),
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

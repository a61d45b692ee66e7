//! Ball kicked faster than the rulebook limit.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, RobotId};

/// Maximum permitted ball speed, m/s.
pub const MAX_BALL_SPEED: f32 = 6.5;

pub struct BotKickedBallTooFast {
    cooldowns: Cooldowns<RobotId>,
}

impl BotKickedBallTooFast {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for BotKickedBallTooFast {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BotKickedBallTooFast {
    fn name(&self) -> &'static str {
        "bot_kicked_ball_too_fast"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let speed = snapshot.ball.velocity.magnitude();
        if speed <= MAX_BALL_SPEED {
            return None;
        }
        let kicker = snapshot.last_started_touch()?.by;
        if !self.cooldowns.try_trigger(kicker, snapshot.time) {
            return None;
        }
        Some(Violation::BotKickedBallTooFast {
            by_team: kicker.team,
            by_bot: kicker.id,
            location: snapshot.ball.position.xy(),
            initial_speed: speed,
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

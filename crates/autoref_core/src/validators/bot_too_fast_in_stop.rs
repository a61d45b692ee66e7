//! Robot moving too fast during a stoppage.
//!
//! Robots get a settle window after the Stop command before speeds are
//! judged, and each robot is reported at most once per stoppage.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState, RobotId};
use std::collections::HashSet;

/// Speed limit during Stop, m/s.
pub const MAX_ROBOT_SPEED: f32 = 1.5;
/// Time the robots get to slow down after the stoppage begins, seconds.
pub const SETTLE_TIME: f64 = 2.0;

pub struct BotTooFastInStop {
    stop_since: f64,
    reported: HashSet<RobotId>,
}

impl BotTooFastInStop {
    pub fn new() -> Self {
        Self {
            stop_since: 0.0,
            reported: HashSet::new(),
        }
    }
}

impl Default for BotTooFastInStop {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BotTooFastInStop {
    fn name(&self) -> &'static str {
        "bot_too_fast_in_stop"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state == GameState::Stop
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        if snapshot.time - self.stop_since < SETTLE_TIME {
            return None;
        }
        for robot in snapshot.robots.values() {
            if self.reported.contains(&robot.id) {
                continue;
            }
            let speed = robot.velocity.xy().magnitude();
            if speed <= MAX_ROBOT_SPEED {
                continue;
            }
            self.reported.insert(robot.id);
            return Some(Violation::BotTooFastInStop {
                by_team: robot.id.team,
                by_bot: robot.id.id,
                location: robot.position.xy(),
                speed,
            });
        }
        None
    }

    fn reset(&mut self, snapshot: &GameSnapshot) {
        self.stop_since = snapshot.time;
        self.reported.clear();
    }
}

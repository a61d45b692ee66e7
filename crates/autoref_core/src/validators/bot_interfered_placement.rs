//! Opponent lingering in the ball-placement corridor.
//!
//! The corridor is a 0.5 m stadium around the segment from the ball to
//! the designated position. An opponent must stay inside it continuously
//! for the dwell time before it counts as interference.

use super::RuleValidator;
use crate::geom::distance_to_segment;
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState, RobotId};
use std::collections::HashMap;

/// Corridor radius around the ball-to-target segment, meters.
pub const CORRIDOR_RADIUS: f32 = 0.5;
/// Continuous presence required before interference is called, seconds.
pub const DWELL_TIME: f64 = 2.0;

pub struct BotInterferedPlacement {
    entered: HashMap<RobotId, f64>,
}

impl BotInterferedPlacement {
    pub fn new() -> Self {
        Self {
            entered: HashMap::new(),
        }
    }
}

impl Default for BotInterferedPlacement {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BotInterferedPlacement {
    fn name(&self) -> &'static str {
        "bot_interfered_placement"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state == GameState::BallPlacement
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let placing_team = snapshot.state_for_team?;
        let target = snapshot.designated_position?;
        let ball = snapshot.ball.position.xy();
        let now = snapshot.time;

        let mut violation = None;
        for robot in snapshot.robots.values() {
            if robot.id.team == placing_team {
                continue;
            }
            let distance = distance_to_segment(ball, target, robot.position.xy());
            if distance >= CORRIDOR_RADIUS {
                self.entered.remove(&robot.id);
                continue;
            }
            let since = *self.entered.entry(robot.id).or_insert(now);
            if violation.is_none() && now - since >= DWELL_TIME {
                // Restart the dwell clock so a robot that stays put is
                // reported again rather than continuously.
                self.entered.insert(robot.id, now);
                violation = Some(Violation::BotInterferedPlacement {
                    by_team: robot.id.team,
                    by_bot: robot.id.id,
                    location: robot.position.xy(),
                });
            }
        }
        violation
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.entered.clear();
    }
}

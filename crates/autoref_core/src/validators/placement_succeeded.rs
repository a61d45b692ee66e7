//! Successful ball placement: ball settled on the designated position
//! with every robot clear of it.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState};

/// Maximum ball distance from the designated position, meters.
pub const PLACEMENT_PRECISION: f32 = 0.05;
/// Robots must be at least this far from the ball.
pub const ROBOT_CLEARANCE: f32 = 0.05;
/// The ball must hold position this long, seconds.
pub const SETTLE_TIME: f64 = 2.0;

pub struct PlacementSucceeded {
    started: f64,
    settled_since: Option<f64>,
    fired: bool,
}

impl PlacementSucceeded {
    pub fn new() -> Self {
        Self {
            started: 0.0,
            settled_since: None,
            fired: false,
        }
    }
}

impl Default for PlacementSucceeded {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for PlacementSucceeded {
    fn name(&self) -> &'static str {
        "placement_succeeded"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state == GameState::BallPlacement
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        if self.fired {
            return None;
        }
        let placing_team = snapshot.state_for_team?;
        let target = snapshot.designated_position?;
        let ball = snapshot.ball.position.xy();
        let now = snapshot.time;

        let precision = ball.distance(target);
        let robots_clear = snapshot
            .robots
            .values()
            .all(|robot| robot.position.xy().distance(ball) >= ROBOT_CLEARANCE);

        if precision > PLACEMENT_PRECISION || !robots_clear {
            self.settled_since = None;
            return None;
        }

        let since = *self.settled_since.get_or_insert(now);
        if now - since < SETTLE_TIME {
            return None;
        }

        self.fired = true;
        Some(Violation::PlacementSucceeded {
            by_team: placing_team,
            time_taken: now - self.started,
            precision,
        })
    }

    fn reset(&mut self, snapshot: &GameSnapshot) {
        self.started = snapshot.time;
        self.settled_since = None;
        self.fired = false;
    }
}

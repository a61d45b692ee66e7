//! Attacker touched the ball while inside the opponent's defense area.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, RobotId};

pub struct AttackerInDefenseArea {
    cooldowns: Cooldowns<RobotId>,
}

impl AttackerInDefenseArea {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for AttackerInDefenseArea {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for AttackerInDefenseArea {
    fn name(&self) -> &'static str {
        "attacker_in_defense_area"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        for &id in &snapshot.ball.robots_touching {
            let robot = match snapshot.robot(id) {
                Some(robot) => robot,
                None => continue,
            };
            let defended_side = snapshot.team(id.team.opponent()).side;
            let inside = snapshot
                .field
                .is_in_defense_area(defended_side, robot.position.xy());
            if inside != Some(true) {
                continue;
            }
            if !self.cooldowns.try_trigger(id, snapshot.time) {
                continue;
            }
            return Some(Violation::AttackerTouchedBallInDefenseArea {
                by_team: id.team,
                by_bot: id.id,
                location: robot.position.xy(),
            });
        }
        None
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

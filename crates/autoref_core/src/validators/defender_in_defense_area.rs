//! Field player (not the goalkeeper) inside its own defense area.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, RobotId};

pub struct DefenderInDefenseArea {
    cooldowns: Cooldowns<RobotId>,
}

impl DefenderInDefenseArea {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for DefenderInDefenseArea {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for DefenderInDefenseArea {
    fn name(&self) -> &'static str {
        "defender_in_defense_area"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        for robot in snapshot.robots.values() {
            let team = snapshot.team(robot.id.team);
            if robot.id == team.goalkeeper_id() {
                continue;
            }
            let inside = snapshot
                .field
                .is_in_defense_area(team.side, robot.position.xy());
            if inside != Some(true) {
                continue;
            }
            if !self.cooldowns.try_trigger(robot.id, snapshot.time) {
                continue;
            }
            return Some(Violation::DefenderInDefenseArea {
                by_team: robot.id.team,
                by_bot: robot.id.id,
                location: robot.position.xy(),
            });
        }
        None
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

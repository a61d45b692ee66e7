//! Attacker closer than 0.2 m to the opponent's defense area during a
//! stoppage or free kick.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState, RobotId};

/// Minimum clearance to the opponent defense area, meters.
pub const MIN_DISTANCE: f32 = 0.2;

pub struct AttackerTooCloseToDefenseArea {
    cooldowns: Cooldowns<RobotId>,
}

impl AttackerTooCloseToDefenseArea {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for AttackerTooCloseToDefenseArea {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for AttackerTooCloseToDefenseArea {
    fn name(&self) -> &'static str {
        "attacker_too_close_to_defense_area"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        matches!(
            snapshot.state,
            GameState::Stop | GameState::DirectFree | GameState::IndirectFree
        )
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        for robot in snapshot.robots.values() {
            let defended_side = snapshot.team(robot.id.team.opponent()).side;
            let distance = snapshot
                .field
                .defense_area_distance(defended_side, robot.position.xy())?;
            let margin = snapshot.team(robot.id.team).robot_radius;
            if distance - margin >= MIN_DISTANCE {
                continue;
            }
            if !self.cooldowns.try_trigger(robot.id, snapshot.time) {
                continue;
            }
            return Some(Violation::AttackerTooCloseToDefenseArea {
                by_team: robot.id.team,
                by_bot: robot.id.id,
                location: robot.position.xy(),
                distance,
            });
        }
        None
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.cooldowns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{add_robot, snapshot};
    use crate::world::{GameState, TeamColor};

    #[test]
    fn test_active_states() {
        let validator = AttackerTooCloseToDefenseArea::new();
        assert!(validator.is_active(&snapshot(GameState::Stop)));
        assert!(validator.is_active(&snapshot(GameState::DirectFree)));
        assert!(!validator.is_active(&snapshot(GameState::Running)));
        assert!(!validator.is_active(&snapshot(GameState::Halt)));
    }

    #[test]
    fn test_too_close_to_opponent_area() {
        let mut validator = AttackerTooCloseToDefenseArea::new();
        let mut snap = snapshot(GameState::Stop);
        // Blue robot 0.15 m in front of the right defense area edge.
        add_robot(&mut snap, TeamColor::Blue, 1, 3.35, 0.0);
        match validator.validate(&snap) {
            Some(Violation::AttackerTooCloseToDefenseArea { by_team, distance, .. }) => {
                assert_eq!(by_team, TeamColor::Blue);
                assert!(distance < MIN_DISTANCE + 0.1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_clear_distance_is_fine() {
        let mut validator = AttackerTooCloseToDefenseArea::new();
        let mut snap = snapshot(GameState::Stop);
        add_robot(&mut snap, TeamColor::Blue, 1, 3.0, 0.0);
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_own_area_proximity_is_ignored() {
        let mut validator = AttackerTooCloseToDefenseArea::new();
        let mut snap = snapshot(GameState::Stop);
        // Yellow defends right, so a yellow robot may sit near it.
        add_robot(&mut snap, TeamColor::Yellow, 1, 3.4, 0.0);
        assert!(validator.validate(&snap).is_none());
    }
}

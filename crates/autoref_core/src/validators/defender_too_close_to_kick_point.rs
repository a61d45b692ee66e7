//! Opposing robots crowding the ball before a restart is taken.
//!
//! During Stop nobody owns the ball, so both teams must keep clear;
//! during a free kick or preparation phase only the non-kicking team is
//! restricted.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState, RobotId};

/// Required clearance around the kick point, meters.
pub const MIN_DISTANCE: f32 = 0.5;

pub struct DefenderTooCloseToKickPoint {
    cooldowns: Cooldowns<RobotId>,
}

impl DefenderTooCloseToKickPoint {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for DefenderTooCloseToKickPoint {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for DefenderTooCloseToKickPoint {
    fn name(&self) -> &'static str {
        "defender_too_close_to_kick_point"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        matches!(
            snapshot.state,
            GameState::Stop
                | GameState::DirectFree
                | GameState::IndirectFree
                | GameState::PrepareKickoff
                | GameState::PreparePenalty
        )
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let kick_point = snapshot.ball.position.xy();
        let kicking_team = snapshot.state_for_team.filter(|_| snapshot.state != GameState::Stop);

        for robot in snapshot.robots.values() {
            if kicking_team == Some(robot.id.team) {
                continue;
            }
            let distance = robot.position.xy().distance(kick_point);
            if distance >= MIN_DISTANCE {
                continue;
            }
            if !self.cooldowns.try_trigger(robot.id, snapshot.time) {
                continue;
            }
            return Some(Violation::DefenderTooCloseToKickPoint {
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
    use crate::testutil::{add_robot, set_ball, snapshot};
    use crate::world::{GameState, TeamColor};

    #[test]
    fn test_defender_near_free_kick_fires() {
        let mut validator = DefenderTooCloseToKickPoint::new();
        let mut snap = snapshot(GameState::DirectFree);
        snap.state_for_team = Some(TeamColor::Blue);
        set_ball(&mut snap, 1.0, 1.0);
        add_robot(&mut snap, TeamColor::Yellow, 4, 1.3, 1.0);

        match validator.validate(&snap) {
            Some(Violation::DefenderTooCloseToKickPoint {
                by_team, distance, ..
            }) => {
                assert_eq!(by_team, TeamColor::Yellow);
                assert!((distance - 0.3).abs() < 1e-5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_kicking_team_may_approach() {
        let mut validator = DefenderTooCloseToKickPoint::new();
        let mut snap = snapshot(GameState::DirectFree);
        snap.state_for_team = Some(TeamColor::Blue);
        set_ball(&mut snap, 1.0, 1.0);
        add_robot(&mut snap, TeamColor::Blue, 2, 1.1, 1.0);
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_stop_restricts_both_teams() {
        let mut validator = DefenderTooCloseToKickPoint::new();
        let mut snap = snapshot(GameState::Stop);
        // A stop following a blue award still keeps blue away from the ball.
        snap.state_for_team = Some(TeamColor::Blue);
        set_ball(&mut snap, 0.0, 0.0);
        add_robot(&mut snap, TeamColor::Blue, 2, 0.2, 0.0);
        match validator.validate(&snap) {
            Some(Violation::DefenderTooCloseToKickPoint { by_team, .. }) => {
                assert_eq!(by_team, TeamColor::Blue);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_far_robot_is_fine() {
        let mut validator = DefenderTooCloseToKickPoint::new();
        let mut snap = snapshot(GameState::Stop);
        add_robot(&mut snap, TeamColor::Yellow, 4, 1.0, 0.0);
        assert!(validator.validate(&snap).is_none());
    }
}

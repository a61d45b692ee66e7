//! Double touch: the robot that put the ball into play touched it again
//! before it traveled far enough.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, GameState};

/// Required ball travel once play has resumed, meters.
pub const MIN_TRAVEL_IN_PLAY: f32 = 0.05;
/// Required ball travel while the restart is still pending.
pub const MIN_TRAVEL_BEFORE_PLAY: f32 = 0.10;

pub struct AttackerDoubleTouchedBall {
    fired: bool,
}

impl AttackerDoubleTouchedBall {
    pub fn new() -> Self {
        Self { fired: false }
    }
}

impl Default for AttackerDoubleTouchedBall {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for AttackerDoubleTouchedBall {
    fn name(&self) -> &'static str {
        "attacker_double_touched_ball"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        if self.fired {
            return None;
        }
        let kick = snapshot.kick_into_play()?;
        let kicker = snapshot.robot(kick.by)?;

        // A second, distinct touch by the kicker.
        kicker.touch.filter(|&id| id != kick.id)?;
        let min_travel = if snapshot.state == GameState::Running {
            MIN_TRAVEL_IN_PLAY
        } else {
            MIN_TRAVEL_BEFORE_PLAY
        };
        let travel = snapshot
            .ball
            .position
            .xy()
            .distance(kick.start_location.xy());
        if travel >= min_travel {
            return None;
        }

        self.fired = true;
        Some(Violation::AttackerDoubleTouchedBall {
            by_team: kick.by.team,
            by_bot: kick.by.id,
            location: snapshot.ball.position.xy(),
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector3;
    use crate::testutil::{add_robot, set_ball, snapshot};
    use crate::world::{GameState, RobotId, TeamColor, Touch};

    fn kicked_into_play() -> GameSnapshot {
        let mut snap = snapshot(GameState::Running);
        let kicker = add_robot(&mut snap, TeamColor::Blue, 2, 0.02, 0.0);
        snap.touches.push(Touch {
            id: 0,
            by: kicker,
            start_location: Vector3::ZERO,
            end_location: Some(Vector3::new(0.01, 0.0, 0.0)),
            start_time: 0.0,
            end_time: Some(0.2),
            start_velocity: Vector3::ZERO,
            end_velocity: Some(Vector3::new(0.1, 0.0, 0.0)),
        });
        snap.kick_into_play = Some(0);
        snap
    }

    fn second_touch(snap: &mut GameSnapshot, id: RobotId) {
        snap.touches.push(Touch {
            id: 1,
            by: id,
            start_location: snap.ball.position,
            end_location: None,
            start_time: snap.time,
            end_time: None,
            start_velocity: Vector3::ZERO,
            end_velocity: None,
        });
        snap.robots.get_mut(&id).unwrap().touch = Some(1);
        snap.robots.get_mut(&id).unwrap().just_touched = true;
    }

    #[test]
    fn test_second_touch_before_travel_fires_once() {
        let mut snap = kicked_into_play();
        set_ball(&mut snap, 0.03, 0.0);
        second_touch(&mut snap, RobotId::new(TeamColor::Blue, 2));

        let mut validator = AttackerDoubleTouchedBall::new();
        match validator.validate(&snap) {
            Some(Violation::AttackerDoubleTouchedBall { by_team, by_bot, .. }) => {
                assert_eq!(by_team, TeamColor::Blue);
                assert_eq!(by_bot, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        // One-shot until reset.
        assert!(validator.validate(&snap).is_none());
        validator.reset(&snap);
        assert!(validator.validate(&snap).is_some());
    }

    #[test]
    fn test_enough_travel_is_fine() {
        let mut snap = kicked_into_play();
        set_ball(&mut snap, 0.2, 0.0);
        second_touch(&mut snap, RobotId::new(TeamColor::Blue, 2));

        let mut validator = AttackerDoubleTouchedBall::new();
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_other_robot_may_touch() {
        let mut snap = kicked_into_play();
        set_ball(&mut snap, 0.03, 0.0);
        let other = add_robot(&mut snap, TeamColor::Blue, 4, 0.05, 0.0);
        second_touch(&mut snap, other);

        let mut validator = AttackerDoubleTouchedBall::new();
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_continuing_kick_touch_is_not_a_double() {
        let mut snap = snapshot(GameState::Running);
        let kicker = add_robot(&mut snap, TeamColor::Blue, 2, 0.02, 0.0);
        snap.touches.push(Touch {
            id: 0,
            by: kicker,
            start_location: Vector3::ZERO,
            end_location: None,
            start_time: 0.0,
            end_time: None,
            start_velocity: Vector3::ZERO,
            end_velocity: None,
        });
        snap.kick_into_play = Some(0);
        snap.robots.get_mut(&kicker).unwrap().touch = Some(0);

        let mut validator = AttackerDoubleTouchedBall::new();
        assert!(validator.validate(&snap).is_none());
    }
}

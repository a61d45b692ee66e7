//! Ball chipped over the field boundary entirely.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::GameSnapshot;

pub struct BoundaryCrossing {
    fired: bool,
}

impl BoundaryCrossing {
    pub fn new() -> Self {
        Self { fired: false }
    }
}

impl Default for BoundaryCrossing {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BoundaryCrossing {
    fn name(&self) -> &'static str {
        "boundary_crossing"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        if self.fired {
            return None;
        }
        let beyond = snapshot
            .field
            .is_beyond_boundary(snapshot.ball.position, 0.0)?;
        if !beyond {
            return None;
        }
        let by_team = snapshot.last_started_touch()?.by.team;
        self.fired = true;
        Some(Violation::BoundaryCrossing {
            by_team,
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
    use crate::testutil::{set_ball, snapshot};
    use crate::world::{GameState, RobotId, TeamColor, Touch};

    fn running_with_touch() -> GameSnapshot {
        let mut snap = snapshot(GameState::Running);
        snap.touches.push(Touch {
            id: 0,
            by: RobotId::new(TeamColor::Blue, 3),
            start_location: Vector3::ZERO,
            end_location: Some(Vector3::ZERO),
            start_time: 0.0,
            end_time: Some(0.1),
            start_velocity: Vector3::ZERO,
            end_velocity: Some(Vector3::new(5.0, 0.0, 1.0)),
        });
        snap.ball.last_touch_started = Some(0);
        snap
    }

    #[test]
    fn test_ball_past_the_boundary_fires_once() {
        let mut validator = BoundaryCrossing::new();
        let mut snap = running_with_touch();
        // Goal line at 4.5 plus the 0.3 m boundary strip.
        set_ball(&mut snap, 4.9, 0.0);
        match validator.validate(&snap) {
            Some(Violation::BoundaryCrossing { by_team, .. }) => {
                assert_eq!(by_team, TeamColor::Blue);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(validator.validate(&snap).is_none());
        validator.reset(&snap);
        assert!(validator.validate(&snap).is_some());
    }

    #[test]
    fn test_ball_inside_the_boundary_strip_is_fine() {
        let mut validator = BoundaryCrossing::new();
        let mut snap = running_with_touch();
        set_ball(&mut snap, 4.7, 0.0);
        assert!(validator.validate(&snap).is_none());
    }
}

//! Robot-on-robot crashes between opposing teams.
//!
//! A contact counts as a crash when the projected approach speed along
//! the center line exceeds the limit. Comparable absolute speeds make it
//! a drawn crash; otherwise the faster robot's team is at fault.

use super::{Cooldowns, RuleValidator, GRACE_PERIOD};
use crate::geom::collision_velocity;
use crate::violation::Violation;
use crate::world::{GameSnapshot, RobotId, TeamColor};

/// Center distance below which two robots are considered in contact.
pub const CRASH_DISTANCE: f32 = 0.2;
/// Minimum projected approach speed for a crash, m/s.
pub const MIN_CRASH_SPEED: f32 = 1.5;
/// Absolute speed difference below which the crash is drawn, m/s.
pub const DRAWN_SPEED_DIFF: f32 = 0.3;

pub struct BotCrashing {
    cooldowns: Cooldowns<RobotId>,
}

impl BotCrashing {
    pub fn new() -> Self {
        Self {
            cooldowns: Cooldowns::new(GRACE_PERIOD),
        }
    }
}

impl Default for BotCrashing {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BotCrashing {
    fn name(&self) -> &'static str {
        "bot_crashing"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        let now = snapshot.time;
        for blue in snapshot.robots_of(TeamColor::Blue) {
            for yellow in snapshot.robots_of(TeamColor::Yellow) {
                let p_blue = blue.position.xy();
                let p_yellow = yellow.position.xy();
                if p_blue.distance(p_yellow) >= CRASH_DISTANCE {
                    continue;
                }
                let crash_speed =
                    collision_velocity(p_blue, blue.velocity.xy(), p_yellow, yellow.velocity.xy());
                if crash_speed <= MIN_CRASH_SPEED {
                    continue;
                }
                if !self.cooldowns.ready(&blue.id, now) || !self.cooldowns.ready(&yellow.id, now) {
                    continue;
                }
                self.cooldowns.trigger(blue.id, now);
                self.cooldowns.trigger(yellow.id, now);

                let location = (p_blue + p_yellow) * 0.5;
                let speed_diff =
                    blue.velocity.xy().magnitude() - yellow.velocity.xy().magnitude();
                if speed_diff.abs() < DRAWN_SPEED_DIFF {
                    return Some(Violation::BotCrashDrawn {
                        bot_blue: blue.id.id,
                        bot_yellow: yellow.id.id,
                        location,
                        crash_speed,
                    });
                }
                let (violator, victim) = if speed_diff > 0.0 {
                    (blue.id, yellow.id)
                } else {
                    (yellow.id, blue.id)
                };
                return Some(Violation::BotCrashUnique {
                    by_team: violator.team,
                    violator: violator.id,
                    victim: victim.id,
                    location,
                    crash_speed,
                    speed_diff: speed_diff.abs(),
                });
            }
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
    use crate::geom::Vector3;
    use crate::testutil::{add_robot, snapshot};
    use crate::world::GameState;

    fn moving(snap: &mut GameSnapshot, id: RobotId, vx: f32) {
        snap.robots.get_mut(&id).unwrap().velocity = Vector3::new(vx, 0.0, 0.0);
    }

    #[test]
    fn test_head_on_at_equal_speed_is_drawn() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let blue = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        let yellow = add_robot(&mut snap, TeamColor::Yellow, 2, 0.15, 0.0);
        moving(&mut snap, blue, 1.0);
        moving(&mut snap, yellow, -1.0);

        match validator.validate(&snap) {
            Some(Violation::BotCrashDrawn {
                bot_blue,
                bot_yellow,
                crash_speed,
                ..
            }) => {
                assert_eq!(bot_blue, 1);
                assert_eq!(bot_yellow, 2);
                assert!((crash_speed - 2.0).abs() < 1e-5);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_faster_robot_is_the_violator() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let blue = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        add_robot(&mut snap, TeamColor::Yellow, 2, 0.15, 0.0);
        moving(&mut snap, blue, 2.0);

        match validator.validate(&snap) {
            Some(Violation::BotCrashUnique {
                by_team,
                violator,
                victim,
                ..
            }) => {
                assert_eq!(by_team, TeamColor::Blue);
                assert_eq!(violator, 1);
                assert_eq!(victim, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_slow_contact_is_not_a_crash() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let blue = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        add_robot(&mut snap, TeamColor::Yellow, 2, 0.15, 0.0);
        moving(&mut snap, blue, 1.0);
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_separating_robots_do_not_crash() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let blue = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        add_robot(&mut snap, TeamColor::Yellow, 2, 0.15, 0.0);
        // Moving away from the contact.
        moving(&mut snap, blue, -3.0);
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_teammates_never_crash() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let a = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        add_robot(&mut snap, TeamColor::Blue, 2, 0.1, 0.0);
        moving(&mut snap, a, 3.0);
        assert!(validator.validate(&snap).is_none());
    }

    #[test]
    fn test_pair_cooldown() {
        let mut validator = BotCrashing::new();
        let mut snap = snapshot(GameState::Running);
        let blue = add_robot(&mut snap, TeamColor::Blue, 1, 0.0, 0.0);
        moving(&mut snap, blue, 2.0);
        add_robot(&mut snap, TeamColor::Yellow, 2, 0.15, 0.0);

        assert!(validator.validate(&snap).is_some());
        snap.time = 1.0;
        assert!(validator.validate(&snap).is_none());
        snap.time = 2.5;
        assert!(validator.validate(&snap).is_some());
    }
}

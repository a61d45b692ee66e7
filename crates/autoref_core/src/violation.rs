//! Rule-violation events and the control-channel boundary.
//!
//! One enum variant per rule, each carrying the structured payload the
//! game controller expects for that event type. Everything is serde so an
//! observer can log frames and events side by side.

use crate::error::SinkRejection;
use crate::geom::Vector2;
use crate::world::TeamColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A detected rule violation. Locations are planar field coordinates in
/// meters, speeds in m/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Violation {
    BallLeftTouchLine {
        by_team: TeamColor,
        location: Vector2,
    },
    BallLeftGoalLine {
        by_team: TeamColor,
        location: Vector2,
    },
    AimlessKick {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
        kick_location: Vector2,
    },
    AttackerTouchedBallInDefenseArea {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
    },
    AttackerTooCloseToDefenseArea {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
        distance: f32,
    },
    AttackerDoubleTouchedBall {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
    },
    BotKickedBallTooFast {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
        initial_speed: f32,
    },
    BotTooFastInStop {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
        speed: f32,
    },
    /// Two robots at comparable speed crashed; neither side is at fault.
    BotCrashDrawn {
        bot_blue: u8,
        bot_yellow: u8,
        location: Vector2,
        crash_speed: f32,
    },
    /// One robot was clearly faster; that robot's team is at fault.
    BotCrashUnique {
        by_team: TeamColor,
        violator: u8,
        victim: u8,
        location: Vector2,
        crash_speed: f32,
        speed_diff: f32,
    },
    BotDribbledBallTooFar {
        by_team: TeamColor,
        by_bot: u8,
        start: Vector2,
        end: Vector2,
    },
    DefenderInDefenseArea {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
    },
    DefenderTooCloseToKickPoint {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
        distance: f32,
    },
    BotInterferedPlacement {
        by_team: TeamColor,
        by_bot: u8,
        location: Vector2,
    },
    PlacementSucceeded {
        by_team: TeamColor,
        time_taken: f64,
        /// Final distance between ball and designated point.
        precision: f32,
    },
    PossibleGoal {
        /// Team whose goal the ball entered.
        by_team: TeamColor,
        kicking_team: Option<TeamColor>,
        kicking_bot: Option<u8>,
        location: Vector2,
    },
    PenaltyKickFailed {
        by_team: TeamColor,
        location: Vector2,
    },
    BoundaryCrossing {
        by_team: TeamColor,
        location: Vector2,
    },
}

impl Violation {
    /// Event-type identifier in the controller's wire vocabulary.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::BallLeftTouchLine { .. } => "BALL_LEFT_FIELD_TOUCH_LINE",
            Violation::BallLeftGoalLine { .. } => "BALL_LEFT_FIELD_GOAL_LINE",
            Violation::AimlessKick { .. } => "AIMLESS_KICK",
            Violation::AttackerTouchedBallInDefenseArea { .. } => {
                "ATTACKER_TOUCHED_BALL_IN_DEFENSE_AREA"
            }
            Violation::AttackerTooCloseToDefenseArea { .. } => {
                "ATTACKER_TOO_CLOSE_TO_DEFENSE_AREA"
            }
            Violation::AttackerDoubleTouchedBall { .. } => "ATTACKER_DOUBLE_TOUCHED_BALL",
            Violation::BotKickedBallTooFast { .. } => "BOT_KICKED_BALL_TOO_FAST",
            Violation::BotTooFastInStop { .. } => "BOT_TOO_FAST_IN_STOP",
            Violation::BotCrashDrawn { .. } => "BOT_CRASH_DRAWN",
            Violation::BotCrashUnique { .. } => "BOT_CRASH_UNIQUE",
            Violation::BotDribbledBallTooFar { .. } => "BOT_DRIBBLED_BALL_TOO_FAR",
            Violation::DefenderInDefenseArea { .. } => "DEFENDER_IN_DEFENSE_AREA",
            Violation::DefenderTooCloseToKickPoint { .. } => "DEFENDER_TOO_CLOSE_TO_KICK_POINT",
            Violation::BotInterferedPlacement { .. } => "BOT_INTERFERED_IN_BALL_PLACEMENT",
            Violation::PlacementSucceeded { .. } => "PLACEMENT_SUCCEEDED",
            Violation::PossibleGoal { .. } => "POSSIBLE_GOAL",
            Violation::PenaltyKickFailed { .. } => "PENALTY_KICK_FAILED",
            Violation::BoundaryCrossing { .. } => "BOUNDARY_CROSSING",
        }
    }

    /// The team at fault (for a goal: the team scored against). `None` only
    /// for a drawn crash.
    pub fn by_team(&self) -> Option<TeamColor> {
        match self {
            Violation::BallLeftTouchLine { by_team, .. }
            | Violation::BallLeftGoalLine { by_team, .. }
            | Violation::AimlessKick { by_team, .. }
            | Violation::AttackerTouchedBallInDefenseArea { by_team, .. }
            | Violation::AttackerTooCloseToDefenseArea { by_team, .. }
            | Violation::AttackerDoubleTouchedBall { by_team, .. }
            | Violation::BotKickedBallTooFast { by_team, .. }
            | Violation::BotTooFastInStop { by_team, .. }
            | Violation::BotCrashUnique { by_team, .. }
            | Violation::BotDribbledBallTooFar { by_team, .. }
            | Violation::DefenderInDefenseArea { by_team, .. }
            | Violation::DefenderTooCloseToKickPoint { by_team, .. }
            | Violation::BotInterferedPlacement { by_team, .. }
            | Violation::PlacementSucceeded { by_team, .. }
            | Violation::PossibleGoal { by_team, .. }
            | Violation::PenaltyKickFailed { by_team, .. }
            | Violation::BoundaryCrossing { by_team, .. } => Some(*by_team),
            Violation::BotCrashDrawn { .. } => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::BallLeftTouchLine { by_team, location } => {
                write!(f, "ball left the field over a touch line at {location} (last touched by {by_team})")
            }
            Violation::BallLeftGoalLine { by_team, location } => {
                write!(f, "ball left the field over a goal line at {location} (last touched by {by_team})")
            }
            Violation::AimlessKick {
                by_team,
                by_bot,
                location,
                kick_location,
            } => write!(
                f,
                "aimless kick by {by_team} #{by_bot} from {kick_location}, left at {location}"
            ),
            Violation::AttackerTouchedBallInDefenseArea {
                by_team,
                by_bot,
                location,
            } => write!(
                f,
                "attacker {by_team} #{by_bot} touched the ball in the defense area at {location}"
            ),
            Violation::AttackerTooCloseToDefenseArea {
                by_team,
                by_bot,
                location,
                distance,
            } => write!(
                f,
                "attacker {by_team} #{by_bot} within {distance:.3} m of the defense area at {location}"
            ),
            Violation::AttackerDoubleTouchedBall {
                by_team,
                by_bot,
                location,
            } => write!(
                f,
                "attacker {by_team} #{by_bot} double touched the ball at {location}"
            ),
            Violation::BotKickedBallTooFast {
                by_team,
                by_bot,
                location,
                initial_speed,
            } => write!(
                f,
                "{by_team} #{by_bot} kicked the ball too fast ({initial_speed:.2} m/s) at {location}"
            ),
            Violation::BotTooFastInStop {
                by_team,
                by_bot,
                location,
                speed,
            } => write!(
                f,
                "{by_team} #{by_bot} moved too fast during stop ({speed:.2} m/s) at {location}"
            ),
            Violation::BotCrashDrawn {
                bot_blue,
                bot_yellow,
                location,
                crash_speed,
            } => write!(
                f,
                "crash drawn between BLUE #{bot_blue} and YELLOW #{bot_yellow} at {location} ({crash_speed:.2} m/s)"
            ),
            Violation::BotCrashUnique {
                by_team,
                violator,
                victim,
                location,
                crash_speed,
                ..
            } => write!(
                f,
                "{by_team} #{violator} crashed into {} #{victim} at {location} ({crash_speed:.2} m/s)",
                by_team.opponent()
            ),
            Violation::BotDribbledBallTooFar {
                by_team,
                by_bot,
                start,
                end,
            } => write!(
                f,
                "{by_team} #{by_bot} dribbled the ball too far, from {start} to {end}"
            ),
            Violation::DefenderInDefenseArea {
                by_team,
                by_bot,
                location,
            } => write!(
                f,
                "defender {by_team} #{by_bot} inside its own defense area at {location}"
            ),
            Violation::DefenderTooCloseToKickPoint {
                by_team,
                by_bot,
                location,
                distance,
            } => write!(
                f,
                "defender {by_team} #{by_bot} within {distance:.3} m of the kick point at {location}"
            ),
            Violation::BotInterferedPlacement {
                by_team,
                by_bot,
                location,
            } => write!(
                f,
                "{by_team} #{by_bot} interfered with ball placement at {location}"
            ),
            Violation::PlacementSucceeded {
                by_team,
                time_taken,
                precision,
            } => write!(
                f,
                "{by_team} placed the ball in {time_taken:.1} s (off by {precision:.3} m)"
            ),
            Violation::PossibleGoal {
                by_team,
                kicking_team,
                kicking_bot,
                location,
            } => match (kicking_team, kicking_bot) {
                (Some(team), Some(bot)) => write!(
                    f,
                    "possible goal against {by_team} at {location}, kicked by {team} #{bot}"
                ),
                _ => write!(f, "possible goal against {by_team} at {location}"),
            },
            Violation::PenaltyKickFailed { by_team, location } => {
                write!(f, "penalty kick by {by_team} failed at {location}")
            }
            Violation::BoundaryCrossing { by_team, location } => {
                write!(
                    f,
                    "{by_team} chipped the ball over the field boundary at {location}"
                )
            }
        }
    }
}

/// Where accepted violations go. The engine calls `submit` once per
/// detected violation; a rejection is reported to the caller but never
/// stops evaluation of the remaining validators.
pub trait ViolationSink {
    fn submit(&mut self, violation: &Violation) -> Result<(), SinkRejection>;
}

/// Collects violations in memory. The default sink for tests and replays.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Violation>,
}

impl ViolationSink for RecordingSink {
    fn submit(&mut self, violation: &Violation) -> Result<(), SinkRejection> {
        self.events.push(violation.clone());
        Ok(())
    }
}

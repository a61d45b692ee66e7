//! Per-tick game-snapshot model.
//!
//! A [`GameSnapshot`] is the immutable aggregate the validators consume:
//! ball, robots, teams, field, match phase, and the touch bookkeeping for
//! the current ball-in-play epoch. Snapshots chain backward exactly one
//! generation; the deriver severs `previous.previous` when it commits a new
//! snapshot, so history never grows past two generations.

mod command;
mod deriver;

pub use command::MatchCommand;
pub use deriver::{WorldDeriver, TOUCH_TOLERANCE};

use crate::config::Division;
use crate::field::{Field, Side};
use crate::geom::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamColor {
    Blue,
    Yellow,
}

impl TeamColor {
    pub fn opponent(self) -> TeamColor {
        match self {
            TeamColor::Blue => TeamColor::Yellow,
            TeamColor::Yellow => TeamColor::Blue,
        }
    }

    pub const BOTH: [TeamColor; 2] = [TeamColor::Blue, TeamColor::Yellow];
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamColor::Blue => write!(f, "BLUE"),
            TeamColor::Yellow => write!(f, "YELLOW"),
        }
    }
}

/// Stable robot identity across ticks: team color plus the pattern id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId {
    pub team: TeamColor,
    pub id: u8,
}

impl RobotId {
    pub const fn new(team: TeamColor, id: u8) -> Self {
        Self { team, id }
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.team, self.id)
    }
}

/// Monotonically increasing touch identifier; touch equality is by id alone.
pub type TouchId = u32;

/// One continuous contact between a robot and the ball.
///
/// Open while `end_location` is `None`; once finished it never changes
/// again. Ball velocity is captured at both ends so the penalty validator
/// can compute the deflection angle of a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Touch {
    pub id: TouchId,
    pub by: RobotId,
    pub start_location: Vector3,
    pub end_location: Option<Vector3>,
    pub start_time: f64,
    pub end_time: Option<f64>,
    pub start_velocity: Vector3,
    pub end_velocity: Option<Vector3>,
}

impl Touch {
    pub fn is_finished(&self) -> bool {
        self.end_location.is_some()
    }

    /// Angle in degrees between the ball velocity entering and leaving this
    /// touch. `None` while the touch is open.
    pub fn deflection_angle(&self) -> Option<f32> {
        let end_velocity = self.end_velocity?;
        Some(self.start_velocity.xy().angle_to(end_velocity.xy()))
    }
}

impl PartialEq for Touch {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Touch {}

/// Per-tick state of one robot. Identity lives in `id`; everything else is
/// re-derived from telemetry each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Facing angle in radians.
    pub angle: f32,
    /// The open touch of this robot, if it is currently on the ball.
    pub touch: Option<TouchId>,
    /// Set only on the tick the contact started.
    pub just_touched: bool,
}

impl Robot {
    pub fn new(id: RobotId) -> Self {
        Self {
            id,
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            angle: 0.0,
            touch: None,
            just_touched: false,
        }
    }

    pub fn is_touching_ball(&self) -> bool {
        self.touch.is_some()
    }
}

/// Time-invariant team configuration supplied by telemetry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamState {
    pub color: TeamColor,
    pub side: Side,
    pub goalkeeper: u8,
    pub robot_radius: f32,
    pub robot_height: f32,
}

impl TeamState {
    pub fn goalkeeper_id(&self) -> RobotId {
        RobotId::new(self.color, self.goalkeeper)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vector3,
    pub velocity: Vector3,
    pub visible: bool,
    /// Robots currently within touching distance.
    pub robots_touching: Vec<RobotId>,
    /// The most recently opened touch, finished or not.
    pub last_touch_started: Option<TouchId>,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            velocity: Vector3::ZERO,
            visible: false,
            robots_touching: Vec::new(),
            last_touch_started: None,
        }
    }
}

/// Match phase, driven by the game-controller command stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Halt,
    Timeout,
    Stop,
    PrepareKickoff,
    PreparePenalty,
    BallPlacement,
    Kickoff,
    Penalty,
    DirectFree,
    IndirectFree,
    Running,
}

impl GameState {
    /// Phases during which the ball is (or is becoming) in play, i.e. the
    /// window in which touch history accumulates.
    pub fn is_ball_in_play(self) -> bool {
        matches!(
            self,
            GameState::Kickoff
                | GameState::Penalty
                | GameState::DirectFree
                | GameState::IndirectFree
                | GameState::Running
        )
    }

    /// Restart phases waiting for the kick that puts the ball into play.
    pub fn is_restart(self) -> bool {
        matches!(
            self,
            GameState::Kickoff | GameState::DirectFree | GameState::IndirectFree
        )
    }
}

/// Aggregate root consumed by the scheduler and validators, one per
/// telemetry tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub ball: Ball,
    /// Robots keyed by identity. BTreeMap so iteration order is
    /// deterministic across ticks and runs.
    pub robots: BTreeMap<RobotId, Robot>,
    pub blue: TeamState,
    pub yellow: TeamState,
    pub field: Field,
    pub state: GameState,
    /// The team a restart command was awarded to, if any.
    pub state_for_team: Option<TeamColor>,
    /// Whether the current Running phase was entered via force-start.
    pub force_started: bool,
    pub division: Division,
    /// Match time in seconds, from the telemetry timestamp.
    pub time: f64,
    pub command: MatchCommand,
    pub next_command: Option<MatchCommand>,
    pub command_counter: u32,
    pub designated_position: Option<Vector2>,
    /// Open and finished touches of the current ball-in-play epoch, in the
    /// order they started.
    pub touches: Vec<Touch>,
    /// The touch that put the ball into play after the last stoppage.
    pub kick_into_play: Option<TouchId>,
    /// The previous snapshot. Its own `previous` is always `None`.
    pub previous: Option<Box<GameSnapshot>>,
}

impl GameSnapshot {
    pub fn team(&self, color: TeamColor) -> &TeamState {
        match color {
            TeamColor::Blue => &self.blue,
            TeamColor::Yellow => &self.yellow,
        }
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    pub fn robots_of(&self, color: TeamColor) -> impl Iterator<Item = &Robot> {
        self.robots
            .values()
            .filter(move |robot| robot.id.team == color)
    }

    pub fn touch(&self, id: TouchId) -> Option<&Touch> {
        self.touches.iter().find(|touch| touch.id == id)
    }

    pub fn last_started_touch(&self) -> Option<&Touch> {
        self.touches.last()
    }

    pub fn last_finished_touch(&self) -> Option<&Touch> {
        self.touches.iter().rev().find(|touch| touch.is_finished())
    }

    pub fn finished_touches(&self) -> impl Iterator<Item = &Touch> {
        self.touches.iter().filter(|touch| touch.is_finished())
    }

    pub fn kick_into_play(&self) -> Option<&Touch> {
        self.kick_into_play.and_then(|id| self.touch(id))
    }

    /// Phase of the previous tick; equals the current phase on the very
    /// first snapshot.
    pub fn previous_state(&self) -> GameState {
        self.previous
            .as_ref()
            .map(|previous| previous.state)
            .unwrap_or(self.state)
    }

    /// Whether the phase changed between the previous tick and this one.
    pub fn is_phase_change(&self) -> bool {
        self.previous_state() != self.state
    }

    /// Depth of the backward chain. Bounded to 1 by the deriver.
    pub fn history_depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.previous.as_deref();
        while let Some(snapshot) = cursor {
            depth += 1;
            cursor = snapshot.previous.as_deref();
        }
        depth
    }
}

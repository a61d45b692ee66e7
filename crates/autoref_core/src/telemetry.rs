//! The raw per-tick input record at the engine boundary.
//!
//! How frames arrive (multicast subscriber, log file, test fixture) is the
//! caller's business; the engine only consumes the decoded record.

use crate::field::Side;
use crate::geom::{Vector2, Vector3};
use crate::world::{MatchCommand, TeamColor};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallObservation {
    pub position: Vector3,
    pub velocity: Vector3,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RobotObservation {
    pub team: TeamColor,
    pub id: u8,
    pub position: Vector3,
    pub velocity: Vector3,
    pub angle: f32,
}

/// Per-team configuration reported alongside tracking data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamInfo {
    pub side: Side,
    pub goalkeeper: u8,
    pub robot_radius: f32,
    pub robot_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedLine {
    pub name: String,
    pub p1: Vector2,
    pub p2: Vector2,
    pub thickness: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Length (x) and width (y) of the playable area.
    pub size: Vector2,
    pub boundary_width: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
    pub lines: Vec<NamedLine>,
}

/// One complete telemetry tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryFrame {
    /// Match clock in seconds.
    pub timestamp: f64,
    pub ball: BallObservation,
    pub robots: Vec<RobotObservation>,
    pub blue: TeamInfo,
    pub yellow: TeamInfo,
    pub field: FieldGeometry,
    pub command: MatchCommand,
    /// Increments every time the controller issues a new command; the
    /// deriver re-maps the phase only when this changes.
    pub command_counter: u32,
    pub next_command: Option<MatchCommand>,
    pub designated_position: Option<Vector2>,
}

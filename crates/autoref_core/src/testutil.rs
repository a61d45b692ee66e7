//! Shared fixtures for unit tests: canned telemetry frames and snapshots
//! on a division-B sized field.

use crate::config::Division;
use crate::field::test_support::division_b_field;
use crate::field::Side;
use crate::geom::{Vector2, Vector3};
use crate::telemetry::{
    BallObservation, FieldGeometry, NamedLine, RobotObservation, TeamInfo, TelemetryFrame,
};
use crate::world::{
    Ball, GameSnapshot, GameState, MatchCommand, Robot, RobotId, TeamColor, TeamState,
};
use std::collections::BTreeMap;

pub const ROBOT_RADIUS: f32 = 0.09;
pub const ROBOT_HEIGHT: f32 = 0.15;

pub fn team_info(side: Side) -> TeamInfo {
    TeamInfo {
        side,
        goalkeeper: 0,
        robot_radius: ROBOT_RADIUS,
        robot_height: ROBOT_HEIGHT,
    }
}

pub fn field_geometry() -> FieldGeometry {
    let field = division_b_field();
    FieldGeometry {
        size: field.size,
        boundary_width: field.boundary_width,
        goal_width: field.goal_width,
        goal_depth: field.goal_depth,
        lines: field
            .lines()
            .map(|(name, line)| NamedLine {
                name: name.to_string(),
                p1: line.p1,
                p2: line.p2,
                thickness: line.thickness,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RobotPose {
    pub team: TeamColor,
    pub id: u8,
    pub position: Vector3,
    pub velocity: Vector3,
}

impl RobotPose {
    pub fn new(team: TeamColor, id: u8, position: Vector3) -> Self {
        Self {
            team,
            id,
            position,
            velocity: Vector3::ZERO,
        }
    }
}

/// A frame with a stationary ball at the origin and no robots.
pub fn frame(timestamp: f64, command: MatchCommand, command_counter: u32) -> TelemetryFrame {
    frame_with_robots(timestamp, command, command_counter, Vector3::ZERO, &[])
}

pub fn frame_with_robots(
    timestamp: f64,
    command: MatchCommand,
    command_counter: u32,
    ball_position: Vector3,
    robots: &[RobotPose],
) -> TelemetryFrame {
    TelemetryFrame {
        timestamp,
        ball: BallObservation {
            position: ball_position,
            velocity: Vector3::ZERO,
            visible: true,
        },
        robots: robots
            .iter()
            .map(|pose| RobotObservation {
                team: pose.team,
                id: pose.id,
                position: pose.position,
                velocity: pose.velocity,
                angle: 0.0,
            })
            .collect(),
        blue: team_info(Side::Left),
        yellow: team_info(Side::Right),
        field: field_geometry(),
        command,
        command_counter,
        next_command: None,
        designated_position: None,
    }
}

fn team_state(color: TeamColor, side: Side) -> TeamState {
    TeamState {
        color,
        side,
        goalkeeper: 0,
        robot_radius: ROBOT_RADIUS,
        robot_height: ROBOT_HEIGHT,
    }
}

/// A bare snapshot in the given phase: blue defends left, ball at the
/// origin, no robots, no history.
pub fn snapshot(state: GameState) -> GameSnapshot {
    GameSnapshot {
        ball: Ball {
            visible: true,
            ..Ball::default()
        },
        robots: BTreeMap::new(),
        blue: team_state(TeamColor::Blue, Side::Left),
        yellow: team_state(TeamColor::Yellow, Side::Right),
        field: division_b_field(),
        state,
        state_for_team: None,
        force_started: false,
        division: Division::B,
        time: 0.0,
        command: MatchCommand::Halt,
        next_command: None,
        command_counter: 0,
        designated_position: None,
        touches: Vec::new(),
        kick_into_play: None,
        previous: None,
    }
}

pub fn add_robot(snapshot: &mut GameSnapshot, team: TeamColor, id: u8, x: f32, y: f32) -> RobotId {
    let robot_id = RobotId::new(team, id);
    let mut robot = Robot::new(robot_id);
    robot.position = Vector3::new(x, y, 0.0);
    snapshot.robots.insert(robot_id, robot);
    robot_id
}

pub fn set_ball(snapshot: &mut GameSnapshot, x: f32, y: f32) {
    snapshot.ball.position = Vector3::new(x, y, 0.0);
}

/// Chain `current` onto `previous`, severing deeper history the way the
/// deriver does.
pub fn chain(mut previous: GameSnapshot, mut current: GameSnapshot) -> GameSnapshot {
    previous.previous = None;
    current.previous = Some(Box::new(previous));
    current
}

/// Advance a snapshot by `dt` seconds without changing anything else,
/// chaining the old state as the previous tick.
pub fn tick(snapshot: &GameSnapshot, dt: f64) -> GameSnapshot {
    let mut next = snapshot.clone();
    next.time += dt;
    chain(snapshot.clone(), next)
}

pub fn designated(snapshot: &mut GameSnapshot, x: f32, y: f32) {
    snapshot.designated_position = Some(Vector2::new(x, y));
}

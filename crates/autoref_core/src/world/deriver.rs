//! World-state deriver: builds the next [`GameSnapshot`] from the previous
//! snapshot, one raw telemetry frame, and the latest match command.
//!
//! The touch tracker lives here too: it converts continuous ball/robot
//! proximity into discrete touch open/close events and detects the kick
//! that puts the ball back into play after a stoppage.

use super::{
    Ball, GameSnapshot, GameState, MatchCommand, Robot, RobotId, TeamColor, TeamState, Touch,
    TouchId,
};
use crate::config::RefereeConfig;
use crate::field::{Field, FieldLine};
use crate::telemetry::TelemetryFrame;
use std::collections::BTreeMap;

/// Added to the robot radius (planar) and robot height (vertical) when
/// deciding whether a robot is on the ball.
pub const TOUCH_TOLERANCE: f32 = 0.025;

/// Builds snapshots. Owns the monotonic touch-id counter and the
/// command-counter edge detector, so separate engine instances never share
/// state.
#[derive(Debug)]
pub struct WorldDeriver {
    config: RefereeConfig,
    next_touch_id: TouchId,
    last_command_counter: Option<u32>,
}

impl WorldDeriver {
    pub fn new(config: RefereeConfig) -> Self {
        Self {
            config,
            next_touch_id: 0,
            last_command_counter: None,
        }
    }

    /// Derive the next snapshot. Takes ownership of the previous snapshot,
    /// chains it to the result, and severs its own backward link so the
    /// retained history never exceeds two generations.
    pub fn derive(&mut self, previous: Option<GameSnapshot>, frame: &TelemetryFrame) -> GameSnapshot {
        let field = build_field(frame);

        let blue = TeamState {
            color: TeamColor::Blue,
            side: frame.blue.side,
            goalkeeper: frame.blue.goalkeeper,
            robot_radius: frame.blue.robot_radius,
            robot_height: frame.blue.robot_height,
        };
        let yellow = TeamState {
            color: TeamColor::Yellow,
            side: frame.yellow.side,
            goalkeeper: frame.yellow.goalkeeper,
            robot_radius: frame.yellow.robot_radius,
            robot_height: frame.yellow.robot_height,
        };

        let previous_state = previous.as_ref().map(|p| p.state).unwrap_or(GameState::Halt);

        // Phase handling: re-map only on a command-counter edge, otherwise
        // carry the previous phase forward unchanged.
        let command_changed = self.last_command_counter != Some(frame.command_counter);
        self.last_command_counter = Some(frame.command_counter);

        let (mut state, state_for_team, mut force_started) = if command_changed {
            let state = frame.command.next_state(previous_state);
            let force_started = state == GameState::Running
                && frame.command == MatchCommand::ForceStart;
            (state, frame.command.for_team(), force_started)
        } else {
            previous
                .as_ref()
                .map(|p| (p.state, p.state_for_team, p.force_started))
                .unwrap_or((previous_state, None, false))
        };

        // Carry robots and touch history from the previous snapshot.
        let mut robots: BTreeMap<RobotId, Robot> = previous
            .as_ref()
            .map(|p| p.robots.clone())
            .unwrap_or_default();
        let mut touches: Vec<Touch> = previous
            .as_ref()
            .map(|p| p.touches.clone())
            .unwrap_or_default();
        let mut kick_into_play = previous.as_ref().and_then(|p| p.kick_into_play);
        let mut last_touch_started = previous.as_ref().and_then(|p| p.ball.last_touch_started);

        // Leaving the ball-in-play window discards the possession record:
        // open touches, finished history, and the kick-into-play reference.
        if previous_state.is_ball_in_play() && !state.is_ball_in_play() {
            touches.clear();
            kick_into_play = None;
            last_touch_started = None;
            for robot in robots.values_mut() {
                robot.touch = None;
            }
        }

        // Kinematic update straight from telemetry; unseen ids are created
        // lazily and persist across ticks by identity.
        for robot in robots.values_mut() {
            robot.just_touched = false;
        }
        for observation in &frame.robots {
            let id = RobotId::new(observation.team, observation.id);
            let robot = robots.entry(id).or_insert_with(|| Robot::new(id));
            robot.position = observation.position;
            robot.velocity = observation.velocity;
            robot.angle = observation.angle;
        }

        let ball_position = frame.ball.position;
        let ball_velocity = frame.ball.velocity;

        // Touch lifecycle. Runs only while the ball is in (or entering)
        // play; during stoppages no contact opens a touch, so a robot
        // parked on the ball through a stoppage starts a fresh touch on
        // the first in-play tick.
        let mut robots_touching = Vec::new();
        if state.is_ball_in_play() {
            for robot in robots.values_mut() {
                let team = if robot.id.team == TeamColor::Blue {
                    &blue
                } else {
                    &yellow
                };
                let planar = robot.position.xy().distance(ball_position.xy());
                let touching = planar <= team.robot_radius + TOUCH_TOLERANCE
                    && ball_position.z <= team.robot_height + TOUCH_TOLERANCE;

                match (touching, robot.touch) {
                    (true, Some(id)) => {
                        // Contact continues.
                        robots_touching.push(robot.id);
                        debug_assert!(touches.iter().any(|t| t.id == id && !t.is_finished()));
                    }
                    (true, None) => {
                        let id = self.next_touch_id;
                        self.next_touch_id += 1;
                        touches.push(Touch {
                            id,
                            by: robot.id,
                            start_location: ball_position,
                            end_location: None,
                            start_time: frame.timestamp,
                            end_time: None,
                            start_velocity: ball_velocity,
                            end_velocity: None,
                        });
                        robot.touch = Some(id);
                        robot.just_touched = true;
                        last_touch_started = Some(id);
                        robots_touching.push(robot.id);
                    }
                    (false, Some(id)) => {
                        if let Some(touch) = touches.iter_mut().find(|t| t.id == id) {
                            touch.end_location = Some(ball_position);
                            touch.end_time = Some(frame.timestamp);
                            touch.end_velocity = Some(ball_velocity);
                        }
                        robot.touch = None;
                    }
                    (false, None) => {}
                }
            }
        }

        // The first fresh touch during a restart (or a normally-started
        // Running phase) is the kick that puts the ball into play; a restart
        // phase advances to Running at that moment.
        let awaiting_kick = state.is_restart()
            || (state == GameState::Running && !force_started);
        if awaiting_kick && kick_into_play.is_none() {
            let fresh = robots
                .values()
                .find(|robot| robot.just_touched)
                .and_then(|robot| robot.touch);
            if let Some(touch_id) = fresh {
                kick_into_play = Some(touch_id);
                if state.is_restart() {
                    log::debug!(
                        "kick into play by touch {} advances {:?} -> Running",
                        touch_id,
                        state
                    );
                    state = GameState::Running;
                }
            }
        }
        // Force-started play needs no kick; stop tracking once play began.
        if state != GameState::Running {
            force_started = false;
        }

        let ball = Ball {
            position: ball_position,
            velocity: ball_velocity,
            visible: frame.ball.visible,
            robots_touching,
            last_touch_started,
        };

        // Commit: the new snapshot takes the old one as its single backward
        // link, and the old one's own link is severed.
        let previous = previous.map(|mut p| {
            p.previous = None;
            Box::new(p)
        });

        GameSnapshot {
            ball,
            robots,
            blue,
            yellow,
            field,
            state,
            state_for_team,
            force_started,
            division: self.config.division,
            time: frame.timestamp,
            command: frame.command,
            next_command: frame.next_command,
            command_counter: frame.command_counter,
            designated_position: frame.designated_position,
            touches,
            kick_into_play,
            previous,
        }
    }
}

fn build_field(frame: &TelemetryFrame) -> Field {
    let mut field = Field::new(
        frame.field.size * -0.5,
        frame.field.size,
        frame.field.boundary_width,
        frame.field.goal_width,
        frame.field.goal_depth,
    );
    for line in &frame.field.lines {
        field.insert_line(
            line.name.clone(),
            FieldLine {
                p1: line.p1,
                p2: line.p2,
                thickness: line.thickness,
            },
        );
    }
    field
}

//! The engine façade: one instance per match, one call per frame.

use crate::config::{RefereeConfig, RefereeMode};
use crate::error::AutorefError;
use crate::referee::Referee;
use crate::telemetry::TelemetryFrame;
use crate::violation::{Violation, ViolationSink};
use crate::world::{GameSnapshot, WorldDeriver};

/// Owns the deriver, the scheduler, and the current snapshot. Feed it
/// frames in order; everything else is bookkeeping.
pub struct AutoRef {
    config: RefereeConfig,
    deriver: WorldDeriver,
    referee: Referee,
    snapshot: Option<GameSnapshot>,
    violations: Vec<Violation>,
    sink: Option<Box<dyn ViolationSink>>,
}

impl AutoRef {
    pub fn new(config: RefereeConfig) -> Self {
        Self {
            config,
            deriver: WorldDeriver::new(config),
            referee: Referee::new(),
            snapshot: None,
            violations: Vec::new(),
            sink: None,
        }
    }

    /// Attach the control channel that accepted violations go to. In
    /// passive mode the sink is never called.
    pub fn set_sink(&mut self, sink: Box<dyn ViolationSink>) {
        self.sink = Some(sink);
    }

    pub fn config(&self) -> &RefereeConfig {
        &self.config
    }

    /// The snapshot of the most recently processed frame.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    /// Process one frame: derive the snapshot, run every eligible
    /// validator, submit the results. Validators always run to completion;
    /// a sink rejection is returned only after all violations were offered.
    pub fn process_frame(&mut self, frame: &TelemetryFrame) -> Result<&[Violation], AutorefError> {
        let previous = self.snapshot.take();
        let snapshot = self.deriver.derive(previous, frame);
        self.violations = self.referee.run(&snapshot);
        self.snapshot = Some(snapshot);

        let mut rejection = None;
        if self.config.mode == RefereeMode::Active {
            if let Some(sink) = &mut self.sink {
                for violation in &self.violations {
                    if let Err(err) = sink.submit(violation) {
                        log::warn!("violation not delivered: {err}");
                        rejection = Some(err);
                    }
                }
            }
        }
        match rejection {
            Some(err) => Err(err.into()),
            None => Ok(&self.violations),
        }
    }

    /// Decode one JSON frame record and process it.
    pub fn process_line(&mut self, line: &str) -> Result<&[Violation], AutorefError> {
        let frame: TelemetryFrame = serde_json::from_str(line)?;
        self.process_frame(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Division;
    use crate::error::SinkRejection;
    use crate::geom::Vector3;
    use crate::testutil::{frame, frame_with_robots, RobotPose};
    use crate::violation::RecordingSink;
    use crate::world::{GameState, MatchCommand, TeamColor};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_frames_drive_snapshots() {
        let mut autoref = AutoRef::new(RefereeConfig::default());
        autoref.process_frame(&frame(0.0, MatchCommand::Stop, 0)).unwrap();
        autoref
            .process_frame(&frame(0.1, MatchCommand::ForceStart, 1))
            .unwrap();
        let snapshot = autoref.snapshot().unwrap();
        assert_eq!(snapshot.state, GameState::Running);
        assert_eq!(snapshot.previous_state(), GameState::Stop);
        assert!(snapshot.history_depth() <= 1);
    }

    #[test]
    fn test_free_kick_scenario_end_to_end() {
        let mut autoref = AutoRef::new(RefereeConfig {
            division: Division::B,
            mode: RefereeMode::Active,
        });

        // Free kick for blue; a yellow defender parks 0.3 m from the ball.
        let ball = Vector3::new(1.0, 0.0, 0.0);
        let defender = RobotPose::new(TeamColor::Yellow, 4, Vector3::new(1.3, 0.0, 0.0));
        let violations = autoref
            .process_frame(&frame_with_robots(
                0.0,
                MatchCommand::DirectFree(TeamColor::Blue),
                1,
                ball,
                &[defender],
            ))
            .unwrap();
        assert!(violations
            .iter()
            .any(|v| v.kind() == "DEFENDER_TOO_CLOSE_TO_KICK_POINT"));
    }

    #[test]
    fn test_active_mode_submits_to_sink() {
        struct Counting(Arc<AtomicUsize>);
        impl ViolationSink for Counting {
            fn submit(&mut self, _violation: &Violation) -> Result<(), SinkRejection> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }

        let submitted = Arc::new(AtomicUsize::new(0));
        let mut autoref = AutoRef::new(RefereeConfig::default());
        autoref.set_sink(Box::new(Counting(Arc::clone(&submitted))));

        let ball = Vector3::new(1.0, 0.0, 0.0);
        let defender = RobotPose::new(TeamColor::Yellow, 4, Vector3::new(1.3, 0.0, 0.0));
        autoref
            .process_frame(&frame_with_robots(
                0.0,
                MatchCommand::DirectFree(TeamColor::Blue),
                1,
                ball,
                &[defender],
            ))
            .unwrap();
        assert!(submitted.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_passive_mode_never_submits() {
        let mut autoref = AutoRef::new(RefereeConfig {
            division: Division::B,
            mode: RefereeMode::Passive,
        });
        autoref.set_sink(Box::new(RecordingSink::default()));

        let ball = Vector3::new(1.0, 0.0, 0.0);
        let defender = RobotPose::new(TeamColor::Yellow, 4, Vector3::new(1.3, 0.0, 0.0));
        let violations = autoref
            .process_frame(&frame_with_robots(
                0.0,
                MatchCommand::DirectFree(TeamColor::Blue),
                1,
                ball,
                &[defender],
            ))
            .unwrap()
            .to_vec();
        // Violations are still reported to the caller.
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_sink_rejection_is_surfaced_not_fatal() {
        struct Refusing;
        impl ViolationSink for Refusing {
            fn submit(&mut self, _violation: &Violation) -> Result<(), SinkRejection> {
                Err(SinkRejection::Disconnected)
            }
        }

        let mut autoref = AutoRef::new(RefereeConfig::default());
        autoref.set_sink(Box::new(Refusing));

        let ball = Vector3::new(1.0, 0.0, 0.0);
        let defender = RobotPose::new(TeamColor::Yellow, 4, Vector3::new(1.3, 0.0, 0.0));
        let result = autoref.process_frame(&frame_with_robots(
            0.0,
            MatchCommand::DirectFree(TeamColor::Blue),
            1,
            ball,
            &[defender],
        ));
        assert!(result.is_err());
        // The engine keeps going on the next frame.
        assert!(autoref.snapshot().is_some());
    }

    #[test]
    fn test_process_line_decodes_json() {
        let mut autoref = AutoRef::new(RefereeConfig::default());
        let line = serde_json::to_string(&frame(0.0, MatchCommand::Halt, 0)).unwrap();
        let violations = autoref.process_line(&line).unwrap();
        assert!(violations.is_empty());

        assert!(autoref.process_line("not json").is_err());
    }
}

//! # autoref_core - SSL Assistant Referee Rule Engine
//!
//! Deterministic rule-evaluation engine for RoboCup Small Size League
//! matches: it turns raw tracking frames and game-controller commands into
//! game snapshots and judges them against the rulebook.
//!
//! ## Features
//! - Pure synchronous pipeline (same frames = same violations)
//! - Touch tracking with kick-into-play and dribble attribution
//! - Per-rule validators with panic isolation in the scheduler
//! - JSON-serializable frames and violations for replay tooling

pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod geom;
pub mod referee;
pub mod telemetry;
pub mod validators;
pub mod violation;
pub mod world;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{Division, RefereeConfig, RefereeMode};
pub use engine::AutoRef;
pub use error::{AutorefError, SinkRejection};
pub use referee::Referee;
pub use telemetry::TelemetryFrame;
pub use violation::{RecordingSink, Violation, ViolationSink};
pub use world::{GameSnapshot, GameState, MatchCommand, RobotId, TeamColor, WorldDeriver};

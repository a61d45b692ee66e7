//! Match-controller commands and the command → phase transition table.

use super::{GameState, TeamColor};
use serde::{Deserialize, Serialize};

/// A command issued by the external match controller. Team-scoped commands
/// carry the team they are awarded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCommand {
    Halt,
    Stop,
    ForceStart,
    NormalStart,
    PrepareKickoff(TeamColor),
    PreparePenalty(TeamColor),
    DirectFree(TeamColor),
    IndirectFree(TeamColor),
    Timeout(TeamColor),
    BallPlacement(TeamColor),
    Goal(TeamColor),
}

impl MatchCommand {
    /// The team a restart/stoppage command targets, if any.
    pub fn for_team(self) -> Option<TeamColor> {
        match self {
            MatchCommand::PrepareKickoff(team)
            | MatchCommand::PreparePenalty(team)
            | MatchCommand::DirectFree(team)
            | MatchCommand::IndirectFree(team)
            | MatchCommand::Timeout(team)
            | MatchCommand::BallPlacement(team)
            | MatchCommand::Goal(team) => Some(team),
            _ => None,
        }
    }

    /// Map this command to the phase it enters.
    ///
    /// `NormalStart` is the one context-sensitive command: it launches the
    /// restart that was being prepared (kickoff or penalty) and falls back
    /// to `Running` from anywhere else. Everything else maps statelessly.
    pub fn next_state(self, current: GameState) -> GameState {
        match self {
            MatchCommand::Halt => GameState::Halt,
            MatchCommand::Stop | MatchCommand::Goal(_) => GameState::Stop,
            MatchCommand::ForceStart => GameState::Running,
            MatchCommand::NormalStart => match current {
                GameState::PrepareKickoff => GameState::Kickoff,
                GameState::PreparePenalty => GameState::Penalty,
                _ => GameState::Running,
            },
            MatchCommand::PrepareKickoff(_) => GameState::PrepareKickoff,
            MatchCommand::PreparePenalty(_) => GameState::PreparePenalty,
            MatchCommand::DirectFree(_) => GameState::DirectFree,
            MatchCommand::IndirectFree(_) => GameState::IndirectFree,
            MatchCommand::Timeout(_) => GameState::Timeout,
            MatchCommand::BallPlacement(_) => GameState::BallPlacement,
        }
    }
}

//! Possible goal: the ball entered a goal volume.
//!
//! Reported as "possible" because the final call (ball height, keeper
//! fouls, timing) belongs to the game controller. A goal is withheld for
//! a short window after the scoring team committed a non-stopping foul;
//! the scheduler feeds that foul clock.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, TeamColor};
use std::collections::HashMap;

/// Goal pocket depth behind the goal line, meters.
pub const GOAL_DEPTH: f32 = 0.18;
/// A goal within this window after a non-stopping foul by the scoring
/// team is suppressed, seconds.
pub const FOUL_SUPPRESSION: f64 = 2.0;

pub struct PossibleGoal {
    last_foul: HashMap<TeamColor, f64>,
    fired: bool,
}

impl PossibleGoal {
    pub fn new() -> Self {
        Self {
            last_foul: HashMap::new(),
            fired: false,
        }
    }

    /// Record a non-stopping foul by `team` at `time`. Called by the
    /// scheduler, never cleared by `reset`.
    pub fn set_last_non_stopping_foul(&mut self, team: TeamColor, time: f64) {
        self.last_foul.insert(team, time);
    }

    fn recently_fouled(&self, team: TeamColor, now: f64) -> bool {
        self.last_foul
            .get(&team)
            .is_some_and(|&at| now - at < FOUL_SUPPRESSION)
    }
}

impl Default for PossibleGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for PossibleGoal {
    fn name(&self) -> &'static str {
        "possible_goal"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        if self.fired {
            return None;
        }
        let left = snapshot.field.line("LeftGoalLine")?;
        let right = snapshot.field.line("RightGoalLine")?;

        let ball = snapshot.ball.position;
        let half_width = snapshot.division.goal_width() / 2.0;
        if ball.y.abs() > half_width {
            return None;
        }
        // Which goal pocket, if any, holds the ball.
        let scored_against = if ball.x < left.p1.x && ball.x > left.p1.x - GOAL_DEPTH {
            defending_team(snapshot, crate::field::Side::Left)
        } else if ball.x > right.p1.x && ball.x < right.p1.x + GOAL_DEPTH {
            defending_team(snapshot, crate::field::Side::Right)
        } else {
            return None;
        };

        let kick = snapshot.last_started_touch();
        let scoring_team = kick
            .map(|touch| touch.by.team)
            .unwrap_or_else(|| scored_against.opponent());
        if self.recently_fouled(scoring_team, snapshot.time) {
            return None;
        }

        self.fired = true;
        Some(Violation::PossibleGoal {
            by_team: scored_against,
            kicking_team: kick.map(|touch| touch.by.team),
            kicking_bot: kick.map(|touch| touch.by.id),
            location: ball.xy(),
        })
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.fired = false;
    }
}

fn defending_team(snapshot: &GameSnapshot, side: crate::field::Side) -> TeamColor {
    if snapshot.blue.side == side {
        TeamColor::Blue
    } else {
        TeamColor::Yellow
    }
}

//! Ball dribbled over a longer distance than the rulebook allows.

use super::RuleValidator;
use crate::violation::Violation;
use crate::world::{GameSnapshot, TouchId};
use std::collections::HashSet;

/// Maximum permitted dribble distance, meters.
pub const MAX_DRIBBLE_DISTANCE: f32 = 1.0;

pub struct BotDribbledBallTooFar {
    judged: HashSet<TouchId>,
}

impl BotDribbledBallTooFar {
    pub fn new() -> Self {
        Self {
            judged: HashSet::new(),
        }
    }
}

impl Default for BotDribbledBallTooFar {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator for BotDribbledBallTooFar {
    fn name(&self) -> &'static str {
        "bot_dribbled_ball_too_far"
    }

    fn is_active(&self, snapshot: &GameSnapshot) -> bool {
        snapshot.state.is_ball_in_play()
    }

    fn validate(&mut self, snapshot: &GameSnapshot) -> Option<Violation> {
        for touch in snapshot.finished_touches() {
            if self.judged.contains(&touch.id) {
                continue;
            }
            self.judged.insert(touch.id);

            let end = match touch.end_location {
                Some(end) => end,
                None => continue,
            };
            let distance = touch.start_location.xy().distance(end.xy());
            if distance <= MAX_DRIBBLE_DISTANCE {
                continue;
            }
            return Some(Violation::BotDribbledBallTooFar {
                by_team: touch.by.team,
                by_bot: touch.by.id,
                start: touch.start_location.xy(),
                end: end.xy(),
            });
        }
        None
    }

    fn reset(&mut self, _snapshot: &GameSnapshot) {
        self.judged.clear();
    }
}

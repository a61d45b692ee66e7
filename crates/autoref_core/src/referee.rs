//! Validator scheduler.
//!
//! Runs the fixed validator list against each snapshot. Non-stopping
//! fouls (play continues after them) are evaluated first so their foul
//! clock is current when the goal validator runs last. A validator that
//! panics is disabled for the rest of the match; the others are
//! unaffected.

use crate::validators::{
    AimlessKick, AttackerDoubleTouchedBall, AttackerInDefenseArea,
    AttackerTooCloseToDefenseArea, BallLeftGoalLine, BallLeftTouchLine, BotCrashing,
    BotDribbledBallTooFar, BotInterferedPlacement, BotKickedBallTooFast, BotTooFastInStop,
    BoundaryCrossing, DefenderInDefenseArea, DefenderTooCloseToKickPoint, PenaltyKickFailed,
    PlacementSucceeded, PossibleGoal, RuleValidator,
};
use crate::violation::Violation;
use crate::world::{GameSnapshot, TeamColor};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub struct Referee {
    /// Fouls after which play continues. Evaluated first each tick.
    non_stopping: Vec<Box<dyn RuleValidator>>,
    stopping: Vec<Box<dyn RuleValidator>>,
    /// Held concretely: the scheduler feeds its non-stopping foul clock.
    possible_goal: PossibleGoal,
    /// Names admitted by the last phase change.
    active: HashSet<&'static str>,
    /// Names permanently deactivated after a panic.
    disabled: HashSet<&'static str>,
}

impl Referee {
    pub fn new() -> Self {
        let non_stopping: Vec<Box<dyn RuleValidator>> = vec![
            Box::new(BotCrashing::new()),
            Box::new(BotKickedBallTooFast::new()),
            Box::new(AttackerInDefenseArea::new()),
        ];
        let stopping: Vec<Box<dyn RuleValidator>> = vec![
            Box::new(BallLeftTouchLine::new()),
            Box::new(BallLeftGoalLine::new()),
            Box::new(AimlessKick::new()),
            Box::new(AttackerTooCloseToDefenseArea::new()),
            Box::new(AttackerDoubleTouchedBall::new()),
            Box::new(BotTooFastInStop::new()),
            Box::new(BotDribbledBallTooFar::new()),
            Box::new(DefenderInDefenseArea::new()),
            Box::new(DefenderTooCloseToKickPoint::new()),
            Box::new(BotInterferedPlacement::new()),
            Box::new(PlacementSucceeded::new()),
            Box::new(PenaltyKickFailed::new()),
            Box::new(BoundaryCrossing::new()),
        ];
        Self {
            non_stopping,
            stopping,
            possible_goal: PossibleGoal::new(),
            active: HashSet::new(),
            disabled: HashSet::new(),
        }
    }

    /// Evaluate every eligible validator against `snapshot`, in order.
    pub fn run(&mut self, snapshot: &GameSnapshot) -> Vec<Violation> {
        if snapshot.previous.is_none() || snapshot.is_phase_change() {
            self.recompute_active(snapshot);
        }

        let mut violations = Vec::new();
        for validator in self.non_stopping.iter_mut() {
            run_validator(
                validator.as_mut(),
                snapshot,
                &self.active,
                &mut self.disabled,
                &mut violations,
            );
        }
        for violation in &violations {
            match violation.by_team() {
                Some(team) => self
                    .possible_goal
                    .set_last_non_stopping_foul(team, snapshot.time),
                // A drawn crash counts against both teams.
                None => {
                    for team in TeamColor::BOTH {
                        self.possible_goal
                            .set_last_non_stopping_foul(team, snapshot.time);
                    }
                }
            }
        }

        for validator in self.stopping.iter_mut() {
            run_validator(
                validator.as_mut(),
                snapshot,
                &self.active,
                &mut self.disabled,
                &mut violations,
            );
        }
        run_validator(
            &mut self.possible_goal,
            snapshot,
            &self.active,
            &mut self.disabled,
            &mut violations,
        );

        for violation in &violations {
            log::info!("[{}] {}", violation.kind(), violation);
        }
        violations
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    fn recompute_active(&mut self, snapshot: &GameSnapshot) {
        let mut admitted = HashSet::new();
        for validator in self.non_stopping.iter_mut().chain(self.stopping.iter_mut()) {
            admit(validator.as_mut(), snapshot, &self.active, &mut admitted);
        }
        admit(
            &mut self.possible_goal,
            snapshot,
            &self.active,
            &mut admitted,
        );
        self.active = admitted;
    }

    #[cfg(test)]
    fn inject(&mut self, validator: Box<dyn RuleValidator>) {
        self.stopping.push(validator);
    }
}

impl Default for Referee {
    fn default() -> Self {
        Self::new()
    }
}

fn admit(
    validator: &mut dyn RuleValidator,
    snapshot: &GameSnapshot,
    previous: &HashSet<&'static str>,
    admitted: &mut HashSet<&'static str>,
) {
    if !validator.is_active(snapshot) {
        return;
    }
    let name = validator.name();
    if !previous.contains(name) {
        log::debug!("validator {name} admitted, resetting");
        validator.reset(snapshot);
    }
    admitted.insert(name);
}

fn run_validator(
    validator: &mut dyn RuleValidator,
    snapshot: &GameSnapshot,
    active: &HashSet<&'static str>,
    disabled: &mut HashSet<&'static str>,
    violations: &mut Vec<Violation>,
) {
    let name = validator.name();
    if disabled.contains(name) || !active.contains(name) {
        return;
    }
    match catch_unwind(AssertUnwindSafe(|| validator.validate(snapshot))) {
        Ok(Some(violation)) => violations.push(violation),
        Ok(None) => {}
        Err(_) => {
            disabled.insert(name);
            log::warn!("validator {name} panicked and is disabled for the rest of the match");
        }
    }
}

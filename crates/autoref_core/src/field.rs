//! Field model: named line segments and the containment queries built on
//! them.
//!
//! Telemetry describes the pitch as a bag of named segments
//! (`"RightGoalLine"`, `"LeftFieldLeftPenaltyStretch"`, ...). Frames are
//! allowed to omit lines, so every lookup returns an `Option` and every
//! derived query degrades to "unknown" instead of panicking.

use crate::geom::{Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which half of the pitch a team defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Sign of the X axis pointing into this half: -1 for left, +1 for right.
    pub fn cardinality(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// One painted line segment, endpoints in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldLine {
    pub p1: Vector2,
    pub p2: Vector2,
    pub thickness: f32,
}

/// The playable area plus everything derived from its line set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Field {
    /// Bottom-left corner of the playable area.
    pub position: Vector2,
    /// Length (x) and width (y) of the playable area.
    pub size: Vector2,
    /// Width of the out-of-bounds strip surrounding the playable area.
    pub boundary_width: f32,
    pub goal_width: f32,
    pub goal_depth: f32,
    lines: HashMap<String, FieldLine>,
}

impl Field {
    pub fn new(
        position: Vector2,
        size: Vector2,
        boundary_width: f32,
        goal_width: f32,
        goal_depth: f32,
    ) -> Self {
        Self {
            position,
            size,
            boundary_width,
            goal_width,
            goal_depth,
            lines: HashMap::new(),
        }
    }

    pub fn line(&self, name: &str) -> Option<&FieldLine> {
        self.lines.get(name)
    }

    /// Line names are unique; a re-insert replaces the previous segment.
    pub fn insert_line(&mut self, name: impl Into<String>, line: FieldLine) {
        self.lines.insert(name.into(), line);
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, &FieldLine)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), line))
    }

    /// Whether `location` is inside the defense area in front of the goal on
    /// `side`.
    ///
    /// Approximation: the area is treated as the axis-aligned rectangle
    /// spanned by the front penalty stretch and the two side stretches, not
    /// the true boundary polygon. `None` when any of the three lines is
    /// missing from the current frame.
    pub fn is_in_defense_area(&self, side: Side, location: Vector2) -> Option<bool> {
        let front = self.line(&format!("{}PenaltyStretch", side.prefix()))?;
        let right = self.line(&format!("{}FieldRightPenaltyStretch", side.prefix()))?;
        let left = self.line(&format!("{}FieldLeftPenaltyStretch", side.prefix()))?;

        // Behind the front stretch means outside the area, toward midfield.
        if location.x * side.cardinality() < front.p1.x * side.cardinality() {
            return Some(false);
        }

        let top = right.p1.y.max(left.p1.y);
        let bottom = right.p1.y.min(left.p1.y);
        Some(location.y > bottom && location.y < top)
    }

    /// Distance from `location` to the defense area on `side`, zero when
    /// inside. Same rectangle approximation as [`Field::is_in_defense_area`].
    pub fn defense_area_distance(&self, side: Side, location: Vector2) -> Option<f32> {
        let front = self.line(&format!("{}PenaltyStretch", side.prefix()))?;
        let right = self.line(&format!("{}FieldRightPenaltyStretch", side.prefix()))?;
        let left = self.line(&format!("{}FieldLeftPenaltyStretch", side.prefix()))?;

        let goal_x = match side {
            Side::Left => self.position.x,
            Side::Right => self.position.x + self.size.x,
        };
        let x_low = goal_x.min(front.p1.x);
        let x_high = goal_x.max(front.p1.x);
        let y_high = right.p1.y.max(left.p1.y);
        let y_low = right.p1.y.min(left.p1.y);

        let dx = (x_low - location.x).max(location.x - x_high).max(0.0);
        let dy = (y_low - location.y).max(location.y - y_high).max(0.0);
        Some((dx * dx + dy * dy).sqrt())
    }

    /// Whether `location` is on the half of the field that `side` defends.
    pub fn is_in_own_half(&self, side: Side, location: Vector2) -> Option<bool> {
        let halfway = self.line("HalfwayLine")?;
        Some(match side {
            Side::Left => location.x < halfway.p1.x,
            Side::Right => location.x > halfway.p1.x,
        })
    }

    /// Whether the ball is outside the field boundary entirely, margin
    /// included. The Z coordinate is ignored; a lobbed ball above the carpet
    /// still counts once its ground projection leaves the boundary.
    pub fn is_beyond_boundary(&self, location: Vector3, margin: f32) -> Option<bool> {
        let left = self.line("LeftGoalLine")?;
        let top = self.line("TopTouchLine")?;
        let right = self.line("RightGoalLine")?;
        let bottom = self.line("BottomTouchLine")?;

        let reach = self.boundary_width + margin;
        Some(
            location.x < left.p1.x - reach
                || location.x > right.p1.x + reach
                || location.y > top.p1.y + reach
                || location.y < bottom.p1.y - reach,
        )
    }
}

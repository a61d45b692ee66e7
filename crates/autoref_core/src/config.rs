//! External referee configuration: competition division and operating mode.

use serde::{Deserialize, Serialize};

/// Competition division. Affects goal dimensions and which rules apply
/// (e.g. aimless kick is only called in division B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Division {
    A,
    B,
}

impl Division {
    pub fn goal_width(self) -> f32 {
        match self {
            Division::A => 1.8,
            Division::B => 1.0,
        }
    }
}

/// Whether detected violations are forwarded to the match controller or
/// only observed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefereeMode {
    Active,
    Passive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefereeConfig {
    pub division: Division,
    pub mode: RefereeMode,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            division: Division::B,
            mode: RefereeMode::Active,
        }
    }
}

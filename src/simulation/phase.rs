//! Weekly action phases
//!
//! A week is seven turns. Two days of diplomacy, two of resource
//! collection, two of headquarters development, then one day of war.

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;

pub const DAYS_PER_WEEK: Turn = 7;

/// Category of action permitted on the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeeklyPhase {
    Diplomacy,
    ResourceCollection,
    HeadquartersDevelopment,
    War,
}

impl WeeklyPhase {
    pub fn from_turn(turn: Turn) -> Self {
        match turn % DAYS_PER_WEEK {
            0 | 1 => WeeklyPhase::Diplomacy,
            2 | 3 => WeeklyPhase::ResourceCollection,
            4 | 5 => WeeklyPhase::HeadquartersDevelopment,
            _ => WeeklyPhase::War,
        }
    }
}

/// Phase active on `turn`
pub fn resolve_phase(turn: Turn) -> WeeklyPhase {
    WeeklyPhase::from_turn(turn)
}

//! What happened during one turn

use serde::{Deserialize, Serialize};

use crate::command::types::SimulationCommand;
use crate::core::error::RuleViolation;
use crate::core::types::{CityId, PlayerId, Turn};
use crate::simulation::phase::WeeklyPhase;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RejectedCommand {
    pub command: SimulationCommand,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub phase: WeeklyPhase,
    pub rebellions: Vec<CityId>,
    pub executed: Vec<SimulationCommand>,
    pub rejected: Vec<RejectedCommand>,
    /// Agents whose policy failed this turn; their commands were dropped
    pub failed_agents: Vec<PlayerId>,
}

impl TurnReport {
    pub fn new(turn: Turn, phase: WeeklyPhase) -> Self {
        Self {
            turn,
            phase,
            rebellions: Vec::new(),
            executed: Vec::new(),
            rejected: Vec::new(),
            failed_agents: Vec::new(),
        }
    }

    pub fn record(&mut self, command: SimulationCommand, outcome: Result<(), RuleViolation>) {
        match outcome {
            Ok(()) => self.executed.push(command),
            Err(violation) => self.rejected.push(RejectedCommand {
                command,
                reason: violation.to_string(),
            }),
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.rebellions.is_empty()
            && self.executed.is_empty()
            && self.rejected.is_empty()
            && self.failed_agents.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "Turn {} ({:?}): {} executed, {} rejected, {} rebellions",
            self.turn,
            self.phase,
            self.executed.len(),
            self.rejected.len(),
            self.rebellions.len()
        )
    }
}

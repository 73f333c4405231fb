//! Collects automated players' commands and runs them as one batch

use rand::RngCore;

use crate::command::processor::CommandProcessor;
use crate::command::types::SimulationCommand;
use crate::core::config::EngineConfig;
use crate::player::agent::AgentContext;
use crate::simulation::report::TurnReport;
use crate::simulation::state::WorldState;

#[derive(Debug, Default)]
pub struct AgentDispatcher {
    buffer: Vec<SimulationCommand>,
}

impl AgentDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands gathered on the most recent collection
    pub fn buffer(&self) -> &[SimulationCommand] {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Rebuild the buffer from every bound agent, in registration order
    pub fn collect(&mut self, state: &WorldState, rng: &mut dyn RngCore, report: &mut TurnReport) {
        self.buffer.clear();

        for (player, agent) in state.players.agents() {
            let ctx = AgentContext {
                turn: state.turn(),
                phase: state.phase(),
                player,
            };
            let mark = self.buffer.len();
            if let Err(e) = agent.enqueue_turn_commands(&ctx, rng, &mut self.buffer) {
                tracing::warn!("Dropping turn {} commands from {}: {}", ctx.turn, player, e);
                self.buffer.truncate(mark);
                report.failed_agents.push(player.clone());
            }
        }
    }

    /// Execute the buffer in order; a refused command never stops the rest
    pub fn execute(&self, state: &mut WorldState, config: &EngineConfig, report: &mut TurnReport) {
        for command in &self.buffer {
            let outcome = CommandProcessor::execute(state, config, command);
            report.record(command.clone(), outcome);
        }
    }

    pub fn collect_and_execute(
        &mut self,
        state: &mut WorldState,
        config: &EngineConfig,
        rng: &mut dyn RngCore,
        report: &mut TurnReport,
    ) {
        self.collect(state, rng, report);
        self.execute(state, config, report);
    }
}

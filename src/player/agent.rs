//! Automated player policies
//!
//! Agents only propose: they append commands to a shared buffer and the
//! dispatcher runs them through the same validation as human commands.

use rand::{Rng, RngCore};
use std::fmt;
use thiserror::Error;

use crate::command::types::SimulationCommand;
use crate::core::config::BotConfig;
use crate::core::types::{CityId, PlayerId, Turn};
use crate::simulation::phase::WeeklyPhase;

/// Read-only view an agent decides from
#[derive(Debug, Clone, Copy)]
pub struct AgentContext<'a> {
    pub turn: Turn,
    pub phase: WeeklyPhase,
    pub player: &'a PlayerId,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    #[error("Agent for {player} failed: {reason}")]
    Malfunction { player: PlayerId, reason: String },
}

pub trait PlayerAgent: fmt::Debug {
    /// Append this turn's commands to `out`.
    ///
    /// On error the dispatcher drops whatever this call appended.
    fn enqueue_turn_commands(
        &self,
        ctx: &AgentContext<'_>,
        rng: &mut dyn RngCore,
        out: &mut Vec<SimulationCommand>,
    ) -> Result<(), AgentError>;
}

/// Reference bot: posture toward one rival on diplomacy days, raid one
/// city on war days.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBasedBotAgent {
    pub rival: PlayerId,
    pub target_city: CityId,
    pub min_intensity: f32,
    pub max_intensity: f32,
}

impl RuleBasedBotAgent {
    pub fn from_config(config: &BotConfig) -> Self {
        Self {
            rival: config.rival.clone(),
            target_city: config.target_city.clone(),
            min_intensity: config.min_intensity,
            max_intensity: config.max_intensity,
        }
    }

    /// Uniform in the configured range; a degenerate or non-finite range
    /// falls back to the lower bound (or 0 if that is unusable too)
    fn roll_intensity(&self, rng: &mut dyn RngCore) -> f32 {
        let (min, max) = (self.min_intensity, self.max_intensity);
        if min.is_finite() && max.is_finite() && min < max {
            rng.gen_range(min..max)
        } else if min.is_finite() {
            min
        } else {
            0.0
        }
    }
}

impl Default for RuleBasedBotAgent {
    fn default() -> Self {
        Self::from_config(&BotConfig::default())
    }
}

impl PlayerAgent for RuleBasedBotAgent {
    fn enqueue_turn_commands(
        &self,
        ctx: &AgentContext<'_>,
        rng: &mut dyn RngCore,
        out: &mut Vec<SimulationCommand>,
    ) -> Result<(), AgentError> {
        match ctx.phase {
            WeeklyPhase::Diplomacy => {
                let source = ctx.player.clone();
                let target = self.rival.clone();
                out.push(if rng.gen::<f32>() > 0.5 {
                    SimulationCommand::OfferCeasefire { source, target }
                } else {
                    SimulationCommand::DeclareWar { source, target }
                });
            }
            WeeklyPhase::War => {
                out.push(SimulationCommand::AttackCity {
                    source: ctx.player.clone(),
                    city: self.target_city.clone(),
                    intensity: self.roll_intensity(rng),
                });
            }
            WeeklyPhase::ResourceCollection | WeeklyPhase::HeadquartersDevelopment => {}
        }
        Ok(())
    }
}

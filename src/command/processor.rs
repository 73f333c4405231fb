//! Command validation and application
//!
//! Each handler checks every precondition before touching state, so a
//! refused command leaves the world exactly as it found it.

use crate::command::types::SimulationCommand;
use crate::core::config::{AttackRule, EngineConfig};
use crate::core::error::RuleViolation;
use crate::core::types::{CityId, PlayerId};
use crate::diplomacy::agreement::AgreementType;
use crate::diplomacy::relation::DiplomaticStance;
use crate::simulation::phase::WeeklyPhase;
use crate::simulation::state::WorldState;

/// Applies single commands to the world
pub struct CommandProcessor;

impl CommandProcessor {
    pub fn execute(
        state: &mut WorldState,
        config: &EngineConfig,
        command: &SimulationCommand,
    ) -> Result<(), RuleViolation> {
        let result = match command {
            SimulationCommand::DeclareWar { source, target }
            | SimulationCommand::BreakCeasefire { source, target } => {
                set_stance(state, source, target, DiplomaticStance::War)
            }
            SimulationCommand::OfferPeace { source, target } => {
                set_stance(state, source, target, DiplomaticStance::Peace)
            }
            SimulationCommand::OfferCeasefire { source, target } => {
                set_stance(state, source, target, DiplomaticStance::Ceasefire)
            }
            SimulationCommand::AttackCity {
                source,
                city,
                intensity,
            } => attack_city(state, config, source, city, *intensity),
            SimulationCommand::SignAgreement {
                source,
                target,
                agreement,
            } => sign_agreement(state, source, target, *agreement),
            SimulationCommand::BreakAgreement {
                source,
                target,
                agreement,
            } => state.agreements.break_agreement(source, target, *agreement),
        };

        match &result {
            Ok(()) => tracing::debug!("Turn {}: {}", state.turn(), command),
            Err(violation) => {
                tracing::debug!("Turn {}: refused {} ({})", state.turn(), command, violation)
            }
        }
        result
    }
}

fn set_stance(
    state: &mut WorldState,
    source: &PlayerId,
    target: &PlayerId,
    stance: DiplomaticStance,
) -> Result<(), RuleViolation> {
    let turn = state.turn();
    state
        .relations
        .set_stance(&state.players, source, target, stance, turn)
}

fn attack_city(
    state: &mut WorldState,
    config: &EngineConfig,
    source: &PlayerId,
    city: &CityId,
    intensity: f32,
) -> Result<(), RuleViolation> {
    let city_state = state
        .cities
        .find(city)
        .ok_or_else(|| RuleViolation::CityNotFound(city.clone()))?;

    if !state.players.contains(source) {
        return Err(RuleViolation::PlayerNotFound(source.clone()));
    }
    if city_state.owner() == Some(source) {
        return Err(RuleViolation::SelfTargeting(source.clone()));
    }

    match config.attack_rule {
        AttackRule::Stance => {
            let owner = city_state.owner().cloned().unwrap_or_else(|| PlayerId::from(""));
            if !state.relations.can_attack(source, &owner) {
                return Err(RuleViolation::NotAtWar {
                    attacker: source.clone(),
                    city: city.clone(),
                });
            }
        }
        AttackRule::WarPhase => {
            if state.phase() != WeeklyPhase::War {
                return Err(RuleViolation::InvalidPhase {
                    required: WeeklyPhase::War,
                    current: state.phase(),
                });
            }
        }
    }

    let turn = state.turn();
    let intensity = intensity.max(0.0);
    state.cities.apply_battle(city, intensity, &config.battle, turn)?;
    state.cities.record(
        city,
        turn,
        format!("{} attacked with intensity {:.1}", source, intensity),
    );
    Ok(())
}

fn sign_agreement(
    state: &mut WorldState,
    source: &PlayerId,
    target: &PlayerId,
    agreement: AgreementType,
) -> Result<(), RuleViolation> {
    if state.phase() != WeeklyPhase::Diplomacy {
        return Err(RuleViolation::InvalidPhase {
            required: WeeklyPhase::Diplomacy,
            current: state.phase(),
        });
    }
    if source == target {
        return Err(RuleViolation::SelfTargeting(source.clone()));
    }
    for id in [source, target] {
        if !state.players.contains(id) {
            return Err(RuleViolation::PlayerNotFound(id.clone()));
        }
    }

    let turn = state.turn();
    state.agreements.sign(source, target, agreement, turn);
    Ok(())
}

//! Text form of commands, as typed at the session prompt
//!
//! ```text
//! war <source> <target>              (alias: declare_war)
//! peace <source> <target>            (alias: offer_peace)
//! ceasefire <source> <target>        (alias: offer_ceasefire)
//! break-ceasefire <source> <target>  (alias: break_ceasefire)
//! attack <source> <city> [intensity] (alias: attack_city, default 1.0)
//! sign <source> <target> <trade|non-aggression>
//! break <source> <target> <trade|non-aggression>
//! ```

use crate::command::types::SimulationCommand;
use crate::core::error::RuleViolation;
use crate::core::types::{CityId, PlayerId};
use crate::diplomacy::agreement::AgreementType;

const DEFAULT_INTENSITY: f32 = 1.0;

pub fn parse_command(input: &str) -> Result<SimulationCommand, RuleViolation> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Err(RuleViolation::MalformedCommand("empty command".into()));
    };

    match verb.to_ascii_lowercase().as_str() {
        "war" | "declare_war" => {
            let (source, target) = pair(verb, args)?;
            Ok(SimulationCommand::DeclareWar { source, target })
        }
        "peace" | "offer_peace" => {
            let (source, target) = pair(verb, args)?;
            Ok(SimulationCommand::OfferPeace { source, target })
        }
        "ceasefire" | "offer_ceasefire" => {
            let (source, target) = pair(verb, args)?;
            Ok(SimulationCommand::OfferCeasefire { source, target })
        }
        "break-ceasefire" | "break_ceasefire" => {
            let (source, target) = pair(verb, args)?;
            Ok(SimulationCommand::BreakCeasefire { source, target })
        }
        "attack" | "attack_city" => match args {
            [source, city] => Ok(SimulationCommand::AttackCity {
                source: PlayerId::from(*source),
                city: CityId::from(*city),
                intensity: DEFAULT_INTENSITY,
            }),
            [source, city, intensity] => Ok(SimulationCommand::AttackCity {
                source: PlayerId::from(*source),
                city: CityId::from(*city),
                intensity: parse_intensity(intensity)?,
            }),
            _ => Err(usage(verb, "<source> <city> [intensity]")),
        },
        "sign" | "sign_agreement" => {
            let (source, target, agreement) = agreement_args(verb, args)?;
            Ok(SimulationCommand::SignAgreement {
                source,
                target,
                agreement,
            })
        }
        "break" | "break_agreement" => {
            let (source, target, agreement) = agreement_args(verb, args)?;
            Ok(SimulationCommand::BreakAgreement {
                source,
                target,
                agreement,
            })
        }
        other => Err(RuleViolation::UnknownCommandKind(other.to_string())),
    }
}

pub fn parse_agreement_type(word: &str) -> Option<AgreementType> {
    match word.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
        "trade" => Some(AgreementType::Trade),
        "nonaggression" | "nap" => Some(AgreementType::NonAggression),
        _ => None,
    }
}

fn usage(verb: &str, shape: &str) -> RuleViolation {
    RuleViolation::MalformedCommand(format!("usage: {} {}", verb, shape))
}

fn pair(verb: &str, args: &[&str]) -> Result<(PlayerId, PlayerId), RuleViolation> {
    match args {
        [source, target] => Ok((PlayerId::from(*source), PlayerId::from(*target))),
        _ => Err(usage(verb, "<source> <target>")),
    }
}

fn agreement_args(
    verb: &str,
    args: &[&str],
) -> Result<(PlayerId, PlayerId, AgreementType), RuleViolation> {
    match args {
        [source, target, kind] => {
            let agreement = parse_agreement_type(kind).ok_or_else(|| {
                RuleViolation::MalformedCommand(format!("unknown agreement type '{}'", kind))
            })?;
            Ok((PlayerId::from(*source), PlayerId::from(*target), agreement))
        }
        _ => Err(usage(verb, "<source> <target> <trade|non-aggression>")),
    }
}

fn parse_intensity(word: &str) -> Result<f32, RuleViolation> {
    match word.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RuleViolation::MalformedCommand(format!(
            "intensity '{}' is not a number",
            word
        ))),
    }
}

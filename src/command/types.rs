//! Commands players submit to the engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{CityId, PlayerId};
use crate::diplomacy::agreement::AgreementType;

/// One player action. Each variant carries only the fields it needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationCommand {
    DeclareWar {
        source: PlayerId,
        target: PlayerId,
    },
    OfferPeace {
        source: PlayerId,
        target: PlayerId,
    },
    OfferCeasefire {
        source: PlayerId,
        target: PlayerId,
    },
    BreakCeasefire {
        source: PlayerId,
        target: PlayerId,
    },
    AttackCity {
        source: PlayerId,
        city: CityId,
        intensity: f32,
    },
    SignAgreement {
        source: PlayerId,
        target: PlayerId,
        agreement: AgreementType,
    },
    BreakAgreement {
        source: PlayerId,
        target: PlayerId,
        agreement: AgreementType,
    },
}

impl SimulationCommand {
    pub fn source(&self) -> &PlayerId {
        match self {
            SimulationCommand::DeclareWar { source, .. }
            | SimulationCommand::OfferPeace { source, .. }
            | SimulationCommand::OfferCeasefire { source, .. }
            | SimulationCommand::BreakCeasefire { source, .. }
            | SimulationCommand::AttackCity { source, .. }
            | SimulationCommand::SignAgreement { source, .. }
            | SimulationCommand::BreakAgreement { source, .. } => source,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            SimulationCommand::DeclareWar { .. } => "declare_war",
            SimulationCommand::OfferPeace { .. } => "offer_peace",
            SimulationCommand::OfferCeasefire { .. } => "offer_ceasefire",
            SimulationCommand::BreakCeasefire { .. } => "break_ceasefire",
            SimulationCommand::AttackCity { .. } => "attack_city",
            SimulationCommand::SignAgreement { .. } => "sign_agreement",
            SimulationCommand::BreakAgreement { .. } => "break_agreement",
        }
    }
}

impl fmt::Display for SimulationCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationCommand::AttackCity {
                source,
                city,
                intensity,
            } => write!(f, "{} attack_city {} {:.1}", source, city, intensity),
            SimulationCommand::SignAgreement {
                source,
                target,
                agreement,
            }
            | SimulationCommand::BreakAgreement {
                source,
                target,
                agreement,
            } => write!(f, "{} {} {} {:?}", source, self.kind_name(), target, agreement),
            SimulationCommand::DeclareWar { source, target }
            | SimulationCommand::OfferPeace { source, target }
            | SimulationCommand::OfferCeasefire { source, target }
            | SimulationCommand::BreakCeasefire { source, target } => {
                write!(f, "{} {} {}", source, self.kind_name(), target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_and_kind() {
        let a = PlayerId::from("a");
        let attack = SimulationCommand::AttackCity {
            source: a.clone(),
            city: CityId::from("c"),
            intensity: 1.0,
        };
        assert_eq!(attack.source(), &a);
        assert_eq!(attack.kind_name(), "attack_city");

        let breaking = SimulationCommand::BreakCeasefire {
            source: a.clone(),
            target: PlayerId::from("b"),
        };
        assert_eq!(breaking.to_string(), "a break_ceasefire b");
    }

    #[test]
    fn test_serde_tagged_by_kind() {
        let json = r#"{"kind":"sign_agreement","source":"a","target":"b","agreement":"Trade"}"#;
        let command: SimulationCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            SimulationCommand::SignAgreement {
                source: PlayerId::from("a"),
                target: PlayerId::from("b"),
                agreement: AgreementType::Trade,
            }
        );
    }

    #[test]
    fn test_display() {
        let command = SimulationCommand::AttackCity {
            source: PlayerId::from("bot"),
            city: CityId::from("city-karadag"),
            intensity: 0.7,
        };
        assert_eq!(command.to_string(), "bot attack_city city-karadag 0.7");
    }
}

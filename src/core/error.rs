use thiserror::Error;

use crate::core::types::{CityId, PlayerId};
use crate::simulation::phase::WeeklyPhase;

/// Infrastructure failures: loading config, seed rosters, writing output
#[derive(Error, Debug)]
pub enum DominionError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DominionError>;

/// Why a command or registry mutation was refused.
///
/// Refusals are ordinary gameplay outcomes, not faults: the operation that
/// returns one has left every registry untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleViolation {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("City not found: {0}")]
    CityNotFound(CityId),

    #[error("No unbroken agreement from {source_player} to {target}")]
    AgreementNotFound { source_player: PlayerId, target: PlayerId },

    #[error("Action requires {required:?} phase, current phase is {current:?}")]
    InvalidPhase { required: WeeklyPhase, current: WeeklyPhase },

    #[error("Player cap of {0} reached")]
    CapacityExceeded(usize),

    #[error("Player {0} cannot target itself")]
    SelfTargeting(PlayerId),

    #[error("Player id must not be blank")]
    InvalidPlayerId,

    #[error("Player already registered: {0}")]
    AlreadyRegistered(PlayerId),

    #[error("{attacker} is not at war with the owner of {city}")]
    NotAtWar { attacker: PlayerId, city: CityId },

    #[error("Unknown command kind: {0}")]
    UnknownCommandKind(String),

    #[error("Malformed command: {0}")]
    MalformedCommand(String),
}

impl RuleViolation {
    /// True for the "unknown city/player/agreement" family
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RuleViolation::PlayerNotFound(_)
                | RuleViolation::CityNotFound(_)
                | RuleViolation::AgreementNotFound { .. }
        )
    }
}

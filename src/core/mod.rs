pub mod config;
pub mod error;
pub mod types;

pub use config::{AttackRule, EngineConfig};
pub use error::{DominionError, Result, RuleViolation};
pub use types::{CityId, LocationId, PlayerId, Turn};

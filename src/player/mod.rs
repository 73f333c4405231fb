//! Players: roster, profiles and automated policies

pub mod agent;
pub mod registry;

pub use agent::{AgentContext, AgentError, PlayerAgent, RuleBasedBotAgent};
pub use registry::{PlayerProfile, PlayerRegistry};

//! Turn scheduling, agent dispatch and the engine that ties them together

pub mod dispatcher;
pub mod engine;
pub mod output;
pub mod phase;
pub mod report;
pub mod session;
pub mod state;
pub mod timer;

pub use dispatcher::AgentDispatcher;
pub use engine::SimulationEngine;
pub use output::{PlayerSnapshot, WorldSnapshot};
pub use phase::{resolve_phase, WeeklyPhase, DAYS_PER_WEEK};
pub use report::{RejectedCommand, TurnReport};
pub use session::GameSession;
pub use state::WorldState;
pub use timer::LogicTimer;

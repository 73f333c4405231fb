//! Command pipeline
//!
//! Text or agent output -> SimulationCommand -> CommandProcessor -> world

pub mod parse;
pub mod processor;
pub mod types;

pub use parse::parse_command;
pub use processor::CommandProcessor;
pub use types::SimulationCommand;

//! Dominion - turn-based diplomacy and war simulation
//!
//! Cities with hidden resources, players bound to automated agents, a
//! symmetric diplomatic stance graph and a seven-day action week, all owned
//! by a single [`simulation::SimulationEngine`].

pub mod command;
pub mod core;
pub mod diplomacy;
pub mod player;
pub mod simulation;
pub mod world;

//! World state: terrain, cities, strategic locations and seeding

pub mod city;
pub mod location;
pub mod seed;
pub mod terrain;

pub use city::{CityRegistry, CityState, HistoryEntry, ResourceDeposit, ResourceType};
pub use location::{LocationRegistry, StrategicLocation};
pub use seed::{generate_cities, prototype_world, CityRecord, CityRoster};
pub use terrain::{TerrainProfile, TerrainProfileTable, TerrainType};

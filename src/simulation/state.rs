//! WorldState - every registry the engine owns, in one place

use crate::core::error::RuleViolation;
use crate::core::types::{PlayerId, Turn};
use crate::diplomacy::agreement::AgreementLedger;
use crate::diplomacy::relation::DiplomacyRelationGraph;
use crate::player::agent::PlayerAgent;
use crate::player::registry::PlayerRegistry;
use crate::simulation::phase::{resolve_phase, WeeklyPhase};
use crate::world::city::CityRegistry;
use crate::world::location::LocationRegistry;
use crate::world::terrain::TerrainProfileTable;

#[derive(Debug)]
pub struct WorldState {
    pub terrain: TerrainProfileTable,
    pub cities: CityRegistry,
    pub locations: LocationRegistry,
    pub players: PlayerRegistry,
    pub relations: DiplomacyRelationGraph,
    pub agreements: AgreementLedger,
    turn: Turn,
    phase: WeeklyPhase,
}

impl WorldState {
    pub fn new(max_players: usize) -> Self {
        Self {
            terrain: TerrainProfileTable::new(),
            cities: CityRegistry::new(),
            locations: LocationRegistry::new(),
            players: PlayerRegistry::new(max_players),
            relations: DiplomacyRelationGraph::new(),
            agreements: AgreementLedger::new(),
            turn: 0,
            phase: resolve_phase(0),
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> WeeklyPhase {
        self.phase
    }

    /// Move to the next turn and recompute its phase
    pub fn next_turn(&mut self) -> Turn {
        self.turn += 1;
        self.phase = resolve_phase(self.turn);
        self.turn
    }

    pub fn reset_clock(&mut self) {
        self.turn = 0;
        self.phase = resolve_phase(0);
    }

    /// Drop players, agents, relations and ledgers; cities keep their owners
    pub fn clear_players(&mut self) {
        self.players.clear();
        self.relations.clear();
        self.agreements.clear();
    }

    pub fn clear(&mut self) {
        self.terrain.clear();
        self.cities.clear();
        self.locations.clear();
        self.clear_players();
        self.reset_clock();
    }

    /// Register a player and wire them into the world.
    ///
    /// On success the player has neutral relations with everyone already
    /// registered and owns the first free city, if any.
    pub fn register_player(
        &mut self,
        id: PlayerId,
        display_name: &str,
        is_human: bool,
        agent: Option<Box<dyn PlayerAgent>>,
    ) -> Result<(), RuleViolation> {
        let others = self.players.ids();
        self.players.register(id.clone(), display_name, is_human, agent)?;
        self.relations.introduce(&id, &others, self.turn);

        match self.cities.assign_free_city(&id) {
            Some(city) => tracing::info!("Registered {} (human: {}) holding {}", id, is_human, city),
            None => tracing::info!("Registered {} (human: {}) without a city", id, is_human),
        }
        Ok(())
    }
}

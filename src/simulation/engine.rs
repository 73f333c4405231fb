//! SimulationEngine - lifecycle, turn loop, commands and queries
//!
//! The engine is the only owner of world state. Everything mutating takes
//! `&mut self`; queries hand out shared references or cloned snapshots.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::command::processor::CommandProcessor;
use crate::command::types::SimulationCommand;
use crate::core::config::EngineConfig;
use crate::core::error::RuleViolation;
use crate::core::types::{CityId, LocationId, PlayerId, Turn};
use crate::diplomacy::agreement::TrustTitle;
use crate::diplomacy::relation::DiplomaticStance;
use crate::player::agent::{PlayerAgent, RuleBasedBotAgent};
use crate::player::registry::PlayerRegistry;
use crate::simulation::dispatcher::AgentDispatcher;
use crate::simulation::output::WorldSnapshot;
use crate::simulation::phase::WeeklyPhase;
use crate::simulation::report::TurnReport;
use crate::simulation::state::WorldState;
use crate::world::city::{CityRegistry, CityState};
use crate::world::seed::{generate_cities, prototype_world, CityRoster};
use crate::world::terrain::TerrainType;

#[derive(Debug)]
pub struct SimulationEngine {
    config: EngineConfig,
    state: WorldState,
    rng: ChaCha8Rng,
    dispatcher: AgentDispatcher,
    /// Extra cities generated on initialize, after the prototype map
    roster: Option<(CityRoster, usize)>,
    last_report: Option<TurnReport>,
}

impl SimulationEngine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: EngineConfig, rng: ChaCha8Rng) -> Self {
        Self {
            state: WorldState::new(config.players.max_players),
            config,
            rng,
            dispatcher: AgentDispatcher::new(),
            roster: None,
            last_report: None,
        }
    }

    /// Generate `count` more cities from `roster` on every initialize
    pub fn with_roster(mut self, roster: CityRoster, count: usize) -> Self {
        self.roster = Some((roster, count));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Seed terrain and the world, then seat the configured players
    pub fn initialize(&mut self) {
        self.dispose();

        self.state.terrain.seed_defaults();

        let (cities, locations) = prototype_world(&self.state.terrain);
        for city in cities {
            self.state.cities.register(city);
        }
        for location in locations {
            self.state.locations.register(location);
        }

        if let Some((roster, count)) = &self.roster {
            let reserved = self.state.cities.iter().map(|c| c.id.clone());
            for city in generate_cities(roster, *count, reserved, &mut self.rng) {
                self.state.cities.register(city);
            }
        }

        let session = self.config.session.clone();
        self.setup_prototype_multiplayer_session(session.human_players, session.bot_players);

        tracing::info!(
            "Engine initialized: {} cities, {} players",
            self.state.cities.len(),
            self.state.players.len()
        );
    }

    /// Clear every registry and rewind to turn 0
    pub fn dispose(&mut self) {
        self.state.clear();
        self.dispatcher.clear();
        self.last_report = None;
    }

    // ---------------------------------------------------------------------
    // Turn loop
    // ---------------------------------------------------------------------

    /// Run one turn and return its report
    pub fn advance(&mut self) -> &TurnReport {
        let turn = self.state.next_turn();
        let mut report = TurnReport::new(turn, self.state.phase());

        report.rebellions = self.state.cities.apply_per_tick_effects(
            &self.config.recovery,
            &self.config.rebellion,
            &mut self.rng,
            turn,
        );

        self.dispatcher
            .collect_and_execute(&mut self.state, &self.config, &mut self.rng, &mut report);

        tracing::debug!("{}", report.summary());
        self.last_report.insert(report)
    }

    pub fn execute_command(&mut self, command: &SimulationCommand) -> Result<(), RuleViolation> {
        CommandProcessor::execute(&mut self.state, &self.config, command)
    }

    // ---------------------------------------------------------------------
    // Session
    // ---------------------------------------------------------------------

    pub fn try_register_player(
        &mut self,
        id: PlayerId,
        display_name: &str,
        is_human: bool,
        agent: Option<Box<dyn PlayerAgent>>,
    ) -> Result<(), RuleViolation> {
        self.state.register_player(id, display_name, is_human, agent)
    }

    /// Replace the roster with `humans` humans followed by `bots` bots.
    ///
    /// At least one human is always seated; bots fill what capacity is left.
    pub fn setup_prototype_multiplayer_session(&mut self, humans: usize, bots: usize) {
        self.state.clear_players();

        let capacity = self.state.players.capacity();
        let humans = humans.clamp(1, capacity.max(1));
        let bots = bots.min(capacity.saturating_sub(humans));

        for i in 1..=humans {
            let id = PlayerId::new(format!("player-human-{}", i));
            if let Err(e) = self.try_register_player(id, &format!("Human {}", i), true, None) {
                tracing::warn!("Could not seat human {}: {}", i, e);
            }
        }

        for i in 1..=bots {
            let id = PlayerId::new(format!("player-bot-{}", i));
            let agent = RuleBasedBotAgent::from_config(&self.config.bot);
            if let Err(e) =
                self.try_register_player(id, &format!("Bot {}", i), false, Some(Box::new(agent)))
            {
                tracing::warn!("Could not seat bot {}: {}", i, e);
            }
        }

        tracing::info!("Session ready: {} humans, {} bots", humans, bots);
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn can_attack(&self, source: &PlayerId, target: &PlayerId) -> bool {
        self.state.relations.can_attack(source, target)
    }

    pub fn stance(&self, source: &PlayerId, target: &PlayerId) -> DiplomaticStance {
        self.state.relations.stance(source, target)
    }

    pub fn trust_title(&self, player: &PlayerId) -> TrustTitle {
        self.state.agreements.trust_title(player)
    }

    pub fn defense_multiplier(&self, terrain: TerrainType) -> f32 {
        self.state.terrain.defense_multiplier(terrain)
    }

    pub fn transit_tax_income(&self, location: &LocationId, unit_count: i32) -> u64 {
        self.state.locations.transit_tax_income(location, unit_count)
    }

    /// Send an analyst to reveal up to `max_discoveries` hidden deposits
    pub fn dispatch_analyst(&mut self, city: &CityId, max_discoveries: usize) -> usize {
        let found = self.state.cities.dispatch_analyst(city, max_discoveries);
        if found > 0 {
            tracing::debug!("Analyst found {} deposits in {}", found, city);
        }
        found
    }

    pub fn city(&self, id: &CityId) -> Option<&CityState> {
        self.state.cities.find(id)
    }

    pub fn cities(&self) -> &CityRegistry {
        &self.state.cities
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.state.players
    }

    pub fn current_turn(&self) -> Turn {
        self.state.turn()
    }

    pub fn current_phase(&self) -> WeeklyPhase {
        self.state.phase()
    }

    pub fn last_report(&self) -> Option<&TurnReport> {
        self.last_report.as_ref()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.state)
    }
}

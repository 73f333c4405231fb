//! Cities and the registry that owns them
//!
//! Wellbeing metrics (public order, land fertility, bandit risk) live on a
//! 0-100 scale and are clamped after every mutation. Terrain multipliers are
//! rolled once at generation and never clamped.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{BattleConfig, RebellionConfig, RecoveryConfig};
use crate::core::error::RuleViolation;
use crate::core::types::{CityId, PlayerId, Turn};
use crate::world::terrain::{TerrainProfile, TerrainType};

pub const STAT_MIN: f32 = 0.0;
pub const STAT_MAX: f32 = 100.0;

fn clamp_stat(value: f32) -> f32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Grain,
    Iron,
    Gold,
    Timber,
    Stone,
}

/// A resource seam under a city, hidden until an analyst finds it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceDeposit {
    pub resource: ResourceType,
    /// 0.0 (trace) to 1.0 (motherlode)
    pub richness: f32,
    discovered: bool,
}

impl ResourceDeposit {
    pub fn hidden(resource: ResourceType, richness: f32) -> Self {
        Self {
            resource,
            richness: richness.clamp(0.0, 1.0),
            discovered: false,
        }
    }

    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    /// Discovery only ever goes one way
    fn discover(&mut self) {
        self.discovered = true;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: Turn,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CityState {
    pub id: CityId,
    pub name: String,
    pub description: String,
    pub terrain: TerrainType,
    owner: Option<PlayerId>,

    pub population: u32,
    public_order: f32,
    land_fertility: f32,
    bandit_risk: f32,

    pub defense_multiplier: f32,
    pub farming_multiplier: f32,
    pub mining_multiplier: f32,

    deposits: Vec<ResourceDeposit>,
    history: Vec<HistoryEntry>,
}

impl CityState {
    /// A calm, unowned city with multipliers copied from `profile`
    pub fn new(id: CityId, name: impl Into<String>, profile: TerrainProfile) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            terrain: profile.terrain,
            owner: None,
            population: 1000,
            public_order: STAT_MAX,
            land_fertility: STAT_MAX,
            bandit_risk: STAT_MIN,
            defense_multiplier: profile.defense_multiplier,
            farming_multiplier: profile.farming_multiplier,
            mining_multiplier: profile.mining_multiplier,
            deposits: Vec::new(),
            history: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_deposit(mut self, deposit: ResourceDeposit) -> Self {
        self.deposits.push(deposit);
        self
    }

    /// Override the wellbeing metrics (clamped), mostly for scenario setup
    pub fn with_wellbeing(mut self, order: f32, fertility: f32, bandit_risk: f32) -> Self {
        self.public_order = clamp_stat(order);
        self.land_fertility = clamp_stat(fertility);
        self.bandit_risk = clamp_stat(bandit_risk);
        self
    }

    pub fn owner(&self) -> Option<&PlayerId> {
        self.owner.as_ref()
    }

    pub fn public_order(&self) -> f32 {
        self.public_order
    }

    pub fn land_fertility(&self) -> f32 {
        self.land_fertility
    }

    pub fn bandit_risk(&self) -> f32 {
        self.bandit_risk
    }

    pub fn deposits(&self) -> &[ResourceDeposit] {
        &self.deposits
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn undiscovered_count(&self) -> usize {
        self.deposits.iter().filter(|d| !d.is_discovered()).count()
    }

    pub fn record(&mut self, turn: Turn, text: impl Into<String>) {
        self.history.push(HistoryEntry {
            turn,
            text: text.into(),
        });
    }

    pub fn register_battle(&mut self, intensity: f32, battle: &BattleConfig, turn: Turn) {
        let intensity = intensity.max(0.0);
        self.land_fertility = clamp_stat(self.land_fertility - intensity * battle.fertility_loss);
        self.public_order = clamp_stat(self.public_order - intensity * battle.order_loss);
        self.bandit_risk = clamp_stat(self.bandit_risk + intensity * battle.bandit_gain);
        self.record(turn, format!("Battle scar intensity {:.1}", intensity));
    }

    pub fn register_peaceful_turn(&mut self, recovery: &RecoveryConfig) {
        self.land_fertility = clamp_stat(self.land_fertility + recovery.fertility_regen);
        self.public_order = clamp_stat(self.public_order + recovery.order_regen);
        self.bandit_risk = clamp_stat(self.bandit_risk - recovery.bandit_decay);
    }

    pub fn register_rebellion(&mut self, rebellion: &RebellionConfig, turn: Turn) {
        self.public_order = clamp_stat(self.public_order - rebellion.order_loss);
        self.bandit_risk = clamp_stat(self.bandit_risk + rebellion.bandit_gain);
        self.record(turn, "Rebellion erupted");
    }

    /// Roll for unrest; only cities below the order threshold are at risk
    pub fn roll_rebellion(
        &mut self,
        rebellion: &RebellionConfig,
        rng: &mut impl Rng,
        turn: Turn,
    ) -> bool {
        if self.public_order >= rebellion.order_threshold {
            return false;
        }

        if rng.gen::<f64>() < rebellion.chance {
            self.register_rebellion(rebellion, turn);
            return true;
        }

        false
    }

    /// Reveal up to `max` hidden deposits in registration order
    pub fn discover_deposits(&mut self, max: usize) -> usize {
        let mut discovered = 0;
        for deposit in self.deposits.iter_mut().filter(|d| !d.is_discovered()) {
            if discovered >= max {
                break;
            }
            deposit.discover();
            discovered += 1;
        }
        discovered
    }
}

/// Owns every city in the session, in registration order
#[derive(Debug, Default, Clone)]
pub struct CityRegistry {
    cities: Vec<CityState>,
}

impl CityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a city; refused if its id is already taken
    pub fn register(&mut self, city: CityState) -> bool {
        if self.find(&city.id).is_some() {
            tracing::warn!("Duplicate city id {} ignored", city.id);
            return false;
        }
        self.cities.push(city);
        true
    }

    pub fn find(&self, id: &CityId) -> Option<&CityState> {
        self.cities.iter().find(|c| &c.id == id)
    }

    fn find_mut(&mut self, id: &CityId) -> Option<&mut CityState> {
        self.cities.iter_mut().find(|c| &c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CityState> {
        self.cities.iter()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn clear(&mut self) {
        self.cities.clear();
    }

    pub fn owner_of(&self, id: &CityId) -> Option<&PlayerId> {
        self.find(id).and_then(CityState::owner)
    }

    pub fn apply_battle(
        &mut self,
        id: &CityId,
        intensity: f32,
        battle: &BattleConfig,
        turn: Turn,
    ) -> Result<(), RuleViolation> {
        let city = self
            .find_mut(id)
            .ok_or_else(|| RuleViolation::CityNotFound(id.clone()))?;
        city.register_battle(intensity, battle, turn);
        Ok(())
    }

    pub fn record(&mut self, id: &CityId, turn: Turn, text: impl Into<String>) {
        if let Some(city) = self.find_mut(id) {
            city.record(turn, text);
        }
    }

    /// Background recovery then a rebellion roll for every city.
    ///
    /// Returns the ids of cities that rebelled this turn.
    pub fn apply_per_tick_effects(
        &mut self,
        recovery: &RecoveryConfig,
        rebellion: &RebellionConfig,
        rng: &mut impl Rng,
        turn: Turn,
    ) -> Vec<CityId> {
        let mut rebelled = Vec::new();
        for city in &mut self.cities {
            city.register_peaceful_turn(recovery);
            if city.roll_rebellion(rebellion, rng, turn) {
                tracing::debug!("Rebellion in {} (order {:.1})", city.id, city.public_order);
                rebelled.push(city.id.clone());
            }
        }
        rebelled
    }

    /// Reveal up to `max_discoveries` deposits; unknown cities discover nothing
    pub fn dispatch_analyst(&mut self, id: &CityId, max_discoveries: usize) -> usize {
        match self.find_mut(id) {
            Some(city) => city.discover_deposits(max_discoveries),
            None => 0,
        }
    }

    /// Hand the first ownerless city to `player`
    pub fn assign_free_city(&mut self, player: &PlayerId) -> Option<CityId> {
        let city = self.cities.iter_mut().find(|c| c.owner.is_none())?;
        city.owner = Some(player.clone());
        Some(city.id.clone())
    }
}

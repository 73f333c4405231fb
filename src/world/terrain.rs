//! Terrain profiles - how the ground under a city shapes its stats

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    Plains,
    Mountain,
    Forest,
    Desert,
    River,
    BridgeCrossing,
}

impl TerrainType {
    pub const ALL: [TerrainType; 6] = [
        TerrainType::Plains,
        TerrainType::Mountain,
        TerrainType::Forest,
        TerrainType::Desert,
        TerrainType::River,
        TerrainType::BridgeCrossing,
    ];

    /// Uniformly random terrain
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Range each city multiplier is rolled from when a city is generated
    pub fn stat_range(self) -> StatRange {
        match self {
            TerrainType::Plains => StatRange::new((0.8, 1.05), (1.2, 1.6), (0.7, 1.0)),
            TerrainType::Mountain => StatRange::new((1.3, 1.8), (0.5, 0.9), (1.2, 1.8)),
            TerrainType::Forest => StatRange::new((1.0, 1.3), (0.8, 1.1), (0.8, 1.2)),
            TerrainType::Desert => StatRange::new((0.7, 1.0), (0.3, 0.7), (1.0, 1.5)),
            TerrainType::River => StatRange::new((0.9, 1.2), (1.1, 1.5), (0.8, 1.1)),
            TerrainType::BridgeCrossing => StatRange::new((1.1, 1.4), (0.9, 1.2), (0.9, 1.3)),
        }
    }
}

/// Multipliers a terrain applies to defense, farming and mining
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub terrain: TerrainType,
    pub defense_multiplier: f32,
    pub farming_multiplier: f32,
    pub mining_multiplier: f32,
}

impl TerrainProfile {
    /// Neutral profile used when a terrain has not been seeded
    pub fn neutral(terrain: TerrainType) -> Self {
        Self {
            terrain,
            defense_multiplier: 1.0,
            farming_multiplier: 1.0,
            mining_multiplier: 1.0,
        }
    }
}

/// Min/max bounds for rolling per-city multipliers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatRange {
    pub defense: (f32, f32),
    pub farming: (f32, f32),
    pub mining: (f32, f32),
}

impl StatRange {
    pub const fn new(defense: (f32, f32), farming: (f32, f32), mining: (f32, f32)) -> Self {
        Self {
            defense,
            farming,
            mining,
        }
    }

    /// Roll a concrete profile inside the range
    pub fn roll(&self, terrain: TerrainType, rng: &mut impl Rng) -> TerrainProfile {
        TerrainProfile {
            terrain,
            defense_multiplier: rng.gen_range(self.defense.0..self.defense.1),
            farming_multiplier: rng.gen_range(self.farming.0..self.farming.1),
            mining_multiplier: rng.gen_range(self.mining.0..self.mining.1),
        }
    }
}

/// Static terrain -> profile lookup, seeded once per session
#[derive(Debug, Default, Clone)]
pub struct TerrainProfileTable {
    profiles: AHashMap<TerrainType, TerrainProfile>,
}

impl TerrainProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the standard profile for every terrain
    pub fn seeded() -> Self {
        let mut table = Self::new();
        table.seed_defaults();
        table
    }

    pub fn seed_defaults(&mut self) {
        self.profiles.clear();
        self.insert(TerrainType::Plains, 1.0, 1.2, 0.8);
        self.insert(TerrainType::Mountain, 1.2, 0.6, 1.4);
        self.insert(TerrainType::Forest, 1.1, 0.9, 1.1);
        self.insert(TerrainType::Desert, 0.9, 0.5, 1.0);
        self.insert(TerrainType::River, 1.0, 1.1, 0.9);
        self.insert(TerrainType::BridgeCrossing, 1.05, 1.0, 1.0);
    }

    pub fn insert(&mut self, terrain: TerrainType, defense: f32, farming: f32, mining: f32) {
        self.profiles.insert(
            terrain,
            TerrainProfile {
                terrain,
                defense_multiplier: defense,
                farming_multiplier: farming,
                mining_multiplier: mining,
            },
        );
    }

    pub fn get(&self, terrain: TerrainType) -> Option<&TerrainProfile> {
        self.profiles.get(&terrain)
    }

    /// Seeded profile, or the neutral one for unseeded terrain
    pub fn profile(&self, terrain: TerrainType) -> TerrainProfile {
        self.get(terrain)
            .copied()
            .unwrap_or_else(|| TerrainProfile::neutral(terrain))
    }

    pub fn defense_multiplier(&self, terrain: TerrainType) -> f32 {
        self.profile(terrain).defense_multiplier
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
    }
}

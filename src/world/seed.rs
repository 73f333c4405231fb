//! World seeding: the prototype map and roster-driven city generation
//!
//! Rosters are plain TOML tables of names and descriptions:
//!
//! ```toml
//! [[city]]
//! id = "city-samarra"
//! name = "Samarra"
//! description = "River port on the southern bend."
//! ```

use ahash::AHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::CityId;
use crate::world::city::{CityState, ResourceDeposit, ResourceType};
use crate::world::location::StrategicLocation;
use crate::world::terrain::{TerrainProfileTable, TerrainType};

/// Prefix for generated city ids
pub const CITY_ID_PREFIX: &str = "city";

/// One row of an externally supplied city roster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityRecord {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityRoster {
    #[serde(default, rename = "city")]
    pub cities: Vec<CityRecord>,
}

impl CityRoster {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Record for the `index`-th generated city.
    ///
    /// Names cycle through the roster; ids are only taken from the roster on
    /// the first pass so generated ids stay unique.
    pub fn resolve(&self, index: usize) -> CityRecord {
        let fallback_id = format!("{}-{}", CITY_ID_PREFIX, index + 1);

        if self.cities.is_empty() {
            return CityRecord {
                id: fallback_id,
                name: format!("City {}", index + 1),
                description: "Procedurally generated city.".into(),
            };
        }

        let seeded = &self.cities[index % self.cities.len()];
        let first_pass = index < self.cities.len();

        CityRecord {
            id: if first_pass && !seeded.id.trim().is_empty() {
                seeded.id.trim().to_string()
            } else {
                fallback_id
            },
            name: if seeded.name.trim().is_empty() {
                format!("City {}", index + 1)
            } else {
                seeded.name.trim().to_string()
            },
            description: if seeded.description.trim().is_empty() {
                "Generated city data.".into()
            } else {
                seeded.description.trim().to_string()
            },
        }
    }
}

/// The hand-built starting map: two cities and the Northpass bridge
pub fn prototype_world(terrain: &TerrainProfileTable) -> (Vec<CityState>, Vec<StrategicLocation>) {
    let karadag = CityState::new(
        CityId::from("city-karadag"),
        "Karadag",
        terrain.profile(TerrainType::Mountain),
    )
    .with_description("Mountain hold above the iron seams.")
    .with_deposit(ResourceDeposit::hidden(ResourceType::Iron, 0.9))
    .with_deposit(ResourceDeposit::hidden(ResourceType::Gold, 0.4));

    let ovakent = CityState::new(
        CityId::from("city-ovakent"),
        "Ovakent",
        terrain.profile(TerrainType::Plains),
    )
    .with_description("Granary town on the open plains.")
    .with_deposit(ResourceDeposit::hidden(ResourceType::Grain, 0.95))
    .with_deposit(ResourceDeposit::hidden(ResourceType::Stone, 0.25));

    let northpass = StrategicLocation::bridge("bridge-northpass", "Northpass Bridge", 6);

    (vec![karadag, ovakent], vec![northpass])
}

/// Generate `count` cities from a roster with random terrain and rolled stats.
///
/// Ids already in `reserved`, or handed out earlier in this call, are never
/// reused: a clashing id moves on to the next free `city-{n}`.
pub fn generate_cities(
    roster: &CityRoster,
    count: usize,
    reserved: impl IntoIterator<Item = CityId>,
    rng: &mut impl Rng,
) -> Vec<CityState> {
    let mut taken: AHashSet<CityId> = reserved.into_iter().collect();

    (0..count)
        .map(|index| {
            let record = roster.resolve(index);
            let id = unique_id(CityId::new(record.id), index, &taken);
            taken.insert(id.clone());

            let terrain = TerrainType::random(rng);
            let profile = terrain.stat_range().roll(terrain, rng);

            let mut city = CityState::new(id, record.name, profile)
                .with_description(record.description);
            for deposit in generate_deposits(terrain, rng) {
                city = city.with_deposit(deposit);
            }
            city
        })
        .collect()
}

fn unique_id(preferred: CityId, index: usize, taken: &AHashSet<CityId>) -> CityId {
    if !taken.contains(&preferred) {
        return preferred;
    }

    let mut n = index + 1;
    loop {
        let candidate = CityId::new(format!("{}-{}", CITY_ID_PREFIX, n));
        if !taken.contains(&candidate) {
            tracing::debug!("City id {} taken, using {}", preferred, candidate);
            return candidate;
        }
        n += 1;
    }
}

fn generate_deposits(terrain: TerrainType, rng: &mut impl Rng) -> Vec<ResourceDeposit> {
    let candidates: &[ResourceType] = match terrain {
        TerrainType::Mountain => &[ResourceType::Iron, ResourceType::Gold, ResourceType::Stone],
        TerrainType::Forest => &[ResourceType::Timber],
        TerrainType::Plains | TerrainType::River => &[ResourceType::Grain],
        TerrainType::Desert => &[ResourceType::Stone, ResourceType::Gold],
        TerrainType::BridgeCrossing => &[ResourceType::Stone],
    };

    let mut deposits = Vec::new();
    for &resource in candidates {
        if rng.gen::<f32>() < 0.6 {
            deposits.push(ResourceDeposit::hidden(resource, rng.gen_range(0.1..1.0)));
        }
    }
    deposits
}

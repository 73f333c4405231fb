//! Read-only snapshots of engine state for UI and tooling

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{PlayerId, Turn};
use crate::diplomacy::agreement::TrustTitle;
use crate::diplomacy::relation::DiplomacyRelation;
use crate::player::registry::PlayerProfile;
use crate::simulation::phase::WeeklyPhase;
use crate::simulation::state::WorldState;
use crate::world::city::CityState;
use crate::world::location::StrategicLocation;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub profile: PlayerProfile,
    pub trust_title: TrustTitle,
    pub agreements_signed: usize,
}

/// Serializable copy of the world; owns its data, so holding one never
/// blocks the engine
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub turn: Turn,
    pub phase: WeeklyPhase,
    pub cities: Vec<CityState>,
    pub locations: Vec<StrategicLocation>,
    pub players: Vec<PlayerSnapshot>,
    /// Sorted by (source, target)
    pub relations: Vec<DiplomacyRelation>,
}

impl WorldSnapshot {
    pub fn capture(state: &WorldState) -> Self {
        let players = state
            .players
            .profiles()
            .map(|profile| PlayerSnapshot {
                profile: profile.clone(),
                trust_title: state.agreements.trust_title(&profile.id),
                agreements_signed: state
                    .agreements
                    .state(&profile.id)
                    .map(|s| s.agreements().len())
                    .unwrap_or(0),
            })
            .collect();

        let mut relations: Vec<DiplomacyRelation> = state.relations.iter().cloned().collect();
        relations.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        Self {
            turn: state.turn(),
            phase: state.phase(),
            cities: state.cities.iter().cloned().collect(),
            locations: state.locations.iter().cloned().collect(),
            players,
            relations,
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| &p.profile.id == id)
    }

    pub fn try_to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> String {
        self.try_to_json().unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Turn {} ({:?}) - {} cities, {} players",
            self.turn,
            self.phase,
            self.cities.len(),
            self.players.len()
        )];

        for city in &self.cities {
            lines.push(format!(
                "  {:<14} {:<14} owner={:<16} order={:>5.1} fertility={:>5.1} bandits={:>5.1} deposits={}/{}",
                city.id.as_str(),
                format!("{:?}", city.terrain),
                city.owner().map(PlayerId::as_str).unwrap_or("-"),
                city.public_order(),
                city.land_fertility(),
                city.bandit_risk(),
                city.deposits().len() - city.undiscovered_count(),
                city.deposits().len(),
            ));
        }

        for player in &self.players {
            lines.push(format!(
                "  {:<16} {:<10} human={} trust={:?}",
                player.profile.id.as_str(),
                player.profile.display_name,
                player.profile.is_human,
                player.trust_title,
            ));
        }

        for relation in self.relations.iter().filter(|r| r.source < r.target) {
            lines.push(format!(
                "  {} <-> {}: {:?}",
                relation.source, relation.target, relation.stance
            ));
        }

        lines.join("\n")
    }
}

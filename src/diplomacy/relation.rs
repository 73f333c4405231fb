//! Stance graph between players
//!
//! Entries are keyed by ordered pair but every write goes through
//! [`DiplomacyRelationGraph::set_stance`], which updates both directions
//! together, so `stance(a, b) == stance(b, a)` holds after every change.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::RuleViolation;
use crate::core::types::{PlayerId, Turn};
use crate::player::registry::PlayerRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiplomaticStance {
    #[default]
    Neutral,
    Peace,
    Ceasefire,
    War,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiplomacyRelation {
    pub source: PlayerId,
    pub target: PlayerId,
    pub stance: DiplomaticStance,
    pub last_updated_turn: Turn,
}

type PairKey = (PlayerId, PlayerId);

#[derive(Debug, Default, Clone)]
pub struct DiplomacyRelationGraph {
    relations: AHashMap<PairKey, DiplomacyRelation>,
}

impl DiplomacyRelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the relation, creating a neutral one on first contact
    pub fn get_or_create_relation(
        &mut self,
        source: &PlayerId,
        target: &PlayerId,
        turn: Turn,
    ) -> &DiplomacyRelation {
        self.relations
            .entry((source.clone(), target.clone()))
            .or_insert_with(|| DiplomacyRelation {
                source: source.clone(),
                target: target.clone(),
                stance: DiplomaticStance::Neutral,
                last_updated_turn: turn,
            })
    }

    pub fn relation(&self, source: &PlayerId, target: &PlayerId) -> Option<&DiplomacyRelation> {
        self.relations.get(&(source.clone(), target.clone()))
    }

    /// Current stance; pairs that never met are neutral
    pub fn stance(&self, source: &PlayerId, target: &PlayerId) -> DiplomaticStance {
        self.relation(source, target)
            .map(|r| r.stance)
            .unwrap_or_default()
    }

    /// Neutral relations in both directions between `player` and everyone else
    pub fn introduce(&mut self, player: &PlayerId, others: &[PlayerId], turn: Turn) {
        for other in others.iter().filter(|o| *o != player) {
            self.get_or_create_relation(player, other, turn);
            self.get_or_create_relation(other, player, turn);
        }
    }

    pub fn set_stance(
        &mut self,
        players: &PlayerRegistry,
        source: &PlayerId,
        target: &PlayerId,
        stance: DiplomaticStance,
        turn: Turn,
    ) -> Result<(), RuleViolation> {
        if source == target {
            return Err(RuleViolation::SelfTargeting(source.clone()));
        }
        for id in [source, target] {
            if !players.contains(id) {
                return Err(RuleViolation::PlayerNotFound(id.clone()));
            }
        }

        for (from, to) in [(source, target), (target, source)] {
            let relation = self
                .relations
                .entry((from.clone(), to.clone()))
                .or_insert_with(|| DiplomacyRelation {
                    source: from.clone(),
                    target: to.clone(),
                    stance,
                    last_updated_turn: turn,
                });
            relation.stance = stance;
            relation.last_updated_turn = turn;
        }

        tracing::debug!("{} <-> {} now {:?} (turn {})", source, target, stance, turn);
        Ok(())
    }

    /// Attacks are only legal between distinct players at war
    pub fn can_attack(&self, source: &PlayerId, target: &PlayerId) -> bool {
        if source.is_blank() || target.is_blank() || source == target {
            return false;
        }
        self.stance(source, target) == DiplomaticStance::War
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiplomacyRelation> {
        self.relations.values()
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn clear(&mut self) {
        self.relations.clear();
    }
}

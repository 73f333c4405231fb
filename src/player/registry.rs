//! Player roster with automated-agent bindings

use serde::{Deserialize, Serialize};

use crate::core::error::RuleViolation;
use crate::core::types::PlayerId;
use crate::player::agent::PlayerAgent;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub display_name: String,
    pub is_human: bool,
}

#[derive(Debug)]
struct RegisteredPlayer {
    profile: PlayerProfile,
    agent: Option<Box<dyn PlayerAgent>>,
}

/// Players in registration order.
///
/// Order matters: automated players act in the order they joined, which
/// keeps turn resolution reproducible.
#[derive(Debug)]
pub struct PlayerRegistry {
    max_players: usize,
    players: Vec<RegisteredPlayer>,
}

impl PlayerRegistry {
    pub fn new(max_players: usize) -> Self {
        Self {
            max_players,
            players: Vec::new(),
        }
    }

    /// Validate and add a player.
    ///
    /// Agents are only bound to non-human players; an agent passed for a
    /// human is dropped.
    pub fn register(
        &mut self,
        id: PlayerId,
        display_name: &str,
        is_human: bool,
        agent: Option<Box<dyn PlayerAgent>>,
    ) -> Result<(), RuleViolation> {
        if id.is_blank() {
            return Err(RuleViolation::InvalidPlayerId);
        }
        if self.contains(&id) {
            return Err(RuleViolation::AlreadyRegistered(id));
        }
        if self.is_full() {
            return Err(RuleViolation::CapacityExceeded(self.max_players));
        }

        let display_name = if display_name.trim().is_empty() {
            id.to_string()
        } else {
            display_name.to_string()
        };

        self.players.push(RegisteredPlayer {
            profile: PlayerProfile {
                id,
                display_name,
                is_human,
            },
            agent: if is_human { None } else { agent },
        });
        Ok(())
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.profile.id == id)
    }

    pub fn profile(&self, id: &PlayerId) -> Option<&PlayerProfile> {
        self.profiles().find(|p| &p.id == id)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.players.iter().map(|p| &p.profile)
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.profiles().map(|p| p.id.clone()).collect()
    }

    /// Bound agents, in registration order
    pub fn agents(&self) -> impl Iterator<Item = (&PlayerId, &dyn PlayerAgent)> {
        self.players
            .iter()
            .filter_map(|p| p.agent.as_deref().map(|agent| (&p.profile.id, agent)))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_players
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::agent::RuleBasedBotAgent;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = PlayerRegistry::new(4);
        registry
            .register(PlayerId::from("p1"), "First", true, None)
            .unwrap();

        let profile = registry.profile(&PlayerId::from("p1")).unwrap();
        assert_eq!(profile.display_name, "First");
        assert!(profile.is_human);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_blank_display_name_falls_back_to_id() {
        let mut registry = PlayerRegistry::new(4);
        registry.register(PlayerId::from("p1"), "  ", false, None).unwrap();
        assert_eq!(registry.profile(&PlayerId::from("p1")).unwrap().display_name, "p1");
    }

    #[test]
    fn test_rejections_leave_registry_untouched() {
        let mut registry = PlayerRegistry::new(2);
        registry.register(PlayerId::from("p1"), "", true, None).unwrap();

        assert_eq!(
            registry.register(PlayerId::from(" "), "", true, None),
            Err(RuleViolation::InvalidPlayerId)
        );
        assert_eq!(
            registry.register(PlayerId::from("p1"), "", true, None),
            Err(RuleViolation::AlreadyRegistered(PlayerId::from("p1")))
        );

        registry.register(PlayerId::from("p2"), "", true, None).unwrap();
        assert_eq!(
            registry.register(PlayerId::from("p3"), "", true, None),
            Err(RuleViolation::CapacityExceeded(2))
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_agents_only_for_bots_in_order() {
        let mut registry = PlayerRegistry::new(4);
        let bot = || Some(Box::new(RuleBasedBotAgent::default()) as Box<dyn PlayerAgent>);

        registry.register(PlayerId::from("bot-b"), "", false, bot()).unwrap();
        registry.register(PlayerId::from("human"), "", true, bot()).unwrap();
        registry.register(PlayerId::from("bot-a"), "", false, bot()).unwrap();

        let order: Vec<_> = registry.agents().map(|(id, _)| id.to_string()).collect();
        assert_eq!(order, vec!["bot-b", "bot-a"]);
    }
}

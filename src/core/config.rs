//! Engine configuration with documented constants
//!
//! All tuning numbers for the turn engine are collected here. Every section
//! deserializes from TOML with `#[serde(default)]`, so a config file only
//! needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{DominionError, Result};
use crate::core::types::{CityId, PlayerId};

/// Configuration for the simulation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the engine's deterministic RNG (rebellions, bots, seeding)
    pub seed: u64,

    /// Which rule gates the AttackCity command
    pub attack_rule: AttackRule,

    pub players: PlayerConfig,
    pub battle: BattleConfig,
    pub recovery: RecoveryConfig,
    pub rebellion: RebellionConfig,
    pub bot: BotConfig,
    pub session: SessionConfig,
}

/// Attack gating variants.
///
/// The two variants are mutually exclusive: `Stance` ignores the weekly
/// phase entirely, `WarPhase` ignores diplomatic stance entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackRule {
    /// Attacker must be at war with the city's owner
    #[default]
    Stance,
    /// Attacks are only allowed during the War day of the week
    WarPhase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Maximum number of registered players per session
    pub max_players: usize,
}

/// Per-unit-of-intensity battle damage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub fertility_loss: f32,
    pub order_loss: f32,
    pub bandit_gain: f32,
}

/// Background recovery applied to every city each turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    pub fertility_regen: f32,
    pub order_regen: f32,
    pub bandit_decay: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RebellionConfig {
    /// Rebellions are only rolled for cities with public order below this
    pub order_threshold: f32,

    /// Independent per-turn probability once below the threshold
    ///
    /// At 0.15 a city sitting at low order rebels roughly once a week.
    pub chance: f64,

    pub order_loss: f32,
    pub bandit_gain: f32,
}

/// Defaults for the rule-based bot handed out by prototype sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub rival: PlayerId,
    pub target_city: CityId,
    pub min_intensity: f32,
    pub max_intensity: f32,
}

/// Prototype session seeded by `initialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub human_players: usize,
    pub bot_players: usize,
    /// Wall-clock length of one turn when driven by a `GameSession`
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            attack_rule: AttackRule::Stance,
            players: PlayerConfig::default(),
            battle: BattleConfig::default(),
            recovery: RecoveryConfig::default(),
            rebellion: RebellionConfig::default(),
            bot: BotConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_players: 4 }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            fertility_loss: 3.0,
            order_loss: 4.0,
            bandit_gain: 2.0,
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            fertility_regen: 0.7,
            order_regen: 0.5,
            bandit_decay: 0.4,
        }
    }
}

impl Default for RebellionConfig {
    fn default() -> Self {
        Self {
            order_threshold: 30.0,
            chance: 0.15,
            order_loss: 8.0,
            bandit_gain: 7.0,
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            rival: PlayerId::from("player-human-1"),
            target_city: CityId::from("city-karadag"),
            min_intensity: 0.4,
            max_intensity: 1.2,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            human_players: 1,
            bot_players: 3,
            tick_interval_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.players.max_players == 0 {
            return Err(DominionError::Config(
                "players.max_players must be at least 1".into(),
            ));
        }

        if self.session.tick_interval_ms == 0 {
            return Err(DominionError::Config(
                "session.tick_interval_ms must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.rebellion.chance) {
            return Err(DominionError::Config(format!(
                "rebellion.chance ({}) must be within [0, 1]",
                self.rebellion.chance
            )));
        }

        if !self.bot.min_intensity.is_finite() || !self.bot.max_intensity.is_finite() {
            return Err(DominionError::Config(format!(
                "bot intensity range {}..{} must be finite",
                self.bot.min_intensity, self.bot.max_intensity
            )));
        }

        if self.bot.min_intensity < 0.0 || self.bot.min_intensity >= self.bot.max_intensity {
            return Err(DominionError::Config(format!(
                "bot intensity range {}..{} must be non-negative and non-empty",
                self.bot.min_intensity, self.bot.max_intensity
            )));
        }

        let rates = [
            self.battle.fertility_loss,
            self.battle.order_loss,
            self.battle.bandit_gain,
            self.recovery.fertility_regen,
            self.recovery.order_regen,
            self.recovery.bandit_decay,
            self.rebellion.order_loss,
            self.rebellion.bandit_gain,
        ];
        if rates.iter().any(|r| *r < 0.0 || !r.is_finite()) {
            return Err(DominionError::Config(
                "battle, recovery and rebellion rates must be finite and non-negative".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.players.max_players, 4);
        assert_eq!(config.attack_rule, AttackRule::Stance);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 7
            attack_rule = "war_phase"

            [rebellion]
            chance = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.attack_rule, AttackRule::WarPhase);
        assert_eq!(config.rebellion.chance, 1.0);
        assert_eq!(config.rebellion.order_threshold, 30.0);
        assert_eq!(config.battle, BattleConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_chance() {
        let result = EngineConfig::from_toml_str("[rebellion]\nchance = 1.5\n");
        assert!(matches!(result, Err(DominionError::Config(_))));
    }

    #[test]
    fn test_rejects_empty_intensity_range() {
        let mut config = EngineConfig::default();
        config.bot.min_intensity = 2.0;
        config.bot.max_intensity = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_infinite_intensity() {
        let result = EngineConfig::from_toml_str("[bot]\nmax_intensity = inf\n");
        assert!(matches!(result, Err(DominionError::Config(_))));

        let result = EngineConfig::from_toml_str("[bot]\nmin_intensity = nan\n");
        assert!(matches!(result, Err(DominionError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_tick_interval() {
        let result = EngineConfig::from_toml_str("[session]\ntick_interval_ms = 0\n");
        assert!(matches!(result, Err(DominionError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[players]\nmax_players = 2").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.players.max_players, 2);
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let result = EngineConfig::from_toml_str("seed = \"not a number\"");
        assert!(matches!(result, Err(DominionError::TomlError(_))));
    }
}

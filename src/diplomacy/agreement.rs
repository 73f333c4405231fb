//! Agreements and per-player trust ledgers

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::RuleViolation;
use crate::core::types::{PlayerId, Turn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementType {
    NonAggression,
    Trade,
}

/// Reputation earned by keeping or breaking agreements.
///
/// `Unreliable` is terminal: no amount of later good behavior clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustTitle {
    #[default]
    Neutral,
    Loyal,
    Unreliable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiplomacyAgreement {
    pub source: PlayerId,
    pub target: PlayerId,
    pub agreement: AgreementType,
    pub signed_turn: Turn,
    broken: bool,
}

impl DiplomacyAgreement {
    pub fn is_broken(&self) -> bool {
        self.broken
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerDiplomacyState {
    pub player: PlayerId,
    trust_title: TrustTitle,
    agreements: Vec<DiplomacyAgreement>,
}

impl PlayerDiplomacyState {
    fn new(player: PlayerId) -> Self {
        Self {
            player,
            trust_title: TrustTitle::Neutral,
            agreements: Vec::new(),
        }
    }

    pub fn trust_title(&self) -> TrustTitle {
        self.trust_title
    }

    pub fn agreements(&self) -> &[DiplomacyAgreement] {
        &self.agreements
    }

    fn mark_loyal_behavior(&mut self) {
        if self.trust_title != TrustTitle::Unreliable {
            self.trust_title = TrustTitle::Loyal;
        }
    }

    fn mark_breach(&mut self) {
        self.trust_title = TrustTitle::Unreliable;
    }
}

/// Every player's agreement ledger, created on first signature
#[derive(Debug, Default, Clone)]
pub struct AgreementLedger {
    states: AHashMap<PlayerId, PlayerDiplomacyState>,
}

impl AgreementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, player: &PlayerId) -> Option<&PlayerDiplomacyState> {
        self.states.get(player)
    }

    pub fn trust_title(&self, player: &PlayerId) -> TrustTitle {
        self.state(player)
            .map(PlayerDiplomacyState::trust_title)
            .unwrap_or_default()
    }

    pub fn sign(
        &mut self,
        source: &PlayerId,
        target: &PlayerId,
        agreement: AgreementType,
        turn: Turn,
    ) {
        let state = self
            .states
            .entry(source.clone())
            .or_insert_with(|| PlayerDiplomacyState::new(source.clone()));
        state.agreements.push(DiplomacyAgreement {
            source: source.clone(),
            target: target.clone(),
            agreement,
            signed_turn: turn,
            broken: false,
        });
        state.mark_loyal_behavior();
    }

    /// Break the oldest unbroken matching agreement
    pub fn break_agreement(
        &mut self,
        source: &PlayerId,
        target: &PlayerId,
        agreement: AgreementType,
    ) -> Result<(), RuleViolation> {
        let not_found = || RuleViolation::AgreementNotFound {
            source_player: source.clone(),
            target: target.clone(),
        };

        let state = self.states.get_mut(source).ok_or_else(not_found)?;
        let entry = state
            .agreements
            .iter_mut()
            .find(|a| &a.target == target && a.agreement == agreement && !a.broken)
            .ok_or_else(not_found)?;

        entry.broken = true;
        state.mark_breach();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

//! Diplomacy: the stance graph and agreement ledgers

pub mod agreement;
pub mod relation;

pub use agreement::{
    AgreementLedger, AgreementType, DiplomacyAgreement, PlayerDiplomacyState, TrustTitle,
};
pub use relation::{DiplomacyRelation, DiplomacyRelationGraph, DiplomaticStance};

//! Integration tests for the simulation engine
//!
//! These drive a full engine through its public surface:
//! - Prototype sessions, registration limits and city hand-out
//! - Diplomacy, agreements and trust titles
//! - Attack gating under both attack rules
//! - Bot turns, rebellions and recovery over many turns

use dominion::command::{parse_command, SimulationCommand};
use dominion::core::config::{AttackRule, EngineConfig};
use dominion::core::error::RuleViolation;
use dominion::core::types::{CityId, LocationId, PlayerId};
use dominion::diplomacy::{AgreementType, DiplomaticStance, TrustTitle};
use dominion::simulation::{SimulationEngine, WeeklyPhase, DAYS_PER_WEEK};
use dominion::world::{CityRoster, TerrainType};

fn engine_with(humans: usize, bots: usize) -> SimulationEngine {
    let mut config = EngineConfig::default();
    config.session.human_players = humans;
    config.session.bot_players = bots;
    let mut engine = SimulationEngine::new(config);
    engine.initialize();
    engine
}

fn human(i: usize) -> PlayerId {
    PlayerId::new(format!("player-human-{}", i))
}

fn bot(i: usize) -> PlayerId {
    PlayerId::new(format!("player-bot-{}", i))
}

fn karadag() -> CityId {
    CityId::from("city-karadag")
}

// ============================================================================
// Sessions and registration
// ============================================================================

#[test]
fn test_prototype_session_trade_agreement_makes_loyal() {
    let mut engine = engine_with(1, 1);
    engine.setup_prototype_multiplayer_session(1, 1);
    assert_eq!(engine.current_phase(), WeeklyPhase::Diplomacy);

    let signed = engine.execute_command(&SimulationCommand::SignAgreement {
        source: human(1),
        target: bot(1),
        agreement: AgreementType::Trade,
    });

    assert_eq!(signed, Ok(()));
    assert_eq!(engine.trust_title(&human(1)), TrustTitle::Loyal);
    assert_eq!(engine.trust_title(&bot(1)), TrustTitle::Neutral);
}

#[test]
fn test_registration_limits() {
    let mut engine = engine_with(1, 3);
    assert_eq!(engine.players().len(), 4);

    let full = engine.try_register_player(PlayerId::from("late"), "Late", true, None);
    assert_eq!(full, Err(RuleViolation::CapacityExceeded(4)));

    engine.setup_prototype_multiplayer_session(1, 0);
    assert_eq!(
        engine.try_register_player(PlayerId::from("  "), "Blank", true, None),
        Err(RuleViolation::InvalidPlayerId)
    );
    assert_eq!(
        engine.try_register_player(human(1), "Again", true, None),
        Err(RuleViolation::AlreadyRegistered(human(1)))
    );

    engine
        .try_register_player(PlayerId::from("guest"), "", true, None)
        .unwrap();
    let guest = engine.players().profile(&PlayerId::from("guest")).unwrap();
    assert_eq!(guest.display_name, "guest");
    assert_eq!(engine.stance(&human(1), &guest.id), DiplomaticStance::Neutral);
}

#[test]
fn test_session_reset_clears_diplomacy() {
    let mut engine = engine_with(2, 1);
    engine.execute_command(&parse_command("war player-human-1 player-bot-1").unwrap()).unwrap();
    engine.execute_command(&parse_command("sign player-human-1 player-human-2 trade").unwrap()).unwrap();
    engine.execute_command(&parse_command("sign player-human-2 player-human-1 nap").unwrap()).unwrap();
    engine.execute_command(&parse_command("break player-human-2 player-human-1 nap").unwrap()).unwrap();
    assert_eq!(engine.trust_title(&human(1)), TrustTitle::Loyal);
    assert_eq!(engine.trust_title(&human(2)), TrustTitle::Unreliable);

    engine.setup_prototype_multiplayer_session(2, 1);

    for (a, b) in [(human(1), bot(1)), (human(1), human(2)), (human(2), bot(1))] {
        assert_eq!(engine.stance(&a, &b), DiplomaticStance::Neutral);
        assert_eq!(engine.stance(&b, &a), DiplomaticStance::Neutral);
        assert!(!engine.can_attack(&a, &b));
    }
    for id in [human(1), human(2), bot(1)] {
        assert_eq!(engine.trust_title(&id), TrustTitle::Neutral);
    }
    assert!(engine.snapshot().players.iter().all(|p| p.agreements_signed == 0));

    // Old agreements are gone, so there is nothing left to break
    let breach = parse_command("break player-human-1 player-human-2 trade").unwrap();
    assert!(engine.execute_command(&breach).unwrap_err().is_not_found());
}

#[test]
fn test_roster_ids_never_collide_with_existing_cities() {
    let roster = CityRoster::from_toml_str(
        r#"
        [[city]]
        id = "city-2"
        name = "Dura"

        [[city]]
        id = ""
        name = "Hatra"

        [[city]]
        id = "city-karadag"
        name = "Nineveh"
        "#,
    )
    .unwrap();
    let mut engine = SimulationEngine::new(EngineConfig::default()).with_roster(roster, 3);
    engine.initialize();

    let ids: Vec<&str> = engine.cities().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["city-karadag", "city-ovakent", "city-2", "city-3", "city-4"]
    );
    assert_eq!(engine.city(&CityId::from("city-4")).unwrap().name, "Nineveh");
}

#[test]
fn test_cities_go_to_first_players() {
    let engine = engine_with(1, 3);
    assert_eq!(engine.cities().owner_of(&karadag()), Some(&human(1)));
    assert_eq!(
        engine.cities().owner_of(&CityId::from("city-ovakent")),
        Some(&bot(1))
    );
}

// ============================================================================
// Diplomacy and combat
// ============================================================================

#[test]
fn test_war_enables_attacks_both_ways() {
    let mut engine = engine_with(1, 1);
    assert!(!engine.can_attack(&human(1), &bot(1)));

    let command = parse_command("war player-human-1 player-bot-1").unwrap();
    engine.execute_command(&command).unwrap();

    assert!(engine.can_attack(&human(1), &bot(1)));
    assert!(engine.can_attack(&bot(1), &human(1)));
    assert!(!engine.can_attack(&human(1), &human(1)));

    engine
        .execute_command(&SimulationCommand::AttackCity {
            source: bot(1),
            city: karadag(),
            intensity: 1.0,
        })
        .unwrap();

    let city = engine.city(&karadag()).unwrap();
    assert_eq!(city.public_order(), 96.0);
    assert_eq!(city.land_fertility(), 97.0);
    assert_eq!(city.bandit_risk(), 2.0);
    assert!(city
        .history()
        .iter()
        .any(|h| h.text == "player-bot-1 attacked with intensity 1.0"));
}

#[test]
fn test_peace_blocks_attacks() {
    let mut engine = engine_with(1, 1);
    engine.execute_command(&parse_command("war player-human-1 player-bot-1").unwrap()).unwrap();
    engine.execute_command(&parse_command("peace player-bot-1 player-human-1").unwrap()).unwrap();

    let refused = engine.execute_command(&parse_command("attack player-bot-1 city-karadag").unwrap());
    assert!(matches!(refused, Err(RuleViolation::NotAtWar { .. })));
    assert_eq!(engine.city(&karadag()).unwrap().public_order(), 100.0);
}

#[test]
fn test_war_phase_rule_ignores_stance() {
    let mut config = EngineConfig::default();
    config.attack_rule = AttackRule::WarPhase;
    config.session.bot_players = 0;
    let mut engine = SimulationEngine::new(config);
    engine.initialize();

    let attack = SimulationCommand::AttackCity {
        source: human(1),
        city: CityId::from("city-ovakent"),
        intensity: 0.5,
    };
    assert!(matches!(
        engine.execute_command(&attack),
        Err(RuleViolation::InvalidPhase { required: WeeklyPhase::War, .. })
    ));

    while engine.current_phase() != WeeklyPhase::War {
        engine.advance();
    }
    assert_eq!(engine.current_turn(), 6);
    assert_eq!(engine.execute_command(&attack), Ok(()));
}

#[test]
fn test_break_agreement_twice() {
    let mut engine = engine_with(2, 0);
    let sign = parse_command("sign player-human-1 player-human-2 nap").unwrap();
    let breach = parse_command("break player-human-1 player-human-2 non-aggression").unwrap();

    engine.execute_command(&sign).unwrap();
    assert_eq!(engine.execute_command(&breach), Ok(()));
    assert!(engine.execute_command(&breach).unwrap_err().is_not_found());
    assert_eq!(engine.trust_title(&human(1)), TrustTitle::Unreliable);

    // Unreliable sticks even after signing again
    engine.execute_command(&sign).unwrap();
    assert_eq!(engine.trust_title(&human(1)), TrustTitle::Unreliable);
}

#[test]
fn test_sign_outside_diplomacy_is_refused() {
    let mut engine = engine_with(2, 0);
    engine.advance();
    engine.advance();
    assert_eq!(engine.current_phase(), WeeklyPhase::ResourceCollection);

    let refused = engine.execute_command(&parse_command("sign player-human-1 player-human-2 trade").unwrap());
    assert!(matches!(refused, Err(RuleViolation::InvalidPhase { .. })));
    assert_eq!(engine.trust_title(&human(1)), TrustTitle::Neutral);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_transit_tax_and_defense() {
    let engine = engine_with(1, 0);
    assert_eq!(engine.transit_tax_income(&LocationId::from("bridge-northpass"), 5), 30);
    assert_eq!(engine.transit_tax_income(&LocationId::from("bridge-northpass"), -3), 0);
    assert_eq!(engine.transit_tax_income(&LocationId::from("nowhere"), 5), 0);
    assert_eq!(engine.defense_multiplier(TerrainType::Forest), 1.1);
}

#[test]
fn test_analyst_reveals_in_order() {
    let mut engine = engine_with(1, 0);

    assert_eq!(engine.dispatch_analyst(&karadag(), 0), 0);
    assert_eq!(engine.dispatch_analyst(&karadag(), 1), 1);
    let city = engine.city(&karadag()).unwrap();
    assert!(city.deposits()[0].is_discovered());
    assert!(!city.deposits()[1].is_discovered());

    assert_eq!(engine.dispatch_analyst(&karadag(), 5), 1);
    assert_eq!(engine.dispatch_analyst(&karadag(), 5), 0);
    assert_eq!(engine.dispatch_analyst(&CityId::from("city-atlantis"), 5), 0);
}

// ============================================================================
// Turn loop
// ============================================================================

#[test]
fn test_ten_quiet_turns_recover_wellbeing() {
    let mut engine = engine_with(2, 0);
    engine.execute_command(&parse_command("war player-human-1 player-human-2").unwrap()).unwrap();
    engine
        .execute_command(&parse_command("attack player-human-2 city-karadag 5").unwrap())
        .unwrap();

    let before = engine.city(&karadag()).unwrap().clone();
    assert_eq!(before.public_order(), 80.0);

    for _ in 0..10 {
        let report = engine.advance();
        assert!(report.rebellions.is_empty());
        assert!(report.executed.is_empty());
    }

    let after = engine.city(&karadag()).unwrap();
    assert!((after.public_order() - 85.0).abs() < 1e-3);
    assert!((after.land_fertility() - 92.0).abs() < 1e-3);
    assert!((after.bandit_risk() - 6.0).abs() < 1e-3);
    assert_eq!(after.history().len(), before.history().len());
    assert_eq!(after.owner(), before.owner());
    assert_eq!(after.deposits(), before.deposits());
}

#[test]
fn test_bot_turns_follow_the_week() {
    let mut engine = engine_with(1, 3);

    let diplomacy = engine.advance().clone();
    assert_eq!(diplomacy.phase, WeeklyPhase::Diplomacy);
    assert_eq!(diplomacy.executed.len(), 3);
    for command in &diplomacy.executed {
        assert!(matches!(
            command,
            SimulationCommand::OfferCeasefire { .. } | SimulationCommand::DeclareWar { .. }
        ));
    }

    for _ in 2..6 {
        let report = engine.advance();
        assert!(report.executed.is_empty() && report.rejected.is_empty());
    }

    let war = engine.advance().clone();
    assert_eq!(war.phase, WeeklyPhase::War);
    assert_eq!(war.executed.len() + war.rejected.len(), 3);
    for command in &war.executed {
        assert_eq!(engine.stance(command.source(), &human(1)), DiplomaticStance::War);
    }
    for rejected in &war.rejected {
        assert_ne!(engine.stance(rejected.command.source(), &human(1)), DiplomaticStance::War);
    }
}

#[test]
fn test_unbounded_bot_intensity_does_not_halt_turns() {
    let mut config = EngineConfig::default();
    config.bot.max_intensity = f32::INFINITY;
    assert!(config.validate().is_err());

    // Engines built without validation must still survive a war day
    let mut engine = SimulationEngine::new(config);
    engine.initialize();
    engine.execute_command(&parse_command("war player-bot-1 player-human-1").unwrap()).unwrap();
    while engine.current_phase() != WeeklyPhase::War {
        engine.advance();
    }
    assert_eq!(engine.current_turn(), DAYS_PER_WEEK - 1);

    let war = engine.last_report().unwrap();
    assert_eq!(war.phase, WeeklyPhase::War);
    assert!(war.failed_agents.is_empty());
    let city = engine.city(&karadag()).unwrap();
    assert!((0.0..=100.0).contains(&city.public_order()));
}

#[test]
fn test_same_seed_same_history() {
    let run = || {
        let mut engine = engine_with(1, 3);
        for _ in 0..40 {
            engine.advance();
        }
        engine.snapshot().to_json()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_certain_rebellion_in_unruly_city() {
    let mut config = EngineConfig::default();
    config.rebellion.chance = 1.0;
    config.session.human_players = 2;
    config.session.bot_players = 0;
    let mut engine = SimulationEngine::new(config);
    engine.initialize();

    engine.execute_command(&parse_command("war player-human-1 player-human-2").unwrap()).unwrap();
    engine
        .execute_command(&parse_command("attack player-human-2 city-karadag 20").unwrap())
        .unwrap();
    assert_eq!(engine.city(&karadag()).unwrap().public_order(), 20.0);

    let report = engine.advance();
    assert_eq!(report.rebellions, vec![karadag()]);

    let city = engine.city(&karadag()).unwrap();
    assert!((city.public_order() - 12.5).abs() < 1e-3);
    assert_eq!(city.history().last().map(|h| h.text.as_str()), Some("Rebellion erupted"));
}

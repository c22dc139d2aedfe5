//! DiceEngine integration tests

use dice_odds_core_rs::{
    Comparison, DiceEngine, DieKind, DieSpec, EngineConfig, EngineError, EngineEvent, MAX_DICE,
};

fn engine_with(dice: &[DieKind]) -> DiceEngine {
    let mut engine = DiceEngine::with_seed("seed");
    for kind in dice {
        engine.add_die(kind.spec()).unwrap();
    }
    engine
}

#[test]
fn test_chance_rebuilds_stale_table() {
    let mut engine = engine_with(&[DieKind::D6, DieKind::D6]);
    assert!(engine.is_stale());

    assert_eq!(engine.chance(7.0, Comparison::Eq), 1.0 / 6.0);
    assert!(!engine.is_stale());
    assert_eq!(engine.event_log().events_of_type("TableRebuilt").len(), 1);

    // Fresh table is reused
    engine.chance(8.0, Comparison::Eq);
    assert_eq!(engine.event_log().events_of_type("TableRebuilt").len(), 1);
}

#[test]
fn test_large_single_die_answers_without_table() {
    let mut engine = DiceEngine::with_seed("wide");
    engine.add_die(DieSpec::uniform(1 << 21).unwrap()).unwrap();

    assert_eq!(engine.chance(5.0, Comparison::Ge), 5.0 / 2_097_152.0);
    assert_eq!(engine.chance(1e12, Comparison::Ge), 1.0);
    assert_eq!(engine.chance(0.0, Comparison::Le), 1.0);
    assert!(engine.event_log().events_of_type("TableRebuilt").is_empty());

    // Explicit setup still reports the limit
    assert!(matches!(
        engine.setup(),
        Err(EngineError::TableTooLarge { len: 2_097_153, limit: 1_048_576 })
    ));
}

#[test]
fn test_oversized_table_query_is_nan() {
    let mut engine = DiceEngine::with_seed("wide");
    let wide = DieSpec::uniform(1 << 21).unwrap();
    engine.set_dice(vec![wide, wide]).unwrap();

    assert!(engine.chance(5.0, Comparison::Ge).is_nan());
    assert_eq!(engine.chance_text(5.0, Comparison::Ge), "--%");
    assert!(engine.is_stale());

    // Thresholds outside the range still short-circuit
    assert_eq!(engine.chance(1.0, Comparison::Ge), 0.0);
    assert_eq!(engine.chance(1e7, Comparison::Ge), 1.0);
}

#[test]
fn test_remove_die_updates_probability() {
    let mut engine = engine_with(&[DieKind::D6, DieKind::D6]);
    assert_eq!(engine.chance(12.0, Comparison::Eq), 1.0 / 36.0);

    assert_eq!(engine.remove_die(0).unwrap(), DieKind::D6.spec());
    assert!(engine.is_stale());
    assert_eq!(engine.chance(6.0, Comparison::Eq), 1.0 / 6.0);
    assert_eq!(engine.chance(12.0, Comparison::Eq), 0.0);
}

#[test]
fn test_empty_engine_reports_nan() {
    let mut engine = DiceEngine::with_seed("empty");
    assert!(engine.chance(3.0, Comparison::Ge).is_nan());
    assert_eq!(engine.chance_text(3.0, Comparison::Ge), "--%");

    let roll = engine.roll_all();
    assert!(roll.faces.is_empty());
    assert_eq!(roll.sum, None);
}

#[test]
fn test_roll_all_is_deterministic() {
    let mut a = engine_with(&[DieKind::D6, DieKind::D100, DieKind::C]);
    let mut b = engine_with(&[DieKind::D6, DieKind::D100, DieKind::C]);

    for _ in 0..50 {
        let ra = a.roll_all();
        let rb = b.roll_all();
        assert_eq!(ra, rb);
        assert_eq!(ra.sum, Some(ra.faces.iter().sum()));
    }
}

#[test]
fn test_roll_all_uses_multiset_order() {
    let mut engine = engine_with(&[DieKind::D6, DieKind::D100]);
    let roll = engine.roll_all();
    // First draws for "seed" map to 5 on a d6 and 50 on a d100
    assert_eq!(roll.faces, vec![5, 50]);
    assert_eq!(roll.sum, Some(55));
}

#[test]
fn test_rolls_stay_in_domain() {
    let kinds = [DieKind::C, DieKind::D4, DieKind::D20, DieKind::D100];
    let mut engine = engine_with(&kinds);
    for _ in 0..500 {
        let roll = engine.roll_all();
        for (face, kind) in roll.faces.iter().zip(kinds) {
            assert!(kind.spec().has_face(*face), "{} not on {}", face, kind.name());
        }
    }
}

#[test]
fn test_max_dice_enforced() {
    let mut engine = DiceEngine::with_seed("full");
    for _ in 0..MAX_DICE {
        engine.add_die(DieKind::D6.spec()).unwrap();
    }
    assert!(matches!(
        engine.add_die(DieKind::D6.spec()),
        Err(EngineError::TooManyDice { .. })
    ));
    assert_eq!(engine.dice().len(), MAX_DICE);
}

#[test]
fn test_configured_dice_limit() {
    let config = EngineConfig {
        max_dice: 2,
        ..EngineConfig::with_seed("small")
    };
    let mut engine = DiceEngine::new(config).unwrap();
    engine.add_die(DieKind::D4.spec()).unwrap();
    engine.add_die(DieKind::D4.spec()).unwrap();
    assert!(engine.add_die(DieKind::D4.spec()).is_err());
    assert!(engine.set_dice(vec![DieKind::D4.spec(); 3]).is_err());
}

#[test]
fn test_invalid_config_rejected() {
    let config = EngineConfig {
        print_precision: 30,
        ..EngineConfig::default()
    };
    assert!(matches!(
        DiceEngine::new(config),
        Err(EngineError::InvalidConfig(_))
    ));
}

#[test]
fn test_chance_text_uses_configured_precision() {
    let config = EngineConfig {
        print_precision: 2,
        ..EngineConfig::with_seed("precision")
    };
    let mut engine = DiceEngine::new(config).unwrap();
    engine
        .set_dice(vec![DieKind::D6.spec(), DieKind::D6.spec()])
        .unwrap();
    assert_eq!(engine.chance_text(7.0, Comparison::Eq), "16.67%");
}

#[test]
fn test_setup_sorts_dice_but_keeps_host_order() {
    let mut engine = engine_with(&[DieKind::D100, DieKind::C, DieKind::D20]);
    let table = engine.setup().unwrap();
    let maxes: Vec<u64> = table.dice().iter().map(|d| d.max()).collect();
    assert_eq!(maxes, vec![2, 20, 100]);
    assert_eq!(engine.dice().get(0), Some(&DieKind::D100.spec()));
}

#[test]
fn test_event_log_records_activity() {
    let mut engine = engine_with(&[DieKind::D6]);
    engine.setup().unwrap();
    engine.roll_all();
    engine.remove_die(0).unwrap();

    let types: Vec<&str> = engine
        .event_log()
        .events()
        .iter()
        .map(|e| e.event_type())
        .collect();
    assert_eq!(
        types,
        vec!["Seeded", "DieAdded", "TableRebuilt", "DiceRolled", "DieRemoved"]
    );

    let seqs: Vec<u64> = engine.event_log().events().iter().map(|e| e.seq()).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));

    match engine.event_log().events()[2] {
        EngineEvent::TableRebuilt {
            dice_count,
            distinct_sums,
            ref total_combinations,
            ..
        } => {
            assert_eq!(dice_count, 1);
            assert_eq!(distinct_sums, 6);
            assert_eq!(total_combinations, "6");
        }
        ref other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_independent_engines_do_not_share_state() {
    let mut a = DiceEngine::with_seed("shared");
    let mut b = DiceEngine::with_seed("shared");
    let d20 = DieKind::D20.spec();

    // Advancing one engine leaves the other untouched
    for _ in 0..10 {
        a.roll_die(&d20);
    }
    let fresh = DiceEngine::with_seed("shared");
    assert_eq!(b.rng_state(), fresh.rng_state());
    assert_ne!(a.rng_state(), b.rng_state());
    b.roll_die(&d20);
}

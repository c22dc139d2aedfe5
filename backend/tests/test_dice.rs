//! Tests for die specifications and the draw → face mapping

use dice_odds_core_rs::{DiceMultiset, DieKind, DieSpec, EngineError, SeededRng, MAX_DICE};

#[test]
fn test_face_bounds_at_extreme_draws() {
    for kind in DieKind::ALL {
        let die = kind.spec();
        assert_eq!(die.face_from_draw(0), die.min(), "{} at draw 0", die);
        assert_eq!(die.face_from_draw(u32::MAX), die.max(), "{} at draw max", die);
    }
}

#[test]
fn test_faces_in_domain_for_spaced_draws() {
    let dice = [
        DieKind::D6.spec(),
        DieKind::D100.spec(),
        DieSpec::uniform(1_000_003).unwrap(),
        DieSpec::stepped(7, 7 * 13).unwrap(),
        DieSpec::uniform(dice_odds_core_rs::dice::MAX_SAFE_INTEGER).unwrap(),
    ];
    for die in dice {
        for i in 0..=64u64 {
            let draw = ((u32::MAX as u64) * i / 64) as u32;
            let face = die.face_from_draw(draw);
            assert!(die.has_face(face), "{} produced {} for draw {}", die, face, draw);
        }
    }
}

#[test]
fn test_d6_faces_evenly_split_draw_space() {
    let d6 = DieKind::D6.spec();
    let sixth = (1u64 << 32) / 6;
    // floor(d * 6 / 2^32) changes at multiples of 2^32 / 6
    assert_eq!(d6.face_from_draw(sixth as u32), 1);
    assert_eq!(d6.face_from_draw(sixth as u32 + 1), 2);
}

#[test]
fn test_rolls_from_seed() {
    let mut rng = SeededRng::new("seed");
    let d6 = DieKind::D6.spec();
    let faces: Vec<u64> = (0..5).map(|_| d6.roll(&mut rng)).collect();
    assert_eq!(faces, vec![5, 3, 1, 1, 3]);

    let mut rng = SeededRng::new("seed");
    let d100 = DieKind::D100.spec();
    let faces: Vec<u64> = (0..5).map(|_| d100.roll(&mut rng)).collect();
    assert_eq!(faces, vec![80, 50, 20, 10, 50]);
}

#[test]
fn test_uniform_and_unit_step_are_the_same_die() {
    let a = DieSpec::uniform(12).unwrap();
    let b = DieSpec::stepped(1, 12).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.kind(), Some(DieKind::D12));
}

#[test]
fn test_invalid_dice_are_value_errors() {
    assert!(matches!(DieSpec::uniform(0), Err(EngineError::Value(_))));
    assert!(matches!(DieSpec::stepped(0, 10), Err(EngineError::Value(_))));
    assert!(matches!(DieSpec::stepped(3, 10), Err(EngineError::Value(_))));
    assert!(matches!(DieSpec::uniform(1 << 53), Err(EngineError::Value(_))));
    assert!(matches!(DieSpec::uniform_from_f64(6.5), Err(EngineError::Value(_))));
    assert!(matches!(DieSpec::uniform_from_f64(-6.0), Err(EngineError::Value(_))));
    assert!(matches!(
        DieSpec::stepped_from_f64(2.5, 10.0),
        Err(EngineError::Value(_))
    ));
    assert_eq!(
        DieSpec::stepped_from_f64(10.0, 100.0).unwrap(),
        DieKind::D100.spec()
    );
}

#[test]
fn test_parse_names() {
    assert_eq!("d6".parse::<DieSpec>().unwrap(), DieKind::D6.spec());
    assert_eq!("D100".parse::<DieSpec>().unwrap(), DieKind::D100.spec());
    assert_eq!("c".parse::<DieSpec>().unwrap(), DieKind::C.spec());
    assert_eq!(
        "d7".parse::<DieSpec>().unwrap(),
        DieSpec::Uniform { faces: 7 }
    );
    assert_eq!(
        "d30/5".parse::<DieSpec>().unwrap(),
        DieSpec::Stepped { step: 5, max: 30 }
    );
    assert!("d0".parse::<DieSpec>().is_err());
    assert!("x6".parse::<DieSpec>().is_err());
    assert!("d30/7".parse::<DieSpec>().is_err());
}

#[test]
fn test_die_json_is_validated() {
    let die: DieSpec = serde_json::from_str(r#"{"type": "Stepped", "step": 10, "max": 100}"#).unwrap();
    assert_eq!(die, DieKind::D100.spec());

    let json = serde_json::to_string(&DieKind::D8.spec()).unwrap();
    assert_eq!(json, r#"{"type":"Uniform","faces":8}"#);

    assert!(serde_json::from_str::<DieSpec>(r#"{"type": "Uniform", "faces": 1.5}"#).is_err());
    assert!(serde_json::from_str::<DieSpec>(r#"{"type": "Uniform", "faces": 0}"#).is_err());
}

#[test]
fn test_multiset_holds_at_most_48() {
    let mut dice = DiceMultiset::new();
    for _ in 0..MAX_DICE {
        dice.push(DieKind::D20.spec()).unwrap();
    }
    assert!(dice.is_full());
    assert!(matches!(
        dice.push(DieKind::D20.spec()),
        Err(EngineError::TooManyDice { max: 48, got: 49 })
    ));
    assert!(DiceMultiset::from_dice(vec![DieKind::C.spec(); 49]).is_err());
}

#[test]
fn test_multiset_remove_keeps_order() {
    let mut dice = DiceMultiset::from_dice(vec![
        DieKind::D4.spec(),
        DieKind::D6.spec(),
        DieKind::D8.spec(),
    ])
    .unwrap();
    assert_eq!(dice.remove(1).unwrap(), DieKind::D6.spec());
    assert_eq!(dice.as_slice(), &[DieKind::D4.spec(), DieKind::D8.spec()]);
}

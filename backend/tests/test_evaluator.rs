//! Comparison predicates and percentage formatting

use dice_odds_core_rs::evaluator::{DEFAULT_PRECISION, UNDEFINED_PERCENT};
use dice_odds_core_rs::{format_percent, Comparison, DieKind, DistributionTable};

#[test]
fn test_predicate_definitions() {
    let cases = [
        (Comparison::Ge, [true, true, false]),
        (Comparison::Le, [false, true, true]),
        (Comparison::Gt, [true, false, false]),
        (Comparison::Lt, [false, false, true]),
        (Comparison::Eq, [false, true, false]),
    ];
    // threshold 5 against sums 4, 5, 6
    for (cmp, expected) in cases {
        let got = [cmp.test(5.0, 4), cmp.test(5.0, 5), cmp.test(5.0, 6)];
        assert_eq!(got, expected, "{}", cmp);
    }
}

#[test]
fn test_fractional_threshold() {
    assert!(Comparison::Ge.test(5.5, 5));
    assert!(!Comparison::Eq.test(5.5, 5));
    assert!(Comparison::Lt.test(5.5, 6));
}

#[test]
fn test_lt_eq_gt_partition() {
    let table = DistributionTable::build(&[DieKind::D8.spec(), DieKind::D12.spec()]).unwrap();
    for threshold in 0..=22 {
        let t = threshold as f64;
        let total = table.check(t, Comparison::Lt)
            + table.check(t, Comparison::Eq)
            + table.check(t, Comparison::Gt);
        assert!((total - 1.0).abs() < 1e-12, "threshold {} sums to {}", t, total);
    }
}

#[test]
fn test_ge_and_lt_are_complements() {
    let table = DistributionTable::build(&[DieKind::D20.spec(), DieKind::D4.spec()]).unwrap();
    for threshold in 0..=25 {
        let t = threshold as f64;
        let ge = table.check(t, Comparison::Ge);
        let lt = table.check(t, Comparison::Lt);
        assert!((ge + lt - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_format_default_precision() {
    assert_eq!(DEFAULT_PRECISION, 5);
    assert_eq!(format_percent(1.0 / 6.0, DEFAULT_PRECISION), "16.66667%");
    assert_eq!(format_percent(1.0 / 36.0, DEFAULT_PRECISION), "2.77778%");
    assert_eq!(format_percent(0.5, DEFAULT_PRECISION), "50%");
    assert_eq!(format_percent(0.0001, DEFAULT_PRECISION), "0.01%");
}

#[test]
fn test_format_tiny_probability_rounds_to_zero() {
    assert_eq!(format_percent(1e-12, 5), "0%");
}

#[test]
fn test_format_nan_placeholder() {
    assert_eq!(format_percent(f64::NAN, 5), UNDEFINED_PERCENT);
    assert_eq!(format_percent(f64::NAN, 0), "--%");
}

#[test]
fn test_format_rounds_ties_away_from_zero() {
    // 1/256 of eight coins is exactly 0.390625%
    let coins = vec![DieKind::C.spec(); 8];
    let table = DistributionTable::build(&coins).unwrap();
    let p = table.check(8.0, Comparison::Ge);
    assert_eq!(p, 1.0 / 256.0);
    assert_eq!(format_percent(p, 5), "0.39063%");
    assert_eq!(format_percent(p, 4), "0.3906%");

    assert_eq!(format_percent(0.125, 0), "13%");
    assert_eq!(format_percent(0.375, 0), "38%");
}

#[test]
fn test_format_precision_is_capped() {
    let capped = format_percent(1.0 / 3.0, 200);
    let at_max = format_percent(1.0 / 3.0, 20);
    assert_eq!(capped, at_max);
}

#[test]
fn test_display_and_symbols() {
    assert_eq!(Comparison::Ge.to_string(), "GE");
    assert_eq!(Comparison::Le.symbol(), "<=");
    for cmp in Comparison::ALL {
        assert_eq!(cmp.symbol().parse::<Comparison>().unwrap(), cmp);
        assert_eq!(cmp.name().parse::<Comparison>().unwrap(), cmp);
    }
}

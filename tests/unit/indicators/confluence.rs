//! Unit tests for level confluence

use optrix::indicators::confluence::measure;
use optrix::models::Level;

fn levels(values: &[(&str, f64)]) -> Vec<Level> {
    values.iter().map(|(n, v)| Level::new(*n, *v)).collect()
}

#[test]
fn test_no_levels_scores_zero() {
    let reading = measure(100.0, &[], 0.3);
    assert!(reading.hits.is_empty());
    assert_eq!(reading.score, 0.0);
}

#[test]
fn test_bad_price_scores_zero() {
    let lvls = levels(&[("vwap", 100.0)]);
    assert_eq!(measure(f64::NAN, &lvls, 0.3).score, 0.0);
    assert_eq!(measure(-1.0, &lvls, 0.3).score, 0.0);
}

#[test]
fn test_bad_tolerance_scores_zero() {
    let lvls = levels(&[("vwap", 100.0)]);
    assert_eq!(measure(100.0, &lvls, 0.0).score, 0.0);
    assert_eq!(measure(100.0, &lvls, f64::NAN).score, 0.0);
}

#[test]
fn test_far_levels_do_not_hit() {
    let lvls = levels(&[("ma50", 105.0), ("vwap", 95.0)]);
    let reading = measure(100.0, &lvls, 0.3);
    assert!(reading.hits.is_empty());
    assert_eq!(reading.score, 0.0);
}

#[test]
fn test_touching_levels_counted() {
    let lvls = levels(&[("vwap", 100.05), ("ma21", 100.2), ("ma50", 104.0)]);
    let reading = measure(100.0, &lvls, 0.3);
    assert_eq!(reading.hits.len(), 2);
    assert!(reading.score > 0.0);
    let names: Vec<&str> = reading.hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["vwap", "ma21"]);
}

#[test]
fn test_more_levels_score_higher() {
    let one = measure(100.0, &levels(&[("vwap", 100.05)]), 0.3);
    let two = measure(
        100.0,
        &levels(&[("vwap", 100.05), ("ma21", 100.1)]),
        0.3,
    );
    assert!(two.score > one.score);
}

#[test]
fn test_tighter_levels_score_higher() {
    let tight = measure(100.0, &levels(&[("vwap", 100.01)]), 0.3);
    let loose = measure(100.0, &levels(&[("vwap", 100.28)]), 0.3);
    assert!(tight.score > loose.score);
}

#[test]
fn test_score_caps_at_100() {
    let stack = levels(&[
        ("ma8", 100.0),
        ("ma21", 100.01),
        ("ma50", 100.02),
        ("vwap", 100.03),
        ("orb_high", 100.04),
        ("orb_low", 99.99),
    ]);
    let reading = measure(100.0, &stack, 0.3);
    assert_eq!(reading.score, 100.0);
    assert_eq!(reading.hits.len(), 6);
}

#[test]
fn test_non_finite_level_skipped() {
    let lvls = vec![Level::new("vwap", f64::NAN), Level::new("ma21", 100.1)];
    let reading = measure(100.0, &lvls, 0.3);
    assert_eq!(reading.hits.len(), 1);
}

//! Unit tests for weighted score aggregation

use optrix::detectors::ScoreFactor;
use optrix::models::{AssetClass, FeatureSnapshot, ParameterProfile};
use optrix::signals::scoring::weighted_score;

fn fixed(name: &'static str, weight: f64, value: f64) -> ScoreFactor {
    ScoreFactor::new(name, weight, Box::new(move |_, _| value))
}

fn snapshot() -> FeatureSnapshot {
    FeatureSnapshot::new("SPY", AssetClass::Stock)
}

fn profile() -> ParameterProfile {
    ParameterProfile::default_profile()
}

#[test]
fn test_weighted_sum() {
    let factors = vec![fixed("a", 0.5, 80.0), fixed("b", 0.3, 60.0), fixed("c", 0.2, 0.0)];
    let breakdown = weighted_score(&factors, &snapshot(), &profile());
    assert!((breakdown.total - 58.0).abs() < 1e-9);
    assert_eq!(breakdown.factor_scores.len(), 3);
    assert_eq!(breakdown.factor_scores[0].name, "a");
    assert_eq!(breakdown.factor_scores[0].score, 80.0);
}

#[test]
fn test_empty_factor_list_scores_zero() {
    let breakdown = weighted_score(&[], &snapshot(), &profile());
    assert_eq!(breakdown.total, 0.0);
    assert!(breakdown.factor_scores.is_empty());
}

#[test]
fn test_headroom_weights_clamped_to_100() {
    // Weights sum to 1.5: raw total would be 150.
    let factors = vec![fixed("a", 0.8, 100.0), fixed("b", 0.7, 100.0)];
    let breakdown = weighted_score(&factors, &snapshot(), &profile());
    assert_eq!(breakdown.total, 100.0);
}

#[test]
fn test_total_always_within_band() {
    for (w1, s1, w2, s2) in [
        (0.5, 0.0, 0.5, 0.0),
        (0.9, 100.0, 0.6, 100.0),
        (0.2, 13.0, 0.8, 91.0),
        (1.0, 100.0, 0.5, 50.0),
    ] {
        let factors = vec![fixed("a", w1, s1), fixed("b", w2, s2)];
        let breakdown = weighted_score(&factors, &snapshot(), &profile());
        assert!(
            (0.0..=100.0).contains(&breakdown.total),
            "total {} escaped the score band",
            breakdown.total
        );
    }
}

#[test]
fn test_deterministic() {
    let factors = vec![fixed("a", 0.6, 42.0), fixed("b", 0.4, 77.0)];
    let first = weighted_score(&factors, &snapshot(), &profile());
    let second = weighted_score(&factors, &snapshot(), &profile());
    assert_eq!(first.total, second.total);
}

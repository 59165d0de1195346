//! Unit tests for the composite signal model

use optrix::detectors::DetectorType;
use optrix::models::signal::{
    CompositeSignal, Direction, FactorScore, SignalStatus, TradePlan, TradeStyle,
};
use optrix::signals::grading::grade;

fn sample_signal() -> CompositeSignal {
    let plan = TradePlan {
        entry: 101.0,
        stop: 100.0,
        target: 104.0,
    };
    CompositeSignal::new(
        "SPY",
        DetectorType::OrbBreakout,
        Direction::Long,
        TradeStyle::Day,
        72.5,
        grade(72.5),
        plan,
        vec![
            FactorScore {
                name: "orb_break_strength".to_string(),
                weight: 0.30,
                score: 80.0,
            },
            FactorScore {
                name: "relative_volume".to_string(),
                weight: 0.25,
                score: 55.0,
            },
        ],
    )
}

#[test]
fn test_signal_json_round_trip() {
    let signal = sample_signal();
    let json = serde_json::to_string(&signal).unwrap();
    let parsed: CompositeSignal = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.id, signal.id);
    assert_eq!(parsed.symbol, "SPY");
    assert_eq!(parsed.detector_type, DetectorType::OrbBreakout);
    assert_eq!(parsed.direction, Direction::Long);
    assert_eq!(parsed.score, 72.5);
    assert_eq!(parsed.grade, signal.grade);
    assert_eq!(parsed.entry, 101.0);
    assert_eq!(parsed.risk_reward, signal.risk_reward);
    assert_eq!(parsed.status, SignalStatus::Active);
    assert_eq!(parsed.factor_scores.len(), 2);
    assert_eq!(parsed.factor_scores[0].name, "orb_break_strength");
    assert_eq!(parsed.factor_scores[0].weight, 0.30);
}

#[test]
fn test_factor_score_round_trip() {
    let factor = FactorScore {
        name: "trend_alignment".to_string(),
        weight: 0.20,
        score: 62.5,
    };
    let json = serde_json::to_string(&factor).unwrap();
    let parsed: FactorScore = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.name, "trend_alignment");
    assert_eq!(parsed.weight, 0.20);
    assert_eq!(parsed.score, 62.5);
    assert_eq!(parsed.contribution(), 0.20 * 62.5);
}

#[test]
fn test_signal_id_shape() {
    let signal = sample_signal();
    assert!(signal.id.starts_with("SPY-orb_breakout-"));
}

#[test]
fn test_with_status_leaves_original_untouched() {
    let signal = sample_signal();
    let expired = signal.clone().with_status(SignalStatus::Expired);
    assert_eq!(signal.status, SignalStatus::Active);
    assert_eq!(expired.status, SignalStatus::Expired);
    assert_eq!(expired.id, signal.id);
}

#[test]
fn test_risk_reward_degenerate_stop() {
    let plan = TradePlan {
        entry: 100.0,
        stop: 100.0,
        target: 103.0,
    };
    assert_eq!(plan.risk_reward(), None);
}

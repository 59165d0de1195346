//! Unit tests for patience-candle detection

use chrono::Utc;
use optrix::indicators::patience::detect;
use optrix::models::signal::Direction;
use optrix::models::Bar;

fn bar(open: f64, high: f64, low: f64, close: f64) -> Bar {
    Bar::new(open, high, low, close, 1000.0, Utc::now())
}

/// Small-bodied candle sitting on 100.0 with a confirming bar after it.
fn setup_bars() -> Vec<Bar> {
    vec![
        bar(99.5, 100.4, 99.3, 100.1),
        // Candidate: body 0.1 on a 0.5 range, low hugging the level.
        bar(100.05, 100.45, 99.95, 100.15),
        // Confirmation closes above the candidate high.
        bar(100.2, 100.9, 100.1, 100.8),
    ]
}

#[test]
fn test_empty_bars_not_detected() {
    let reading = detect(&[], 100.0, Some(1.0), Direction::Long);
    assert!(!reading.detected);
    assert_eq!(reading.score, 0.0);
}

#[test]
fn test_single_bar_not_detected() {
    let bars = vec![bar(100.0, 100.5, 99.8, 100.2)];
    let reading = detect(&bars, 100.0, Some(1.0), Direction::Long);
    assert!(!reading.detected);
    assert_eq!(reading.score, 0.0);
}

#[test]
fn test_missing_atr_not_detected() {
    let reading = detect(&setup_bars(), 100.0, None, Direction::Long);
    assert!(!reading.detected);
}

#[test]
fn test_zero_atr_not_detected() {
    let reading = detect(&setup_bars(), 100.0, Some(0.0), Direction::Long);
    assert!(!reading.detected);
}

#[test]
fn test_long_patience_candle_detected() {
    let reading = detect(&setup_bars(), 100.0, Some(1.0), Direction::Long);
    assert!(reading.detected);
    assert!(reading.score > 0.0 && reading.score <= 100.0);
}

#[test]
fn test_wide_body_rejected() {
    let bars = vec![
        bar(99.5, 100.4, 99.3, 100.1),
        // Body 0.4 of a 0.5 range: too much traversal for patience.
        bar(100.0, 100.5, 100.0, 100.4),
        bar(100.4, 101.0, 100.3, 100.9),
    ];
    let reading = detect(&bars, 100.0, Some(1.0), Direction::Long);
    assert!(!reading.detected);
}

#[test]
fn test_unconfirmed_candle_rejected() {
    let bars = vec![
        bar(99.5, 100.4, 99.3, 100.1),
        bar(100.05, 100.45, 99.95, 100.15),
        // Next bar rolls over instead of confirming.
        bar(100.1, 100.3, 99.7, 99.8),
    ];
    let reading = detect(&bars, 100.0, Some(1.0), Direction::Long);
    assert!(!reading.detected);
}

#[test]
fn test_candle_far_from_level_rejected() {
    // Same shape, but the reference level is an ATR away.
    let reading = detect(&setup_bars(), 99.0, Some(1.0), Direction::Long);
    assert!(!reading.detected);
}

#[test]
fn test_short_patience_candle_detected() {
    let bars = vec![
        bar(100.5, 100.7, 99.6, 99.9),
        // Candidate hugging 100.0 from below.
        bar(99.95, 100.05, 99.55, 99.85),
        // Confirmation closes below the candidate low.
        bar(99.8, 99.9, 99.2, 99.3),
    ];
    let reading = detect(&bars, 100.0, Some(1.0), Direction::Short);
    assert!(reading.detected);
    assert!(reading.score > 0.0);
}

#[test]
fn test_tighter_candle_scores_higher() {
    let loose = detect(&setup_bars(), 100.0, Some(1.0), Direction::Long);

    let tight_bars = vec![
        bar(99.5, 100.4, 99.3, 100.1),
        // Same range, smaller body, low exactly on the level.
        bar(100.05, 100.45, 100.0, 100.08),
        bar(100.2, 100.9, 100.1, 100.8),
    ];
    let tight = detect(&tight_bars, 100.0, Some(1.0), Direction::Long);
    assert!(tight.detected);
    assert!(tight.score > loose.score);
}

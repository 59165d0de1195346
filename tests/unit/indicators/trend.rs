//! Unit tests for trend classification

use chrono::Utc;
use optrix::indicators::trend::{classify, TrendRegime};
use optrix::models::Bar;

fn climbing_bars(count: usize, start: f64, step: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let open = start + i as f64 * step;
            let close = open + step * 0.8;
            Bar::new(open, close + 0.05, open - 0.05, close, 1000.0, Utc::now())
        })
        .collect()
}

fn falling_bars(count: usize, start: f64, step: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let open = start - i as f64 * step;
            let close = open - step * 0.8;
            Bar::new(open, open + 0.05, close - 0.05, close, 1000.0, Utc::now())
        })
        .collect()
}

fn flat_bars(count: usize, price: f64) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            // Alternate tiny up/down closes around the same price.
            let delta = if i % 2 == 0 { 0.02 } else { -0.02 };
            Bar::new(price, price + 0.1, price - 0.1, price + delta, 1000.0, Utc::now())
        })
        .collect()
}

#[test]
fn test_empty_bars_is_chop() {
    let reading = classify(&[], Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Chop);
    assert!(!reading.micro_trend);
    assert_eq!(reading.strength, 0.0);
}

#[test]
fn test_too_few_bars_is_chop() {
    let bars = climbing_bars(3, 100.0, 0.2);
    let reading = classify(&bars, Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Chop);
}

#[test]
fn test_break_above_level_classifies_uptrend() {
    let bars = climbing_bars(10, 99.3, 0.2);
    let reading = classify(&bars, Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Uptrend);
    assert!(reading.strength > 50.0);
    assert!(reading.is_tradeable());
}

#[test]
fn test_break_below_level_classifies_downtrend() {
    let bars = falling_bars(10, 99.0, 0.2);
    let reading = classify(&bars, Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Downtrend);
    assert!(reading.strength > 50.0);
}

#[test]
fn test_inside_range_is_chop() {
    let bars = flat_bars(10, 99.0);
    let reading = classify(&bars, Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Chop);
    assert!(!reading.is_tradeable());
}

#[test]
fn test_micro_trend_makes_chop_tradeable() {
    // Mostly flat, but the last three bars run one direction without
    // breaking the level.
    let mut bars = flat_bars(7, 99.0);
    bars.extend(climbing_bars(3, 99.0, 0.1));
    let reading = classify(&bars, Some(100.0), Some(98.0), None, None);
    assert_eq!(reading.regime, TrendRegime::Chop);
    assert!(reading.micro_trend);
    assert!(reading.is_tradeable());
    assert!(reading.strength > 0.0);
}

#[test]
fn test_cleaner_break_scores_higher() {
    let shallow = climbing_bars(10, 99.3, 0.1);
    let strong = climbing_bars(10, 99.3, 0.25);
    let weak_reading = classify(&shallow, Some(100.0), Some(98.0), None, None);
    let strong_reading = classify(&strong, Some(100.0), Some(98.0), None, None);
    assert_eq!(strong_reading.regime, TrendRegime::Uptrend);
    assert!(strong_reading.strength >= weak_reading.strength);
}

#[test]
fn test_no_levels_stays_chop() {
    // Without a defining level there is no break to qualify a full trend.
    let bars = climbing_bars(10, 99.3, 0.2);
    let reading = classify(&bars, None, None, None, None);
    assert_eq!(reading.regime, TrendRegime::Chop);
    // The run itself still registers as a micro-trend.
    assert!(reading.micro_trend);
}

#[test]
fn test_strength_within_score_band() {
    let bars = climbing_bars(10, 99.0, 0.5);
    let reading = classify(&bars, Some(99.5), Some(98.0), None, None);
    assert!(reading.strength >= 0.0 && reading.strength <= 100.0);
}

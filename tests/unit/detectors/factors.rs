//! Unit tests for the shared score-factor library

use chrono::Utc;
use optrix::detectors::factors::{
    flow_bias_score, level_confluence_score, orb_break_strength_score, relative_volume_score,
    rsi_headroom_score, vwap_extension_score, vwap_side_score, RVOL_SATURATION,
};
use optrix::models::signal::Direction;
use optrix::models::{AssetClass, Bar, FeatureSnapshot, OptionsFlow, ParameterProfile};

fn snapshot() -> FeatureSnapshot {
    FeatureSnapshot::new("SPY", AssetClass::Stock)
}

#[test]
fn test_relative_volume_missing_scores_zero() {
    assert_eq!(relative_volume_score(&snapshot()), 0.0);
}

#[test]
fn test_relative_volume_monotone_to_saturation() {
    let mut prev = -1.0;
    for i in 0..40 {
        let rvol = 0.5 + i as f64 * 0.1;
        let score = relative_volume_score(&snapshot().with_relative_volume(rvol));
        assert!(score >= prev, "rvol factor must not decrease as rvol rises");
        assert!((0.0..=100.0).contains(&score));
        prev = score;
    }
    // Saturated beyond the cap.
    let at_cap = relative_volume_score(&snapshot().with_relative_volume(RVOL_SATURATION));
    let beyond = relative_volume_score(&snapshot().with_relative_volume(RVOL_SATURATION + 2.0));
    assert_eq!(at_cap, 100.0);
    assert_eq!(beyond, 100.0);
}

#[test]
fn test_rsi_headroom_peaks_by_direction() {
    let long_peak = rsi_headroom_score(&snapshot().with_rsi(14, 60.0), Direction::Long);
    let long_hot = rsi_headroom_score(&snapshot().with_rsi(14, 90.0), Direction::Long);
    assert_eq!(long_peak, 100.0);
    assert!(long_hot < long_peak);

    let short_peak = rsi_headroom_score(&snapshot().with_rsi(14, 40.0), Direction::Short);
    assert_eq!(short_peak, 100.0);

    assert_eq!(rsi_headroom_score(&snapshot(), Direction::Long), 0.0);
}

#[test]
fn test_vwap_side_favors_direction() {
    let above = snapshot().with_price(100.5).with_vwap(100.0);
    assert!(vwap_side_score(&above, Direction::Long) > 0.0);
    assert_eq!(vwap_side_score(&above, Direction::Short), 0.0);

    let below = snapshot().with_price(99.5).with_vwap(100.0);
    assert!(vwap_side_score(&below, Direction::Short) > 0.0);
    assert_eq!(vwap_side_score(&below, Direction::Long), 0.0);
}

#[test]
fn test_vwap_extension_rewards_stretch() {
    let stretched = snapshot().with_price(102.5).with_vwap(100.0);
    let modest = snapshot().with_price(100.8).with_vwap(100.0);
    let short_stretched = vwap_extension_score(&stretched, Direction::Short);
    let short_modest = vwap_extension_score(&modest, Direction::Short);
    assert!(short_stretched > short_modest);
    // A long fade of the same stretch scores nothing.
    assert_eq!(vwap_extension_score(&stretched, Direction::Long), 0.0);
}

#[test]
fn test_orb_break_strength_normalized_by_atr() {
    let base = snapshot()
        .with_opening_range(100.0, 98.0)
        .with_atr(1.0);
    let shallow = base.clone().with_price(100.2);
    let deep = base.clone().with_price(101.0);
    let shallow_score = orb_break_strength_score(&shallow, Direction::Long);
    let deep_score = orb_break_strength_score(&deep, Direction::Long);
    assert!(deep_score > shallow_score);
    assert_eq!(deep_score, 100.0);

    // No break, no score.
    let inside = base.with_price(99.5);
    assert_eq!(orb_break_strength_score(&inside, Direction::Long), 0.0);
}

#[test]
fn test_level_confluence_uses_profile_tolerance() {
    let snap = snapshot()
        .with_price(100.0)
        .with_vwap(100.25)
        .with_moving_average(21, 100.28);
    let mut narrow = ParameterProfile::default_profile();
    narrow.vwap_proximity_percent = 0.1;
    let mut wide = ParameterProfile::default_profile();
    wide.vwap_proximity_percent = 0.5;

    assert_eq!(level_confluence_score(&snap, &narrow), 0.0);
    assert!(level_confluence_score(&snap, &wide) > 0.0);
}

#[test]
fn test_flow_bias_requires_flow() {
    assert_eq!(flow_bias_score(&snapshot(), Direction::Long), 0.0);

    let bullish = snapshot().with_options_flow(OptionsFlow {
        call_volume: Some(900.0),
        put_volume: Some(100.0),
        sweep_count: Some(5),
        net_premium: Some(250_000.0),
    });
    let score = flow_bias_score(&bullish, Direction::Long);
    assert!(score > 50.0);
    assert!(flow_bias_score(&bullish, Direction::Short) < score);
}

#[test]
fn test_factor_scores_stay_in_band() {
    let bars: Vec<Bar> = (0..10)
        .map(|i| {
            let open = 99.0 + i as f64 * 0.3;
            Bar::new(open, open + 0.35, open - 0.05, open + 0.3, 5000.0, Utc::now())
        })
        .collect();
    let snap = snapshot()
        .with_price(102.0)
        .with_opening_range(100.0, 98.0)
        .with_atr(1.0)
        .with_relative_volume(10.0)
        .with_rsi(14, 60.0)
        .with_vwap(100.0)
        .with_bars(bars);
    let profile = ParameterProfile::default_profile();

    for score in [
        relative_volume_score(&snap),
        rsi_headroom_score(&snap, Direction::Long),
        vwap_side_score(&snap, Direction::Long),
        vwap_extension_score(&snap, Direction::Short),
        orb_break_strength_score(&snap, Direction::Long),
        level_confluence_score(&snap, &profile),
    ] {
        assert!((0.0..=100.0).contains(&score));
    }
}

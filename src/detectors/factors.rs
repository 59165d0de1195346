//! Shared score-factor library.
//!
//! Each scoring function is pure, clips its own output to [0, 100], and
//! treats missing input as zero confidence rather than an error. The
//! `ScoreFactor` constructors pair a scoring function with a name and a
//! weight for use inside a detector's factor set.

use crate::common::math::{clamp_score, percent_change, ramp};
use crate::indicators::{confluence, patience, trend};
use crate::models::features::FeatureSnapshot;
use crate::models::profile::ParameterProfile;
use crate::models::signal::Direction;

use super::ScoreFactor;

/// Relative volume where scoring starts and where it saturates.
pub const RVOL_FLOOR: f64 = 0.8;
pub const RVOL_SATURATION: f64 = 3.0;

/// Reference level a patience candle is expected to lean on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceLevel {
    OrbHigh,
    OrbLow,
    Vwap,
    Ema(u32),
}

pub fn reference_value(snapshot: &FeatureSnapshot, level: ReferenceLevel) -> Option<f64> {
    match level {
        ReferenceLevel::OrbHigh => snapshot.orb_high(),
        ReferenceLevel::OrbLow => snapshot.orb_low(),
        ReferenceLevel::Vwap => snapshot.vwap(),
        ReferenceLevel::Ema(period) => snapshot.moving_average(period),
    }
}

/// Volume confirmation: 0 at the participation floor, saturating at
/// `RVOL_SATURATION`. Monotone non-decreasing in relative volume.
pub fn relative_volume_score(snapshot: &FeatureSnapshot) -> f64 {
    match snapshot.relative_volume() {
        Some(rvol) => ramp(rvol, RVOL_FLOOR, RVOL_SATURATION),
        None => 0.0,
    }
}

/// Trend alignment: full trend strength when the regime matches the trade
/// direction, a small credit for an aligned micro-trend, zero otherwise.
pub fn trend_alignment_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let reading = trend::classify(
        snapshot.bars(),
        snapshot.orb_high(),
        snapshot.orb_low(),
        snapshot.premarket_high(),
        snapshot.premarket_low(),
    );
    let aligned = matches!(
        (reading.regime, direction),
        (trend::TrendRegime::Uptrend, Direction::Long)
            | (trend::TrendRegime::Downtrend, Direction::Short)
    );
    if aligned {
        clamp_score(reading.strength)
    } else if reading.regime == trend::TrendRegime::Chop && reading.micro_trend {
        25.0
    } else {
        0.0
    }
}

/// Level confluence around the current price, using the active profile's
/// proximity tolerance.
pub fn level_confluence_score(snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> f64 {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return 0.0,
    };
    let levels = snapshot.reference_levels();
    confluence::measure(price, &levels, profile.vwap_proximity_percent).score
}

/// RSI headroom: rewards momentum with room left to run. Longs peak at
/// RSI 60, shorts at RSI 40; missing RSI scores zero.
pub fn rsi_headroom_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let rsi = match snapshot.rsi(14) {
        Some(rsi) => rsi,
        None => return 0.0,
    };
    let peak = match direction {
        Direction::Long => 60.0,
        Direction::Short => 40.0,
    };
    clamp_score(100.0 - (rsi - peak).abs() * 2.5)
}

/// Patience-candle quality against the setup's reference level. Falls back
/// to the pipeline's precomputed flag (at reduced credit) when no bar
/// history was supplied.
pub fn patience_quality_score(
    snapshot: &FeatureSnapshot,
    direction: Direction,
    level: ReferenceLevel,
) -> f64 {
    let reference = match reference_value(snapshot, level) {
        Some(reference) => reference,
        None => return 0.0,
    };
    if snapshot.bars().len() < patience::MIN_BARS {
        return if snapshot.has_patient_candle() { 50.0 } else { 0.0 };
    }
    let reading = patience::detect(snapshot.bars(), reference, snapshot.atr(), direction);
    if reading.detected {
        reading.score
    } else if snapshot.has_patient_candle() {
        50.0
    } else {
        0.0
    }
}

/// Distance from VWAP on the favorable side, saturating at 1%.
pub fn vwap_side_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return 0.0,
    };
    let vwap = match snapshot.vwap() {
        Some(vwap) => vwap,
        None => return 0.0,
    };
    let change = match percent_change(price, vwap) {
        Some(change) => change,
        None => return 0.0,
    };
    let favorable = match direction {
        Direction::Long => change,
        Direction::Short => -change,
    };
    ramp(favorable, 0.0, 1.0)
}

/// Stretch away from VWAP against the trade direction, for fade setups:
/// a short fade scores higher the further price is extended above VWAP.
/// Saturates at a 3% extension.
pub fn vwap_extension_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return 0.0,
    };
    let vwap = match snapshot.vwap() {
        Some(vwap) => vwap,
        None => return 0.0,
    };
    let change = match percent_change(price, vwap) {
        Some(change) => change,
        None => return 0.0,
    };
    let extension = match direction {
        Direction::Short => change,
        Direction::Long => -change,
    };
    ramp(extension, 0.5, 3.0)
}

/// Break distance beyond the opening-range level, normalized by ATR and
/// saturating at one full ATR.
pub fn orb_break_strength_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return 0.0,
    };
    let atr = match snapshot.atr() {
        Some(atr) => atr,
        None => return 0.0,
    };
    let distance = match direction {
        Direction::Long => snapshot.orb_high().map(|level| price - level),
        Direction::Short => snapshot.orb_low().map(|level| level - price),
    };
    match distance {
        Some(distance) if distance > 0.0 => ramp(distance / atr, 0.0, 1.0),
        _ => 0.0,
    }
}

/// Options-flow bias: call/put balance toward the trade direction plus a
/// sweep-count kicker.
pub fn flow_bias_score(snapshot: &FeatureSnapshot, direction: Direction) -> f64 {
    let flow = match snapshot.options_flow() {
        Some(flow) => flow,
        None => return 0.0,
    };
    let ratio = match flow.call_ratio() {
        Some(ratio) => ratio,
        None => return 0.0,
    };
    let favorable = match direction {
        Direction::Long => ratio,
        Direction::Short => 1.0 - ratio,
    };
    let balance_component = ramp(favorable, 0.5, 0.85) * 0.8;
    let sweep_component = flow
        .sweep_count
        .map(|count| (count.min(5) as f64 / 5.0) * 20.0)
        .unwrap_or(0.0);
    clamp_score(balance_component + sweep_component)
}

// Factor constructors used by the built-in detectors.

pub fn relative_volume(weight: f64) -> ScoreFactor {
    ScoreFactor::new(
        "relative_volume",
        weight,
        Box::new(|snapshot, _| relative_volume_score(snapshot)),
    )
}

pub fn trend_alignment(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "trend_alignment",
        weight,
        Box::new(move |snapshot, _| trend_alignment_score(snapshot, direction)),
    )
}

pub fn level_confluence(weight: f64) -> ScoreFactor {
    ScoreFactor::new(
        "level_confluence",
        weight,
        Box::new(level_confluence_score),
    )
}

pub fn rsi_headroom(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "rsi_headroom",
        weight,
        Box::new(move |snapshot, _| rsi_headroom_score(snapshot, direction)),
    )
}

pub fn patience_quality(weight: f64, direction: Direction, level: ReferenceLevel) -> ScoreFactor {
    ScoreFactor::new(
        "patience_quality",
        weight,
        Box::new(move |snapshot, _| patience_quality_score(snapshot, direction, level)),
    )
}

pub fn vwap_side(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "vwap_side",
        weight,
        Box::new(move |snapshot, _| vwap_side_score(snapshot, direction)),
    )
}

pub fn vwap_extension(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "vwap_extension",
        weight,
        Box::new(move |snapshot, _| vwap_extension_score(snapshot, direction)),
    )
}

pub fn orb_break_strength(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "orb_break_strength",
        weight,
        Box::new(move |snapshot, _| orb_break_strength_score(snapshot, direction)),
    )
}

pub fn flow_bias(weight: f64, direction: Direction) -> ScoreFactor {
    ScoreFactor::new(
        "flow_bias",
        weight,
        Box::new(move |snapshot, _| flow_bias_score(snapshot, direction)),
    )
}

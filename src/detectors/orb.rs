//! Opening-range breakout detectors (long breakout, short breakdown).

use crate::models::features::{AssetClass, FeatureSnapshot};
use crate::models::profile::ParameterProfile;
use crate::models::signal::{Direction, TradePlan, TradeStyle};

use super::factors::{self, ReferenceLevel};
use super::{Detector, DetectorType};

/// Opening range must be settled before a break is trusted.
pub const MIN_MINUTES_SINCE_OPEN: f64 = 15.0;

/// Break must clear the level by this fraction of it.
pub const BREAK_BUFFER: f64 = 0.001;

/// Opening-range width relative to ATR: too narrow is noise, too wide
/// leaves no room to the target.
pub const MIN_RANGE_ATR: f64 = 0.5;
pub const MAX_RANGE_ATR: f64 = 2.5;

/// Participation floor for a tradeable break.
pub const MIN_RELATIVE_VOLUME: f64 = 0.8;

fn gate(snapshot: &FeatureSnapshot, direction: Direction) -> bool {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return false,
    };
    let range = match snapshot.orb_range() {
        Some(range) => range,
        None => return false,
    };
    let atr = match snapshot.atr() {
        Some(atr) => atr,
        None => return false,
    };
    let minutes = match snapshot.minutes_since_open() {
        Some(minutes) => minutes,
        None => return false,
    };
    let rvol = match snapshot.relative_volume() {
        Some(rvol) => rvol,
        None => return false,
    };

    if minutes < MIN_MINUTES_SINCE_OPEN {
        return false;
    }
    if rvol < MIN_RELATIVE_VOLUME {
        return false;
    }
    let range_atr = range / atr;
    if !(MIN_RANGE_ATR..=MAX_RANGE_ATR).contains(&range_atr) {
        return false;
    }

    match direction {
        // orb_range() guarantees both bounds exist below.
        Direction::Long => snapshot
            .orb_high()
            .map(|high| price > high * (1.0 + BREAK_BUFFER))
            .unwrap_or(false),
        Direction::Short => snapshot
            .orb_low()
            .map(|low| price < low * (1.0 - BREAK_BUFFER))
            .unwrap_or(false),
    }
}

fn plan(
    snapshot: &FeatureSnapshot,
    profile: &ParameterProfile,
    direction: Direction,
) -> Option<TradePlan> {
    let entry = snapshot.price()?;
    let range = snapshot.orb_range()?;
    let atr = snapshot.atr()?;
    let projected = range * profile.target_range_multiple;
    match direction {
        Direction::Long => {
            let stop = snapshot.orb_low()?.max(entry - atr);
            Some(TradePlan {
                entry,
                stop,
                target: entry + projected,
            })
        }
        Direction::Short => {
            let stop = snapshot.orb_high()?.min(entry + atr);
            Some(TradePlan {
                entry,
                stop,
                target: entry - projected,
            })
        }
    }
}

fn build(detector_type: DetectorType, direction: Direction) -> Detector {
    let reference = match direction {
        Direction::Long => ReferenceLevel::OrbHigh,
        Direction::Short => ReferenceLevel::OrbLow,
    };
    Detector::new(
        detector_type,
        direction,
        TradeStyle::Day,
        vec![AssetClass::Stock, AssetClass::Future, AssetClass::Crypto],
        false,
        Box::new(move |snapshot, _| gate(snapshot, direction)),
        vec![
            factors::orb_break_strength(0.30, direction),
            factors::relative_volume(0.25),
            factors::trend_alignment(0.20, direction),
            factors::patience_quality(0.15, direction, reference),
            factors::rsi_headroom(0.10, direction),
        ],
        Box::new(move |snapshot, profile| plan(snapshot, profile, direction)),
    )
}

/// Bullish break of the opening-range high.
pub fn breakout() -> Detector {
    build(DetectorType::OrbBreakout, Direction::Long)
}

/// Bearish break of the opening-range low.
pub fn breakdown() -> Detector {
    build(DetectorType::OrbBreakdown, Direction::Short)
}

//! VWAP detectors: a long reclaim of VWAP from below, and a short fade of
//! an extended move back toward it.

use crate::common::math::percent_change;
use crate::models::features::{AssetClass, FeatureSnapshot};
use crate::models::profile::ParameterProfile;
use crate::models::signal::{Direction, TradePlan, TradeStyle};

use super::factors::{self, ReferenceLevel};
use super::{Detector, DetectorType};

/// A reclaim only counts once price has cleared VWAP by this percent.
pub const RECLAIM_BUFFER_PERCENT: f64 = 0.05;

/// A fade needs price stretched at least this percent above VWAP.
pub const FADE_EXTENSION_PERCENT: f64 = 1.5;

/// Session must be past the opening churn.
pub const MIN_MINUTES_SINCE_OPEN: f64 = 5.0;

fn session_ready(snapshot: &FeatureSnapshot) -> bool {
    snapshot
        .minutes_since_open()
        .map(|minutes| minutes >= MIN_MINUTES_SINCE_OPEN)
        .unwrap_or(false)
}

fn reclaim_gate(snapshot: &FeatureSnapshot) -> bool {
    if !session_ready(snapshot) {
        return false;
    }
    let price = match snapshot.price() {
        Some(price) => price,
        None => return false,
    };
    let vwap = match snapshot.vwap() {
        Some(vwap) => vwap,
        None => return false,
    };
    let change = match percent_change(price, vwap) {
        Some(change) => change,
        None => return false,
    };
    // Price above VWAP by the buffer, having opened at or below it.
    let opened_below = snapshot.open().map(|open| open <= vwap).unwrap_or(false);
    change >= RECLAIM_BUFFER_PERCENT && opened_below
}

fn fade_gate(snapshot: &FeatureSnapshot) -> bool {
    if !session_ready(snapshot) {
        return false;
    }
    let price = match snapshot.price() {
        Some(price) => price,
        None => return false,
    };
    let vwap = match snapshot.vwap() {
        Some(vwap) => vwap,
        None => return false,
    };
    match percent_change(price, vwap) {
        Some(change) => change >= FADE_EXTENSION_PERCENT,
        None => false,
    }
}

fn reclaim_plan(snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> Option<TradePlan> {
    let entry = snapshot.price()?;
    let vwap = snapshot.vwap()?;
    let atr = snapshot.atr()?;
    Some(TradePlan {
        entry,
        stop: vwap - atr * 0.25,
        target: entry + atr * profile.target_range_multiple,
    })
}

fn fade_plan(snapshot: &FeatureSnapshot, _profile: &ParameterProfile) -> Option<TradePlan> {
    let entry = snapshot.price()?;
    let vwap = snapshot.vwap()?;
    let atr = snapshot.atr()?;
    Some(TradePlan {
        entry,
        stop: entry + atr * 0.75,
        // Mean-reversion target is VWAP itself, not a projected multiple.
        target: vwap,
    })
}

/// Long reclaim of VWAP after opening below it.
pub fn reclaim() -> Detector {
    let direction = Direction::Long;
    Detector::new(
        DetectorType::VwapReclaim,
        direction,
        TradeStyle::Scalp,
        vec![AssetClass::Stock, AssetClass::Crypto],
        false,
        Box::new(|snapshot, _| reclaim_gate(snapshot)),
        vec![
            factors::vwap_side(0.30, direction),
            factors::relative_volume(0.25),
            factors::level_confluence(0.20),
            factors::patience_quality(0.15, direction, ReferenceLevel::Vwap),
            factors::rsi_headroom(0.10, direction),
        ],
        Box::new(reclaim_plan),
    )
}

/// Short fade of an extension far above VWAP.
pub fn fade() -> Detector {
    let direction = Direction::Short;
    Detector::new(
        DetectorType::VwapFade,
        direction,
        TradeStyle::Scalp,
        vec![AssetClass::Stock, AssetClass::Crypto],
        false,
        Box::new(|snapshot, _| fade_gate(snapshot)),
        vec![
            factors::vwap_extension(0.35, direction),
            factors::rsi_headroom(0.25, direction),
            factors::relative_volume(0.20),
            factors::patience_quality(0.20, direction, ReferenceLevel::Vwap),
        ],
        Box::new(fade_plan),
    )
}

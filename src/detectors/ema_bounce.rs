//! EMA bounce detector: a pullback to the 21-period EMA inside an
//! established uptrend, confirmed by the fast EMA still stacked above.

use crate::indicators::trend::{self, TrendRegime};
use crate::models::features::{AssetClass, FeatureSnapshot};
use crate::models::profile::ParameterProfile;
use crate::models::signal::{Direction, TradePlan, TradeStyle};

use super::factors::{self, ReferenceLevel};
use super::{Detector, DetectorType};

pub const FAST_EMA: u32 = 8;
pub const SLOW_EMA: u32 = 21;

/// Pullback must come within this percent of the slow EMA.
pub const TOUCH_PERCENT: f64 = 0.5;

fn gate(snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> bool {
    let price = match snapshot.price() {
        Some(price) => price,
        None => return false,
    };
    let fast = match snapshot.moving_average(FAST_EMA) {
        Some(fast) => fast,
        None => return false,
    };
    let slow = match snapshot.moving_average(SLOW_EMA) {
        Some(slow) => slow,
        None => return false,
    };

    // EMAs must be stacked bullishly and price must be holding the slow EMA.
    if fast <= slow || price < slow {
        return false;
    }
    let touch_distance = (price - slow) / slow * 100.0;
    if touch_distance > TOUCH_PERCENT {
        return false;
    }

    let reading = trend::classify(
        snapshot.bars(),
        snapshot.orb_high(),
        snapshot.orb_low(),
        snapshot.premarket_high(),
        snapshot.premarket_low(),
    );
    if !reading.is_tradeable() {
        return false;
    }
    reading.regime == TrendRegime::Uptrend && reading.strength >= profile.trend_min_score
}

fn plan(snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> Option<TradePlan> {
    let entry = snapshot.price()?;
    let slow = snapshot.moving_average(SLOW_EMA)?;
    let atr = snapshot.atr()?;
    let stop = slow - atr * 0.5;
    let target = entry + atr * profile.target_range_multiple;
    Some(TradePlan {
        entry,
        stop,
        target,
    })
}

/// Long bounce off the slow EMA. The factor weights intentionally sum
/// above 1.0: the VWAP-side bonus can push a marginal pullback over the
/// threshold, and the final score clamp bounds the total.
pub fn bounce() -> Detector {
    let direction = Direction::Long;
    Detector::new(
        DetectorType::EmaBounce,
        direction,
        TradeStyle::Swing,
        vec![AssetClass::Stock, AssetClass::Crypto],
        false,
        Box::new(gate),
        vec![
            factors::patience_quality(0.30, direction, ReferenceLevel::Ema(SLOW_EMA)),
            factors::trend_alignment(0.25, direction),
            factors::level_confluence(0.20),
            factors::relative_volume(0.15),
            factors::rsi_headroom(0.10, direction),
            factors::vwap_side(0.10, direction),
        ],
        Box::new(plan),
    )
}

//! Options-flow momentum detector. The only built-in that requires
//! options data: a directional sweep cluster confirming an intraday move.

use crate::models::features::{AssetClass, FeatureSnapshot};
use crate::models::profile::ParameterProfile;
use crate::models::signal::{Direction, TradePlan, TradeStyle};

use super::factors::{self, ReferenceLevel};
use super::{Detector, DetectorType};

/// Minimum sweeps before flow is treated as a cluster rather than noise.
pub const MIN_SWEEPS: u32 = 2;

/// Call-volume share needed for a bullish read.
pub const MIN_CALL_RATIO: f64 = 0.6;

fn gate(snapshot: &FeatureSnapshot) -> bool {
    if snapshot.price().is_none() {
        return false;
    }
    let flow = match snapshot.options_flow() {
        Some(flow) => flow,
        None => return false,
    };
    let sweeps = flow.sweep_count.unwrap_or(0);
    if sweeps < MIN_SWEEPS {
        return false;
    }
    let bullish_flow = flow
        .call_ratio()
        .map(|ratio| ratio >= MIN_CALL_RATIO)
        .unwrap_or(false);
    let positive_premium = flow.net_premium.map(|p| p > 0.0).unwrap_or(false);
    bullish_flow && positive_premium
}

fn plan(snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> Option<TradePlan> {
    let entry = snapshot.price()?;
    let atr = snapshot.atr()?;
    Some(TradePlan {
        entry,
        stop: entry - atr,
        target: entry + atr * profile.target_range_multiple,
    })
}

/// Long flow-sweep confirmation.
pub fn sweep() -> Detector {
    let direction = Direction::Long;
    Detector::new(
        DetectorType::FlowSweep,
        direction,
        TradeStyle::Day,
        vec![AssetClass::Stock, AssetClass::Option],
        true,
        Box::new(|snapshot, _| gate(snapshot)),
        vec![
            factors::flow_bias(0.35, direction),
            factors::trend_alignment(0.25, direction),
            factors::relative_volume(0.20),
            factors::vwap_side(0.10, direction),
            factors::patience_quality(0.10, direction, ReferenceLevel::Vwap),
        ],
        Box::new(plan),
    )
}

//! Per-symbol feature snapshot consumed by the detection engine.
//!
//! A snapshot is assembled once per evaluation tick by the host's feature
//! pipeline and is immutable afterwards. Every numeric field is either a
//! finite number or absent; builders sanitize raw input so that accessors
//! can hand out `Option<f64>` with that invariant already enforced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::math::{finite, positive_finite};

/// Asset classes a detector can scope itself to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stock,
    Option,
    Crypto,
    Future,
}

/// One OHLCV bar. Bar sequences are ordered most-recent-last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Bar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }

    /// Absolute body size.
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// High-to-low range.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// True when all price fields are finite, positive and ordered sanely.
    pub fn is_well_formed(&self) -> bool {
        [self.open, self.high, self.low, self.close]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
            && self.volume.is_finite()
            && self.volume >= 0.0
            && self.high >= self.low
    }
}

/// Aggregated options-flow reading for the symbol, when available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsFlow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put_volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sweep_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_premium: Option<f64>,
}

impl OptionsFlow {
    /// Call volume as a fraction of total options volume.
    pub fn call_ratio(&self) -> Option<f64> {
        let calls = self.call_volume.and_then(positive_finite)?;
        let puts = self.put_volume.filter(|v| v.is_finite() && *v >= 0.0)?;
        Some(calls / (calls + puts))
    }
}

/// Greeks for the nearest-relevant contract, when available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Greeks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_volatility: Option<f64>,
}

/// A named price level used for confluence analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub value: f64,
}

impl Level {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Immutable per-symbol bundle of derived market data.
///
/// Built with `FeatureSnapshot::new` plus `with_*` setters; raw values that
/// are NaN, infinite, or out of range are dropped at build time so that
/// every accessor observes "absent", never a bogus number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    symbol: String,
    asset_class: AssetClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_volume: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    moving_averages: BTreeMap<u32, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vwap: Option<f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    rsi: BTreeMap<u32, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minutes_since_open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orb_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    orb_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    premarket_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    premarket_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    atr: Option<f64>,
    #[serde(default)]
    patient_candle: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    bars: Vec<Bar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options_flow: Option<OptionsFlow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    greeks: Option<Greeks>,
}

impl FeatureSnapshot {
    pub fn new(symbol: impl Into<String>, asset_class: AssetClass) -> Self {
        Self {
            symbol: symbol.into(),
            asset_class,
            price: None,
            open: None,
            high: None,
            low: None,
            volume: None,
            relative_volume: None,
            moving_averages: BTreeMap::new(),
            vwap: None,
            rsi: BTreeMap::new(),
            minutes_since_open: None,
            orb_high: None,
            orb_low: None,
            premarket_high: None,
            premarket_low: None,
            atr: None,
            patient_candle: false,
            bars: Vec::new(),
            options_flow: None,
            greeks: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = positive_finite(price);
        self
    }

    pub fn with_ohlc(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = positive_finite(open);
        self.high = positive_finite(high);
        self.low = positive_finite(low);
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = positive_finite(volume);
        self
    }

    pub fn with_relative_volume(mut self, relative_volume: f64) -> Self {
        self.relative_volume = positive_finite(relative_volume);
        self
    }

    pub fn with_moving_average(mut self, period: u32, value: f64) -> Self {
        if let Some(value) = positive_finite(value) {
            self.moving_averages.insert(period, value);
        }
        self
    }

    pub fn with_vwap(mut self, vwap: f64) -> Self {
        self.vwap = positive_finite(vwap);
        self
    }

    pub fn with_rsi(mut self, period: u32, value: f64) -> Self {
        if let Some(value) = finite(value).filter(|v| (0.0..=100.0).contains(v)) {
            self.rsi.insert(period, value);
        }
        self
    }

    pub fn with_minutes_since_open(mut self, minutes: f64) -> Self {
        self.minutes_since_open = finite(minutes).filter(|m| *m >= 0.0);
        self
    }

    pub fn with_opening_range(mut self, high: f64, low: f64) -> Self {
        self.orb_high = positive_finite(high);
        self.orb_low = positive_finite(low);
        self
    }

    pub fn with_premarket_range(mut self, high: f64, low: f64) -> Self {
        self.premarket_high = positive_finite(high);
        self.premarket_low = positive_finite(low);
        self
    }

    pub fn with_atr(mut self, atr: f64) -> Self {
        self.atr = positive_finite(atr);
        self
    }

    pub fn with_patient_candle(mut self, present: bool) -> Self {
        self.patient_candle = present;
        self
    }

    pub fn with_bars(mut self, bars: Vec<Bar>) -> Self {
        self.bars = bars.into_iter().filter(Bar::is_well_formed).collect();
        self
    }

    pub fn with_options_flow(mut self, flow: OptionsFlow) -> Self {
        self.options_flow = Some(flow);
        self
    }

    pub fn with_greeks(mut self, greeks: Greeks) -> Self {
        self.greeks = Some(greeks);
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn open(&self) -> Option<f64> {
        self.open
    }

    pub fn high(&self) -> Option<f64> {
        self.high
    }

    pub fn low(&self) -> Option<f64> {
        self.low
    }

    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    pub fn relative_volume(&self) -> Option<f64> {
        self.relative_volume
    }

    pub fn moving_average(&self, period: u32) -> Option<f64> {
        self.moving_averages.get(&period).copied()
    }

    pub fn moving_averages(&self) -> &BTreeMap<u32, f64> {
        &self.moving_averages
    }

    pub fn vwap(&self) -> Option<f64> {
        self.vwap
    }

    pub fn rsi(&self, period: u32) -> Option<f64> {
        self.rsi.get(&period).copied()
    }

    pub fn minutes_since_open(&self) -> Option<f64> {
        self.minutes_since_open
    }

    pub fn orb_high(&self) -> Option<f64> {
        self.orb_high
    }

    pub fn orb_low(&self) -> Option<f64> {
        self.orb_low
    }

    /// Opening-range width, when both bounds exist and are ordered.
    pub fn orb_range(&self) -> Option<f64> {
        let high = self.orb_high?;
        let low = self.orb_low?;
        (high > low).then_some(high - low)
    }

    pub fn premarket_high(&self) -> Option<f64> {
        self.premarket_high
    }

    pub fn premarket_low(&self) -> Option<f64> {
        self.premarket_low
    }

    pub fn atr(&self) -> Option<f64> {
        self.atr
    }

    pub fn has_patient_candle(&self) -> bool {
        self.patient_candle
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn options_flow(&self) -> Option<&OptionsFlow> {
        self.options_flow.as_ref()
    }

    pub fn greeks(&self) -> Option<&Greeks> {
        self.greeks.as_ref()
    }

    pub fn has_options_data(&self) -> bool {
        self.options_flow.is_some()
    }

    /// Named reference levels for confluence analysis: moving averages,
    /// VWAP, and the opening-range bounds, in that order.
    pub fn reference_levels(&self) -> Vec<Level> {
        let mut levels = Vec::new();
        for (period, value) in &self.moving_averages {
            levels.push(Level::new(format!("ma{}", period), *value));
        }
        if let Some(vwap) = self.vwap {
            levels.push(Level::new("vwap", vwap));
        }
        if let Some(orb_high) = self.orb_high {
            levels.push(Level::new("orb_high", orb_high));
        }
        if let Some(orb_low) = self.orb_low {
            levels.push(Level::new("orb_low", orb_low));
        }
        levels
    }
}

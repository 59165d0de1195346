//! Trend regime classification from the intraday bar sequence.
//!
//! Classifies the current regime as uptrend, downtrend, or chop, with a
//! micro-trend flag for short-lived moves that don't meet the full trend
//! bar. The strength side output (0-100) is reused by score factors:
//! stronger, cleaner breaks of the defining level score higher.

use serde::{Deserialize, Serialize};

use crate::common::math::{clamp_score, percent_change};
use crate::models::features::Bar;

/// Minimum bars before anything other than zero-strength chop is reported.
pub const MIN_TREND_BARS: usize = 5;

/// Bars inspected for persistence and micro-trend runs.
const LOOKBACK: usize = 10;
const MICRO_RUN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendRegime {
    Uptrend,
    Downtrend,
    Chop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    pub regime: TrendRegime,
    pub micro_trend: bool,
    /// 0-100; higher for cleaner breaks of the defining level.
    pub strength: f64,
}

impl TrendReading {
    pub fn chop() -> Self {
        Self {
            regime: TrendRegime::Chop,
            micro_trend: false,
            strength: 0.0,
        }
    }

    /// Chop is not tradeable unless a micro-trend is present.
    pub fn is_tradeable(&self) -> bool {
        self.regime != TrendRegime::Chop || self.micro_trend
    }
}

/// Classify the current regime from the bar sequence and the session's
/// defining levels. Total: empty or short input yields zero-strength chop.
pub fn classify(
    bars: &[Bar],
    orb_high: Option<f64>,
    orb_low: Option<f64>,
    premarket_high: Option<f64>,
    premarket_low: Option<f64>,
) -> TrendReading {
    if bars.len() < MIN_TREND_BARS {
        return TrendReading::chop();
    }

    let recent = &bars[bars.len().saturating_sub(LOOKBACK)..];
    let last_close = match recent.last() {
        Some(bar) => bar.close,
        None => return TrendReading::chop(),
    };
    let first_close = recent[0].close;

    let mut up_bars = 0usize;
    let mut down_bars = 0usize;
    for bar in recent {
        if bar.is_bullish() {
            up_bars += 1;
        } else if bar.is_bearish() {
            down_bars += 1;
        }
    }
    let persistence_up = up_bars as f64 / recent.len() as f64;
    let persistence_down = down_bars as f64 / recent.len() as f64;

    let net_change_pct = percent_change(last_close, first_close).unwrap_or(0.0);

    // Defining levels: the tighter of opening range and premarket range.
    let upper_level = min_defined(orb_high, premarket_high);
    let lower_level = max_defined(orb_low, premarket_low);

    let broke_up = upper_level.map(|level| last_close > level).unwrap_or(false);
    let broke_down = lower_level.map(|level| last_close < level).unwrap_or(false);

    let up_qualifies = broke_up && persistence_up >= 0.6 && net_change_pct > 0.0;
    let down_qualifies = broke_down && persistence_down >= 0.6 && net_change_pct < 0.0;

    if up_qualifies {
        let strength = break_strength(last_close, upper_level, persistence_up, net_change_pct);
        return TrendReading {
            regime: TrendRegime::Uptrend,
            micro_trend: false,
            strength,
        };
    }
    if down_qualifies {
        let strength = break_strength(last_close, lower_level, persistence_down, -net_change_pct);
        return TrendReading {
            regime: TrendRegime::Downtrend,
            micro_trend: false,
            strength,
        };
    }

    // Micro-trend: a short directional run that hasn't met the full bar.
    let micro = micro_run(recent);
    TrendReading {
        regime: TrendRegime::Chop,
        micro_trend: micro,
        strength: if micro { 25.0 } else { 0.0 },
    }
}

/// Strength rewards both the break margin over the defining level and the
/// persistence of the move behind it.
fn break_strength(
    close: f64,
    level: Option<f64>,
    persistence: f64,
    net_change_pct: f64,
) -> f64 {
    let margin_pct = level
        .and_then(|l| percent_change(close, l))
        .map(f64::abs)
        .unwrap_or(0.0);
    // Margin saturates at 1% beyond the level; persistence fills the rest.
    let margin_component = (margin_pct / 1.0).min(1.0) * 50.0;
    let persistence_component = persistence * 35.0;
    let momentum_component = (net_change_pct / 2.0).clamp(0.0, 1.0) * 15.0;
    clamp_score(margin_component + persistence_component + momentum_component)
}

fn micro_run(recent: &[Bar]) -> bool {
    if recent.len() < MICRO_RUN {
        return false;
    }
    let tail = &recent[recent.len() - MICRO_RUN..];
    tail.iter().all(Bar::is_bullish) || tail.iter().all(Bar::is_bearish)
}

fn min_defined(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (level, None) | (None, level) => level,
    }
}

fn max_defined(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (level, None) | (None, level) => level,
    }
}

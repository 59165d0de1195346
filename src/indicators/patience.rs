//! Patience-candle detection.
//!
//! Scans the most recent bars for a small-bodied consolidation candle
//! sitting on a reference level, confirmed by the following bar closing in
//! the trade direction. ATR normalizes the placement tolerance so the same
//! shape test works across price scales.

use serde::{Deserialize, Serialize};

use crate::common::math::clamp_score;
use crate::models::features::Bar;
use crate::models::signal::Direction;

/// Candidate candle plus its confirmation bar.
pub const MIN_BARS: usize = 2;

/// Body must stay within this fraction of the candle's range.
const MAX_BODY_RATIO: f64 = 0.4;

/// Candle placement tolerance, in ATR multiples, around the reference level.
const PLACEMENT_ATR_MULTIPLE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatienceReading {
    pub detected: bool,
    /// 0-100; rewards tighter bodies and better placement on the level.
    pub score: f64,
}

impl PatienceReading {
    pub fn none() -> Self {
        Self {
            detected: false,
            score: 0.0,
        }
    }
}

/// Detect a patience candle against `reference` (the level the setup is
/// leaning on). Total: short sequences and missing ATR report "none".
pub fn detect(bars: &[Bar], reference: f64, atr: Option<f64>, direction: Direction) -> PatienceReading {
    if bars.len() < MIN_BARS {
        return PatienceReading::none();
    }
    let atr = match atr.filter(|a| a.is_finite() && *a > 0.0) {
        Some(atr) => atr,
        None => return PatienceReading::none(),
    };
    if !reference.is_finite() || reference <= 0.0 {
        return PatienceReading::none();
    }

    let candidate = &bars[bars.len() - 2];
    let confirmation = &bars[bars.len() - 1];

    let range = candidate.range();
    if range <= 0.0 {
        return PatienceReading::none();
    }
    let body_ratio = candidate.body() / range;
    if body_ratio > MAX_BODY_RATIO {
        return PatienceReading::none();
    }

    // Placement: the candle's level-side extreme must hug the reference.
    let tolerance = atr * PLACEMENT_ATR_MULTIPLE;
    let placement_distance = match direction {
        Direction::Long => (candidate.low - reference).abs(),
        Direction::Short => (candidate.high - reference).abs(),
    };
    let held_side = match direction {
        Direction::Long => candidate.close >= reference,
        Direction::Short => candidate.close <= reference,
    };
    if placement_distance > tolerance || !held_side {
        return PatienceReading::none();
    }

    // Directional confirmation on the following bar.
    let confirmed = match direction {
        Direction::Long => confirmation.close > candidate.high,
        Direction::Short => confirmation.close < candidate.low,
    };
    if !confirmed {
        return PatienceReading::none();
    }

    // Tighter body: up to 50. Tighter placement: up to 30. Confirmation
    // follow-through relative to ATR: up to 20.
    let body_component = (1.0 - body_ratio / MAX_BODY_RATIO) * 50.0;
    let placement_component = (1.0 - placement_distance / tolerance) * 30.0;
    let follow_through = match direction {
        Direction::Long => confirmation.close - candidate.high,
        Direction::Short => candidate.low - confirmation.close,
    };
    let confirmation_component = (follow_through / atr).clamp(0.0, 1.0) * 20.0;

    PatienceReading {
        detected: true,
        score: clamp_score(body_component + placement_component + confirmation_component),
    }
}

//! Price-level confluence.
//!
//! Counts which named reference levels (moving averages, VWAP, opening
//! range bounds) sit within a proximity tolerance of the current price, and
//! scores the cluster: more levels and tighter distances score higher.

use serde::{Deserialize, Serialize};

use crate::common::math::{clamp_score, percent_distance};
use crate::models::features::Level;

/// Per-hit contribution cap; three tight levels saturate the score.
const HIT_WEIGHT: f64 = 100.0 / 3.0;

/// A level currently inside the proximity tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelHit {
    pub name: String,
    pub value: f64,
    /// Distance from price, as a percent of price.
    pub distance_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceReading {
    pub hits: Vec<LevelHit>,
    /// 0-100 weighted proximity count.
    pub score: f64,
}

impl ConfluenceReading {
    pub fn none() -> Self {
        Self {
            hits: Vec::new(),
            score: 0.0,
        }
    }
}

/// Measure confluence of `levels` around `price` within
/// `proximity_percent` of price. Total: bad price or tolerance yields an
/// empty reading.
pub fn measure(price: f64, levels: &[Level], proximity_percent: f64) -> ConfluenceReading {
    if !price.is_finite() || price <= 0.0 {
        return ConfluenceReading::none();
    }
    if !proximity_percent.is_finite() || proximity_percent <= 0.0 {
        return ConfluenceReading::none();
    }

    let mut hits = Vec::new();
    let mut score = 0.0;
    for level in levels {
        let distance = match percent_distance(level.value, price) {
            Some(d) => d,
            None => continue,
        };
        if distance > proximity_percent {
            continue;
        }
        // Tightness runs 1.0 at zero distance down to 0 at the tolerance
        // edge; each hit contributes up to a third of the full score.
        let tightness = 1.0 - distance / proximity_percent;
        score += HIT_WEIGHT * (0.4 + 0.6 * tightness);
        hits.push(LevelHit {
            name: level.name.clone(),
            value: level.value,
            distance_percent: distance,
        });
    }

    ConfluenceReading {
        hits,
        score: clamp_score(score),
    }
}

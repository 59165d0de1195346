//! Validated, immutable detector registry.
//!
//! Construction is the one place a configuration defect fails hard; after
//! that the registry is read-only and safe to share across concurrent
//! evaluations. Hosts swap a whole registry reference to reconfigure,
//! never mutate one in place.

use std::collections::BTreeSet;

use crate::error::ConfigError;

use super::{ema_bounce, flow, orb, vwap, Detector, DetectorType};

/// Per-detector factor weights may intentionally sum above 1.0 (bonus
/// headroom), but only up to this bound.
pub const MAX_WEIGHT_SUM: f64 = 1.5;

/// Sums further than this from 1.0 are tolerated but logged.
const WEIGHT_SUM_WARN_BAND: f64 = 0.05;

#[derive(Debug)]
pub struct DetectorRegistry {
    detectors: Vec<Detector>,
}

impl DetectorRegistry {
    /// Build a registry, rejecting mis-specified detectors up front.
    pub fn new(detectors: Vec<Detector>) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for detector in &detectors {
            if !seen.insert(detector.detector_type) {
                return Err(ConfigError::DuplicateDetector(detector.detector_type));
            }
            validate_factors(detector)?;
        }
        Ok(Self { detectors })
    }

    /// The six built-in detectors in their canonical order.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::new(vec![
            orb::breakout(),
            orb::breakdown(),
            ema_bounce::bounce(),
            vwap::reclaim(),
            vwap::fade(),
            flow::sweep(),
        ])
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn get(&self, detector_type: DetectorType) -> Option<&Detector> {
        self.detectors
            .iter()
            .find(|d| d.detector_type == detector_type)
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

fn validate_factors(detector: &Detector) -> Result<(), ConfigError> {
    if detector.factors.is_empty() {
        return Err(ConfigError::NoFactors(detector.detector_type));
    }
    let mut names = BTreeSet::new();
    for factor in &detector.factors {
        if !names.insert(factor.name) {
            return Err(ConfigError::DuplicateFactorName(
                detector.detector_type,
                factor.name,
            ));
        }
        if !factor.weight.is_finite() || factor.weight <= 0.0 || factor.weight > 1.0 {
            return Err(ConfigError::WeightOutOfRange(
                detector.detector_type,
                factor.name,
                factor.weight,
            ));
        }
    }
    let sum = detector.weight_sum();
    if sum <= 0.0 || sum > MAX_WEIGHT_SUM {
        return Err(ConfigError::WeightSumOutOfRange(detector.detector_type, sum));
    }
    if (sum - 1.0).abs() > WEIGHT_SUM_WARN_BAND {
        tracing::warn!(
            detector = detector.detector_type.as_str(),
            weight_sum = sum,
            "factor weights do not sum to 1.0; treating the excess as bonus headroom"
        );
    }
    Ok(())
}

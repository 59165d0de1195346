//! Parameter profiles: pure configuration that tunes which detectors run
//! and at what score they clear, without touching detector code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::detectors::DetectorType;
use crate::error::ConfigError;
use crate::models::signal::TradeStyle;

/// Per-detector profile override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorOverride {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f64>,
}

impl DetectorOverride {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_score: None,
        }
    }

    pub fn min_score(min_score: f64) -> Self {
        Self {
            enabled: true,
            min_score: Some(min_score),
        }
    }
}

/// Minimum composite score required per trade style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinScoreByStyle {
    pub scalp: f64,
    pub day: f64,
    pub swing: f64,
}

impl MinScoreByStyle {
    pub fn get(&self, style: TradeStyle) -> f64 {
        match style {
            TradeStyle::Scalp => self.scalp,
            TradeStyle::Day => self.day,
            TradeStyle::Swing => self.swing,
        }
    }
}

/// The three canonical profiles shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Default,
    Conservative,
    Aggressive,
}

impl ProfileKind {
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "default" | "balanced" => Ok(ProfileKind::Default),
            "conservative" => Ok(ProfileKind::Conservative),
            "aggressive" => Ok(ProfileKind::Aggressive),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }

    pub fn profile(self) -> ParameterProfile {
        match self {
            ProfileKind::Default => ParameterProfile::default_profile(),
            ProfileKind::Conservative => ParameterProfile::conservative(),
            ProfileKind::Aggressive => ParameterProfile::aggressive(),
        }
    }
}

/// Named engine configuration. Exactly one profile is active per
/// evaluation call; the host owns selection and passes it explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterProfile {
    pub name: String,
    pub min_score_by_style: MinScoreByStyle,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub detector_overrides: BTreeMap<DetectorType, DetectorOverride>,
    /// Tolerance, as a percent of price, for VWAP/level confluence checks.
    pub vwap_proximity_percent: f64,
    /// Minimum trend strength before trend-gated detectors participate.
    pub trend_min_score: f64,
    /// Target projection as a multiple of the setup range (ORB width or ATR).
    pub target_range_multiple: f64,
}

impl ParameterProfile {
    /// Balanced defaults: every detector enabled.
    pub fn default_profile() -> Self {
        Self {
            name: "default".to_string(),
            min_score_by_style: MinScoreByStyle {
                scalp: 65.0,
                day: 60.0,
                swing: 55.0,
            },
            detector_overrides: BTreeMap::new(),
            vwap_proximity_percent: 0.3,
            trend_min_score: 40.0,
            target_range_multiple: 1.5,
        }
    }

    /// Higher thresholds, fewer detectors, larger target multiples.
    pub fn conservative() -> Self {
        let mut detector_overrides = BTreeMap::new();
        detector_overrides.insert(DetectorType::VwapFade, DetectorOverride::disabled());
        detector_overrides.insert(DetectorType::FlowSweep, DetectorOverride::disabled());
        detector_overrides.insert(
            DetectorType::OrbBreakout,
            DetectorOverride::min_score(75.0),
        );
        detector_overrides.insert(
            DetectorType::OrbBreakdown,
            DetectorOverride::min_score(75.0),
        );
        Self {
            name: "conservative".to_string(),
            min_score_by_style: MinScoreByStyle {
                scalp: 75.0,
                day: 70.0,
                swing: 65.0,
            },
            detector_overrides,
            vwap_proximity_percent: 0.2,
            trend_min_score: 55.0,
            target_range_multiple: 2.0,
        }
    }

    /// Lower thresholds, every detector enabled, wider tolerances.
    pub fn aggressive() -> Self {
        let mut detector_overrides = BTreeMap::new();
        detector_overrides.insert(
            DetectorType::VwapReclaim,
            DetectorOverride::min_score(50.0),
        );
        Self {
            name: "aggressive".to_string(),
            min_score_by_style: MinScoreByStyle {
                scalp: 55.0,
                day: 50.0,
                swing: 45.0,
            },
            detector_overrides,
            vwap_proximity_percent: 0.5,
            trend_min_score: 30.0,
            target_range_multiple: 1.2,
        }
    }

    /// Whether a detector participates under this profile.
    pub fn is_detector_enabled(&self, detector_type: DetectorType) -> bool {
        self.detector_overrides
            .get(&detector_type)
            .map(|o| o.enabled)
            .unwrap_or(true)
    }

    /// Effective minimum score for a detector: the per-detector override
    /// when present, otherwise the trade-style default.
    pub fn detector_min_score(&self, detector_type: DetectorType, style: TradeStyle) -> f64 {
        self.detector_overrides
            .get(&detector_type)
            .and_then(|o| o.min_score)
            .unwrap_or_else(|| self.min_score_by_style.get(style))
    }

    /// Reject out-of-range thresholds and tolerances. Host-assembled
    /// profiles go through this before their first evaluation call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let in_score_band = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_score_band(self.min_score_by_style.scalp) {
            return Err(ConfigError::InvalidProfileField(
                "min_score_by_style.scalp",
                self.min_score_by_style.scalp,
            ));
        }
        if !in_score_band(self.min_score_by_style.day) {
            return Err(ConfigError::InvalidProfileField(
                "min_score_by_style.day",
                self.min_score_by_style.day,
            ));
        }
        if !in_score_band(self.min_score_by_style.swing) {
            return Err(ConfigError::InvalidProfileField(
                "min_score_by_style.swing",
                self.min_score_by_style.swing,
            ));
        }
        if !in_score_band(self.trend_min_score) {
            return Err(ConfigError::InvalidProfileField(
                "trend_min_score",
                self.trend_min_score,
            ));
        }
        if !self.vwap_proximity_percent.is_finite() || self.vwap_proximity_percent <= 0.0 {
            return Err(ConfigError::InvalidProfileField(
                "vwap_proximity_percent",
                self.vwap_proximity_percent,
            ));
        }
        if !self.target_range_multiple.is_finite() || self.target_range_multiple <= 0.0 {
            return Err(ConfigError::InvalidProfileField(
                "target_range_multiple",
                self.target_range_multiple,
            ));
        }
        for (detector_type, o) in &self.detector_overrides {
            if let Some(min_score) = o.min_score {
                if !in_score_band(min_score) {
                    tracing::error!(
                        detector = detector_type.as_str(),
                        min_score,
                        "profile override outside [0, 100]"
                    );
                    return Err(ConfigError::InvalidProfileField(
                        "detector_overrides.min_score",
                        min_score,
                    ));
                }
            }
        }
        Ok(())
    }
}

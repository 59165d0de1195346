//! Configuration errors raised at registry/profile construction time.
//!
//! Evaluation itself never fails: missing market data degrades to the
//! lowest-confidence output instead (see the indicator modules). A
//! `ConfigError` always means a deployment defect, not a data condition.

use crate::detectors::DetectorType;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A detector was registered with an empty factor set.
    NoFactors(DetectorType),
    /// Two factors within one detector share a name.
    DuplicateFactorName(DetectorType, &'static str),
    /// A factor weight fell outside (0, 1].
    WeightOutOfRange(DetectorType, &'static str, f64),
    /// A detector's factor weights sum outside the accepted (0, 1.5] band.
    WeightSumOutOfRange(DetectorType, f64),
    /// The same detector type was registered twice.
    DuplicateDetector(DetectorType),
    /// A profile threshold or tolerance is outside its valid range.
    InvalidProfileField(&'static str, f64),
    /// The profile named by configuration does not exist.
    UnknownProfile(String),
    /// The inline override blob could not be parsed.
    InvalidOverrideJson(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoFactors(detector) => {
                write!(f, "detector {:?} has no score factors", detector)
            }
            ConfigError::DuplicateFactorName(detector, name) => {
                write!(f, "detector {:?} has duplicate factor name '{}'", detector, name)
            }
            ConfigError::WeightOutOfRange(detector, name, weight) => {
                write!(
                    f,
                    "detector {:?} factor '{}' weight {} outside (0, 1]",
                    detector, name, weight
                )
            }
            ConfigError::WeightSumOutOfRange(detector, sum) => {
                write!(
                    f,
                    "detector {:?} factor weights sum to {}, outside (0, 1.5]",
                    detector, sum
                )
            }
            ConfigError::DuplicateDetector(detector) => {
                write!(f, "detector {:?} registered more than once", detector)
            }
            ConfigError::InvalidProfileField(field, value) => {
                write!(f, "profile field '{}' has invalid value {}", field, value)
            }
            ConfigError::UnknownProfile(name) => {
                write!(f, "unknown parameter profile '{}'", name)
            }
            ConfigError::InvalidOverrideJson(detail) => {
                write!(f, "invalid profile override json: {}", detail)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//! Host configuration: environment name and active-profile selection.
//!
//! The engine itself never loads or persists profiles; this module is the
//! host-side layer that resolves one from the environment and hands it to
//! the evaluator explicitly on every call.

use std::collections::BTreeMap;

use crate::detectors::DetectorType;
use crate::error::ConfigError;
use crate::models::profile::{DetectorOverride, ParameterProfile, ProfileKind};

/// Deployment environment name, defaulting to "sandbox".
pub fn get_environment() -> String {
    std::env::var("OPTRIX_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Engine settings resolved once at host startup.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub environment: String,
    pub profile: ParameterProfile,
}

impl EngineSettings {
    /// Resolve settings from the process environment:
    ///
    /// - `OPTRIX_ENV`: deployment environment name
    /// - `OPTRIX_PROFILE`: `default` | `conservative` | `aggressive`
    /// - `OPTRIX_PROFILE_OVERRIDES`: optional inline JSON map of
    ///   detector-type -> override, layered over the selected preset
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let kind = match std::env::var("OPTRIX_PROFILE") {
            Ok(name) => ProfileKind::parse(&name)?,
            Err(_) => ProfileKind::Default,
        };
        let mut profile = kind.profile();

        if let Ok(raw) = std::env::var("OPTRIX_PROFILE_OVERRIDES") {
            let overrides = parse_overrides(&raw)?;
            profile.detector_overrides.extend(overrides);
        }
        profile.validate()?;

        Ok(Self {
            environment: get_environment(),
            profile,
        })
    }
}

fn parse_overrides(
    raw: &str,
) -> Result<BTreeMap<DetectorType, DetectorOverride>, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::InvalidOverrideJson(e.to_string()))
}

//! optrix: composite opportunity detection and scoring.
//!
//! A pluggable rules engine that consumes a per-symbol [`FeatureSnapshot`]
//! and produces ranked, graded [`CompositeSignal`]s by combining hard gate
//! conditions with weighted score factors. Evaluation is synchronous,
//! stateless, and deterministic; the host owns cadence, signal expiry, and
//! profile selection.
//!
//! ```
//! use optrix::detectors::DetectorRegistry;
//! use optrix::models::{AssetClass, FeatureSnapshot, ParameterProfile};
//! use optrix::signals::Evaluator;
//!
//! let evaluator = Evaluator::new(DetectorRegistry::standard().unwrap());
//! let snapshot = FeatureSnapshot::new("SPY", AssetClass::Stock)
//!     .with_price(101.0)
//!     .with_opening_range(100.0, 98.0)
//!     .with_atr(1.0)
//!     .with_relative_volume(1.5)
//!     .with_minutes_since_open(20.0);
//! let profile = ParameterProfile::default_profile();
//! let signals = evaluator.evaluate(&snapshot, &profile, &|_| true);
//! ```
//!
//! [`FeatureSnapshot`]: models::FeatureSnapshot
//! [`CompositeSignal`]: models::CompositeSignal

pub mod common;
pub mod config;
pub mod detectors;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod signals;

pub use detectors::{Detector, DetectorRegistry, DetectorType, ScoreFactor};
pub use error::ConfigError;
pub use models::{
    AssetClass, CompositeSignal, Direction, FeatureSnapshot, ParameterProfile, ProfileKind,
    SignalStatus, TradeStyle,
};
pub use signals::{Evaluator, Grade};

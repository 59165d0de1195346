//! Shared data models spanning the engine layers.

pub mod features;
pub mod profile;
pub mod signal;

pub use features::{AssetClass, Bar, FeatureSnapshot, Greeks, Level, OptionsFlow};
pub use profile::{DetectorOverride, MinScoreByStyle, ParameterProfile, ProfileKind};
pub use signal::{CompositeSignal, Direction, FactorScore, SignalStatus, TradePlan, TradeStyle};

//! Opportunity detectors: a gate predicate plus a weighted score-factor set
//! bound to one strategy, direction, and asset-class scope.

use serde::{Deserialize, Serialize};

use crate::models::features::{AssetClass, FeatureSnapshot};
use crate::models::profile::ParameterProfile;
use crate::models::signal::{Direction, TradePlan, TradeStyle};

pub mod ema_bounce;
pub mod factors;
pub mod flow;
pub mod orb;
pub mod registry;
pub mod vwap;

pub use registry::DetectorRegistry;

/// Closed set of detector strategies. Each tag maps to exactly one
/// registered detector, so matches stay exhaustive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DetectorType {
    OrbBreakout,
    OrbBreakdown,
    EmaBounce,
    VwapReclaim,
    VwapFade,
    FlowSweep,
}

impl DetectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorType::OrbBreakout => "orb_breakout",
            DetectorType::OrbBreakdown => "orb_breakdown",
            DetectorType::EmaBounce => "ema_bounce",
            DetectorType::VwapReclaim => "vwap_reclaim",
            DetectorType::VwapFade => "vwap_fade",
            DetectorType::FlowSweep => "flow_sweep",
        }
    }

    pub fn all() -> [DetectorType; 6] {
        [
            DetectorType::OrbBreakout,
            DetectorType::OrbBreakdown,
            DetectorType::EmaBounce,
            DetectorType::VwapReclaim,
            DetectorType::VwapFade,
            DetectorType::FlowSweep,
        ]
    }
}

pub type GateFn = Box<dyn Fn(&FeatureSnapshot, &ParameterProfile) -> bool + Send + Sync>;
pub type FactorFn = Box<dyn Fn(&FeatureSnapshot, &ParameterProfile) -> f64 + Send + Sync>;
pub type PlanFn =
    Box<dyn Fn(&FeatureSnapshot, &ParameterProfile) -> Option<TradePlan> + Send + Sync>;

/// A named, weighted pure scoring function. Factor implementations clip
/// their own output to [0, 100]; the engine clips only the weighted total.
pub struct ScoreFactor {
    pub name: &'static str,
    pub weight: f64,
    eval: FactorFn,
}

impl ScoreFactor {
    pub fn new(name: &'static str, weight: f64, eval: FactorFn) -> Self {
        Self { name, weight, eval }
    }

    pub fn evaluate(&self, snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> f64 {
        (self.eval)(snapshot, profile)
    }
}

impl std::fmt::Debug for ScoreFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreFactor")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// One registered strategy: scope, hard eligibility gate, factor set, and
/// trade-plan construction. Constructed once at startup and reused across
/// evaluations; nothing here mutates per call.
pub struct Detector {
    pub detector_type: DetectorType,
    pub direction: Direction,
    pub trade_style: TradeStyle,
    pub asset_classes: Vec<AssetClass>,
    pub requires_options_data: bool,
    gate: GateFn,
    pub factors: Vec<ScoreFactor>,
    plan: PlanFn,
}

impl Detector {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        detector_type: DetectorType,
        direction: Direction,
        trade_style: TradeStyle,
        asset_classes: Vec<AssetClass>,
        requires_options_data: bool,
        gate: GateFn,
        factors: Vec<ScoreFactor>,
        plan: PlanFn,
    ) -> Self {
        Self {
            detector_type,
            direction,
            trade_style,
            asset_classes,
            requires_options_data,
            gate,
            factors,
            plan,
        }
    }

    /// Scope check: asset class must match, and options-dependent
    /// detectors need options data present.
    pub fn in_scope(&self, snapshot: &FeatureSnapshot) -> bool {
        if !self.asset_classes.contains(&snapshot.asset_class()) {
            return false;
        }
        if self.requires_options_data && !snapshot.has_options_data() {
            return false;
        }
        true
    }

    /// Hard eligibility test. A `false` result is a silent non-match.
    pub fn gate(&self, snapshot: &FeatureSnapshot, profile: &ParameterProfile) -> bool {
        (self.gate)(snapshot, profile)
    }

    /// Entry/stop/target once the gate has cleared.
    pub fn plan(
        &self,
        snapshot: &FeatureSnapshot,
        profile: &ParameterProfile,
    ) -> Option<TradePlan> {
        (self.plan)(snapshot, profile)
    }

    pub fn weight_sum(&self) -> f64 {
        self.factors.iter().map(|f| f.weight).sum()
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("detector_type", &self.detector_type)
            .field("direction", &self.direction)
            .field("trade_style", &self.trade_style)
            .field("asset_classes", &self.asset_classes)
            .field("requires_options_data", &self.requires_options_data)
            .field("factors", &self.factors)
            .finish()
    }
}

//! Composite signal output model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detectors::DetectorType;
use crate::signals::grading::Grade;

/// Trade direction a detector is biased toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

/// Holding-period style a detector targets; picks the profile's default
/// minimum score when no per-detector override exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStyle {
    Scalp,
    Day,
    Swing,
}

/// Signal lifecycle state. The engine only ever creates `Active` signals;
/// expiry is owned by the consuming layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStatus {
    Active,
    Expired,
}

/// Entry/stop/target prices computed by a detector once its gate passed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
}

impl TradePlan {
    /// Reward-to-risk ratio; `None` when the stop sits on the entry.
    pub fn risk_reward(&self) -> Option<f64> {
        let risk = (self.entry - self.stop).abs();
        if risk <= 0.0 || !risk.is_finite() {
            return None;
        }
        Some((self.target - self.entry).abs() / risk)
    }
}

/// One factor's contribution to a detector score, kept for explainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    pub name: String,
    pub weight: f64,
    pub score: f64,
}

impl FactorScore {
    pub fn contribution(&self) -> f64 {
        self.weight * self.score
    }
}

/// A graded trading opportunity emitted by one detector pass.
///
/// Never mutated by the engine after creation; a changed market condition
/// produces a fresh signal on the next evaluation tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeSignal {
    pub id: String,
    pub symbol: String,
    pub detector_type: DetectorType,
    pub direction: Direction,
    pub trade_style: TradeStyle,
    pub score: f64,
    pub grade: Grade,
    pub entry: f64,
    pub stop: f64,
    pub target: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward: Option<f64>,
    pub factor_scores: Vec<FactorScore>,
    pub status: SignalStatus,
    pub created_at: DateTime<Utc>,
}

impl CompositeSignal {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        detector_type: DetectorType,
        direction: Direction,
        trade_style: TradeStyle,
        score: f64,
        grade: Grade,
        plan: TradePlan,
        factor_scores: Vec<FactorScore>,
    ) -> Self {
        let symbol = symbol.into();
        let created_at = Utc::now();
        let id = format!(
            "{}-{}-{}",
            symbol,
            detector_type.as_str(),
            created_at.timestamp_millis()
        );
        Self {
            id,
            symbol,
            detector_type,
            direction,
            trade_style,
            score,
            grade,
            entry: plan.entry,
            stop: plan.stop,
            target: plan.target,
            risk_reward: plan.risk_reward(),
            factor_scores,
            status: SignalStatus::Active,
            created_at,
        }
    }

    /// Copy with a new status. The caller uses this for its expiry pass;
    /// the original value stays untouched.
    pub fn with_status(mut self, status: SignalStatus) -> Self {
        self.status = status;
        self
    }
}

//! The evaluator: runs every applicable detector for a snapshot and emits
//! graded composite signals.
//!
//! One evaluation is a synchronous, pure computation; the registry and the
//! active profile are read-only throughout, so the same evaluator may be
//! used concurrently for many symbols.

use crate::detectors::{Detector, DetectorRegistry};
use crate::models::features::FeatureSnapshot;
use crate::models::profile::ParameterProfile;
use crate::models::signal::CompositeSignal;
use crate::signals::grading;
use crate::signals::scoring::{self, ScoreBreakdown};

/// Host-supplied predicate deciding whether any detector should run at all
/// for this snapshot (market-hours gate and the like).
pub type RunGate<'a> = &'a (dyn Fn(&FeatureSnapshot) -> bool + Sync);

/// Why a detector pass produced no signal, kept for the explain surface.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    OutOfScope,
    RunGateBlocked,
    DisabledByProfile,
    GateFailed,
    BelowThreshold { score: f64, min_score: f64 },
    NoTradePlan,
    Emitted { score: f64 },
}

pub struct Evaluator {
    registry: DetectorRegistry,
}

impl Evaluator {
    pub fn new(registry: DetectorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    /// Evaluate every registered detector against one snapshot under one
    /// active profile. Returns the emitted signals in registry order;
    /// an empty vector is the expected common case, not an error.
    pub fn evaluate(
        &self,
        snapshot: &FeatureSnapshot,
        profile: &ParameterProfile,
        run_gate: RunGate<'_>,
    ) -> Vec<CompositeSignal> {
        self.evaluate_explain(snapshot, profile, run_gate)
            .into_iter()
            .filter_map(|evaluation| evaluation.signal)
            .collect()
    }

    /// Like `evaluate`, but keeps the per-detector trace alongside any
    /// emitted signal.
    pub fn evaluate_explain(
        &self,
        snapshot: &FeatureSnapshot,
        profile: &ParameterProfile,
        run_gate: RunGate<'_>,
    ) -> Vec<ExplainedPass> {
        let host_clear = run_gate(snapshot);
        self.registry
            .detectors()
            .iter()
            .map(|detector| self.run_detector(detector, snapshot, profile, host_clear))
            .collect()
    }

    fn run_detector(
        &self,
        detector: &Detector,
        snapshot: &FeatureSnapshot,
        profile: &ParameterProfile,
        host_clear: bool,
    ) -> ExplainedPass {
        let detector_type = detector.detector_type;
        let symbol = snapshot.symbol();

        if !detector.in_scope(snapshot) {
            tracing::trace!(symbol, detector = detector_type.as_str(), "out of scope");
            return ExplainedPass::skipped(detector_type, PassOutcome::OutOfScope);
        }
        if !host_clear {
            tracing::trace!(symbol, detector = detector_type.as_str(), "run gate blocked");
            return ExplainedPass::skipped(detector_type, PassOutcome::RunGateBlocked);
        }
        if !profile.is_detector_enabled(detector_type) {
            tracing::trace!(
                symbol,
                detector = detector_type.as_str(),
                profile = %profile.name,
                "disabled by profile"
            );
            return ExplainedPass::skipped(detector_type, PassOutcome::DisabledByProfile);
        }
        if !detector.gate(snapshot, profile) {
            tracing::trace!(symbol, detector = detector_type.as_str(), "gate failed");
            return ExplainedPass::skipped(detector_type, PassOutcome::GateFailed);
        }

        let breakdown = scoring::weighted_score(&detector.factors, snapshot, profile);
        let min_score = profile.detector_min_score(detector_type, detector.trade_style);
        if breakdown.total < min_score {
            tracing::debug!(
                symbol,
                detector = detector_type.as_str(),
                score = breakdown.total,
                min_score,
                "below threshold"
            );
            return ExplainedPass {
                detector_type,
                outcome: PassOutcome::BelowThreshold {
                    score: breakdown.total,
                    min_score,
                },
                breakdown: Some(breakdown),
                signal: None,
            };
        }

        let plan = match detector.plan(snapshot, profile) {
            Some(plan) => plan,
            None => {
                // Gate passed but a plan input went missing; treat it like
                // any other insufficient-data case and emit nothing.
                tracing::debug!(
                    symbol,
                    detector = detector_type.as_str(),
                    "gate passed but trade plan inputs were absent"
                );
                return ExplainedPass {
                    detector_type,
                    outcome: PassOutcome::NoTradePlan,
                    breakdown: Some(breakdown),
                    signal: None,
                };
            }
        };

        let score = breakdown.total;
        let signal = CompositeSignal::new(
            symbol,
            detector_type,
            detector.direction,
            detector.trade_style,
            score,
            grading::grade(score),
            plan,
            breakdown.factor_scores.clone(),
        );
        tracing::debug!(
            symbol,
            detector = detector_type.as_str(),
            score,
            grade = %signal.grade,
            "signal emitted"
        );
        ExplainedPass {
            detector_type,
            outcome: PassOutcome::Emitted { score },
            breakdown: Some(breakdown),
            signal: Some(signal),
        }
    }
}

/// One detector pass: outcome, optional breakdown, optional signal.
#[derive(Debug)]
pub struct ExplainedPass {
    pub detector_type: crate::detectors::DetectorType,
    pub outcome: PassOutcome,
    pub breakdown: Option<ScoreBreakdown>,
    pub signal: Option<CompositeSignal>,
}

impl ExplainedPass {
    fn skipped(detector_type: crate::detectors::DetectorType, outcome: PassOutcome) -> Self {
        Self {
            detector_type,
            outcome,
            breakdown: None,
            signal: None,
        }
    }
}

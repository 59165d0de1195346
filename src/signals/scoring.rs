//! Weighted score aggregation.

use crate::detectors::ScoreFactor;
use crate::models::features::FeatureSnapshot;
use crate::models::profile::ParameterProfile;
use crate::models::signal::FactorScore;

/// A detector's final score plus its per-factor breakdown.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub factor_scores: Vec<FactorScore>,
}

/// Weighted sum over a detector's factors. Factor outputs are taken as-is
/// (each factor clips its own range); only the final total is clamped to
/// [0, 100], so weight sets above 1.0 act as bonus headroom rather than
/// overflowing the scale.
pub fn weighted_score(
    factors: &[ScoreFactor],
    snapshot: &FeatureSnapshot,
    profile: &ParameterProfile,
) -> ScoreBreakdown {
    let mut factor_scores = Vec::with_capacity(factors.len());
    let mut total = 0.0;
    for factor in factors {
        let score = factor.evaluate(snapshot, profile);
        total += factor.weight * score;
        factor_scores.push(FactorScore {
            name: factor.name.to_string(),
            weight: factor.weight,
            score,
        });
    }
    ScoreBreakdown {
        total: total.clamp(0.0, 100.0),
        factor_scores,
    }
}

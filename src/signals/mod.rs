//! Signal evaluation: scoring, grading, and the detector evaluator.

pub mod engine;
pub mod grading;
pub mod scoring;

pub use engine::{Evaluator, ExplainedPass, PassOutcome};
pub use grading::{grade, Grade, GradeBucket, SizingLabel};
pub use scoring::{weighted_score, ScoreBreakdown};

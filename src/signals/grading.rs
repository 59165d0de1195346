//! Score grading: a pure lookup against ordered breakpoints.

use serde::{Deserialize, Serialize};

/// Six tiers, strongest first. A score equal to a breakpoint takes the
/// higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    A,
    BPlus,
    B,
    C,
    D,
}

/// Three display buckets the six tiers collapse into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeBucket {
    A,
    B,
    C,
}

/// Human-facing position-sizing guidance per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingLabel {
    FullSize,
    Reduced,
    Skip,
}

const BREAKPOINTS: [(f64, Grade); 5] = [
    (92.0, Grade::APlus),
    (85.0, Grade::A),
    (75.0, Grade::BPlus),
    (65.0, Grade::B),
    (50.0, Grade::C),
];

/// Map a final score to its tier. Boundary scores round toward the better
/// tier (a score of exactly 92.0 grades A+).
pub fn grade(score: f64) -> Grade {
    for (breakpoint, tier) in BREAKPOINTS {
        if score >= breakpoint {
            return tier;
        }
    }
    Grade::D
}

impl Grade {
    pub fn bucket(&self) -> GradeBucket {
        match self {
            Grade::APlus | Grade::A => GradeBucket::A,
            Grade::BPlus | Grade::B => GradeBucket::B,
            Grade::C | Grade::D => GradeBucket::C,
        }
    }

    pub fn sizing(&self) -> SizingLabel {
        match self {
            Grade::APlus | Grade::A => SizingLabel::FullSize,
            Grade::BPlus | Grade::B => SizingLabel::Reduced,
            Grade::C | Grade::D => SizingLabel::Skip,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Technical-analysis primitives feeding the score factors.
//!
//! All of these are total functions: missing or malformed input yields the
//! most conservative reading (chop, not detected, empty confluence), never
//! an error.

pub mod confluence;
pub mod patience;
pub mod trend;

pub use confluence::{ConfluenceReading, LevelHit};
pub use patience::PatienceReading;
pub use trend::{TrendReading, TrendRegime};

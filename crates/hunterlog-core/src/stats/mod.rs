//! Derived analytics over the metrics history: windowed success rates,
//! streak state, and trend direction. Everything here is a pure read.

mod aggregate;
mod streak;
mod trend;

pub use aggregate::{domain_success_rate, success_rate};
pub use streak::{StreakEvaluator, StreakState};
pub use trend::{Trend, TrendAnalyzer};

//! Per-day metrics: the foundational data the analytics derive from.

mod model;
mod store;

pub use model::{percent, DailyMetric, DaySummary, DomainSlice};
pub use store::MetricsStore;

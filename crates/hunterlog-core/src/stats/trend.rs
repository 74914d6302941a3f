//! Trend classification over a trailing window of daily success rates.
//!
//! The window splits into two halves (the second half takes the extra
//! element when the count is odd) and their arithmetic means are compared.
//! A deadzone keeps small samples from flipping between up and down on
//! noise.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Recent trajectory of daily success rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };
        f.write_str(label)
    }
}

/// Classifies trend direction from daily rates.
#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer {
    /// Mean difference (percentage points) within which the trend reads
    /// as stable.
    pub deadzone: f64,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self { deadzone: 5.0 }
    }
}

impl TrendAnalyzer {
    pub fn new(deadzone: f64) -> Self {
        Self { deadzone }
    }

    /// Classify the trajectory of the given rates, oldest first.
    ///
    /// Fewer than 2 samples always yields `Stable`.
    pub fn classify(&self, rates: &[u8]) -> Trend {
        if rates.len() < 2 {
            return Trend::Stable;
        }

        let (first, second) = rates.split_at(rates.len() / 2);
        let delta = mean(second) - mean(first);

        if delta > self.deadzone {
            Trend::Up
        } else if delta < -self.deadzone {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

fn mean(rates: &[u8]) -> f64 {
    let sum: u32 = rates.iter().map(|&r| r as u32).sum();
    sum as f64 / rates.len() as f64
}

//! Life domains and the hunter rank ladder.
//!
//! Habits and quests are bucketed into six fixed life domains. Experience
//! accumulated per domain (and globally) maps onto a rank ladder from E up
//! to S; ranks and progress percentages are pure derivations of XP and are
//! never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six fixed life domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Physical,
    Mental,
    Emotional,
    Social,
    Financial,
    Spiritual,
}

impl Domain {
    /// All domains, in display order.
    pub const ALL: [Domain; 6] = [
        Domain::Physical,
        Domain::Mental,
        Domain::Emotional,
        Domain::Social,
        Domain::Financial,
        Domain::Spiritual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Physical => "physical",
            Domain::Mental => "mental",
            Domain::Emotional => "emotional",
            Domain::Social => "social",
            Domain::Financial => "financial",
            Domain::Spiritual => "spiritual",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(Domain::Physical),
            "mental" => Ok(Domain::Mental),
            "emotional" => Ok(Domain::Emotional),
            "social" => Ok(Domain::Social),
            "financial" => Ok(Domain::Financial),
            "spiritual" => Ok(Domain::Spiritual),
            other => Err(format!("unknown domain: '{other}'")),
        }
    }
}

/// Hunter rank tier, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// XP required to enter this rank.
    pub fn min_xp(&self) -> u64 {
        match self {
            Rank::E => 0,
            Rank::D => 100,
            Rank::C => 300,
            Rank::B => 700,
            Rank::A => 1500,
            Rank::S => 3000,
        }
    }

    /// The rank reached at the given XP total.
    pub fn for_xp(xp: u64) -> Rank {
        match xp {
            0..=99 => Rank::E,
            100..=299 => Rank::D,
            300..=699 => Rank::C,
            700..=1499 => Rank::B,
            1500..=2999 => Rank::A,
            _ => Rank::S,
        }
    }

    /// The next rank up, or `None` at S.
    pub fn next(&self) -> Option<Rank> {
        match self {
            Rank::E => Some(Rank::D),
            Rank::D => Some(Rank::C),
            Rank::C => Some(Rank::B),
            Rank::B => Some(Rank::A),
            Rank::A => Some(Rank::S),
            Rank::S => None,
        }
    }

    /// Display label, e.g. "C-Rank".
    pub fn label(&self) -> &'static str {
        match self {
            Rank::E => "E-Rank",
            Rank::D => "D-Rank",
            Rank::C => "C-Rank",
            Rank::B => "B-Rank",
            Rank::A => "A-Rank",
            Rank::S => "S-Rank",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Integer percentage of progress from the current rank toward the next.
///
/// 100 once S rank is reached.
pub fn rank_progress(xp: u64) -> u8 {
    let rank = Rank::for_xp(xp);
    let Some(next) = rank.next() else {
        return 100;
    };
    let floor = rank.min_xp();
    let span = next.min_xp() - floor;
    (((xp - floor) as f64 / span as f64) * 100.0).round() as u8
}

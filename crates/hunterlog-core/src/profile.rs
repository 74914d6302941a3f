//! Hunter profile: global and per-domain experience totals.
//!
//! The profile is shared read-side state for every display surface. The
//! completion tracker is the sole writer; the XP mutators are
//! crate-private so no other consumer can touch them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{rank_progress, Domain, Rank};
use crate::error::StoreError;
use crate::storage::KvStore;

const PROFILE_KEY: &str = "profile";

/// Accumulated experience, global and per domain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    total_xp: u64,
    #[serde(default)]
    domains: BTreeMap<Domain, u64>,
}

/// Derived progress for one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainProgress {
    pub domain: Domain,
    pub xp: u64,
    pub rank: Rank,
    /// Integer percentage toward the next rank.
    pub progress: u8,
}

/// Full derived view of the profile, for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub total_xp: u64,
    pub rank: Rank,
    pub progress: u8,
    pub domains: Vec<DomainProgress>,
}

impl Profile {
    /// Load the profile from the key-value store, falling back to a fresh
    /// profile when the record is absent or malformed.
    pub fn load(kv: &dyn KvStore) -> Result<Self, StoreError> {
        let Some(value) = kv.get(PROFILE_KEY)? else {
            return Ok(Self::default());
        };
        Ok(serde_json::from_str(&value).unwrap_or_default())
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn domain_xp(&self, domain: Domain) -> u64 {
        self.domains.get(&domain).copied().unwrap_or(0)
    }

    pub fn rank(&self) -> Rank {
        Rank::for_xp(self.total_xp)
    }

    /// Derived ranks and progress for every domain, in display order.
    pub fn report(&self) -> ProfileReport {
        let domains = Domain::ALL
            .iter()
            .map(|&domain| {
                let xp = self.domain_xp(domain);
                DomainProgress {
                    domain,
                    xp,
                    rank: Rank::for_xp(xp),
                    progress: rank_progress(xp),
                }
            })
            .collect();
        ProfileReport {
            total_xp: self.total_xp,
            rank: self.rank(),
            progress: rank_progress(self.total_xp),
            domains,
        }
    }

    /// Award XP to a domain and the global total.
    pub(crate) fn award(&mut self, domain: Domain, xp: u64) {
        self.total_xp += xp;
        *self.domains.entry(domain).or_insert(0) += xp;
    }

    /// Take back awarded XP, flooring both totals at 0.
    pub(crate) fn revoke(&mut self, domain: Domain, xp: u64) {
        self.total_xp = self.total_xp.saturating_sub(xp);
        if let Some(domain_xp) = self.domains.get_mut(&domain) {
            *domain_xp = domain_xp.saturating_sub(xp);
        }
    }

    /// Key-value entry for the profile record.
    pub(crate) fn entry(&self) -> Result<(String, String), StoreError> {
        Ok((PROFILE_KEY.to_string(), serde_json::to_string(self)?))
    }
}

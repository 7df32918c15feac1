pub mod exclude_last;
pub mod shuffled_cycle;

pub use exclude_last::ExcludeLast;
pub use shuffled_cycle::ShuffledCycle;

use crate::catalog::Catalog;
use crate::constants::{self, CYCLE_POLICY, EXCLUDE_LAST_POLICY};
use crate::error::{PickerError, Result};
use crate::types::{FilterKey, RestaurantRecord};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Strategy for choosing the next restaurant out of a candidate set
pub trait SelectionPolicy: Send {
    fn name(&self) -> &'static str;

    /// Choose one record. Returns `None` only for an empty candidate set, in
    /// which case no internal state may change.
    fn select(
        &mut self,
        filter: &FilterKey,
        candidates: &[&RestaurantRecord],
        rng: &mut dyn RngCore,
    ) -> Option<RestaurantRecord>;

    /// Forget everything picked so far
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PolicyKind {
    #[default]
    Cycle,
    ExcludeLast,
}

impl PolicyKind {
    pub fn build(self) -> Box<dyn SelectionPolicy> {
        match self {
            PolicyKind::Cycle => Box::new(ShuffledCycle::new()),
            PolicyKind::ExcludeLast => Box::new(ExcludeLast::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::Cycle => CYCLE_POLICY,
            PolicyKind::ExcludeLast => EXCLUDE_LAST_POLICY,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        match constants::policy_alias_to_canonical(s).as_str() {
            CYCLE_POLICY => Ok(PolicyKind::Cycle),
            EXCLUDE_LAST_POLICY => Ok(PolicyKind::ExcludeLast),
            _ => Err(PickerError::UnknownPolicy(format!(
                "'{}' (expected one of: {})",
                s,
                constants::get_supported_policies().join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = PickerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Everything one user session needs: the loaded catalog, the active policy
/// and the random source feeding it.
pub struct PickerSession {
    catalog: Catalog,
    policy: Box<dyn SelectionPolicy>,
    rng: StdRng,
}

impl PickerSession {
    /// A seed makes every shuffle and draw reproducible
    pub fn new(catalog: Catalog, kind: PolicyKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_policy(catalog, kind.build(), rng)
    }

    pub fn with_policy(catalog: Catalog, policy: Box<dyn SelectionPolicy>, rng: StdRng) -> Self {
        info!(
            "Session started with {} restaurants using '{}' policy",
            catalog.len(),
            policy.name()
        );
        Self {
            catalog,
            policy,
            rng,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cuisines(&self) -> &BTreeSet<String> {
        self.catalog.cuisines()
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Pick the next restaurant for a filter
    pub fn pick(&mut self, filter: &FilterKey) -> Result<RestaurantRecord> {
        let candidates = self.catalog.candidates(filter);
        if candidates.is_empty() {
            warn!("No candidates for filter '{}'", filter);
            return Err(PickerError::EmptyCandidateSet {
                filter: filter.to_string(),
            });
        }

        let picked = self
            .policy
            .select(filter, &candidates, &mut self.rng)
            .ok_or_else(|| PickerError::EmptyCandidateSet {
                filter: filter.to_string(),
            })?;
        debug!("Picked '{}' ({}) for filter '{}'", picked.name, picked.cuisine, filter);
        Ok(picked)
    }

    /// Uniform draw over the known cuisines, independent of any pick history
    pub fn pick_random_cuisine(&mut self) -> Result<String> {
        self.catalog
            .cuisines()
            .iter()
            .choose(&mut self.rng)
            .cloned()
            .ok_or(PickerError::NoCuisines)
    }

    /// Swap in a freshly loaded catalog and start selection over
    pub fn reload(&mut self, catalog: Catalog) {
        info!(
            "Reloading catalog: {} -> {} restaurants",
            self.catalog.len(),
            catalog.len()
        );
        self.catalog = catalog;
        self.policy.reset();
    }
}

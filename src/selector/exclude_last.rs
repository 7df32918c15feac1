use super::SelectionPolicy;
use crate::constants::EXCLUDE_LAST_POLICY;
use crate::types::{FilterKey, RestaurantRecord};
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

/// Uniform pick that never repeats the previous restaurant by name.
///
/// The last pick is shared by every filter: after picking "A" under "all",
/// a "Thai" pick still skips "A" if it is a Thai restaurant.
#[derive(Debug, Default)]
pub struct ExcludeLast {
    last_pick: Option<RestaurantRecord>,
}

impl ExcludeLast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_pick(&self) -> Option<&RestaurantRecord> {
        self.last_pick.as_ref()
    }
}

impl SelectionPolicy for ExcludeLast {
    fn name(&self) -> &'static str {
        EXCLUDE_LAST_POLICY
    }

    fn select(
        &mut self,
        filter: &FilterKey,
        candidates: &[&RestaurantRecord],
        rng: &mut dyn RngCore,
    ) -> Option<RestaurantRecord> {
        let available: Vec<&RestaurantRecord> = match &self.last_pick {
            Some(last) if candidates.len() > 1 => candidates
                .iter()
                .copied()
                .filter(|r| !r.same_restaurant(last))
                .collect(),
            _ => Vec::new(),
        };

        // Every candidate shares the last pick's name; nothing to exclude in favour of
        let pool = if available.is_empty() {
            candidates
        } else {
            available.as_slice()
        };

        let chosen = pool.choose(rng).map(|r| (*r).clone())?;
        debug!(
            "Picked '{}' from {} of {} candidates for filter '{}'",
            chosen.name,
            pool.len(),
            candidates.len(),
            filter
        );
        self.last_pick = Some(chosen.clone());
        Some(chosen)
    }

    fn reset(&mut self) {
        self.last_pick = None;
    }
}

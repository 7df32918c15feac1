use super::SelectionPolicy;
use crate::constants::CYCLE_POLICY;
use crate::types::{FilterKey, RestaurantRecord};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashMap;
use tracing::debug;

/// One pass through a shuffled candidate list
#[derive(Debug, Default)]
struct Cycle {
    order: Vec<RestaurantRecord>,
    cursor: usize,
}

impl Cycle {
    fn is_exhausted(&self) -> bool {
        self.cursor >= self.order.len()
    }
}

/// Walks a freshly shuffled copy of the candidates, one cycle per filter.
///
/// Every candidate comes up exactly once per cycle; when the cursor runs off the
/// end the list is reshuffled. Cycles are kept separately for each filter, so
/// switching from "Thai" to "all" and back resumes the Thai cycle where it was.
#[derive(Debug, Default)]
pub struct ShuffledCycle {
    cycles: HashMap<FilterKey, Cycle>,
}

impl ShuffledCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks left in the current cycle for a filter, if one has started
    pub fn remaining(&self, filter: &FilterKey) -> Option<usize> {
        self.cycles
            .get(filter)
            .map(|c| c.order.len().saturating_sub(c.cursor))
    }
}

impl SelectionPolicy for ShuffledCycle {
    fn name(&self) -> &'static str {
        CYCLE_POLICY
    }

    fn select(
        &mut self,
        filter: &FilterKey,
        candidates: &[&RestaurantRecord],
        rng: &mut dyn RngCore,
    ) -> Option<RestaurantRecord> {
        if candidates.is_empty() {
            return None;
        }

        let cycle = self.cycles.entry(filter.clone()).or_default();
        if cycle.is_exhausted() {
            let mut order: Vec<RestaurantRecord> =
                candidates.iter().map(|r| (*r).clone()).collect();
            // Fisher-Yates: i from the end down to 1, swap with j in 0..=i
            order.shuffle(rng);
            debug!("Reshuffled {} candidates for filter '{}'", order.len(), filter);
            cycle.order = order;
            cycle.cursor = 0;
        }

        let picked = cycle.order.get(cycle.cursor).cloned();
        cycle.cursor += 1;
        picked
    }

    fn reset(&mut self) {
        self.cycles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn records(names: &[&str]) -> Vec<RestaurantRecord> {
        names
            .iter()
            .map(|n| RestaurantRecord::new(*n, "Thai"))
            .collect()
    }

    #[test]
    fn full_cycle_is_a_permutation() {
        let pool = records(&["A", "B", "C", "D", "E"]);
        let candidates: Vec<&RestaurantRecord> = pool.iter().collect();
        let filter = FilterKey::cuisine("Thai");

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut policy = ShuffledCycle::new();
            let mut seen = HashSet::new();
            for _ in 0..pool.len() {
                let picked = policy.select(&filter, &candidates, &mut rng).unwrap();
                assert!(seen.insert(picked.name), "repeat within a cycle");
            }
            assert_eq!(seen.len(), pool.len());
            assert_eq!(policy.remaining(&filter), Some(0));
        }
    }

    #[test]
    fn exhausted_cycle_starts_over() {
        let pool = records(&["A", "B"]);
        let candidates: Vec<&RestaurantRecord> = pool.iter().collect();
        let filter = FilterKey::cuisine("Thai");
        let mut rng = StdRng::seed_from_u64(7);
        let mut policy = ShuffledCycle::new();

        policy.select(&filter, &candidates, &mut rng).unwrap();
        policy.select(&filter, &candidates, &mut rng).unwrap();
        policy.select(&filter, &candidates, &mut rng).unwrap();
        assert_eq!(policy.remaining(&filter), Some(1));
    }

    #[test]
    fn single_candidate_always_returned() {
        let pool = records(&["Only"]);
        let candidates: Vec<&RestaurantRecord> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let mut policy = ShuffledCycle::new();

        for _ in 0..10 {
            let picked = policy
                .select(&FilterKey::All, &candidates, &mut rng)
                .unwrap();
            assert_eq!(picked.name, "Only");
        }
    }

    #[test]
    fn empty_candidates_leave_no_state() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut policy = ShuffledCycle::new();
        let filter = FilterKey::cuisine("French");

        assert!(policy.select(&filter, &[], &mut rng).is_none());
        assert_eq!(policy.remaining(&filter), None);
    }

    #[test]
    fn reset_drops_every_cycle() {
        let pool = records(&["A", "B", "C"]);
        let candidates: Vec<&RestaurantRecord> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        let mut policy = ShuffledCycle::new();

        policy.select(&FilterKey::All, &candidates, &mut rng).unwrap();
        assert_eq!(policy.remaining(&FilterKey::All), Some(2));
        policy.reset();
        assert_eq!(policy.remaining(&FilterKey::All), None);
    }
}

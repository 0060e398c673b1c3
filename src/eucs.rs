use crate::item::Utility;
use fnv::FnvHashMap;

/// Estimated Utility Co-occurrence Structure. For each pair of candidate
/// items occurring together, the total utility of the transactions
/// containing both. Stored once per pair, under the lower ranked item.
pub struct EucsTable {
    rows: Vec<FnvHashMap<u32, Utility>>,
}

impl EucsTable {
    pub fn new(num_items: usize) -> EucsTable {
        EucsTable {
            rows: vec![FnvHashMap::default(); num_items],
        }
    }

    pub fn add(&mut self, lower: u32, higher: u32, transaction_utility: Utility) {
        debug_assert!(lower < higher);
        *self.rows[lower as usize].entry(higher).or_insert(0) += transaction_utility;
    }

    pub fn get(&self, lower: u32, higher: u32) -> Option<Utility> {
        self.rows
            .get(lower as usize)
            .and_then(|row| row.get(&higher))
            .cloned()
    }

    // A pair that never co-occurs is pruned the same as one whose bound is
    // below the threshold.
    pub fn allows(&self, lower: u32, higher: u32, min_utility: Utility) -> bool {
        match self.get(lower, higher) {
            Some(utility) => utility >= min_utility,
            None => false,
        }
    }

    pub fn num_pairs(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }
}

use crate::error::{Error, Result};
use crate::index::UtilityIndex;
use crate::item::Utility;
use crate::search::{Prefix, Search};
use crate::sink::{HighUtilityItemset, ResultSink};
use crate::stats::{MemorySampler, MiningStats};
use crate::transaction::TransactionSource;
use crate::twu::{ItemOrder, TwuTable};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

pub static DEFAULT_MAX_ITEMSET_LENGTH: usize = 200;

/// FHM: mines every itemset whose utility is at least `min_utility`, from
/// two scans of the database.
pub struct Miner {
    min_utility: Utility,
    max_itemset_length: usize,
    parallel: bool,
}

impl Miner {
    pub fn new(min_utility: Utility) -> Miner {
        Miner {
            min_utility,
            max_itemset_length: DEFAULT_MAX_ITEMSET_LENGTH,
            parallel: false,
        }
    }

    pub fn with_max_itemset_length(mut self, max_itemset_length: usize) -> Miner {
        self.max_itemset_length = max_itemset_length;
        self
    }

    // Explores the subtree of each top-level item as a separate rayon task.
    pub fn parallel(mut self, parallel: bool) -> Miner {
        self.parallel = parallel;
        self
    }

    pub fn mine<S, R>(&self, source: &S, sink: &mut R) -> Result<MiningStats>
    where
        S: TransactionSource + ?Sized,
        R: ResultSink + ?Sized,
    {
        if self.max_itemset_length == 0 {
            return Err(Error::InvalidArgument(String::from(
                "maximum itemset length must be at least 1",
            )));
        }
        let start = Instant::now();
        let mut memory = MemorySampler::new();

        info!("Making first pass of dataset to calculate item TWUs...");
        let timer = Instant::now();
        let twu = TwuTable::from_transactions(source.transactions()?)?;
        let order = ItemOrder::new(&twu, self.min_utility);
        info!(
            "First pass took {} ms; {} of {} items have TWU >= {}.",
            timer.elapsed().as_millis(),
            order.len(),
            twu.num_items(),
            self.min_utility
        );
        if !order.is_empty() {
            debug!(
                lowest = order.twu_of(0),
                highest = order.twu_of(order.len() as u32 - 1),
                "candidate item TWU range"
            );
        }

        info!("Making second pass to build utility lists and EUCS...");
        let timer = Instant::now();
        let index = UtilityIndex::build(source.transactions()?, &order)?;
        debug!(
            transactions = index.transaction_count(),
            eucs_pairs = index.eucs().num_pairs(),
            "built utility index"
        );
        info!("Second pass took {} ms.", timer.elapsed().as_millis());
        memory.sample();

        info!("Starting recursive search...");
        let timer = Instant::now();
        let (lists, eucs) = index.into_parts();
        let mut stats = if self.parallel {
            let branches: Vec<(MiningStats, Vec<HighUtilityItemset>)> = (0..lists.len())
                .into_par_iter()
                .map(|i| -> Result<(MiningStats, Vec<HighUtilityItemset>)> {
                    let mut search = Search::new(self.min_utility, &eucs, &order);
                    let mut prefix = Prefix::new(self.max_itemset_length);
                    let mut found: Vec<HighUtilityItemset> = vec![];
                    search.explore(&mut prefix, None, &lists, i, &mut found)?;
                    Ok((search.into_stats(), found))
                })
                .collect::<Result<Vec<_>>>()?;
            let mut stats = MiningStats::default();
            for (branch_stats, found) in branches {
                stats.merge(&branch_stats);
                for hui in found {
                    sink.emit(&hui.items, hui.utility)?;
                }
            }
            stats
        } else {
            let mut search = Search::new(self.min_utility, &eucs, &order);
            let mut prefix = Prefix::new(self.max_itemset_length);
            search.search(&mut prefix, None, &lists, sink)?;
            search.into_stats()
        };
        info!(
            "Search found {} high utility itemsets in {} ms.",
            stats.hui_count,
            timer.elapsed().as_millis()
        );
        memory.sample();

        stats.prune_count += twu.num_items() - order.len();
        stats.transaction_count = twu.transaction_count();
        stats.total_transaction_utility = twu.total_utility();
        stats.runtime = start.elapsed();
        stats.peak_memory_mb = memory.peak_memory_mb();
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::Miner;
    use crate::error::Error;
    use crate::sink::{HighUtilityItemset, ItemsetWriter};
    use crate::test_support::{brute_force, database_strategy, example_database, hui, normalize};
    use crate::transaction::Transaction;
    use crate::transaction_reader::FileSource;
    use proptest::prelude::*;
    use std::fs;
    use std::io::Write;

    fn mine(db: &Vec<Transaction>, min_utility: i64) -> Vec<HighUtilityItemset> {
        let mut found: Vec<HighUtilityItemset> = vec![];
        Miner::new(min_utility).mine(db, &mut found).unwrap();
        normalize(&found)
    }

    #[test]
    fn test_example_database() {
        let expected = normalize(&[hui(&[3], 8), hui(&[1, 3], 14), hui(&[1, 2, 3], 9)]);
        assert_eq!(mine(&example_database(), 8), expected);
    }

    #[test]
    fn test_output_threshold_is_inclusive() {
        // {C} = 8 drops out, {A,B,C} = 9 stays.
        let expected = normalize(&[hui(&[1, 3], 14), hui(&[1, 2, 3], 9)]);
        assert_eq!(mine(&example_database(), 9), expected);
        assert_eq!(mine(&example_database(), 14), vec![hui(&[1, 3], 14)]);
        assert!(mine(&example_database(), 15).is_empty());
    }

    #[test]
    fn test_no_candidates() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let stats = Miner::new(100).mine(&example_database(), &mut found).unwrap();
        assert!(found.is_empty());
        assert_eq!(stats.hui_count, 0);
        assert_eq!(stats.candidate_count, 0);
        assert_eq!(stats.prune_count, 3);
        assert_eq!(stats.transaction_count, 3);
        assert_eq!(stats.total_transaction_utility, 18);
    }

    #[test]
    fn test_empty_database() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let stats = Miner::new(1).mine(&Vec::<Transaction>::new(), &mut found).unwrap();
        assert!(found.is_empty());
        assert_eq!(stats.transaction_count, 0);
    }

    #[test]
    fn test_stats() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let stats = Miner::new(8).mine(&example_database(), &mut found).unwrap();
        assert_eq!(stats.hui_count, 3);
        assert_eq!(stats.candidate_count, 4);
        assert_eq!(stats.prune_count, 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_stats_report_peak_memory() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let stats = Miner::new(8).mine(&example_database(), &mut found).unwrap();
        assert!(stats.peak_memory_mb > 0.0);
        assert!(stats.summary().contains("peak memory:"));
    }

    #[test]
    fn test_zero_max_itemset_length() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let result = Miner::new(8)
            .with_max_itemset_length(0)
            .mine(&example_database(), &mut found);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_max_itemset_length_overflow() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let result = Miner::new(8)
            .with_max_itemset_length(2)
            .mine(&example_database(), &mut found);
        assert!(matches!(result, Err(Error::PrefixOverflow { capacity: 2 })));

        let mut found: Vec<HighUtilityItemset> = vec![];
        let result = Miner::new(8)
            .with_max_itemset_length(2)
            .parallel(true)
            .mine(&example_database(), &mut found);
        assert!(matches!(result, Err(Error::PrefixOverflow { capacity: 2 })));
    }

    #[test]
    fn test_parallel_example() {
        let mut found: Vec<HighUtilityItemset> = vec![];
        let stats = Miner::new(8)
            .parallel(true)
            .mine(&example_database(), &mut found)
            .unwrap();
        // Branches are forwarded in top-level item order.
        assert_eq!(
            found,
            vec![hui(&[2, 1, 3], 9), hui(&[1, 3], 14), hui(&[3], 8)]
        );
        assert_eq!(stats.candidate_count, 4);
    }

    #[test]
    fn test_file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("db.txt");
        {
            let mut file = fs::File::create(&input).unwrap();
            writeln!(file, "1 2 3:9:5 1 3").unwrap();
            writeln!(file, "1 3:6:2 4").unwrap();
            writeln!(file, "2 3:3:2 1").unwrap();
        }
        let mut writer = ItemsetWriter::new(Vec::new());
        Miner::new(8)
            .mine(&FileSource::new(&input), &mut writer)
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text, "2 1 3 #UTIL: 9\n1 3 #UTIL: 14\n3 #UTIL: 8\n");
    }

    #[test]
    fn test_parse_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("db.txt");
        fs::write(&input, "1 2:3:1 2\n1 2:x:1 2\n").unwrap();
        let mut found: Vec<HighUtilityItemset> = vec![];
        let result = Miner::new(1).mine(&FileSource::new(&input), &mut found);
        assert!(matches!(result, Err(Error::Parse { line: 2, .. })));
    }

    proptest! {
        #[test]
        fn finds_exactly_the_high_utility_itemsets(
            db in database_strategy(6, 12),
            min_utility in 1i64..120,
        ) {
            prop_assert_eq!(mine(&db, min_utility), brute_force(&db, 6, min_utility));
        }

        #[test]
        fn parallel_matches_sequential(db in database_strategy(7, 12), min_utility in 1i64..150) {
            let mut sequential: Vec<HighUtilityItemset> = vec![];
            let a = Miner::new(min_utility).mine(&db, &mut sequential).unwrap();
            let mut parallel: Vec<HighUtilityItemset> = vec![];
            let b = Miner::new(min_utility).parallel(true).mine(&db, &mut parallel).unwrap();
            prop_assert_eq!(sequential, parallel);
            prop_assert_eq!(a.hui_count, b.hui_count);
            prop_assert_eq!(a.candidate_count, b.candidate_count);
            prop_assert_eq!(a.prune_count, b.prune_count);
        }
    }
}

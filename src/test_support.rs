use crate::item::{Item, Utility};
use crate::sink::HighUtilityItemset;
use crate::transaction::Transaction;
use itertools::Itertools;
use proptest::prelude::*;

// T0 = {A:5, B:1, C:3}, T1 = {A:2, C:4}, T2 = {B:2, C:1}, with A=1, B=2, C=3.
pub fn example_database() -> Vec<Transaction> {
    vec![
        Transaction::from_pairs(&[(1, 5), (2, 1), (3, 3)]),
        Transaction::from_pairs(&[(1, 2), (3, 4)]),
        Transaction::from_pairs(&[(2, 2), (3, 1)]),
    ]
}

pub fn hui(ids: &[u32], utility: Utility) -> HighUtilityItemset {
    HighUtilityItemset::new(ids.iter().map(|&id| Item::with_id(id)).collect(), utility)
}

fn contains_all(transaction: &Transaction, itemset: &[Item]) -> bool {
    itemset
        .iter()
        .all(|item| transaction.items.iter().any(|p| p.item == *item))
}

pub fn itemset_twu(db: &[Transaction], itemset: &[Item]) -> Utility {
    db.iter()
        .filter(|t| contains_all(t, itemset))
        .map(|t| t.utility)
        .sum()
}

// Utility of the itemset, and whether it occurs in any transaction.
pub fn itemset_utility(db: &[Transaction], itemset: &[Item]) -> (Utility, bool) {
    let mut utility = 0;
    let mut occurs = false;
    for t in db.iter().filter(|t| contains_all(t, itemset)) {
        occurs = true;
        utility += t
            .items
            .iter()
            .filter(|p| itemset.contains(&p.item))
            .map(|p| p.utility)
            .sum::<Utility>();
    }
    (utility, occurs)
}

// Every occurring itemset over items 0..num_items with utility >=
// min_utility, normalized and sorted.
pub fn brute_force(db: &[Transaction], num_items: u32, min_utility: Utility) -> Vec<HighUtilityItemset> {
    let mut result = vec![];
    for mask in 1u32..(1 << num_items) {
        let itemset: Vec<Item> = (0..num_items)
            .filter(|i| mask & (1 << i) != 0)
            .map(Item::with_id)
            .collect();
        let (utility, occurs) = itemset_utility(db, &itemset);
        if occurs && utility >= min_utility {
            result.push(HighUtilityItemset::new(itemset, utility));
        }
    }
    result.sort();
    result
}

// Items sorted by id, so that itemsets found in different orders compare
// equal.
pub fn normalize(found: &[HighUtilityItemset]) -> Vec<HighUtilityItemset> {
    let mut v: Vec<HighUtilityItemset> = found
        .iter()
        .map(|h| HighUtilityItemset::new(h.items.iter().cloned().sorted().collect(), h.utility))
        .collect();
    v.sort();
    v
}

// Databases over items 0..num_items with positive utilities.
pub fn database_strategy(
    num_items: u32,
    max_transactions: usize,
) -> impl Strategy<Value = Vec<Transaction>> {
    let transaction = prop::collection::btree_map(0..num_items, 1i64..20, 1..=num_items as usize)
        .prop_map(|items| {
            let pairs: Vec<(u32, Utility)> = items.into_iter().collect();
            Transaction::from_pairs(&pairs)
        });
    prop::collection::vec(transaction, 0..=max_transactions)
}

use crate::error::Result;
use crate::item::{Item, Utility};
use crate::transaction::Transaction;
use fnv::FnvHashMap;
use itertools::Itertools;

/// Transaction-weighted utilization of every item, from the first pass.
pub struct TwuTable {
    twu: FnvHashMap<Item, Utility>,
    transaction_count: usize,
    total_utility: Utility,
}

impl TwuTable {
    pub fn new() -> TwuTable {
        TwuTable {
            twu: FnvHashMap::default(),
            transaction_count: 0,
            total_utility: 0,
        }
    }

    pub fn from_transactions<I>(transactions: I) -> Result<TwuTable>
    where
        I: IntoIterator<Item = Result<Transaction>>,
    {
        let mut table = TwuTable::new();
        for transaction in transactions {
            table.add(&transaction?);
        }
        Ok(table)
    }

    pub fn add(&mut self, transaction: &Transaction) {
        self.transaction_count += 1;
        self.total_utility += transaction.utility;
        for pair in &transaction.items {
            *self.twu.entry(pair.item).or_insert(0) += transaction.utility;
        }
    }

    #[cfg(test)]
    pub fn get(&self, item: &Item) -> Option<Utility> {
        self.twu.get(item).cloned()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn total_utility(&self) -> Utility {
        self.total_utility
    }

    pub fn num_items(&self) -> usize {
        self.twu.len()
    }
}

/// The processing order of candidate items: ascending TWU, ties broken by
/// item id. Candidates are given dense ranks in that order, so comparing
/// ranks compares items under the order.
pub struct ItemOrder {
    items: Vec<Item>,
    twus: Vec<Utility>,
    ranks: FnvHashMap<Item, u32>,
}

impl ItemOrder {
    // Only items with twu >= min_utility are candidates; any superset of
    // another item has utility at most that item's TWU.
    pub fn new(twu: &TwuTable, min_utility: Utility) -> ItemOrder {
        let candidates: Vec<(Utility, Item)> = twu
            .twu
            .iter()
            .filter(|&(_, &u)| u >= min_utility)
            .map(|(&item, &u)| (u, item))
            .sorted()
            .collect();
        let mut ranks = FnvHashMap::default();
        for (rank, &(_, item)) in candidates.iter().enumerate() {
            ranks.insert(item, rank as u32);
        }
        ItemOrder {
            items: candidates.iter().map(|&(_, item)| item).collect(),
            twus: candidates.iter().map(|&(u, _)| u).collect(),
            ranks,
        }
    }

    pub fn rank_of(&self, item: &Item) -> Option<u32> {
        self.ranks.get(item).cloned()
    }

    pub fn item_of(&self, rank: u32) -> Item {
        self.items[rank as usize]
    }

    pub fn twu_of(&self, rank: u32) -> Utility {
        self.twus[rank as usize]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemOrder, TwuTable};
    use crate::item::Item;
    use crate::test_support::{database_strategy, example_database, itemset_twu};
    use crate::transaction::{Transaction, TransactionSource};
    use proptest::prelude::*;

    fn table(db: &Vec<Transaction>) -> TwuTable {
        TwuTable::from_transactions(db.transactions().unwrap()).unwrap()
    }

    #[test]
    fn test_example_twu() {
        let twu = table(&example_database());
        assert_eq!(twu.get(&Item::with_id(1)), Some(15));
        assert_eq!(twu.get(&Item::with_id(2)), Some(12));
        assert_eq!(twu.get(&Item::with_id(3)), Some(18));
        assert_eq!(twu.get(&Item::with_id(4)), None);
        assert_eq!(twu.transaction_count(), 3);
        assert_eq!(twu.total_utility(), 18);
        assert_eq!(twu.num_items(), 3);
    }

    #[test]
    fn test_order_is_ascending_twu() {
        let twu = table(&example_database());
        let order = ItemOrder::new(&twu, 8);
        let items: Vec<Item> = (0..order.len() as u32).map(|r| order.item_of(r)).collect();
        assert_eq!(
            items,
            vec![Item::with_id(2), Item::with_id(1), Item::with_id(3)]
        );
        assert_eq!(order.twu_of(0), 12);
        assert_eq!(order.rank_of(&Item::with_id(3)), Some(2));
    }

    #[test]
    fn test_candidate_threshold_is_inclusive() {
        let twu = table(&example_database());
        let order = ItemOrder::new(&twu, 12);
        assert_eq!(order.len(), 3);
        let order = ItemOrder::new(&twu, 13);
        assert_eq!(order.len(), 2);
        assert_eq!(order.rank_of(&Item::with_id(2)), None);
        assert!(ItemOrder::new(&twu, 19).is_empty());
    }

    #[test]
    fn test_ties_broken_by_item_id() {
        let db = vec![
            Transaction::from_pairs(&[(9, 1), (4, 1)]),
            Transaction::from_pairs(&[(7, 2)]),
        ];
        let order = ItemOrder::new(&table(&db), 0);
        let items: Vec<u32> = (0..3).map(|r| order.item_of(r).id()).collect();
        assert_eq!(items, vec![4, 7, 9]);
    }

    proptest! {
        #[test]
        fn twu_is_anti_monotone(db in database_strategy(6, 10), mask in 1u32..64, extra in 1u32..64) {
            let subset: Vec<Item> = (0..6).filter(|i| mask & (1 << i) != 0).map(Item::with_id).collect();
            let superset: Vec<Item> = (0..6)
                .filter(|i| (mask | extra) & (1 << i) != 0)
                .map(Item::with_id)
                .collect();
            prop_assert!(itemset_twu(&db, &superset) <= itemset_twu(&db, &subset));
        }

        #[test]
        fn item_twu_matches_definition(db in database_strategy(6, 10)) {
            let twu = table(&db);
            for id in 0..6 {
                let item = Item::with_id(id);
                let expected = itemset_twu(&db, &[item]);
                let occurs = db.iter().any(|t| t.items.iter().any(|p| p.item == item));
                prop_assert_eq!(twu.get(&item), if occurs { Some(expected) } else { None });
            }
        }
    }
}

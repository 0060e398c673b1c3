use crate::error::{Error, Result};
use crate::eucs::EucsTable;
use crate::item::{Tid, Utility};
use crate::transaction::Transaction;
use crate::twu::ItemOrder;
use crate::utility_list::{UtilityList, UtilityListElement};
use std::convert::TryFrom;

/// The second pass over the database: a utility list for every candidate
/// item, indexed by rank, and the EUCS over candidate pairs.
pub struct UtilityIndex {
    lists: Vec<UtilityList>,
    eucs: EucsTable,
    transaction_count: usize,
}

impl UtilityIndex {
    pub fn new(order: &ItemOrder) -> UtilityIndex {
        UtilityIndex {
            lists: (0..order.len() as u32).map(UtilityList::new).collect(),
            eucs: EucsTable::new(order.len()),
            transaction_count: 0,
        }
    }

    pub fn build<I>(transactions: I, order: &ItemOrder) -> Result<UtilityIndex>
    where
        I: IntoIterator<Item = Result<Transaction>>,
    {
        let mut index = UtilityIndex::new(order);
        for transaction in transactions {
            index.insert(&transaction?, order)?;
        }
        Ok(index)
    }

    pub fn insert(&mut self, transaction: &Transaction, order: &ItemOrder) -> Result<()> {
        let tid = Tid::try_from(self.transaction_count).map_err(|_| Error::TooManyTransactions {
            count: self.transaction_count,
        })?;
        self.transaction_count += 1;

        // Candidate items only, as (rank, utility), in item order.
        let mut ranked: Vec<(u32, Utility)> = transaction
            .items
            .iter()
            .filter_map(|p| order.rank_of(&p.item).map(|rank| (rank, p.utility)))
            .collect();
        ranked.sort_unstable_by_key(|&(rank, _)| rank);

        let mut remaining: Utility = ranked.iter().map(|&(_, u)| u).sum();
        for (i, &(rank, utility)) in ranked.iter().enumerate() {
            remaining -= utility;
            self.lists[rank as usize].push(UtilityListElement::new(tid, utility, remaining));
            for &(later, _) in &ranked[i + 1..] {
                self.eucs.add(rank, later, transaction.utility);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn lists(&self) -> &[UtilityList] {
        &self.lists
    }

    pub fn eucs(&self) -> &EucsTable {
        &self.eucs
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn into_parts(self) -> (Vec<UtilityList>, EucsTable) {
        (self.lists, self.eucs)
    }
}

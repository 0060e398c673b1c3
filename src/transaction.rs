use crate::error::{Error, Result};
use crate::item::{ItemUtility, Utility};
use std::iter;
use std::vec;

/// Items are sorted by id and unique; repeated items are merged by summing
/// their utilities.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    pub items: Vec<ItemUtility>,
    pub utility: Utility,
}

impl Transaction {
    // Uses a transaction utility supplied by the data source, which is
    // trusted as-is and not checked against the item utilities.
    pub fn with_utility(mut items: Vec<ItemUtility>, utility: Utility) -> Transaction {
        items.sort_by_key(|p| p.item);
        merge_sorted(&mut items);
        Transaction { items, utility }
    }
}

#[cfg(test)]
impl Transaction {
    // The transaction utility is the sum of the item utilities.
    pub fn new(items: Vec<ItemUtility>) -> Transaction {
        let utility = items.iter().map(|p| p.utility).sum();
        Transaction::with_utility(items, utility)
    }

    pub fn from_pairs(pairs: &[(u32, Utility)]) -> Transaction {
        use crate::item::Item;
        Transaction::new(
            pairs
                .iter()
                .map(|&(id, utility)| ItemUtility::new(Item::with_id(id), utility))
                .collect(),
        )
    }
}

fn merge_sorted(v: &mut Vec<ItemUtility>) {
    let mut k = 0;
    for i in 0..v.len() {
        if k > 0 && v[k - 1].item == v[i].item {
            v[k - 1].utility += v[i].utility;
        } else {
            v[k] = v[i];
            k += 1;
        }
    }
    v.truncate(k);
}

/// Something the miner can scan from the start, once per pass.
pub trait TransactionSource {
    type Transactions: Iterator<Item = Result<Transaction>>;

    fn transactions(&self) -> Result<Self::Transactions>;
}

type InMemory = iter::Map<vec::IntoIter<Transaction>, fn(Transaction) -> Result<Transaction>>;

impl TransactionSource for [Transaction] {
    type Transactions = InMemory;

    fn transactions(&self) -> Result<InMemory> {
        let ok: fn(Transaction) -> Result<Transaction> = Ok::<Transaction, Error>;
        Ok(self.to_vec().into_iter().map(ok))
    }
}

impl TransactionSource for Vec<Transaction> {
    type Transactions = InMemory;

    fn transactions(&self) -> Result<InMemory> {
        self.as_slice().transactions()
    }
}

use std::fmt;

/// Utility values (profit, weight...) may be negative for refunds.
pub type Utility = i64;

/// Transaction id, assigned in scan order starting at 0.
pub type Tid = u32;

#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn with_id(id: u32) -> Item {
        Item { id: id }
    }
    pub fn id(&self) -> u32 {
        self.id
    }
    pub fn item_vec_to_string(items: &[Item]) -> String {
        let a: Vec<String> = items.iter().map(|item| item.to_string()).collect();
        a.join(" ")
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ItemUtility {
    pub item: Item,
    pub utility: Utility,
}

impl ItemUtility {
    pub fn new(item: Item, utility: Utility) -> ItemUtility {
        ItemUtility { item, utility }
    }
}

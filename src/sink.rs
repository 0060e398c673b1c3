use crate::error::Result;
use crate::item::{Item, Utility};
use std::io::Write;

#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct HighUtilityItemset {
    pub items: Vec<Item>,
    pub utility: Utility,
}

impl HighUtilityItemset {
    pub fn new(items: Vec<Item>, utility: Utility) -> HighUtilityItemset {
        HighUtilityItemset { items, utility }
    }
}

/// Receives each high-utility itemset as it is found. `itemset` is only
/// valid for the duration of the call.
pub trait ResultSink {
    fn emit(&mut self, itemset: &[Item], utility: Utility) -> Result<()>;
}

impl ResultSink for Vec<HighUtilityItemset> {
    fn emit(&mut self, itemset: &[Item], utility: Utility) -> Result<()> {
        self.push(HighUtilityItemset::new(itemset.to_vec(), utility));
        Ok(())
    }
}

/// Writes itemsets in SPMF format, `1 3 #UTIL: 14`, one per line.
pub struct ItemsetWriter<W: Write> {
    output: W,
}

impl<W: Write> ItemsetWriter<W> {
    pub fn new(output: W) -> ItemsetWriter<W> {
        ItemsetWriter { output }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> ResultSink for ItemsetWriter<W> {
    fn emit(&mut self, itemset: &[Item], utility: Utility) -> Result<()> {
        writeln!(
            self.output,
            "{} #UTIL: {}",
            Item::item_vec_to_string(itemset),
            utility
        )?;
        Ok(())
    }
}

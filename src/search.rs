// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Error, Result};
use crate::eucs::EucsTable;
use crate::item::{Item, Utility};
use crate::sink::ResultSink;
use crate::stats::MiningStats;
use crate::twu::ItemOrder;
use crate::utility_list::UtilityList;
use tracing::trace;

/// The items (as ranks) on the path from the root of the search to the
/// current depth. Pushed before recursing and popped on return, so
/// siblings reuse the same slot.
pub struct Prefix {
    ranks: Vec<u32>,
    max_itemset_length: usize,
}

impl Prefix {
    pub fn new(max_itemset_length: usize) -> Prefix {
        Prefix {
            ranks: Vec::with_capacity(max_itemset_length),
            max_itemset_length,
        }
    }

    // Itemsets formed under the new prefix are one item longer than it,
    // and must fit in the maximum itemset length.
    pub fn push(&mut self, rank: u32) -> Result<()> {
        if self.len() + 2 > self.max_itemset_length {
            return Err(Error::PrefixOverflow {
                capacity: self.max_itemset_length,
            });
        }
        self.ranks.push(rank);
        Ok(())
    }

    pub fn pop(&mut self) {
        self.ranks.pop();
    }

    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }
}

/// Depth-first enumeration of high-utility itemsets over utility lists.
pub struct Search<'a> {
    min_utility: Utility,
    eucs: &'a EucsTable,
    order: &'a ItemOrder,
    stats: MiningStats,
    itemset: Vec<Item>,
}

impl<'a> Search<'a> {
    pub fn new(min_utility: Utility, eucs: &'a EucsTable, order: &'a ItemOrder) -> Search<'a> {
        Search {
            min_utility,
            eucs,
            order,
            stats: MiningStats::default(),
            itemset: vec![],
        }
    }

    #[cfg(test)]
    pub fn stats(&self) -> &MiningStats {
        &self.stats
    }

    pub fn into_stats(self) -> MiningStats {
        self.stats
    }

    // `extensions` holds the lists of prefix + {x} for each extension x, in
    // item order. `prefix_list` is the list of the prefix itself, None at
    // the root.
    pub fn search<R>(
        &mut self,
        prefix: &mut Prefix,
        prefix_list: Option<&UtilityList>,
        extensions: &[UtilityList],
        sink: &mut R,
    ) -> Result<()>
    where
        R: ResultSink + ?Sized,
    {
        for i in 0..extensions.len() {
            self.explore(prefix, prefix_list, extensions, i, sink)?;
        }
        Ok(())
    }

    // Handles the subtree of one extension. Subtrees of different
    // extensions share nothing but read-only state.
    pub fn explore<R>(
        &mut self,
        prefix: &mut Prefix,
        prefix_list: Option<&UtilityList>,
        extensions: &[UtilityList],
        i: usize,
        sink: &mut R,
    ) -> Result<()>
    where
        R: ResultSink + ?Sized,
    {
        let x = &extensions[i];
        if x.sum_iutils() >= self.min_utility {
            self.emit(prefix, x, sink)?;
        }

        // iutil + rutil bounds the utility of every extension of prefix + {x}.
        if x.sum_iutils() + x.sum_rutils() < self.min_utility {
            self.stats.prune_count += 1;
            return Ok(());
        }

        let mut joined: Vec<UtilityList> = vec![];
        for y in &extensions[i + 1..] {
            if !self.eucs.allows(x.rank(), y.rank(), self.min_utility) {
                self.stats.prune_count += 1;
                continue;
            }
            self.stats.candidate_count += 1;
            let xy = UtilityList::join(prefix_list, x, y);
            if !xy.is_empty() {
                joined.push(xy);
            }
        }
        if joined.is_empty() {
            return Ok(());
        }

        prefix.push(x.rank())?;
        let result = self.search(prefix, Some(x), &joined, sink);
        prefix.pop();
        result
    }

    fn emit<R>(&mut self, prefix: &Prefix, x: &UtilityList, sink: &mut R) -> Result<()>
    where
        R: ResultSink + ?Sized,
    {
        let order = self.order;
        self.itemset.clear();
        self.itemset
            .extend(prefix.ranks().iter().map(|&rank| order.item_of(rank)));
        self.itemset.push(order.item_of(x.rank()));
        self.stats.hui_count += 1;
        trace!(
            itemset = %Item::item_vec_to_string(&self.itemset),
            utility = x.sum_iutils(),
            "high utility itemset"
        );
        sink.emit(&self.itemset, x.sum_iutils())
    }
}

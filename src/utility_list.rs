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

use crate::item::{Tid, Utility};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct UtilityListElement {
    pub tid: Tid,
    // Utility of the itemset in the transaction.
    pub iutil: Utility,
    // Utility of the items ordered after the itemset in the transaction.
    pub rutil: Utility,
}

impl UtilityListElement {
    pub fn new(tid: Tid, iutil: Utility, rutil: Utility) -> UtilityListElement {
        UtilityListElement { tid, iutil, rutil }
    }
}

/// The transactions an itemset occurs in. `rank` is the itemset's last
/// item, the one it extends its prefix by. Elements are kept in strictly
/// ascending tid order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UtilityList {
    rank: u32,
    elements: Vec<UtilityListElement>,
    sum_iutils: Utility,
    sum_rutils: Utility,
}

impl UtilityList {
    pub fn new(rank: u32) -> UtilityList {
        UtilityList {
            rank,
            elements: vec![],
            sum_iutils: 0,
            sum_rutils: 0,
        }
    }

    pub fn push(&mut self, element: UtilityListElement) {
        debug_assert!(self.elements.last().map_or(true, |last| last.tid < element.tid));
        self.sum_iutils += element.iutil;
        self.sum_rutils += element.rutil;
        self.elements.push(element);
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[cfg(test)]
    pub fn elements(&self) -> &[UtilityListElement] {
        &self.elements
    }

    pub fn sum_iutils(&self) -> Utility {
        self.sum_iutils
    }

    pub fn sum_rutils(&self) -> Utility {
        self.sum_rutils
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn find(&self, tid: Tid) -> Option<&UtilityListElement> {
        self.elements
            .binary_search_by_key(&tid, |e| e.tid)
            .ok()
            .map(|index| &self.elements[index])
    }

    // Builds the list of prefix + {x, y} from the lists of prefix + {x} and
    // prefix + {y}, where y is ordered after x. `prefix` is None when the
    // prefix is empty and x and y are single items.
    pub fn join(
        prefix: Option<&UtilityList>,
        x: &UtilityList,
        y: &UtilityList,
    ) -> UtilityList {
        let mut xy = UtilityList::new(y.rank);
        for ex in &x.elements {
            let ey = match y.find(ex.tid) {
                Some(ey) => ey,
                None => continue,
            };
            let iutil = match prefix {
                None => ex.iutil + ey.iutil,
                Some(p) => match p.find(ex.tid) {
                    // Both ex and ey include the prefix's utility.
                    Some(e) => ex.iutil + ey.iutil - e.iutil,
                    None => continue,
                },
            };
            xy.push(UtilityListElement::new(ex.tid, iutil, ey.rutil));
        }
        xy
    }
}

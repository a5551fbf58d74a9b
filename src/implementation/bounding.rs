// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of the fractional-relaxation
//! bounding function which licenses the pruning of the branch-and-bound.

use crate::{Bounding, Item, SearchNode};

/// The fractional-relaxation bound: the profit reachable from a node if, on
/// top of the items already decided, the remaining capacity were filled
/// greedily in ratio order with at most one item allowed to be fractionally
/// included.
///
/// Relaxing the integrality constraint on that one item can only increase (or
/// leave equal) the true optimum of the subtree, which makes this bound
/// admissible. The greedy fill is only correct because the item slice is
/// sorted by decreasing profit/weight ratio (see `sort_by_ratio`).
pub struct FractionalBound<'a> {
    /// The instance items, in decreasing ratio order.
    items: &'a [Item],
    /// The maximum total weight the sack may carry.
    capacity: usize,
}
impl<'a> FractionalBound<'a> {
    /// Creates the bounding function for the given (ratio-ordered) instance.
    pub fn new(items: &'a [Item], capacity: usize) -> Self {
        FractionalBound { items, capacity }
    }
}
impl Bounding for FractionalBound<'_> {
    /// Computes the bound of the given node.
    ///
    /// A node whose own weight already reaches (or exceeds) the capacity gets
    /// a bound of 0.0: its subtree contributes nothing. Such a node should
    /// never have been deemed promising in the first place, but the function
    /// is total and safe to call on any node.
    fn bound(&self, node: &SearchNode) -> f64 {
        if node.weight >= self.capacity {
            return 0.0;
        }

        let n = self.items.len();
        let mut result = node.profit as f64;
        let mut totweight = node.weight;
        let mut j = node.depth;

        // grab as many whole items as possible
        while j < n && totweight + self.items[j].weight <= self.capacity {
            totweight += self.items[j].weight;
            result += self.items[j].profit as f64;
            j += 1;
        }
        // grab a fraction of the first item that does not fit; when every
        // remaining item fits, the bound is exact and there is no fractional
        // term to add
        if j < n {
            result += (self.capacity - totweight) as f64 * self.items[j].ratio;
        }

        result
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_fractional_bound {
    use crate::*;

    fn instance() -> Vec<Item> {
        let mut items = vec![
            Item::new("a", 60, 10),
            Item::new("b", 100, 20),
            Item::new("c", 120, 30),
        ];
        sort_by_ratio(&mut items);
        items
    }
    fn node(depth: usize, profit: usize, weight: usize) -> SearchNode {
        SearchNode { depth, profit, weight, bound: 0.0, path: Selection::empty() }
    }

    #[test]
    fn a_node_over_capacity_has_a_zero_bound() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 50);
        assert_eq!(0.0, bounding.bound(&node(2, 160, 60)));
    }
    #[test]
    fn a_node_exactly_at_capacity_has_a_zero_bound() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 50);
        assert_eq!(0.0, bounding.bound(&node(3, 220, 50)));
    }
    #[test]
    fn the_root_bound_adds_a_fractional_share_of_the_first_unfit_item() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 50);
        // a + b fit completely (30 of 50), then 20 units of c at ratio 4.0
        assert_eq!(240.0, bounding.bound(&SearchNode::root()));
    }
    #[test]
    fn the_bound_is_exact_when_all_remaining_items_fit() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 100);
        assert_eq!(280.0, bounding.bound(&SearchNode::root()));
    }
    #[test]
    fn the_bound_scans_from_the_node_depth_onwards() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 50);
        // first item left out: b and c fit completely and exactly fill the sack
        assert_eq!(220.0, bounding.bound(&node(1, 0, 0)));
    }
    #[test]
    fn the_bound_dominates_the_best_completion_of_any_node() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 50);
        // the optimal completion of the root is worth 220 (items b and c)
        assert!(bounding.bound(&SearchNode::root()) >= 220.0);
        // taking item a leaves room for b plus two thirds of c: its best
        // integral completion (a + b = 160 or a + c = 180) must be dominated
        assert!(bounding.bound(&node(1, 60, 10)) >= 180.0);
    }
    #[test]
    fn a_zero_capacity_sack_bounds_everything_to_zero() {
        let items = instance();
        let bounding = FractionalBound::new(&items, 0);
        assert_eq!(0.0, bounding.bound(&SearchNode::root()));
    }
    #[test]
    fn an_empty_instance_bounds_to_the_node_profit() {
        let items = vec![];
        let bounding = FractionalBound::new(&items, 50);
        assert_eq!(0.0, bounding.bound(&SearchNode::root()));
    }
    #[test]
    fn zero_weight_items_contribute_their_whole_profit() {
        let mut items = vec![Item::new("a", 10, 5), Item::new("free", 7, 0)];
        sort_by_ratio(&mut items);
        let bounding = FractionalBound::new(&items, 5);
        // a fills the sack completely, the weightless item still fits
        assert_eq!(17.0, bounding.bound(&SearchNode::root()));
    }
}

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

//! This module provides the implementation of the node rankings that are used
//! to set the ordering of the solver fringe.

use std::cmp::Ordering;

use compare::Compare;
use ordered_float::OrderedFloat;

use crate::{NodeRanking, SearchNode};

/// The MaxBound strategy is one that always selects the node having the
/// highest bound in the fringe -- which is exactly what makes the search
/// best-first. In case of equalities, the ties are broken using the
/// accumulated profit and eventually the depth of the nodes. The particular
/// tie-break does not matter for correctness; what matters is that it is
/// deterministic, so that any two runs on one same instance explore the tree
/// in one same order.
///
/// # Example
/// ```
/// # use knapbb::*;
/// # fn node(bound: f64) -> SearchNode {
/// #     SearchNode { depth: 0, profit: 0, weight: 0, bound, path: Selection::empty() }
/// # }
/// let mut priority_q = SimpleFringe::new(MaxBound);
/// priority_q.push(node(300.0));
/// priority_q.push(node(700.0));
/// priority_q.push(node(150.0));
///
/// assert_eq!(700.0, priority_q.pop().unwrap().bound); // the highest bound pops first
/// assert_eq!(300.0, priority_q.pop().unwrap().bound); // then the next highest
/// assert_eq!(150.0, priority_q.pop().unwrap().bound); // and so on
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxBound;
impl NodeRanking for MaxBound {
    fn compare(&self, a: &SearchNode, b: &SearchNode) -> Ordering {
        OrderedFloat(a.bound)
            .cmp(&OrderedFloat(b.bound))
            .then_with(|| a.profit.cmp(&b.profit))
            .then_with(|| a.depth.cmp(&b.depth))
    }
}

/// This is a thin wrapper to convert a `NodeRanking` into a `Compare` object
/// as is required to configure the order of a binary heap.
///
/// This struct has no behavior of its own: it simply delegates to the
/// underlying implementation.
#[derive(Debug, Clone, Copy)]
pub struct CompareNode<X: NodeRanking>(X);
impl<X: NodeRanking> CompareNode<X> {
    /// Creates a new instance
    pub fn new(x: X) -> Self {
        Self(x)
    }
}
impl<X: NodeRanking> Compare<SearchNode> for CompareNode<X> {
    fn compare(&self, l: &SearchNode, r: &SearchNode) -> Ordering {
        self.0.compare(l, r)
    }
}

#[cfg(test)]
mod test_maxbound {
    use std::cmp::Ordering;

    use crate::*;

    fn node(bound: f64, profit: usize, depth: usize) -> SearchNode {
        SearchNode { depth, profit, weight: 0, bound, path: Selection::empty() }
    }

    #[test]
    fn gt_because_bound() {
        let a = node(300.0, 42, 0);
        let b = node(100.0, 42, 0);
        assert_eq!(Ordering::Greater, MaxBound.compare(&a, &b));
    }
    #[test]
    fn gt_because_profit() {
        let a = node(300.0, 42, 0);
        let b = node(300.0, 2, 0);
        assert_eq!(Ordering::Greater, MaxBound.compare(&a, &b));
    }
    #[test]
    fn lt_because_bound() {
        let a = node(300.0, 42, 0);
        let b = node(100.0, 42, 0);
        assert_eq!(Ordering::Less, MaxBound.compare(&b, &a));
    }
    #[test]
    fn lt_because_profit() {
        let a = node(300.0, 42, 0);
        let b = node(300.0, 2, 0);
        assert_eq!(Ordering::Less, MaxBound.compare(&b, &a));
    }
    #[test]
    fn lt_because_depth() {
        let a = node(300.0, 42, 1);
        let b = node(300.0, 42, 0);
        assert_eq!(Ordering::Less, MaxBound.compare(&b, &a));
    }
    #[test]
    fn eq_self() {
        let a = node(300.0, 42, 0);
        assert_eq!(Ordering::Equal, MaxBound.compare(&a, &a));
    }

    #[test]
    fn the_comparator_delegates_to_the_ranking() {
        use compare::Compare;
        let a = node(300.0, 42, 0);
        let b = node(100.0, 42, 0);
        let cmp = CompareNode::new(MaxBound);
        assert_eq!(Ordering::Greater, cmp.compare(&a, &b));
        assert_eq!(Ordering::Less, cmp.compare(&b, &a));
    }
}

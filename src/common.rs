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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

use std::cmp::Reverse;
use std::sync::Arc;

use ordered_float::OrderedFloat;

// ----------------------------------------------------------------------------
// --- ITEM -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes one candidate item of the knapsack instance at hand.
/// An item is completely characterized by its name, its profit and its weight;
/// the profit/weight ratio is computed once at creation and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The identifier of this item (only ever used for reporting).
    pub name: String,
    /// The profit you earn when this item is placed in the sack.
    pub profit: usize,
    /// The capacity this item uses up when placed in the sack.
    pub weight: usize,
    /// The profit/weight ratio of the item. An item whose weight is zero has
    /// a ratio of 0.0: this is a degenerate-input policy which avoids a
    /// division fault, not an error.
    pub ratio: f64,
}
impl Item {
    /// Creates a new item and computes its profit/weight ratio.
    ///
    /// # Examples:
    /// ```
    /// # use knapbb::Item;
    /// let item = Item::new("tent", 60, 10);
    /// assert_eq!(6.0, item.ratio);
    ///
    /// let weightless = Item::new("feather", 10, 0);
    /// assert_eq!(0.0, weightless.ratio);
    /// ```
    pub fn new<S: Into<String>>(name: S, profit: usize, weight: usize) -> Self {
        let ratio = if weight > 0 {
            profit as f64 / weight as f64
        } else {
            0.0
        };
        Item { name: name.into(), profit, weight, ratio }
    }
}

/// Reorders the given items by decreasing profit/weight ratio. This is the
/// preprocessing step which *must* be applied to an instance before it is fed
/// to any of the solvers: both the bounding function and the search assume
/// that `items[i]` is at least as profitable per unit of weight as
/// `items[i+1]`. Feeding an unsorted slice to a solver invalidates the
/// admissibility of the bound (and hence the optimality guarantee).
///
/// The sort is stable, so ties among equal ratios keep their original
/// relative order and repeated invocations leave the slice untouched.
pub fn sort_by_ratio(items: &mut [Item]) {
    items.sort_by_key(|item| Reverse(OrderedFloat(item.ratio)));
}

// ----------------------------------------------------------------------------
// --- DECISION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This denotes a decision that was made during the search. It tells whether
/// the item having the given rank (position in the ratio-ordered instance)
/// was placed in the sack or left out. Any given `Decision` should be
/// understood as ```[[ item taken/left ]]```.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Decision {
    /// The rank of the item this decision is about.
    pub item: usize,
    /// True iff the item was placed in the sack.
    pub taken: bool,
}

// ----------------------------------------------------------------------------
// --- SELECTION --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A selection is the descriptor of the include/exclude decisions made along
/// the path from the root of the state-space tree down to some node.
///
/// It is a persistent (structurally shared) singly linked list: extending a
/// selection allocates exactly one step holding a reference to the parent
/// selection plus one decision. This way, siblings share their common prefix
/// and the complete decision sequence of a node is reconstructed in O(depth).
#[derive(Debug, Clone, Default)]
pub struct Selection(Option<Arc<SelectionStep>>);

#[derive(Debug)]
struct SelectionStep {
    parent: Selection,
    decision: Decision,
}

impl Selection {
    /// The empty selection: the descriptor of the root node, where no
    /// decision has been made yet.
    pub fn empty() -> Self {
        Default::default()
    }
    /// Returns the selection obtained by appending one more decision to this
    /// one. The receiver is left untouched and remains perfectly usable:
    /// this is how the include and exclude children of one same node both
    /// share their parent's descriptor.
    pub fn extend(&self, decision: Decision) -> Selection {
        Selection(Some(Arc::new(SelectionStep {
            parent: self.clone(),
            decision,
        })))
    }
    /// Reconstructs the complete sequence of decisions, in the order in which
    /// they were made (root first).
    pub fn decisions(&self) -> Vec<Decision> {
        let mut out = vec![];
        let mut cursor = &self.0;
        while let Some(step) = cursor {
            out.push(step.decision);
            cursor = &step.parent.0;
        }
        out.reverse();
        out
    }
}

// ----------------------------------------------------------------------------
// --- SEARCH NODE ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// One vertex of the implicit state-space tree explored by the branch-and-
/// bound algorithm. A node stands for a partial solution: it records the
/// include/exclude decisions made over the first `depth` items of the
/// (ratio-ordered) instance.
///
/// Nodes are plain owned values: each one belongs to exactly one fringe at a
/// time, or transiently to the solver while it is being expanded.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// The number of items that have been decided so far. The root has depth
    /// 0 and `items[depth]` is the next item to branch on.
    pub depth: usize,
    /// The cumulative profit of the items taken along the path to this node.
    pub profit: usize,
    /// The cumulative weight of the items taken along the path to this node.
    pub weight: usize,
    /// An upper bound on the total profit achievable by any completion of
    /// this partial solution (see `Bounding`).
    pub bound: f64,
    /// The descriptor of the decisions made along the path to this node.
    pub path: Selection,
}
impl SearchNode {
    /// Creates the root node of the state-space tree: nothing decided,
    /// nothing in the sack. Its bound still needs to be evaluated before it
    /// is pushed onto a fringe.
    pub fn root() -> Self {
        SearchNode {
            depth: 0,
            profit: 0,
            weight: 0,
            bound: 0.0,
            path: Selection::empty(),
        }
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A reason explaining why the search stopped before optimality was proved.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Reason {
    /// It stopped because the configured cutoff criterion was met
    CutoffOccurred,
}

/// The outcome of a search.
#[derive(Debug, Clone)]
pub struct Completion {
    /// is the given solution exact (proved optimal) ? or is it an
    /// approximation whose proof was interrupted by a cutoff ?
    pub is_exact: bool,
    /// if present, the profit of the best solution found by the search. It is
    /// absent when no improving selection was ever recorded (which is how the
    /// empty-sack optimum manifests itself: zero profit, nothing to report).
    pub best_value: Option<usize>,
}

/// The final product of a search, assembled once the fringe is exhausted (or
/// the cutoff fired): the optimal profit, the weight actually used by that
/// solution, and the descriptor of the winning item set.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best total profit found. This figure is always authoritative,
    /// even when the selection descriptor is absent.
    pub max_profit: usize,
    /// The total weight of the items realizing `max_profit`.
    pub total_weight: usize,
    /// The decisions realizing `max_profit`, or `None` when no descriptor is
    /// available -- either because the optimum is the empty selection, or
    /// because the incumbent could not be captured. `None` is the explicit
    /// "unavailable" marker: it is never silently conflated with an actual
    /// selection.
    pub selection: Option<Vec<Decision>>,
}
impl SearchResult {
    /// The ranks (positions in the ratio-ordered instance) of the items that
    /// were placed in the sack. Empty when the selection is absent.
    pub fn selected_items(&self) -> Vec<usize> {
        self.selection
            .iter()
            .flatten()
            .filter(|d| d.taken)
            .map(|d| d.item)
            .collect()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

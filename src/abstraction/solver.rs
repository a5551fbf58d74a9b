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

//! This module defines the `Solver` trait.

use crate::{Completion, Decision, SearchResult};

/// A solution is nothing but the sequence of include/exclude decisions
/// covering all the items of the instance along the winning path.
pub type Solution = Vec<Decision>;

/// This is the solver abstraction. It is implemented by a structure that
/// implements the best-first branch-and-bound paradigm to find the subset of
/// items with maximum total profit fitting within the sack capacity.
pub trait Solver {
    /// This method orders the solver to search for the optimal selection
    /// among all possibilities. It returns a structure standing for the
    /// outcome of the attempted maximization. Such a `Completion` may either
    /// be marked **exact** if the maximization has been carried out until
    /// optimality was proved; or it can be inexact, in which case the
    /// search was stopped by the satisfaction of some cutoff criterion.
    ///
    /// Along with the `is_exact` flag, the completion provides an optional
    /// `best_value`. When it is absent, no selection ever improved on the
    /// empty sack (zero profit) -- which, on an exact completion, means the
    /// optimum *is* the empty sack.
    fn maximize(&mut self) -> Completion;

    /// This method returns the total profit of the best selection that has
    /// been found. It returns `None` when no improving selection was ever
    /// recorded (the zero solution).
    fn best_value(&self) -> Option<usize>;
    /// This method returns the best selection found by the search: the
    /// sequence of decisions which maximizes the total profit. It returns
    /// `None` when no improving selection was ever recorded.
    fn best_solution(&self) -> Option<Solution>;
    /// Returns the total weight of the items realizing `best_value` (zero
    /// when no improving selection was recorded).
    fn best_weight(&self) -> usize;

    /// Returns the tightest upper bound on the optimal profit that can be
    /// guaranteed so far. In case where no bound has been proved yet, it
    /// should return positive infinity.
    fn best_bound(&self) -> f64;
    /// Returns the number of nodes that have been popped from the fringe and
    /// expanded so far.
    fn explored(&self) -> usize;

    /// Sets a primal (best known profit, weight and selection) of the
    /// problem. This seeds the incumbent, letting the search prune against a
    /// solution known from elsewhere right from the start.
    fn set_primal(&mut self, value: usize, weight: usize, solution: Solution);

    /// Assembles the final product of the search: the authoritative numeric
    /// figures plus the descriptor of the winning item set (or the explicit
    /// absence thereof).
    fn search_result(&self) -> SearchResult {
        SearchResult {
            max_profit: self.best_value().unwrap_or(0),
            total_weight: self.best_weight(),
            selection: self.best_solution(),
        }
    }

    /// Computes the optimality gap: 0.0 when the incumbent meets the proved
    /// bound, 1.0 when nothing has been proved yet.
    fn gap(&self) -> f64 {
        let ub = self.best_bound();
        let lb = self.best_value().unwrap_or(0) as f64;
        if ub.is_infinite() {
            1.0
        } else if ub <= 0.0 {
            0.0
        } else {
            (ub - lb).max(0.0) / ub
        }
    }
}

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

//! # KnapBB
//! KnapBB is an exact solver for the 0-1 knapsack problem. Given a collection
//! of items -- each having a positive weight and profit -- and the maximum
//! weight the sack may carry, it determines a subset of items with maximum
//! total profit whose cumulated weight does not exceed the capacity.
//!
//! The resolution is a best-first search with branch-and-bound pruning over
//! the implicit state-space tree of include/exclude decisions. The open
//! nodes of the search live in a priority queue (the *fringe*) ordered on
//! their *bound*: an optimistic estimate of the profit reachable from each
//! node, computed by a fractional relaxation of the problem. Since that
//! bound is admissible (it never underestimates what a subtree can yield),
//! any node whose bound fails to beat the best solution found so far can be
//! discarded without ever losing the optimum.
//!
//! ## Side benefit
//! As a side benefit from using `knapbb`, you will be able to exploit all of
//! your hardware to solve your instances in parallel (see `ParallelSolver`).
//!
//! ## Quick Example
//! The following solves the textbook three-item instance. Note the call to
//! `sort_by_ratio`: the solvers and the bounding function *require* the
//! items in decreasing profit/weight order, and it is the caller's job to
//! establish that ordering once, before the search starts.
//!
//! ```
//! use knapbb::*;
//!
//! // 1. Create the instance and apply the mandatory preprocessing
//! let mut items = vec![
//!     Item::new("a", 60, 10),
//!     Item::new("b", 100, 20),
//!     Item::new("c", 120, 30),
//! ];
//! sort_by_ratio(&mut items);
//!
//! // 2. Pick the building blocks of the search: the bounding function, a
//! //    cutoff policy and the fringe (ordered on the nodes' bounds)
//! let capacity = 50;
//! let bounding = FractionalBound::new(&items, capacity);
//! let cutoff = NoCutoff;
//! let mut fringe = SimpleFringe::new(MaxBound);
//!
//! // 3. Instantiate the solver and maximize
//! let mut solver = DefaultSolver::new(&items, capacity, &bounding, &cutoff, &mut fringe);
//! let outcome = solver.maximize();
//!
//! // the outcome tells whether optimality was proved, and the search result
//! // carries the authoritative figures along with the winning selection
//! assert!(outcome.is_exact);
//! let result = solver.search_result();
//! assert_eq!(220, result.max_profit);
//! assert_eq!(50, result.total_weight);
//! assert_eq!(vec![1, 2], result.selected_items()); // items "b" and "c"
//! ```
//!
//! ## Going further / Getting a grasp on the codebase
//! The easiest way to get your way around with KnapBB is probably to start
//! exploring the available APIs. The `abstraction` module defines the seams
//! of the library (`Fringe`, `Bounding`, `NodeRanking`, `Cutoff`, `Solver`)
//! and the `implementation` module provides the concrete machinery plugged
//! into those seams. The demo solver shipped with the repository shows how
//! the pieces are assembled around an instance parsed from file.

mod common;
mod abstraction;
mod implementation;

pub use common::*;
pub use abstraction::*;
pub use implementation::*;

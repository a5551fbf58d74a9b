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

//! This module defines the traits used to encapsulate the heuristics that
//! parameterize the behavior of the solvers: the order in which open nodes
//! are dequeued from the fringe and the criteria deciding when a search
//! should be interrupted.

use std::cmp::Ordering;

use crate::SearchNode;

/// This trait defines a total order over search nodes. It is used to
/// parameterize the fringe: the node comparing greatest is the one popped
/// first. A best-first search is obtained by ranking the nodes on their
/// bound (see `MaxBound`), but the seam leaves the tie-breaking policy open
/// as long as it is deterministic -- the correctness of the algorithm does
/// not depend on the tie-break, only the reproducibility of a run does.
pub trait NodeRanking {
    /// Compares two nodes; the greater one is the more promising one.
    fn compare(&self, a: &SearchNode, b: &SearchNode) -> Ordering;
}

/// This trait encapsulates a criterion deciding when a solver must stop
/// searching, even though the exhaustion of the fringe has not proved
/// optimality yet. This is the only external control over a search: the
/// worst-case behavior of branch-and-bound is exponential, and it belongs to
/// the solver's caller (not to the search itself) to impose a wall-clock or
/// node budget on pathological instances.
pub trait Cutoff {
    /// Returns true iff the criterion is met and the search must stop.
    /// `explored` is the number of nodes the solver has expanded so far.
    fn must_stop(&self, explored: usize) -> bool;
}

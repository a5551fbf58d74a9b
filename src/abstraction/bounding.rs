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

use crate::SearchNode;

/// This trait is the seam for the bounding function of the branch-and-bound
/// algorithm: given a node of the state-space tree, it computes an optimistic
/// estimate of the profit reachable in the subtree rooted at that node.
///
/// # Admissibility
/// The sole condition to ensure the correctness of the optimization algorithm
/// is that the returned value must be an over approximation of the profit of
/// *every* complete solution extending the node's partial selection. It is
/// this guarantee that licenses the solvers to discard any node whose bound
/// does not strictly exceed the incumbent profit, without ever losing an
/// optimal solution.
///
/// An implementation must also be total: it must be safe to call on any node,
/// including one whose own weight already exceeds the capacity (in which case
/// the subtree contributes nothing and the bound is 0.0).
pub trait Bounding {
    /// Computes an admissible upper bound on the total profit achievable by
    /// any completion of the partial selection represented by `node`.
    fn bound(&self, node: &SearchNode) -> f64;
}

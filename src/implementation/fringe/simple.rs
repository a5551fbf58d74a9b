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

//! This module provides the implementation of a simple solver fringe (priority queue)

use binary_heap_plus::BinaryHeap;

use crate::*;

/// The simplest fringe implementation you can think of: it basically consists
/// of a binary heap that pushes and pops search nodes.
///
/// # Note
/// This is the default type of fringe for both the sequential and parallel
/// solvers. Hence, you don't need to take any action in order to use the
/// `SimpleFringe`.
pub struct SimpleFringe<O: NodeRanking> {
    heap: BinaryHeap<SearchNode, CompareNode<O>>,
}
impl<O: NodeRanking> SimpleFringe<O> {
    /// This creates a new simple fringe which uses a custom node ranking.
    pub fn new(o: O) -> Self {
        Self { heap: BinaryHeap::from_vec_cmp(vec![], CompareNode::new(o)) }
    }
}
impl<O: NodeRanking> Fringe for SimpleFringe<O> {
    fn push(&mut self, node: SearchNode) {
        self.heap.push(node)
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

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

//! This module provides the implementation of a sequential best-first
//! branch-and-bound solver. That is, a solver that will solve the problem
//! using one single thread of execution. This is the reference implementation
//! of the search: the entire algorithm is a deterministic loop over one
//! queue, without any external interaction.

use crate::{
    Bounding, Completion, Cutoff, Decision, Fringe, Item, Reason, SearchNode, Solution, Solver,
};

/// The workload the driver can get from its fringe
enum WorkLoad {
    /// There is no work left to be done: the problem is solved
    Complete,
    /// The work must stop because of an external cutoff
    Aborted,
    /// The node to process
    WorkItem { node: SearchNode },
}

/// This is the structure implementing the single-threaded best-first
/// branch-and-bound solver.
///
/// Every node it pops is re-checked against the incumbent before expansion:
/// the node was promising when it was pushed, but the incumbent may have
/// improved since. This re-check is required for correctness, not a mere
/// optimization -- the fringe only guarantees that nodes were promising at
/// insertion time.
///
/// # Example Usage
/// ```
/// # use knapbb::*;
/// let mut items = vec![
///     Item::new("a", 60, 10),
///     Item::new("b", 100, 20),
///     Item::new("c", 120, 30),
/// ];
/// // the preprocessing *must* happen before the search starts
/// sort_by_ratio(&mut items);
///
/// let bounding = FractionalBound::new(&items, 50);
/// let cutoff = NoCutoff;
/// let mut fringe = SimpleFringe::new(MaxBound);
/// let mut solver = SequentialSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
///
/// let outcome = solver.maximize();
/// assert!(outcome.is_exact);
/// assert_eq!(Some(220), outcome.best_value);
/// assert_eq!(50, solver.best_weight());
///
/// let result = solver.search_result();
/// assert_eq!(220, result.max_profit);
/// assert_eq!(vec![1, 2], result.selected_items()); // items b and c
/// ```
pub struct SequentialSolver<'a> {
    /// The items of the instance being solved, in decreasing ratio order
    items: &'a [Item],
    /// The maximum total weight the sack may carry
    capacity: usize,
    /// The bounding function used to evaluate the potential of each node
    bounding: &'a (dyn Bounding),
    /// A cutoff criterion meant to decide when to stop the resolution of
    /// a given problem.
    cutoff: &'a (dyn Cutoff),

    /// This is the fringe: the set of nodes that must still be explored
    /// before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This fringe orders the nodes by bound (so the highest bound is going
    /// to pop first). So, it is guaranteed that the bound of the first node
    /// being popped is an upper bound on the value reachable by exploring
    /// any of the nodes remaining on the fringe.
    fringe: &'a mut (dyn Fringe),
    /// This is a counter that tracks the number of nodes that have
    /// effectively been popped from the fringe and expanded.
    explored: usize,
    /// This is the profit of the best selection found so far. It can only
    /// ever grow while the search proceeds.
    best_profit: usize,
    /// The total weight of the selection realizing `best_profit`.
    best_weight: usize,
    /// If set, this keeps the descriptor of the best selection so far.
    best_sol: Option<Solution>,
    /// This is the tightest proven upper bound on the optimal profit.
    best_bound: f64,
    /// If we decide not to go through a complete proof of optimality, this
    /// is the reason why we took that decision.
    abort_proof: Option<Reason>,
}

impl<'a> SequentialSolver<'a> {
    pub fn new(
        items: &'a [Item],
        capacity: usize,
        bounding: &'a (dyn Bounding),
        cutoff: &'a (dyn Cutoff),
        fringe: &'a mut (dyn Fringe),
    ) -> Self {
        SequentialSolver {
            items,
            capacity,
            bounding,
            cutoff,
            fringe,
            explored: 0,
            best_profit: 0,
            best_weight: 0,
            best_sol: None,
            best_bound: f64::INFINITY,
            abort_proof: None,
        }
    }

    /// This method initializes the problem resolution: it evaluates the root
    /// node of the state-space tree and posts it onto the fringe so that the
    /// processing can be bootstrapped.
    fn initialize(&mut self) {
        let mut root = SearchNode::root();
        root.bound = self.bounding.bound(&root);
        self.fringe.push(root);
    }

    /// This method processes the given `node`: it expands the two children
    /// deciding the fate of the next item (placed in the sack or left out),
    /// updates the incumbent if the include-child improves on it, and pushes
    /// whichever children remain promising.
    fn process_one_node(&mut self, node: SearchNode) {
        // check if the node is still promising: the incumbent may have
        // improved since the node was pushed
        if node.bound <= self.best_profit as f64 {
            return;
        }
        // a node where every item has been decided is a leaf by exhaustion:
        // there is nothing left to branch on
        if node.depth >= self.items.len() {
            return;
        }
        let item = &self.items[node.depth];

        // the child that places the next item in the sack
        let mut taken = SearchNode {
            depth: node.depth + 1,
            profit: node.profit + item.profit,
            weight: node.weight + item.weight,
            bound: 0.0,
            path: node.path.extend(Decision { item: node.depth, taken: true }),
        };
        // this is the only place where the incumbent ever changes
        if taken.weight <= self.capacity && taken.profit > self.best_profit {
            self.best_profit = taken.profit;
            self.best_weight = taken.weight;
            self.best_sol = Some(taken.path.decisions());
        }
        taken.bound = self.bounding.bound(&taken);
        if taken.weight <= self.capacity && taken.bound > self.best_profit as f64 {
            self.fringe.push(taken);
        }

        // the child that leaves the next item out: it shares the numeric
        // state of its parent, only the depth advances
        let mut left = SearchNode {
            depth: node.depth + 1,
            profit: node.profit,
            weight: node.weight,
            bound: 0.0,
            path: node.path.extend(Decision { item: node.depth, taken: false }),
        };
        left.bound = self.bounding.bound(&left);
        if left.bound > self.best_profit as f64 {
            self.fringe.push(left);
        }
    }

    fn abort_search(&mut self, reason: Reason) {
        self.abort_proof = Some(reason);
        self.fringe.clear();
    }

    /// Consults the fringe to fetch a workload. Depending on the current
    /// state, the workload can either be:
    ///
    ///   + Complete, when the fringe is exhausted and the incumbent is
    ///     proved optimal
    ///   + Aborted, when the configured cutoff interrupted the search
    ///   + WorkItem, when a node was successfully obtained for processing.
    fn get_workload(&mut self) -> WorkLoad {
        // Do we need to stop ?
        if self.abort_proof.is_some() {
            return WorkLoad::Aborted;
        }
        if self.fringe.is_empty() {
            self.best_bound = self.best_profit as f64;
            return WorkLoad::Complete;
        }

        let node = self.fringe.pop().unwrap();

        // the fringe pops in decreasing bound order: the bound of this node
        // is an upper bound on whatever remains reachable (the incumbent
        // itself stays a lower bound on the optimum)
        self.best_bound = node.bound.max(self.best_profit as f64);

        if self.cutoff.must_stop(self.explored) {
            self.abort_search(Reason::CutoffOccurred);
            return WorkLoad::Aborted;
        }

        // Consume the current node and process it
        self.explored += 1;
        WorkLoad::WorkItem { node }
    }
}

impl<'a> Solver for SequentialSolver<'a> {
    /// Applies the best-first branch-and-bound algorithm to find the most
    /// profitable subset of items fitting in the sack. The exactness of the
    /// outcome follows from the admissibility of the bound: every node the
    /// search discards is provably incapable of beating the incumbent at the
    /// time of discard, and the incumbent never decreases.
    fn maximize(&mut self) -> Completion {
        self.initialize();

        loop {
            match self.get_workload() {
                WorkLoad::Complete => break,
                WorkLoad::Aborted => break,
                WorkLoad::WorkItem { node } => self.process_one_node(node),
            }
        }

        Completion {
            is_exact: self.abort_proof.is_none(),
            best_value: self.best_sol.as_ref().map(|_| self.best_profit),
        }
    }

    /// Returns the profit of the best selection that has been identified.
    fn best_value(&self) -> Option<usize> {
        self.best_sol.as_ref().map(|_| self.best_profit)
    }
    /// Returns the best selection that has been identified.
    fn best_solution(&self) -> Option<Solution> {
        self.best_sol.clone()
    }
    /// Returns the total weight of the best selection.
    fn best_weight(&self) -> usize {
        self.best_weight
    }
    /// Returns the tightest proven upper bound on the optimal profit.
    fn best_bound(&self) -> f64 {
        self.best_bound
    }
    /// Returns the number of nodes expanded so far.
    fn explored(&self) -> usize {
        self.explored
    }
    /// Sets a primal (best known profit, weight and selection) of the
    /// problem.
    fn set_primal(&mut self, value: usize, weight: usize, solution: Solution) {
        if value > self.best_profit {
            self.best_profit = value;
            self.best_weight = weight;
            self.best_sol = Some(solution);
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_sequential {
    use crate::*;

    fn solve(items: &mut Vec<Item>, capacity: usize) -> (Completion, SearchResult, usize) {
        sort_by_ratio(items);
        let bounding = FractionalBound::new(items, capacity);
        let cutoff = NoCutoff;
        let mut fringe = SimpleFringe::new(MaxBound);
        let mut solver = SequentialSolver::new(items, capacity, &bounding, &cutoff, &mut fringe);
        let completion = solver.maximize();
        let result = solver.search_result();
        let explored = solver.explored();
        (completion, result, explored)
    }

    #[test]
    fn it_finds_the_textbook_optimum() {
        let mut items = vec![
            Item::new("a", 60, 10),
            Item::new("b", 100, 20),
            Item::new("c", 120, 30),
        ];
        let (completion, result, _) = solve(&mut items, 50);
        assert!(completion.is_exact);
        assert_eq!(Some(220), completion.best_value);
        assert_eq!(220, result.max_profit);
        assert_eq!(50, result.total_weight);
        assert_eq!(vec![1, 2], result.selected_items());
    }
    #[test]
    fn when_nothing_fits_the_result_is_the_zero_solution() {
        let mut items = vec![Item::new("x", 10, 5)];
        let (completion, result, _) = solve(&mut items, 1);
        assert!(completion.is_exact);
        assert_eq!(None, completion.best_value);
        assert_eq!(0, result.max_profit);
        assert_eq!(0, result.total_weight);
        assert!(result.selection.is_none());
    }
    #[test]
    fn an_empty_instance_yields_the_zero_solution() {
        let mut items = vec![];
        let (completion, result, _) = solve(&mut items, 100);
        assert!(completion.is_exact);
        assert_eq!(0, result.max_profit);
        assert_eq!(0, result.total_weight);
    }
    #[test]
    fn a_zero_capacity_sack_yields_the_zero_solution() {
        let mut items = vec![Item::new("a", 60, 10), Item::new("b", 100, 20)];
        let (completion, result, _) = solve(&mut items, 0);
        assert!(completion.is_exact);
        assert_eq!(0, result.max_profit);
        assert_eq!(0, result.total_weight);
    }
    #[test]
    fn a_single_fitting_item_is_taken() {
        let mut items = vec![Item::new("only", 42, 7)];
        let (completion, result, _) = solve(&mut items, 10);
        assert!(completion.is_exact);
        assert_eq!(42, result.max_profit);
        assert_eq!(7, result.total_weight);
        assert_eq!(vec![0], result.selected_items());
    }
    #[test]
    fn the_returned_weight_never_exceeds_the_capacity() {
        let mut items = vec![
            Item::new("a", 40, 2),
            Item::new("b", 30, 5),
            Item::new("c", 50, 10),
            Item::new("d", 10, 5),
        ];
        let capacity = 16;
        let (_, result, _) = solve(&mut items, capacity);
        assert!(result.total_weight <= capacity);
    }
    #[test]
    fn zero_weight_items_ride_along_for_free() {
        let mut items = vec![Item::new("free", 5, 0), Item::new("a", 10, 5)];
        let (completion, result, _) = solve(&mut items, 6);
        assert!(completion.is_exact);
        assert_eq!(15, result.max_profit);
        assert_eq!(5, result.total_weight);
    }

    #[test]
    fn a_zero_node_budget_aborts_before_any_expansion() {
        let mut items = vec![Item::new("a", 60, 10), Item::new("b", 100, 20)];
        sort_by_ratio(&mut items);
        let bounding = FractionalBound::new(&items, 50);
        let cutoff = NodeBudget::new(0);
        let mut fringe = SimpleFringe::new(MaxBound);
        let mut solver = SequentialSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
        let completion = solver.maximize();
        assert!(!completion.is_exact);
        assert_eq!(0, solver.explored());
    }
    #[test]
    fn an_interrupted_search_still_reports_its_incumbent() {
        let mut items = vec![
            Item::new("a", 60, 10),
            Item::new("b", 100, 20),
            Item::new("c", 120, 30),
        ];
        sort_by_ratio(&mut items);
        let bounding = FractionalBound::new(&items, 50);
        // enough to expand a few nodes and record an incumbent, not enough
        // to complete the proof
        let cutoff = NodeBudget::new(2);
        let mut fringe = SimpleFringe::new(MaxBound);
        let mut solver = SequentialSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
        let completion = solver.maximize();
        assert!(!completion.is_exact);
        if let Some(value) = completion.best_value {
            assert!(value <= 220);
            assert!(solver.best_weight() <= 50);
        }
    }

    #[test]
    fn a_primal_seed_prunes_but_cannot_be_degraded() {
        let mut items = vec![
            Item::new("a", 60, 10),
            Item::new("b", 100, 20),
            Item::new("c", 120, 30),
        ];
        sort_by_ratio(&mut items);
        let bounding = FractionalBound::new(&items, 50);
        let cutoff = NoCutoff;
        let mut fringe = SimpleFringe::new(MaxBound);
        let mut solver = SequentialSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
        // seed with the true optimum obtained from elsewhere
        solver.set_primal(
            220,
            50,
            vec![
                Decision { item: 0, taken: false },
                Decision { item: 1, taken: true },
                Decision { item: 2, taken: true },
            ],
        );
        let completion = solver.maximize();
        assert!(completion.is_exact);
        assert_eq!(Some(220), completion.best_value);
        assert_eq!(50, solver.best_weight());
    }

    #[test]
    fn the_proved_bound_meets_the_incumbent_on_an_exact_completion() {
        let mut items = vec![
            Item::new("a", 60, 10),
            Item::new("b", 100, 20),
            Item::new("c", 120, 30),
        ];
        sort_by_ratio(&mut items);
        let bounding = FractionalBound::new(&items, 50);
        let cutoff = NoCutoff;
        let mut fringe = SimpleFringe::new(MaxBound);
        let mut solver = SequentialSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
        solver.maximize();
        assert_eq!(220.0, solver.best_bound());
        assert_eq!(0.0, solver.gap());
    }
}

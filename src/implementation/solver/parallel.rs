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

//! This module provides the implementation of a parallel best-first
//! branch-and-bound solver. That is, a solver that will solve the problem
//! using as many threads as requested. By default, it uses as many threads
//! as the number of hardware threads available on the machine.

use parking_lot::{Condvar, Mutex};

use crate::{
    Bounding, Completion, Cutoff, Decision, Fringe, Item, Reason, SearchNode, Solution, Solver,
};

/// The shared data that may only be manipulated within critical sections
struct Critical<'a> {
    /// This is the fringe: the set of nodes that must still be explored
    /// before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This fringe orders the nodes by bound (so the highest bound is going
    /// to pop first). So, it is guaranteed that the bound of the first node
    /// being popped is an upper bound on the value reachable by exploring
    /// any of the nodes remaining on the fringe.
    fringe: &'a mut (dyn Fringe + Send),
    /// This is the number of nodes that are currently being explored.
    ///
    /// # Note
    /// This information may seem innocuous/superfluous, whereas in fact it is
    /// very important. Indeed, this is the piece of information that lets us
    /// distinguish between a node-starvation and the completion of the
    /// problem resolution. The bottom line is, this counter needs to be
    /// carefully managed to guarantee the termination of all threads.
    ongoing: usize,
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
    /// *WARNING* This one only gets set when the search completes or is
    /// interrupted.
    best_bound: f64,
    /// This vector is used to store the bound of the node which is currently
    /// processed by each thread.
    ///
    /// # Note
    /// When a thread is idle (or more generally when it is done with
    /// processing its node), it should place negative infinity in its
    /// corresponding cell.
    upper_bounds: Vec<f64>,
    /// If we decide not to go through a complete proof of optimality, this
    /// is the reason why we took that decision.
    abort_proof: Option<Reason>,
}

/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park threads in case of node-starvation.
struct Shared<'a> {
    /// The items of the instance being solved, in decreasing ratio order
    items: &'a [Item],
    /// The maximum total weight the sack may carry
    capacity: usize,
    /// The bounding function used to evaluate the potential of each node
    bounding: &'a (dyn Bounding + Send + Sync),
    /// A cutoff criterion meant to decide when to stop the resolution of
    /// a given problem.
    cutoff: &'a (dyn Cutoff + Send + Sync),

    /// This is the shared state data which can only be accessed within
    /// critical sections. Therefore, it is protected by a mutex which
    /// prevents concurrent reads/writes.
    critical: Mutex<Critical<'a>>,
    /// This is the monitor on which threads must wait when facing an empty
    /// fringe. The corollary, is that whenever a thread has completed the
    /// processing of a subproblem, it must wake-up all parked threads
    /// waiting on this monitor.
    monitor: Condvar,
}

/// The workload a thread can get from the shared state
enum WorkLoad {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// The work must stop because of an external cutoff
    Aborted,
    /// There is nothing you can do right now. Check again when you wake up
    Starvation,
    /// The node to process
    WorkItem { node: SearchNode },
}

/// This is the structure implementing the multi-threaded best-first
/// branch-and-bound solver.
///
/// All reads and updates of the incumbent, and every insertion into the
/// fringe, are serialized behind one single mutex: this is what preserves
/// the pruning invariant when several nodes are expanded concurrently. The
/// bounds of the children, on the other hand, are evaluated outside of the
/// critical section since the bounding function only depends on immutable
/// data.
///
/// # Example Usage
/// ```
/// # use knapbb::*;
/// let mut items = vec![
///     Item::new("a", 60, 10),
///     Item::new("b", 100, 20),
///     Item::new("c", 120, 30),
/// ];
/// sort_by_ratio(&mut items);
///
/// let bounding = FractionalBound::new(&items, 50);
/// let cutoff = NoCutoff;
/// let mut fringe = SimpleFringe::new(MaxBound);
/// let mut solver = ParallelSolver::new(&items, 50, &bounding, &cutoff, &mut fringe);
///
/// let outcome = solver.maximize();
/// assert!(outcome.is_exact);
/// assert_eq!(Some(220), outcome.best_value);
/// ```
pub struct ParallelSolver<'a> {
    /// This is the shared state. Each thread is going to take a reference
    /// to it.
    shared: Shared<'a>,
    /// This is a configuration parameter that tunes the number of threads
    /// that will be spawned to solve the problem. By default, this number
    /// amounts to the number of hardware threads available on the machine.
    nb_threads: usize,
}

impl<'a> ParallelSolver<'a> {
    pub fn new(
        items: &'a [Item],
        capacity: usize,
        bounding: &'a (dyn Bounding + Send + Sync),
        cutoff: &'a (dyn Cutoff + Send + Sync),
        fringe: &'a mut (dyn Fringe + Send),
    ) -> Self {
        Self::custom(items, capacity, bounding, cutoff, fringe, num_cpus::get())
    }
    pub fn custom(
        items: &'a [Item],
        capacity: usize,
        bounding: &'a (dyn Bounding + Send + Sync),
        cutoff: &'a (dyn Cutoff + Send + Sync),
        fringe: &'a mut (dyn Fringe + Send),
        nb_threads: usize,
    ) -> Self {
        ParallelSolver {
            shared: Shared {
                items,
                capacity,
                bounding,
                cutoff,
                monitor: Condvar::new(),
                critical: Mutex::new(Critical {
                    fringe,
                    ongoing: 0,
                    explored: 0,
                    best_profit: 0,
                    best_weight: 0,
                    best_sol: None,
                    best_bound: f64::INFINITY,
                    upper_bounds: vec![f64::NEG_INFINITY; nb_threads],
                    abort_proof: None,
                }),
            },
            nb_threads,
        }
    }
    /// Sets the number of threads used by the solver
    pub fn with_nb_threads(mut self, nb_threads: usize) -> Self {
        self.nb_threads = nb_threads;
        self.shared.critical.lock().upper_bounds = vec![f64::NEG_INFINITY; nb_threads];
        self
    }

    /// This method initializes the problem resolution: it evaluates the root
    /// node of the state-space tree and posts it onto the fringe so that a
    /// thread can pick it up and the processing can be bootstrapped.
    fn initialize(&mut self) {
        let mut root = SearchNode::root();
        root.bound = self.shared.bounding.bound(&root);
        self.shared.critical.lock().fringe.push(root);
    }

    /// This method processes the given `node`: it expands the two children
    /// deciding the fate of the next item, evaluates their bounds (outside
    /// of any critical section), and then -- within one single critical
    /// section -- updates the incumbent and pushes whichever children are
    /// still promising.
    fn process_one_node(shared: &Shared<'a>, node: SearchNode) {
        // check if the node is still promising: the incumbent may have
        // improved since the node was popped
        let best_profit = shared.critical.lock().best_profit;
        if node.bound <= best_profit as f64 {
            return;
        }
        // leaf by exhaustion: there is nothing left to branch on
        if node.depth >= shared.items.len() {
            return;
        }
        let item = &shared.items[node.depth];

        // the child that places the next item in the sack
        let mut taken = SearchNode {
            depth: node.depth + 1,
            profit: node.profit + item.profit,
            weight: node.weight + item.weight,
            bound: 0.0,
            path: node.path.extend(Decision { item: node.depth, taken: true }),
        };
        taken.bound = shared.bounding.bound(&taken);

        // the child that leaves the next item out: it shares the numeric
        // state of its parent, only the depth advances
        let mut left = SearchNode {
            depth: node.depth + 1,
            profit: node.profit,
            weight: node.weight,
            bound: 0.0,
            path: node.path.extend(Decision { item: node.depth, taken: false }),
        };
        left.bound = shared.bounding.bound(&left);

        let mut critical = shared.critical.lock();
        // this is the only place where the incumbent ever changes
        if taken.weight <= shared.capacity && taken.profit > critical.best_profit {
            critical.best_profit = taken.profit;
            critical.best_weight = taken.weight;
            critical.best_sol = Some(taken.path.decisions());
        }
        if taken.weight <= shared.capacity && taken.bound > critical.best_profit as f64 {
            critical.fringe.push(taken);
        }
        if left.bound > critical.best_profit as f64 {
            critical.fringe.push(left);
        }
    }

    /// Acknowledges that a thread finished processing its node.
    fn notify_node_finished(shared: &Shared<'a>, thread_id: usize) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        critical.upper_bounds[thread_id] = f64::NEG_INFINITY;
        shared.monitor.notify_all();
    }

    /// Consults the shared state to fetch a workload. Depending on the
    /// current state, the workload can either be:
    ///
    ///   + Complete, when the problem is solved and all threads should stop
    ///   + Aborted, when the configured cutoff interrupted the search
    ///   + Starvation, when there is no node available for processing at the
    ///     time being (but some node is still being processed and thus the
    ///     problem cannot be considered solved)
    ///   + WorkItem, when the thread successfully obtained a node to
    ///     process.
    fn get_workload(shared: &Shared<'a>, thread_id: usize) -> WorkLoad {
        let mut critical = shared.critical.lock();

        // Do we need to stop ?
        if critical.abort_proof.is_some() {
            return WorkLoad::Aborted;
        }

        // Are we done ?
        if critical.ongoing == 0 && critical.fringe.is_empty() {
            critical.best_bound = critical.best_profit as f64;
            return WorkLoad::Complete;
        }

        // Nothing to do yet ? => Wait for someone to post jobs
        if critical.fringe.is_empty() {
            shared.monitor.wait(&mut critical);
            return WorkLoad::Starvation;
        }

        let node = critical.fringe.pop().unwrap();

        // Nothing relevant ? => Wait for someone to post jobs
        if node.bound <= critical.best_profit as f64 {
            // every other node pops after this one, in decreasing bound
            // order: none of them can improve on the incumbent either
            critical.fringe.clear();
            return WorkLoad::Starvation;
        }

        if shared.cutoff.must_stop(critical.explored) {
            let mut bound = node.bound;
            for b in critical.upper_bounds.iter().copied() {
                bound = bound.max(b);
            }
            critical.best_bound = bound.max(critical.best_profit as f64);
            critical.abort_proof = Some(Reason::CutoffOccurred);
            critical.fringe.clear();
            shared.monitor.notify_all();
            return WorkLoad::Aborted;
        }

        // Consume the current node and process it
        critical.ongoing += 1;
        critical.explored += 1;
        critical.upper_bounds[thread_id] = node.bound;

        WorkLoad::WorkItem { node }
    }
}

impl<'a> Solver for ParallelSolver<'a> {
    /// Applies the best-first branch-and-bound algorithm to find the most
    /// profitable subset of items fitting in the sack. To do so, it spawns
    /// `nb_threads` workers (long running threads); each of which will
    /// continually get a workload and process it until the problem is
    /// solved.
    fn maximize(&mut self) -> Completion {
        self.initialize();

        std::thread::scope(|s| {
            for i in 0..self.nb_threads {
                let shared = &self.shared;
                s.spawn(move || loop {
                    match Self::get_workload(shared, i) {
                        WorkLoad::Complete => break,
                        WorkLoad::Aborted => break,
                        WorkLoad::Starvation => continue,
                        WorkLoad::WorkItem { node } => {
                            Self::process_one_node(shared, node);
                            Self::notify_node_finished(shared, i);
                        }
                    }
                });
            }
        });

        let critical = self.shared.critical.lock();
        Completion {
            is_exact: critical.abort_proof.is_none(),
            best_value: critical.best_sol.as_ref().map(|_| critical.best_profit),
        }
    }

    /// Returns the profit of the best selection that has been identified.
    fn best_value(&self) -> Option<usize> {
        let critical = self.shared.critical.lock();
        critical.best_sol.as_ref().map(|_| critical.best_profit)
    }
    /// Returns the best selection that has been identified.
    fn best_solution(&self) -> Option<Solution> {
        self.shared.critical.lock().best_sol.clone()
    }
    /// Returns the total weight of the best selection.
    fn best_weight(&self) -> usize {
        self.shared.critical.lock().best_weight
    }
    /// Returns the tightest proven upper bound on the optimal profit.
    fn best_bound(&self) -> f64 {
        self.shared.critical.lock().best_bound
    }
    /// Returns the number of nodes expanded so far.
    fn explored(&self) -> usize {
        self.shared.critical.lock().explored
    }
    /// Sets a primal (best known profit, weight and selection) of the
    /// problem.
    fn set_primal(&mut self, value: usize, weight: usize, solution: Solution) {
        let mut critical = self.shared.critical.lock();
        if value > critical.best_profit {
            critical.best_profit = value;
            critical.best_weight = weight;
            critical.best_sol = Some(solution);
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

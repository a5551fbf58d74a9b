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

//! This module provides the implementation of various cutoff criteria that
//! can be used to interrupt a search on pathological instances (the
//! worst-case behavior of branch-and-bound is exponential).

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use crate::Cutoff;

/// _This is the default cutoff._ It imposes that the search goes on until
/// optimality is proved.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCutoff;
impl Cutoff for NoCutoff {
    fn must_stop(&self, _explored: usize) -> bool {
        false
    }
}

/// This cutoff allows one to specify a maximum time budget to solve the
/// problem. Once the time budget is elapsed, the optimization stops and the
/// best solution that has been found (so far) is returned.
#[derive(Debug, Clone)]
pub struct TimeBudget {
    stop: Arc<AtomicBool>,
}
impl TimeBudget {
    pub fn new(budget: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let t_flag = Arc::clone(&stop);

        // timer
        std::thread::spawn(move || {
            std::thread::sleep(budget);
            t_flag.store(true, std::sync::atomic::Ordering::Relaxed);
        });

        TimeBudget { stop }
    }
}
impl Cutoff for TimeBudget {
    fn must_stop(&self, _explored: usize) -> bool {
        self.stop.load(std::sync::atomic::Ordering::Relaxed)
    }
}

/// This cutoff allows one to specify a maximum number of nodes the search may
/// expand before it is interrupted. This is the iteration cap a caller will
/// typically impose to keep a runaway search in check.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: usize,
}
impl NodeBudget {
    pub fn new(budget: usize) -> Self {
        NodeBudget { budget }
    }
}
impl Cutoff for NodeBudget {
    fn must_stop(&self, explored: usize) -> bool {
        explored >= self.budget
    }
}

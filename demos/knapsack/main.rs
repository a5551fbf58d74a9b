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

//! This is the main entry point of the demo program. This is what gets
//! compiled to the knapsack binary.

use std::io::Write;
use std::time::{Duration, Instant};

use clap::Parser;
use knapbb::{
    sort_by_ratio, Completion, Cutoff, FractionalBound, Item, MaxBound, NoCutoff, NodeBudget,
    ParallelSolver, SearchResult, SequentialSolver, SimpleFringe, Solver, TimeBudget,
};

use instance::read_instance;

mod instance;

/// KnapBB is a solver based on best-first branch-and-bound which solves the
/// 0-1 knapsack problem to optimality: it finds the subset of items with
/// maximum total profit whose cumulated weight fits within the sack.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the knapsack instance that needs to be solved.
    instance: String,
    /// The maximum weight the sack may carry. When this argument is left
    /// out, the capacity is read from an interactive prompt.
    capacity: Option<usize>,
    /// How many threads do you want to use to solve the problem ? When left
    /// out, the resolution is sequential.
    #[clap(short, long)]
    threads: Option<usize>,
    /// How long do you want the solver to keep working on your problem ?
    /// (in seconds)
    #[clap(short, long)]
    duration: Option<u64>,
    /// How many nodes may the solver expand before it gets interrupted ?
    #[clap(short, long)]
    nodes: Option<usize>,
}

fn main() {
    let args = Args::parse();
    let mut items = match read_instance(&args.instance) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("error reading '{}': {}", args.instance, e);
            std::process::exit(1);
        }
    };
    let capacity = args.capacity.unwrap_or_else(prompt_capacity);

    sort_by_ratio(&mut items);

    let bounding = FractionalBound::new(&items, capacity);
    let cutoff = cutoff_of(&args);
    let mut fringe = SimpleFringe::new(MaxBound);

    let start = Instant::now();
    let (outcome, result, explored) = if let Some(threads) = args.threads {
        let mut solver = ParallelSolver::custom(
            &items,
            capacity,
            &bounding,
            cutoff.as_ref(),
            &mut fringe,
            threads,
        );
        let outcome = solver.maximize();
        (outcome, solver.search_result(), solver.explored())
    } else {
        let mut solver =
            SequentialSolver::new(&items, capacity, &bounding, cutoff.as_ref(), &mut fringe);
        let outcome = solver.maximize();
        (outcome, solver.search_result(), solver.explored())
    };
    let duration = start.elapsed();

    print_solution(&args.instance, capacity, &items, outcome, result, explored, duration);
}

/// The original behavior of the solver: when the capacity is not given on
/// the command line, ask the user for it.
fn prompt_capacity() -> usize {
    print!("Please enter the maximum weight: ");
    std::io::stdout().flush().unwrap();

    let mut line = String::new();
    std::io::stdin().read_line(&mut line).unwrap();
    line.trim().parse().unwrap()
}

fn cutoff_of(args: &Args) -> Box<dyn Cutoff + Send + Sync> {
    if let Some(seconds) = args.duration {
        Box::new(TimeBudget::new(Duration::from_secs(seconds)))
    } else if let Some(nodes) = args.nodes {
        Box::new(NodeBudget::new(nodes))
    } else {
        Box::new(NoCutoff)
    }
}

fn print_solution(
    name: &str,
    capacity: usize,
    items: &[Item],
    completion: Completion,
    result: SearchResult,
    explored: usize,
    duration: Duration,
) {
    println!("instance : {name}");
    println!("capacity : {capacity}");
    println!("status   : {}", status(&completion));
    println!("profit   : {}", result.max_profit);
    println!("weight   : {}", result.total_weight);
    println!("explored : {explored}");
    println!("duration : {}", duration.as_secs_f32());
    println!("items    : {}", selection_to_string(items, &result));
}

fn status(completion: &Completion) -> &'static str {
    if completion.is_exact {
        "Proved"
    } else {
        "Interrupted"
    }
}

fn selection_to_string(items: &[Item], result: &SearchResult) -> String {
    match &result.selection {
        None => "NOT AVAILABLE".to_string(),
        Some(_) => result
            .selected_items()
            .iter()
            .map(|i| items[*i].name.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

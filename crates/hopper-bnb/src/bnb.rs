// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Best-first branch-and-bound solver for production planning.
//!
//! This module implements the search engine that decides one item quantity
//! per tree level, in model order, while pruning nodes whose revenue bound
//! cannot beat the incumbent. The `BnbSolver` owns reusable scratch storage
//! (the frontier and a committed-usage buffer); a search session object
//! encapsulates per-run state, statistics and timing.
//!
//! Per iteration the session stops with `OptimalityProven` when the frontier
//! is empty, otherwise asks the monitor whether to continue, pops the node
//! with the highest bound, re-validates that bound against the incumbent and
//! either installs a complete plan or branches on the next item. Candidate
//! quantities are tried in ascending order; the first one that exceeds a
//! stock ends the loop, since larger ones would exceed it too. Wide
//! expansions consult the monitor every `CANDIDATE_POLL_INTERVAL` candidates
//! and stop the search as soon as it asks to terminate.

use crate::{
    eval::{self, estimator::UpperBoundEstimator},
    frontier::Frontier,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    result::{BnbSolverOutcome, TerminationReason},
    stats::BnbSolverStatistics,
};
use hopper_core::num::within_limit;
use hopper_model::{index::ItemIndex, model::Model};

/// Number of candidate quantities between two monitor polls inside one expansion.
const CANDIDATE_POLL_INTERVAL: u64 = 1024;

/// A best-first branch-and-bound solver for the production planning problem.
/// This is only the execution engine: bounds come from an
/// `UpperBoundEstimator` and limits are enforced by a `TreeSearchMonitor`.
#[derive(Clone, Debug, Default)]
pub struct BnbSolver {
    frontier: Frontier,
    committed: Vec<f64>,
}

impl BnbSolver {
    /// Create a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            frontier: Frontier::new(),
            committed: Vec::new(),
        }
    }

    /// Create a new solver instance with room for `frontier_capacity` open
    /// nodes and `num_resources` resources.
    ///
    /// # Note
    ///
    /// The frontier still grows on demand; preallocation only moves the
    /// cost of the first allocations to construction time.
    #[inline]
    pub fn preallocated(frontier_capacity: usize, num_resources: usize) -> Self {
        Self {
            frontier: Frontier::preallocated(frontier_capacity),
            committed: Vec::with_capacity(num_resources),
        }
    }

    /// Solve `model` using the provided `UpperBoundEstimator` and
    /// `TreeSearchMonitor`.
    ///
    /// The returned outcome always carries a plan. It is optimal when the
    /// termination reason is `OptimalityProven`, and the best plan found
    /// before a monitor stopped the search otherwise.
    pub fn solve<E, S>(
        &mut self,
        model: &Model,
        estimator: &mut E,
        mut monitor: S,
    ) -> BnbSolverOutcome
    where
        E: UpperBoundEstimator,
        S: TreeSearchMonitor,
    {
        debug_assert!(
            eval::validation::is_admissible_exhaustive(estimator, model, 10_000),
            "UpperBoundEstimator '{}' is not admissible.",
            estimator.name()
        );

        self.committed.clear();
        self.committed.resize(model.num_resources(), 0.0);

        let session = BnbSolverSearchSession::new(self, model, estimator, &mut monitor);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Clears per-run state but keeps allocations.
    #[inline]
    fn reset(&mut self) {
        self.frontier.reset();
        self.committed.clear();
    }
}

/// Returns `true` if `qty` units of `item_index` fit on top of `committed`
/// for every resource the item consumes.
#[inline]
fn fits(model: &Model, committed: &[f64], item_index: ItemIndex, qty: u64) -> bool {
    let qty = qty as f64;
    model.item_consumers(item_index).iter().all(|consumer| {
        let r = consumer.resource();
        within_limit(
            committed[r.get()] + qty * consumer.amount(),
            model.resource_stock(r),
        )
    })
}

/// A search session for the solver.
/// This struct encapsulates the state and logic
/// of a single search run.
struct BnbSolverSearchSession<'a, E, S> {
    solver: &'a mut BnbSolver,
    model: &'a Model,
    estimator: &'a mut E,
    monitor: &'a mut S,
    incumbent: Incumbent,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, E, S> std::fmt::Debug for BnbSolverSearchSession<'a, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("model", &self.model)
            .field("frontier_len", &self.solver.frontier.len())
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, E, S> std::fmt::Display for BnbSolverSearchSession<'a, E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSession(best_revenue: {:.2}, open_nodes: {}, nodes_explored: {})",
            self.incumbent.revenue(),
            self.solver.frontier.len(),
            self.stats.nodes_explored
        )
    }
}

impl<'a, E, S> BnbSolverSearchSession<'a, E, S>
where
    E: UpperBoundEstimator,
    S: TreeSearchMonitor,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver,
        model: &'a Model,
        estimator: &'a mut E,
        monitor: &'a mut S,
    ) -> Self {
        Self {
            solver,
            model,
            estimator,
            monitor,
            incumbent: Incumbent::idle(model.num_items()),
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Run the search session.
    fn run(mut self) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.model, &self.stats);
        self.initialize();

        let termination_reason = loop {
            self.stats.on_step();

            if self.solver.frontier.is_empty() {
                break TerminationReason::OptimalityProven;
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break TerminationReason::Aborted(msg);
            }

            let Some(node) = self.solver.frontier.pop() else {
                break TerminationReason::OptimalityProven;
            };
            self.stats.on_node_explored();
            self.monitor.on_step(&node, &self.stats);

            // Bounds were computed against an older incumbent.
            if node.upper_bound() <= self.incumbent.revenue() {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&node, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            if node.level() == self.model.num_items() {
                self.handle_complete_plan(node);
            } else if let SearchCommand::Terminate(msg) = self.expand(node) {
                break TerminationReason::Aborted(msg);
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(termination_reason)
    }

    /// Estimates the root bound and seeds the frontier with the root node.
    fn initialize(&mut self) {
        let root_bound = self.estimator.estimate(self.model, &[], 0.0);
        self.stats.set_root_upper_bound(root_bound);
        self.solver.frontier.push(SearchNode::root(root_bound));
        self.stats
            .on_frontier_size(self.solver.frontier.peak_len() as u64);
    }

    /// Branches on the item at `node.level()`.
    ///
    /// Returns `SearchCommand::Terminate` if the monitor stopped the search
    /// while candidates were still being generated.
    fn expand(&mut self, node: SearchNode) -> SearchCommand {
        let level = node.level();
        debug_assert!(
            level < self.model.num_items(),
            "called `BnbSolverSearchSession::expand` with level out of bounds: the len is {} but the level is {}",
            self.model.num_items(),
            level
        );

        let item_index = ItemIndex::new(level);
        let price = self.model.item_price(item_index);
        let cap = self.model.item_cap(item_index);
        self.model
            .committed_usage(node.production(), &mut self.solver.committed);

        let mut enqueued = 0usize;
        let mut command = SearchCommand::Continue;
        for qty in 0..=cap {
            if qty > 0 && qty % CANDIDATE_POLL_INTERVAL == 0 {
                command = self.monitor.search_command(&self.stats);
                if matches!(command, SearchCommand::Terminate(_)) {
                    break;
                }
            }

            if !fits(self.model, &self.solver.committed, item_index, qty) {
                self.stats.on_pruning_infeasible();
                self.monitor
                    .on_prune(&node, PruneReason::Infeasible, &self.stats);
                break;
            }

            let production = node.extended_production(qty);
            let revenue = node.revenue() + price * qty as f64;
            let bound = self.estimator.estimate(self.model, &production, revenue);
            let child = SearchNode::new(production, revenue, bound);

            if bound > self.incumbent.revenue() {
                self.solver.frontier.push(child);
                self.stats.on_child_enqueued();
                enqueued += 1;
            } else {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&child, PruneReason::BoundDominated, &self.stats);
            }
        }

        if enqueued > 0 {
            self.stats.on_depth_update(level as u64 + 1);
            self.stats
                .on_frontier_size(self.solver.frontier.peak_len() as u64);
        }
        self.monitor
            .on_children_enqueued(&node, enqueued, &self.stats);
        command
    }

    /// Installs a complete plan if it beats the incumbent.
    fn handle_complete_plan(&mut self, node: SearchNode) {
        let revenue = node.revenue();
        if self.incumbent.try_install(revenue, node.into_production()) {
            self.stats.on_solution_found();
            self.monitor
                .on_solution_found(self.incumbent.solution(), &self.stats);
        }
    }

    /// Finalize the solver result based on the incumbent
    /// and the termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize_result(self, reason: TerminationReason) -> BnbSolverOutcome {
        let solution = self.incumbent.into_solution();
        match reason {
            TerminationReason::OptimalityProven => BnbSolverOutcome::optimal(solution, self.stats),
            TerminationReason::Aborted(msg) => BnbSolverOutcome::aborted(solution, msg, self.stats),
        }
    }
}

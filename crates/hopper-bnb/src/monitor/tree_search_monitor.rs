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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait, `PruneReason` and `SearchCommand`
//! for observing and controlling the best-first search. Callbacks track the
//! solver lifecycle, and a monitor can stop the run via `SearchCommand`
//! (default: Continue).
//!
//! Lifecycle highlights
//! - enter → {command → step → prune | children enqueued | solution} → exit
//! - `BnbSolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded.
//! - `search_command` is polled once per main-loop iteration, before the pop.

use crate::{node::SearchNode, stats::BnbSolverStatistics};
use hopper_model::{model::Model, solution::Solution};

/// What the search should do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for discarding part of the search tree.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// A candidate quantity exceeds the remaining stock; larger ones are skipped too.
    Infeasible,
    /// The node's upper bound cannot beat the incumbent.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, model: &Model, statistics: &BnbSolverStatistics);
    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics);
    /// Called to determine the next action of the search.
    fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called after a node has been popped from the frontier.
    fn on_step(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics);
    /// Called when a popped node or a freshly generated child is pruned.
    /// For `PruneReason::Infeasible` the node is the parent whose candidate
    /// loop was cut.
    fn on_prune(
        &mut self,
        node: &SearchNode,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    );
    /// Called after `node` has been expanded and `count` children were enqueued.
    fn on_children_enqueued(
        &mut self,
        node: &SearchNode,
        count: usize,
        statistics: &BnbSolverStatistics,
    );
    /// Called when the incumbent improves.
    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics);
}

impl<M> TreeSearchMonitor for &mut M
where
    M: TreeSearchMonitor + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model, statistics: &BnbSolverStatistics) {
        (**self).on_enter_search(model, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics) -> SearchCommand {
        (**self).search_command(statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics) {
        (**self).on_step(node, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_prune(node, reason, statistics)
    }

    #[inline(always)]
    fn on_children_enqueued(
        &mut self,
        node: &SearchNode,
        count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        (**self).on_children_enqueued(node, count, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl std::fmt::Debug for dyn TreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn TreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TreeSearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_command_default_and_display() {
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate("node limit reached".into())),
            "Terminate: node limit reached"
        );
    }

    #[test]
    fn test_prune_reason_display() {
        assert_eq!(format!("{}", PruneReason::Infeasible), "Infeasible");
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
    }
}

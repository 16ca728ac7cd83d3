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

//! Node limit monitor for tree search
//!
//! `NodeLimitMonitor` terminates the search once the number of nodes popped
//! from the frontier reaches its budget. The best plan found so far is kept.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use hopper_model::{model::Model, solution::Solution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    max_nodes: u64,
}

impl NodeLimitMonitor {
    /// Creates a monitor that allows at most `max_nodes` explored nodes.
    #[inline]
    pub fn new(max_nodes: u64) -> Self {
        Self { max_nodes }
    }

    #[inline]
    pub fn max_nodes(&self) -> u64 {
        self.max_nodes
    }
}

impl std::fmt::Display for NodeLimitMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeLimitMonitor(max_nodes: {})", self.max_nodes)
    }
}

impl TreeSearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &BnbSolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}

    fn on_step(&mut self, _node: &SearchNode, _statistics: &BnbSolverStatistics) {}

    fn on_prune(
        &mut self,
        _node: &SearchNode,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_children_enqueued(
        &mut self,
        _node: &SearchNode,
        _count: usize,
        _statistics: &BnbSolverStatistics,
    ) {
    }

    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &BnbSolverStatistics) {}

    fn search_command(&mut self, statistics: &BnbSolverStatistics) -> SearchCommand {
        if statistics.nodes_explored >= self.max_nodes {
            return SearchCommand::Terminate("node limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

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

use std::time::Duration;

/// Statistics collected during a Hopper-BnB search.
#[derive(Debug, Clone, PartialEq)]
pub struct BnbSolverStatistics {
    /// Main-loop iterations, including the final one that terminated the search.
    pub steps: u64,
    /// Nodes popped from the frontier.
    pub nodes_explored: u64,
    /// Children pushed onto the frontier.
    pub children_enqueued: u64,
    /// Deepest level of any enqueued node.
    pub max_depth: u64,
    /// Largest frontier size observed.
    pub max_frontier_size: u64,
    /// Nodes or children discarded because their bound could not beat the incumbent.
    pub prunings_bound: u64,
    /// Candidate loops cut short by the first quantity that exceeds stock.
    pub prunings_infeasible: u64,
    /// Improvements of the incumbent.
    pub solutions_found: u64,
    /// Upper bound of the root node; the gap to the final revenue is the proof effort.
    pub root_upper_bound: f64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl Default for BnbSolverStatistics {
    fn default() -> Self {
        Self {
            steps: 0,
            nodes_explored: 0,
            children_enqueued: 0,
            max_depth: 0,
            max_frontier_size: 0,
            prunings_bound: 0,
            prunings_infeasible: 0,
            solutions_found: 0,
            root_upper_bound: 0.0,
            time_total: Duration::ZERO,
        }
    }
}

impl BnbSolverStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_child_enqueued(&mut self) {
        self.children_enqueued = self.children_enqueued.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: u64) {
        self.max_frontier_size = self.max_frontier_size.max(size);
    }

    /// Records a pruning event caused by the bound (at pop time or at enqueue time).
    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_root_upper_bound(&mut self, bound: f64) {
        self.root_upper_bound = bound;
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl std::fmt::Display for BnbSolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Hopper-BnB Solver Statistics:")?;
        writeln!(f, "  Steps:                 {}", self.steps)?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Children enqueued:     {}", self.children_enqueued)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Max frontier size:     {}", self.max_frontier_size)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Prunings (infeasible): {}", self.prunings_infeasible)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Root upper bound:      {:.4}", self.root_upper_bound)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

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

//! Periodic progress logging for tree search
//!
//! `LogTreeSearchMonitor` writes a progress line through the `log` facade at
//! `info` level whenever the configured interval has elapsed. The clock is
//! only read on nodes where `nodes_explored & clock_check_mask == 0`.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use hopper_model::{model::Model, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_revenue: Option<f64>,
}

impl LogTreeSearchMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            best_revenue: None,
        }
    }

    #[inline]
    pub fn log_interval(&self) -> Duration {
        self.log_interval
    }

    fn log_line(&mut self, node: &SearchNode, stats: &BnbSolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best = match self.best_revenue {
            Some(revenue) => format!("{:.2}", revenue),
            None => "-".to_string(),
        };

        log::info!(
            "{:>8.1}s | nodes {:>10} | depth {:>4} | best {:>12} | bound {:>12.2} | pruned {:>10}",
            elapsed,
            stats.nodes_explored,
            node.level(),
            best,
            node.upper_bound(),
            stats.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl Default for LogTreeSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 1023)
    }
}

impl std::fmt::Display for LogTreeSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {:?}, clock_check_mask: {})",
            self.log_interval, self.clock_check_mask
        )
    }
}

impl TreeSearchMonitor for LogTreeSearchMonitor {
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, _statistics: &BnbSolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_revenue = None;
        log::info!(
            "search started: {} items, {} resources",
            model.num_items(),
            model.num_resources()
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        log::info!(
            "search finished after {} nodes in {:.2?}",
            statistics.nodes_explored,
            self.start_time.elapsed()
        );
    }

    fn on_step(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(node, statistics);
        }
    }

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

    fn on_solution_found(&mut self, solution: &Solution, _statistics: &BnbSolverStatistics) {
        self.best_revenue = Some(solution.revenue());
        log::debug!("incumbent improved to {:.2}", solution.revenue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::tree_search_monitor::SearchCommand;
    use hopper_model::model::ModelBuilder;

    #[test]
    fn test_tracks_best_revenue_and_never_terminates() {
        let model = ModelBuilder::new(2, 1).build();
        let mut stats = BnbSolverStatistics::default();
        let mut monitor = LogTreeSearchMonitor::new(Duration::ZERO, 0);

        monitor.on_enter_search(&model, &stats);
        monitor.on_solution_found(&Solution::new(42.0, vec![1, 0]), &stats);
        assert_eq!(monitor.best_revenue, Some(42.0));

        stats.nodes_explored = 8;
        monitor.on_step(&SearchNode::root(50.0), &stats);
        assert_eq!(monitor.search_command(&stats), SearchCommand::Continue);
        monitor.on_exit_search(&stats);
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::new(Duration::from_millis(500), 15);
        assert_eq!(
            format!("{}", monitor),
            "LogTreeSearchMonitor(log_interval: 500ms, clock_check_mask: 15)"
        );
    }
}

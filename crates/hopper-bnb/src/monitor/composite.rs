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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. This lets you mix logging and early stopping without
//! coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    node::SearchNode,
    stats::BnbSolverStatistics,
};
use hopper_model::{model::Model, solution::Solution};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a> {
    monitors: Vec<Box<dyn TreeSearchMonitor + 'a>>,
}

impl<'a> Default for CompositeTreeSearchMonitor<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> std::fmt::Debug for CompositeTreeSearchMonitor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeTreeSearchMonitor")
            .field("monitors", &self.names())
            .finish()
    }
}

impl<'a> std::fmt::Display for CompositeTreeSearchMonitor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeTreeSearchMonitor([{}])", self.names())
    }
}

impl<'a> CompositeTreeSearchMonitor<'a> {
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with the specified capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> String {
        self.monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl<'a> FromIterator<Box<dyn TreeSearchMonitor + 'a>> for CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a> TreeSearchMonitor for CompositeTreeSearchMonitor<'a> {
    #[inline(always)]
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    #[inline(always)]
    fn on_enter_search(&mut self, model: &Model, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(model, statistics);
        }
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    #[inline(always)]
    fn search_command(&mut self, statistics: &BnbSolverStatistics) -> SearchCommand {
        for monitor in &mut self.monitors {
            let cmd = monitor.search_command(statistics);
            if !matches!(cmd, SearchCommand::Continue) {
                return cmd;
            }
        }
        SearchCommand::Continue
    }

    #[inline(always)]
    fn on_step(&mut self, node: &SearchNode, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(node, statistics);
        }
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        node: &SearchNode,
        reason: PruneReason,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_prune(node, reason, statistics);
        }
    }

    #[inline(always)]
    fn on_children_enqueued(
        &mut self,
        node: &SearchNode,
        count: usize,
        statistics: &BnbSolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_children_enqueued(node, count, statistics);
        }
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution, statistics: &BnbSolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, node_limit::NodeLimitMonitor};
    use hopper_model::model::ModelBuilder;

    /// Counts callbacks and answers with a fixed command.
    struct Recorder<'r> {
        name: &'static str,
        command: SearchCommand,
        polled: &'r std::cell::Cell<u32>,
    }

    impl<'r> TreeSearchMonitor for Recorder<'r> {
        fn name(&self) -> &str {
            self.name
        }
        fn on_enter_search(&mut self, _model: &Model, _statistics: &BnbSolverStatistics) {}
        fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics) {}
        fn search_command(&mut self, _statistics: &BnbSolverStatistics) -> SearchCommand {
            self.polled.set(self.polled.get() + 1);
            self.command.clone()
        }
        fn on_step(&mut self, _node: &SearchNode, _statistics: &BnbSolverStatistics) {}
        fn on_prune(&mut self, _: &SearchNode, _: PruneReason, _: &BnbSolverStatistics) {}
        fn on_children_enqueued(&mut self, _: &SearchNode, _: usize, _: &BnbSolverStatistics) {}
        fn on_solution_found(&mut self, _: &Solution, _: &BnbSolverStatistics) {}
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeTreeSearchMonitor::new();
        assert!(composite.is_empty());
        let stats = BnbSolverStatistics::default();
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
    }

    #[test]
    fn test_search_command_short_circuits_on_first_terminate() {
        let first = std::cell::Cell::new(0);
        let second = std::cell::Cell::new(0);

        let mut composite = CompositeTreeSearchMonitor::with_capacity(2);
        composite.add_monitor(Recorder {
            name: "first",
            command: SearchCommand::Terminate("stop".into()),
            polled: &first,
        });
        composite.add_monitor(Recorder {
            name: "second",
            command: SearchCommand::Continue,
            polled: &second,
        });

        let stats = BnbSolverStatistics::default();
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("stop".into())
        );
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn test_events_fan_out_to_all_children() {
        let polled = std::cell::Cell::new(0);
        let mut composite = CompositeTreeSearchMonitor::new();
        for name in ["a", "b"] {
            composite.add_monitor(Recorder {
                name,
                command: SearchCommand::Continue,
                polled: &polled,
                });
        }

        let model = ModelBuilder::new(1, 0).build();
        let stats = BnbSolverStatistics::default();
        composite.on_enter_search(&model, &stats);
        composite.on_solution_found(&Solution::idle(1), &stats);
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
        assert_eq!(polled.get(), 2);
        assert_eq!(format!("{}", composite), "CompositeTreeSearchMonitor([a, b])");
    }

    #[test]
    fn test_from_iter_and_limit_monitor() {
        let monitors: Vec<Box<dyn TreeSearchMonitor>> = vec![
            Box::new(NoOperationMonitor::new()),
            Box::new(NodeLimitMonitor::new(1)),
        ];
        let mut composite: CompositeTreeSearchMonitor = monitors.into_iter().collect();
        assert_eq!(composite.len(), 2);

        let mut stats = BnbSolverStatistics::default();
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);
        stats.nodes_explored = 1;
        assert!(matches!(
            composite.search_command(&stats),
            SearchCommand::Terminate(_)
        ));
    }
}

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

//! The planning pipeline: encode, search, assemble.

use crate::{
    config::SolverConfig,
    error::OptimizeError,
    report::{self, OptimizationReport},
};
use hopper_bnb::{
    bnb::BnbSolver,
    eval::fractional::FractionalBound,
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        node_limit::NodeLimitMonitor, time::TimeLimitMonitor,
    },
    result::TerminationReason,
};
use hopper_model::{
    encode::{Encoding, encode},
    record::{Item, Resource},
};
use std::time::Instant;

/// Initial frontier capacity of the solver.
const FRONTIER_CAPACITY: usize = 256;

/// Builds the monitor stack for one run: limits first, logging last.
fn build_monitor(config: &SolverConfig) -> CompositeTreeSearchMonitor<'static> {
    let mut monitor = CompositeTreeSearchMonitor::with_capacity(3);
    monitor.add_monitor(NodeLimitMonitor::new(config.max_nodes));
    monitor.add_monitor(TimeLimitMonitor::new(config.time_limit()));
    if let Some(interval) = config.log_interval() {
        monitor.add_monitor(LogTreeSearchMonitor::new(interval, 0));
    }
    monitor
}

/// Computes the revenue-maximizing production plan for `items` given the
/// stock of `resources`.
///
/// Items without a positive requirement never enter the plan. With no
/// plannable item or no resource the report has zero revenue and an empty
/// plan. When the node or time limit of `config` stops the search, the best
/// plan found so far is returned with `proven_optimal == false`.
///
/// # Errors
///
/// Returns `OptimizeError::Encode` for invalid records (non-positive price,
/// negative stock or requirement, unknown resources under the `reject`
/// policy) and the decimal errors of report assembly.
pub fn optimize(
    items: &[Item],
    resources: &[Resource],
    config: &SolverConfig,
) -> Result<OptimizationReport, OptimizeError> {
    let start = Instant::now();

    let problem = match encode(items, resources, config.unresolved_requirements)? {
        Encoding::Empty => {
            log::debug!(
                "nothing to plan ({} items, {} resources); returning the empty plan",
                items.len(),
                resources.len()
            );
            return Ok(report::empty_report(resources, start.elapsed()));
        }
        Encoding::Encoded(problem) => problem,
    };

    let model = problem.model();
    log::debug!(
        "planning {} of {} items over {} resources with {}",
        model.num_items(),
        items.len(),
        model.num_resources(),
        config
    );

    let mut solver = BnbSolver::preallocated(FRONTIER_CAPACITY, model.num_resources());
    let mut estimator = FractionalBound::preallocated(model.num_resources());
    let outcome = solver.solve(model, &mut estimator, build_monitor(config));

    if let TerminationReason::Aborted(reason) = outcome.termination_reason() {
        log::warn!(
            "search stopped early ({}); returning the best plan found after {} nodes",
            reason,
            outcome.statistics().nodes_explored
        );
    }

    let report = report::assemble(
        problem.items(),
        resources,
        model,
        outcome.solution(),
        outcome.is_proven_optimal(),
        start.elapsed(),
    )?;

    log::info!(
        "planned revenue {} in {}ms ({} nodes, optimal: {})",
        report.total_revenue,
        report.computation_time_ms,
        outcome.statistics().nodes_explored,
        report.proven_optimal
    );

    Ok(report)
}

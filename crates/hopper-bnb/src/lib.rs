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

//! Hopper-BnB: best-first branch-and-bound for production planning
//!
//! Exact solver for the multi-dimensional integer knapsack behind Hopper:
//! choose a non-negative integer quantity per item so that no resource stock
//! is exceeded and total revenue is maximal.
//!
//! Core flow
//! - Provide a `hopper_model::model::Model`.
//! - Choose an `eval::UpperBoundEstimator` (admissible revenue bound).
//! - Choose a `monitor::TreeSearchMonitor` (limits, logging, or a composite).
//! - Run `bnb::BnbSolver::solve`.
//!
//! Design highlights
//! - Best-first: the frontier is a binary heap ordered by upper bound.
//! - Items are decided in model order; the node at depth `k` fixes the
//!   quantities of items `0..k`.
//! - Nodes are immutable snapshots that own their production prefix.
//! - Limits are monitors polled on every iteration, so a truncated run
//!   returns the incumbent together with `TerminationReason::Aborted`.
//!
//! Assumptions and guarantees
//! - Upper bounds must be admissible (never below the best completion);
//!   pruning relies on this for optimality.
//! - Deterministic for a deterministic estimator and identical input.
//!
//! Module map
//! - `bnb`: the solver engine and search session.
//! - `eval`: bound estimators and an exhaustive admissibility checker.
//! - `monitor`: tree-search monitors (limits, log, composite, no-op).
//! - `node`: search nodes and their frontier ordering.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod eval;
mod frontier;
mod incumbent;
pub mod monitor;
pub mod node;
pub mod result;
pub mod stats;

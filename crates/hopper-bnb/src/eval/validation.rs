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

//! Validation utilities for upper-bound estimators.
//!
//! `is_admissible_exhaustive` walks every feasible prefix of a small model in
//! depth-first order, computes the best revenue reachable below each prefix
//! by enumeration, and checks that the estimator never reports less. A node
//! budget caps the walk; subtrees beyond the budget are not expanded, which
//! can only make the reference optimum smaller, so a reported violation is
//! always a real one.
//!
//! `enumerate_optimum` is the same enumeration without an estimator and
//! serves as the reference solver in tests.

use crate::eval::estimator::UpperBoundEstimator;
use hopper_core::num::{EPSILON, within_limit};
use hopper_model::{index::ItemIndex, model::Model, solution::Solution};

/// Relative slack granted to estimates when comparing against enumerated optima.
const ADMISSIBILITY_TOLERANCE: f64 = 1e-7;

/// Depth-first enumerator over feasible prefixes.
struct Enumerator<'m> {
    model: &'m Model,
    prefix: Vec<u64>,
    visited: usize,
    budget: usize,
}

impl<'m> Enumerator<'m> {
    fn new(model: &'m Model, budget: usize) -> Self {
        Self {
            model,
            prefix: Vec::with_capacity(model.num_items()),
            visited: 0,
            budget,
        }
    }

    /// Returns `true` if `qty` units of `item_index` fit on top of `committed`.
    fn fits(&self, committed: &[f64], item_index: ItemIndex, qty: u64) -> bool {
        self.model.item_consumers(item_index).iter().all(|consumer| {
            let r = consumer.resource();
            within_limit(
                committed[r.get()] + qty as f64 * consumer.amount(),
                self.model.resource_stock(r),
            )
        })
    }

    /// Visits the subtree below the current prefix and returns the best total
    /// revenue found together with its production vector. `check` is called
    /// for every visited prefix with the best revenue of its subtree; a
    /// `false` answer aborts the walk.
    fn walk<F>(&mut self, revenue: f64, check: &mut F) -> Option<(f64, Vec<u64>)>
    where
        F: FnMut(&Model, &[u64], f64, f64) -> bool,
    {
        self.visited = self.visited.saturating_add(1);
        let level = self.prefix.len();

        if level == self.model.num_items() {
            if !check(self.model, self.prefix.as_slice(), revenue, revenue) {
                return None;
            }
            return Some((revenue, self.prefix.clone()));
        }

        let item_index = ItemIndex::new(level);
        let price = self.model.item_price(item_index);
        let mut committed = vec![0.0; self.model.num_resources()];
        self.model.committed_usage(&self.prefix, &mut committed);

        // Bounded by feasibility alone, not by `item_cap`.
        let limit = if self.model.item_consumers(item_index).is_empty() {
            0
        } else {
            u64::MAX
        };

        // Quantity zero always fits, so `best` is set after the first round.
        let mut best: Option<(f64, Vec<u64>)> = None;
        for qty in 0..=limit {
            if qty > 0 && self.visited >= self.budget {
                break;
            }
            if !self.fits(&committed, item_index, qty) {
                break;
            }

            self.prefix.push(qty);
            let child = self.walk(revenue + price * qty as f64, check);
            self.prefix.pop();

            let child = child?;
            if best.as_ref().is_none_or(|(b, _)| child.0 > *b) {
                best = Some(child);
            }
        }

        let best = best?;
        if !check(self.model, self.prefix.as_slice(), revenue, best.0) {
            return None;
        }
        Some(best)
    }
}

/// Checks that `estimator` never underestimates the best completion of any
/// feasible prefix of `model`, visiting at most roughly `max_nodes` prefixes.
///
/// Returns `true` if no violation was found.
pub fn is_admissible_exhaustive<E>(estimator: &mut E, model: &Model, max_nodes: usize) -> bool
where
    E: UpperBoundEstimator + ?Sized,
{
    let mut enumerator = Enumerator::new(model, max_nodes.max(1));
    let mut check = |model: &Model, prefix: &[u64], revenue: f64, best: f64| {
        let estimate = estimator.estimate(model, prefix, revenue);
        let slack = ADMISSIBILITY_TOLERANCE * best.abs().max(1.0) + EPSILON;
        estimate + slack >= best
    };
    enumerator.walk(0.0, &mut check).is_some()
}

/// Returns the optimal plan of `model` found by full enumeration.
///
/// Ties are broken towards the lexicographically smallest production vector.
/// Only suitable for small models; the walk is exponential in the number of
/// items.
pub fn enumerate_optimum(model: &Model) -> Solution {
    let mut enumerator = Enumerator::new(model, usize::MAX);
    let mut accept_all = |_: &Model, _: &[u64], _: f64, _: f64| true;
    match enumerator.walk(0.0, &mut accept_all) {
        Some((revenue, production)) if revenue > 0.0 => Solution::new(revenue, production),
        _ => Solution::idle(model.num_items()),
    }
}

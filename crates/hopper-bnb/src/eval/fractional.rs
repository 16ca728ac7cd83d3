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

//! Fractional-relaxation upper bound
//!
//! For a node at depth `k`, the remaining stock is the full stock minus
//! what the decided prefix commits. Each undecided item then gets the largest
//! fractional quantity that fits into that remaining stock on its own:
//!
//! `units(i) = min over consumers j of remaining[j] / consumption[j][i]`
//!
//! and the bound is the prefix revenue plus `sum price(i) * units(i)`.
//!
//! Every undecided item is measured against the same remaining snapshot. The
//! stock is deliberately not depleted from one item to the next: items
//! compete for shared resources, and charging them sequentially can drop the
//! estimate below a reachable completion. Items without consumers have a cap
//! of zero and contribute nothing.

use crate::eval::estimator::UpperBoundEstimator;
use hopper_core::num::EPSILON;
use hopper_model::{index::ItemIndex, model::Model};

#[derive(Debug, Clone, Default)]
pub struct FractionalBound {
    remaining: Vec<f64>,
}

impl FractionalBound {
    #[inline]
    pub fn new() -> Self {
        Self {
            remaining: Vec::new(),
        }
    }

    /// Creates an estimator with scratch space for `num_resources` resources.
    #[inline]
    pub fn preallocated(num_resources: usize) -> Self {
        Self {
            remaining: Vec::with_capacity(num_resources),
        }
    }

    /// Fills the scratch buffer with `stock - committed(prefix)`.
    fn load_remaining(&mut self, model: &Model, prefix: &[u64]) {
        self.remaining.clear();
        self.remaining.resize(model.num_resources(), 0.0);
        model.committed_usage(prefix, &mut self.remaining);
        for (remaining, &stock) in self.remaining.iter_mut().zip(model.stock()) {
            *remaining = stock - *remaining;
        }
    }

    /// Returns the largest fractional quantity of `item_index` that fits
    /// into the remaining snapshot, or `0.0` if the item consumes nothing.
    fn fractional_units(&self, model: &Model, item_index: ItemIndex) -> f64 {
        let consumers = model.item_consumers(item_index);
        if consumers.is_empty() {
            return 0.0;
        }

        consumers
            .iter()
            .map(|consumer| {
                (self.remaining[consumer.resource().get()] + EPSILON) / consumer.amount()
            })
            .fold(f64::INFINITY, f64::min)
    }
}

impl UpperBoundEstimator for FractionalBound {
    fn name(&self) -> &str {
        "FractionalBound"
    }

    fn estimate(&mut self, model: &Model, prefix: &[u64], revenue: f64) -> f64 {
        debug_assert!(
            prefix.len() <= model.num_items(),
            "called `FractionalBound::estimate` with prefix out of bounds: the len is {} but the model has {} items",
            prefix.len(),
            model.num_items()
        );

        self.load_remaining(model, prefix);

        let mut bound = revenue;
        for item in prefix.len()..model.num_items() {
            let item_index = ItemIndex::new(item);
            let units = self.fractional_units(model, item_index);
            if units > 0.0 {
                bound += model.item_price(item_index) * units;
            }
        }
        bound
    }
}

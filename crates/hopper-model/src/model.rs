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

//! Dense encoding of a production planning instance.
//!
//! A `Model` stores everything the search engine touches in flat `f64`
//! vectors:
//! - `prices[item]`: revenue per produced unit.
//! - `stock[resource]`: available quantity of each resource.
//! - `consumption[resource * num_items + item]`: per-unit consumption, the
//!   `m x n` consumption matrix in row-major order.
//! - `caps[item]`: the largest quantity of `item` producible if it alone
//!   consumed the stock, `min_j floor((stock[j] + EPSILON) / consumption[j][item])`
//!   over the resources it consumes, `0` if it consumes none. The tolerance
//!   is the one the feasibility test uses, so `0.3 / 0.1` still yields `3`.
//! - `consumers[item]`: the sparse column of positive consumption entries,
//!   so that per-item loops skip resources the item never touches.
//!
//! Construction goes through `ModelBuilder`; the builder derives caps and
//! sparse columns in `build`.

use crate::index::{ItemIndex, ResourceIndex};
use hopper_core::num::{EPSILON, floor_count, is_positive};
use smallvec::SmallVec;

/// A positive consumption entry of an item's column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Consumer {
    resource: ResourceIndex,
    amount: f64,
}

impl Consumer {
    #[inline(always)]
    pub fn resource(&self) -> ResourceIndex {
        self.resource
    }

    /// Quantity of the resource consumed by one unit of the item.
    #[inline(always)]
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// The sparse consumption column of one item.
pub type ConsumerColumn = SmallVec<[Consumer; 4]>;

#[inline(always)]
fn flatten_index(num_items: usize, resource_index: ResourceIndex, item_index: ItemIndex) -> usize {
    resource_index.get() * num_items + item_index.get()
}

/// The encoded production planning problem.
#[derive(Clone, PartialEq)]
pub struct Model {
    prices: Vec<f64>,                // len = num_items
    stock: Vec<f64>,                 // len = num_resources
    consumption: Vec<f64>,           // len = num_resources * num_items
    caps: Vec<u64>,                  // len = num_items
    consumers: Vec<ConsumerColumn>,  // len = num_items
}

impl Model {
    /// Returns the number of items (columns) in the model.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.prices.len()
    }

    /// Returns the number of resources (rows) in the model.
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.stock.len()
    }

    /// Returns the price vector.
    #[inline]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Returns the stock vector.
    #[inline]
    pub fn stock(&self) -> &[f64] {
        &self.stock
    }

    /// Returns the per-item cap vector.
    #[inline]
    pub fn caps(&self) -> &[u64] {
        &self.caps
    }

    /// Returns the price of a single unit of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is not in `0..num_items()`.
    #[inline]
    pub fn item_price(&self, item_index: ItemIndex) -> f64 {
        let index = item_index.get();
        debug_assert!(
            index < self.num_items(),
            "called `Model::item_price` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );

        self.prices[index]
    }

    /// Returns the single-item production cap of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is not in `0..num_items()`.
    #[inline]
    pub fn item_cap(&self, item_index: ItemIndex) -> u64 {
        let index = item_index.get();
        debug_assert!(
            index < self.num_items(),
            "called `Model::item_cap` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );

        self.caps[index]
    }

    /// Returns the positive consumption entries of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is not in `0..num_items()`.
    #[inline]
    pub fn item_consumers(&self, item_index: ItemIndex) -> &[Consumer] {
        let index = item_index.get();
        debug_assert!(
            index < self.num_items(),
            "called `Model::item_consumers` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );

        &self.consumers[index]
    }

    /// Returns the available stock of `resource_index`.
    ///
    /// # Panics
    ///
    /// Panics if `resource_index` is not in `0..num_resources()`.
    #[inline]
    pub fn resource_stock(&self, resource_index: ResourceIndex) -> f64 {
        let index = resource_index.get();
        debug_assert!(
            index < self.num_resources(),
            "called `Model::resource_stock` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            index
        );

        self.stock[index]
    }

    /// Returns the quantity of `resource_index` consumed by one unit of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn consumption(&self, resource_index: ResourceIndex, item_index: ItemIndex) -> f64 {
        debug_assert!(
            resource_index.get() < self.num_resources(),
            "called `Model::consumption` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources(),
            resource_index.get()
        );
        debug_assert!(
            item_index.get() < self.num_items(),
            "called `Model::consumption` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            item_index.get()
        );

        self.consumption[flatten_index(self.num_items(), resource_index, item_index)]
    }

    /// Writes the per-resource consumption committed by `quantities` into `out`.
    ///
    /// `quantities[i]` is the produced quantity of item `i`; a prefix shorter
    /// than `num_items()` leaves the remaining items out of the sum.
    ///
    /// # Panics
    ///
    /// Panics if `quantities` is longer than `num_items()` or `out` is not
    /// exactly `num_resources()` long.
    #[inline]
    pub fn committed_usage(&self, quantities: &[u64], out: &mut [f64]) {
        assert!(
            quantities.len() <= self.num_items(),
            "called `Model::committed_usage` with too many quantities: the len is {} but the model has {} items",
            quantities.len(),
            self.num_items()
        );
        assert_eq!(
            out.len(),
            self.num_resources(),
            "called `Model::committed_usage` with an output buffer of the wrong length"
        );

        out.fill(0.0);
        for (item, &quantity) in quantities.iter().enumerate() {
            if quantity == 0 {
                continue;
            }
            let quantity = quantity as f64;
            for consumer in &self.consumers[item] {
                out[consumer.resource.get()] += consumer.amount * quantity;
            }
        }
    }

    /// Returns the revenue of producing `quantities` (a prefix is allowed).
    #[inline]
    pub fn revenue_of(&self, quantities: &[u64]) -> f64 {
        quantities
            .iter()
            .zip(&self.prices)
            .map(|(&q, &p)| p * q as f64)
            .sum()
    }

    /// Returns `true` if `quantities` respects every stock up to `EPSILON`.
    pub fn is_feasible(&self, quantities: &[u64]) -> bool {
        let mut usage = vec![0.0; self.num_resources()];
        self.committed_usage(quantities, &mut usage);
        usage
            .iter()
            .zip(&self.stock)
            .all(|(&used, &available)| hopper_core::num::within_limit(used, available))
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("num_items", &self.num_items())
            .field("num_resources", &self.num_resources())
            .field("prices", &self.prices)
            .field("stock", &self.stock)
            .field("caps", &self.caps)
            .finish()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_items: {}, num_resources: {})",
            self.num_items(),
            self.num_resources()
        )
    }
}

/// Builder for `Model`.
///
/// Every price, stock and consumption entry starts at zero: an item without
/// consumption entries is unconstrained by stock, which gives it a cap of `0`
/// and keeps it out of the search.
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    num_items: usize,
    num_resources: usize,
    prices: Vec<f64>,
    stock: Vec<f64>,
    consumption: Vec<f64>,
}

impl ModelBuilder {
    /// Creates a builder for `num_items` items and `num_resources` resources.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hopper_model::model::ModelBuilder;
    /// let model = ModelBuilder::new(3, 2).build();
    /// assert_eq!(model.num_items(), 3);
    /// assert_eq!(model.num_resources(), 2);
    /// ```
    pub fn new(num_items: usize, num_resources: usize) -> Self {
        Self {
            num_items,
            num_resources,
            prices: vec![0.0; num_items],
            stock: vec![0.0; num_resources],
            consumption: vec![0.0; num_items * num_resources],
        }
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.num_items
    }

    #[inline]
    pub fn num_resources(&self) -> usize {
        self.num_resources
    }

    /// Sets the unit price of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is not in `0..num_items()`.
    #[inline]
    pub fn set_item_price(&mut self, item_index: ItemIndex, price: f64) -> &mut Self {
        self.prices[item_index.get()] = price;
        self
    }

    /// Sets the available stock of `resource_index`.
    ///
    /// # Panics
    ///
    /// Panics if `resource_index` is not in `0..num_resources()`.
    #[inline]
    pub fn set_resource_stock(&mut self, resource_index: ResourceIndex, stock: f64) -> &mut Self {
        self.stock[resource_index.get()] = stock;
        self
    }

    /// Sets the quantity of `resource_index` consumed by one unit of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn set_consumption(
        &mut self,
        resource_index: ResourceIndex,
        item_index: ItemIndex,
        amount: f64,
    ) -> &mut Self {
        assert!(
            resource_index.get() < self.num_resources,
            "called `ModelBuilder::set_consumption` with resource index out of bounds: the len is {} but the index is {}",
            self.num_resources,
            resource_index.get()
        );
        assert!(
            item_index.get() < self.num_items,
            "called `ModelBuilder::set_consumption` with item index out of bounds: the len is {} but the index is {}",
            self.num_items,
            item_index.get()
        );

        let flat_index = flatten_index(self.num_items, resource_index, item_index);
        self.consumption[flat_index] = amount;
        self
    }

    /// Builds the `Model`, deriving sparse columns and caps.
    pub fn build(self) -> Model {
        let consumers: Vec<ConsumerColumn> = ItemIndex::range(self.num_items)
            .map(|item_index| {
                ResourceIndex::range(self.num_resources)
                    .filter_map(|resource_index| {
                        let amount = self.consumption
                            [flatten_index(self.num_items, resource_index, item_index)];
                        is_positive(amount).then_some(Consumer {
                            resource: resource_index,
                            amount,
                        })
                    })
                    .collect()
            })
            .collect();

        let caps: Vec<u64> = consumers
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|c| floor_count((self.stock[c.resource.get()] + EPSILON) / c.amount))
                    .min()
                    .unwrap_or(0)
            })
            .collect();

        Model {
            prices: self.prices,
            stock: self.stock,
            consumption: self.consumption,
            caps,
            consumers,
        }
    }
}

impl std::fmt::Display for ModelBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ModelBuilder(num_items: {}, num_resources: {})",
            self.num_items, self.num_resources
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ii(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    fn ri(i: usize) -> ResourceIndex {
        ResourceIndex::new(i)
    }

    #[test]
    fn test_flatten_index_is_row_major_by_resource() {
        assert_eq!(flatten_index(4, ri(0), ii(0)), 0);
        assert_eq!(flatten_index(4, ri(0), ii(3)), 3);
        assert_eq!(flatten_index(4, ri(1), ii(0)), 4);
        assert_eq!(flatten_index(4, ri(2), ii(1)), 9);
    }

    #[test]
    fn test_cap_uses_the_binding_resource() {
        let mut builder = ModelBuilder::new(1, 2);
        builder
            .set_item_price(ii(0), 10.0)
            .set_resource_stock(ri(0), 1000.0)
            .set_resource_stock(ri(1), 500.0)
            .set_consumption(ri(0), ii(0), 100.0)
            .set_consumption(ri(1), ii(0), 100.0);
        let model = builder.build();

        assert_eq!(model.item_cap(ii(0)), 5);
        assert_eq!(model.item_consumers(ii(0)).len(), 2);
    }

    #[test]
    fn test_cap_keeps_units_lost_to_float_division() {
        let mut builder = ModelBuilder::new(3, 3);
        builder
            .set_resource_stock(ri(0), 0.3)
            .set_resource_stock(ri(1), 0.7)
            .set_resource_stock(ri(2), 0.6)
            .set_consumption(ri(0), ii(0), 0.1)
            .set_consumption(ri(1), ii(1), 0.1)
            .set_consumption(ri(2), ii(2), 0.2);
        let model = builder.build();

        assert!(0.3_f64 / 0.1 < 3.0);
        assert_eq!(model.item_cap(ii(0)), 3);
        assert_eq!(model.item_cap(ii(1)), 7);
        assert_eq!(model.item_cap(ii(2)), 3);
        assert!(model.is_feasible(&[3, 7, 3]));
    }

    #[test]
    fn test_cap_ignores_resources_the_item_does_not_consume() {
        let mut builder = ModelBuilder::new(2, 2);
        builder
            .set_resource_stock(ri(0), 0.0)
            .set_resource_stock(ri(1), 30.0)
            .set_consumption(ri(0), ii(0), 1.0)
            .set_consumption(ri(1), ii(1), 4.0);
        let model = builder.build();

        assert_eq!(model.item_cap(ii(0)), 0);
        assert_eq!(model.item_cap(ii(1)), 7);
    }

    #[test]
    fn test_item_without_consumption_has_zero_cap_and_empty_column() {
        let mut builder = ModelBuilder::new(1, 1);
        builder.set_item_price(ii(0), 99.0).set_resource_stock(ri(0), 10.0);
        let model = builder.build();

        assert_eq!(model.item_cap(ii(0)), 0);
        assert!(model.item_consumers(ii(0)).is_empty());
    }

    #[test]
    fn test_committed_usage_and_revenue_of_prefix() {
        let mut builder = ModelBuilder::new(3, 2);
        builder
            .set_item_price(ii(0), 2.0)
            .set_item_price(ii(1), 3.0)
            .set_item_price(ii(2), 5.0)
            .set_resource_stock(ri(0), 100.0)
            .set_resource_stock(ri(1), 100.0)
            .set_consumption(ri(0), ii(0), 1.0)
            .set_consumption(ri(1), ii(1), 2.0)
            .set_consumption(ri(0), ii(2), 3.0)
            .set_consumption(ri(1), ii(2), 4.0);
        let model = builder.build();

        let mut usage = vec![0.0; 2];
        model.committed_usage(&[4, 5], &mut usage);
        assert_eq!(usage, vec![4.0, 10.0]);
        assert_eq!(model.revenue_of(&[4, 5]), 23.0);

        model.committed_usage(&[4, 5, 2], &mut usage);
        assert_eq!(usage, vec![10.0, 18.0]);
        assert!(model.is_feasible(&[4, 5, 2]));
        assert!(!model.is_feasible(&[0, 0, 34]));
    }

    #[test]
    fn test_tiny_consumption_is_treated_as_absent() {
        let mut builder = ModelBuilder::new(1, 1);
        builder
            .set_resource_stock(ri(0), 1.0)
            .set_consumption(ri(0), ii(0), 1e-12);
        let model = builder.build();

        assert!(model.item_consumers(ii(0)).is_empty());
        assert_eq!(model.consumption(ri(0), ii(0)), 1e-12);
    }

    #[test]
    fn test_display() {
        let model = ModelBuilder::new(3, 4).build();
        assert_eq!(format!("{}", model), "Model(num_items: 3, num_resources: 4)");
    }
}

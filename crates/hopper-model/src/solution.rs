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

use crate::index::ItemIndex;

/// A complete production plan in the encoded item order.
///
/// `quantities[i]` is the number of units of item `i` to produce and
/// `revenue` the floating-point revenue the search accumulated for it.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    revenue: f64,
    quantities: Vec<u64>,
}

impl Solution {
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(revenue: f64, quantities: Vec<u64>) -> Self {
        Self {
            revenue,
            quantities,
        }
    }

    /// The do-nothing plan: zero units of each of `num_items` items.
    #[inline]
    pub fn idle(num_items: usize) -> Self {
        Self {
            revenue: 0.0,
            quantities: vec![0; num_items],
        }
    }

    /// Returns the planned quantity of `item_index`.
    ///
    /// # Panics
    ///
    /// Panics if `item_index` is out of bounds.
    #[inline]
    pub fn quantity(&self, item_index: ItemIndex) -> u64 {
        let index = item_index.get();
        debug_assert!(
            index < self.num_items(),
            "called `Solution::quantity` with item index out of bounds: the len is {} but the index is {}",
            self.num_items(),
            index
        );

        self.quantities[index]
    }

    #[inline]
    pub fn num_items(&self) -> usize {
        self.quantities.len()
    }

    #[inline]
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    #[inline]
    pub fn quantities(&self) -> &[u64] {
        &self.quantities
    }

    #[inline]
    pub fn into_quantities(self) -> Vec<u64> {
        self.quantities
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Revenue: {:.2}", self.revenue)?;
        writeln!(f)?;

        if self.quantities.iter().all(|&q| q == 0) {
            writeln!(f, "   (Nothing produced)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<12}", "Item", "Quantity")?;
        writeln!(f, "   {:-<10}-+-{:-<12}", "", "")?;
        for (item, quantity) in self.quantities.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<12}", item, quantity)?;
        }

        Ok(())
    }
}

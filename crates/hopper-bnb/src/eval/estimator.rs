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

use hopper_model::model::Model;

/// A strategy for bounding the revenue reachable from a partial plan.
///
/// The solver calls `estimate` for the root and for every child it creates.
/// `prefix` holds the quantities already decided for items `0..prefix.len()`
/// and `revenue` is their revenue. The returned value is the bound on the
/// total revenue of any completion, so it is never below `revenue`.
pub trait UpperBoundEstimator {
    /// Returns the name of the estimator.
    fn name(&self) -> &str;

    /// Returns an admissible upper bound on the total revenue of any
    /// feasible completion of `prefix`.
    ///
    /// # Panics
    ///
    /// May panic if `prefix` is longer than `model.num_items()`.
    fn estimate(&mut self, model: &Model, prefix: &[u64], revenue: f64) -> f64;
}

impl<E> UpperBoundEstimator for &mut E
where
    E: UpperBoundEstimator + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn estimate(&mut self, model: &Model, prefix: &[u64], revenue: f64) -> f64 {
        (**self).estimate(model, prefix, revenue)
    }
}

impl std::fmt::Debug for dyn UpperBoundEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UpperBoundEstimator({})", self.name())
    }
}

impl std::fmt::Display for dyn UpperBoundEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UpperBoundEstimator({})", self.name())
    }
}

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

//! Upper-bound estimation for production planning
//!
//! Provides the revenue bounds used by the best-first solver to order and
//! prune nodes.
//!
//! Admissibility requirement:
//! - Every `UpperBoundEstimator` must be admissible: the estimate for a node
//!   must never fall below the best revenue reachable from it. The solver
//!   discards nodes whose bound does not beat the incumbent, so an estimate
//!   that is too low silently loses optima. Use
//!   `validation::is_admissible_exhaustive` to check custom estimators on
//!   small models.
//!
//! Submodules:
//! - `estimator`: the `UpperBoundEstimator` trait.
//! - `fractional`: the fractional-relaxation bound.
//! - `validation`: exhaustive admissibility checks and a brute-force optimum.

pub mod estimator;
pub mod fractional;
pub mod validation;

pub use estimator::UpperBoundEstimator;
pub use fractional::FractionalBound;

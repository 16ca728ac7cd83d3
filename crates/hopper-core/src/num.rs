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

//! # Numeric Tolerance
//!
//! All derived quantities of the planner (committed consumption, remaining
//! stock, fractional allowances) are computed in `f64`. Comparing usage
//! against stock therefore needs a fixed tolerance so that accumulated
//! rounding noise does not turn an exactly exhausted resource into an
//! infeasible one.

use num_traits::{Float, ToPrimitive};

/// Absolute tolerance applied when comparing usage against stock.
pub const EPSILON: f64 = 1e-9;

/// Returns `true` if `value <= limit` up to `EPSILON`.
///
/// # Examples
///
/// ```rust
/// # use hopper_core::num::within_limit;
/// assert!(within_limit(0.1 + 0.2, 0.3));
/// assert!(!within_limit(0.31, 0.3));
/// ```
#[inline(always)]
pub fn within_limit<F>(value: F, limit: F) -> bool
where
    F: Float,
{
    value <= limit + F::from(EPSILON).unwrap_or_else(F::epsilon)
}

/// Returns `true` if `value` is strictly positive beyond `EPSILON`.
///
/// Consumption entries at or below the tolerance are treated as absent.
#[inline(always)]
pub fn is_positive<F>(value: F) -> bool
where
    F: Float,
{
    value > F::from(EPSILON).unwrap_or_else(F::epsilon)
}

/// Converts a non-negative float quotient to an integer count, rounding
/// towards zero and saturating at `u64::MAX`.
///
/// Negative and `NaN` inputs yield `0`.
///
/// # Examples
///
/// ```rust
/// # use hopper_core::num::floor_count;
/// assert_eq!(floor_count(5.999), 5);
/// assert_eq!(floor_count(-1.0), 0);
/// assert_eq!(floor_count(f64::INFINITY), u64::MAX);
/// ```
#[inline]
pub fn floor_count<F>(value: F) -> u64
where
    F: Float + ToPrimitive,
{
    if value.is_nan() || value <= F::zero() {
        return 0;
    }
    value.floor().to_u64().unwrap_or(u64::MAX)
}

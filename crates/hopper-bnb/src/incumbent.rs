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

//! Incumbent bookkeeping for the best-first search.
//!
//! The incumbent starts as the do-nothing plan, which is always feasible
//! and earns nothing. It is replaced only by a complete plan with strictly
//! higher revenue, so its revenue never decreases during a run.

use hopper_model::solution::Solution;

#[derive(Clone, Debug, PartialEq)]
pub struct Incumbent {
    solution: Solution,
}

impl Incumbent {
    /// Creates the idle incumbent for a model with `num_items` items.
    #[inline]
    pub fn idle(num_items: usize) -> Self {
        Self {
            solution: Solution::idle(num_items),
        }
    }

    /// Returns the revenue every open node has to beat.
    #[inline(always)]
    pub fn revenue(&self) -> f64 {
        self.solution.revenue()
    }

    #[inline]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Installs `production` if `revenue` is strictly better than the
    /// current incumbent. Returns whether it was installed.
    #[inline]
    pub fn try_install(&mut self, revenue: f64, production: Vec<u64>) -> bool {
        debug_assert_eq!(
            production.len(),
            self.solution.num_items(),
            "called `Incumbent::try_install` with an incomplete production vector"
        );

        if revenue > self.solution.revenue() {
            self.solution = Solution::new(revenue, production);
            return true;
        }
        false
    }

    #[inline]
    pub fn into_solution(self) -> Solution {
        self.solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_incumbent_earns_nothing() {
        let incumbent = Incumbent::idle(3);
        assert_eq!(incumbent.revenue(), 0.0);
        assert_eq!(incumbent.solution().quantities(), &[0, 0, 0]);
    }

    #[test]
    fn test_only_strict_improvements_are_installed() {
        let mut incumbent = Incumbent::idle(2);

        assert!(incumbent.try_install(100.0, vec![2, 0]));
        assert!(!incumbent.try_install(100.0, vec![0, 5]));
        assert!(!incumbent.try_install(90.0, vec![1, 1]));
        assert_eq!(incumbent.solution().quantities(), &[2, 0]);

        assert!(incumbent.try_install(150.0, vec![0, 5]));
        assert_eq!(incumbent.into_solution().quantities(), &[0, 5]);
    }

    #[test]
    fn test_zero_revenue_never_replaces_idle_plan() {
        let mut incumbent = Incumbent::idle(1);
        assert!(!incumbent.try_install(0.0, vec![0]));
    }
}

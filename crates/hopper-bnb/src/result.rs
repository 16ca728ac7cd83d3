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

use crate::stats::BnbSolverStatistics;
use hopper_model::solution::Solution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The frontier was exhausted: the returned plan is optimal.
    OptimalityProven,
    /// A monitor stopped the search (node limit, time limit, ...).
    /// The string describes why; the returned plan is the best found so far.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
///
/// Always carries a plan: the do-nothing plan is feasible for every model,
/// so even a search stopped before its first step has an answer.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome {
    solution: Solution,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics,
}

impl BnbSolverOutcome {
    #[inline]
    pub fn optimal(solution: Solution, statistics: BnbSolverStatistics) -> Self {
        Self {
            solution,
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(solution: Solution, reason: R, statistics: BnbSolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            solution,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the best plan found.
    #[inline]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[inline]
    pub fn into_solution(self) -> Solution {
        self.solution
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics {
        &self.statistics
    }

    /// Returns `true` if the search exhausted its frontier.
    #[inline]
    pub fn is_proven_optimal(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::OptimalityProven)
    }
}

impl std::fmt::Display for BnbSolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.solution)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> BnbSolverStatistics {
        BnbSolverStatistics::default()
    }

    #[test]
    fn test_optimal_outcome_is_proven() {
        let outcome = BnbSolverOutcome::optimal(Solution::new(150.0, vec![0, 5]), stats());
        assert!(outcome.is_proven_optimal());
        assert_eq!(outcome.termination_reason(), &TerminationReason::OptimalityProven);
        assert_eq!(outcome.solution().revenue(), 150.0);
    }

    #[test]
    fn test_aborted_outcome_keeps_reason_and_solution() {
        let outcome =
            BnbSolverOutcome::aborted(Solution::new(100.0, vec![2, 0]), "node limit", stats());
        assert!(!outcome.is_proven_optimal());
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "node limit"),
            _ => panic!("expected Aborted termination reason"),
        }
        assert_eq!(outcome.into_solution().quantities(), &[2, 0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", TerminationReason::Aborted("time limit".into())),
            "Aborted: time limit"
        );
        let outcome = BnbSolverOutcome::optimal(Solution::idle(1), stats());
        let rendered = format!("{}", outcome);
        assert!(rendered.starts_with("Termination: Optimality Proven"));
        assert!(rendered.contains("Hopper-BnB Solver Statistics:"));
    }
}

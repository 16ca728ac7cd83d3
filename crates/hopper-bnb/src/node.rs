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

use std::cmp::Ordering;

/// A node of the branch-and-bound tree.
///
/// The node fixes the quantities of the first `level()` items of the model
/// (`production[i]` for `i < level()`); all later items are undecided.
/// Nodes are never mutated once created: a child copies the prefix of its
/// parent and appends one quantity.
#[derive(Clone, Debug)]
pub struct SearchNode {
    production: Vec<u64>,
    revenue: f64,
    upper_bound: f64,
}

impl SearchNode {
    /// Creates the root node: nothing decided, no revenue.
    #[inline]
    pub fn root(upper_bound: f64) -> Self {
        Self {
            production: Vec::new(),
            revenue: 0.0,
            upper_bound,
        }
    }

    /// Creates a node from an owned production prefix.
    #[inline]
    pub fn new(production: Vec<u64>, revenue: f64, upper_bound: f64) -> Self {
        Self {
            production,
            revenue,
            upper_bound,
        }
    }

    /// Returns the number of decided items.
    #[inline(always)]
    pub fn level(&self) -> usize {
        self.production.len()
    }

    /// Returns the decided quantities, one per decided item.
    #[inline(always)]
    pub fn production(&self) -> &[u64] {
        &self.production
    }

    /// Returns the revenue of the decided prefix.
    #[inline(always)]
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Returns the admissible upper bound on any completion of this node.
    #[inline(always)]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    /// Returns a fresh prefix buffer: this node's decisions followed by `quantity`.
    #[inline]
    pub fn extended_production(&self, quantity: u64) -> Vec<u64> {
        let mut production = Vec::with_capacity(self.production.len() + 1);
        production.extend_from_slice(&self.production);
        production.push(quantity);
        production
    }

    #[inline]
    pub fn into_production(self) -> Vec<u64> {
        self.production
    }
}

impl std::fmt::Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(level: {}, revenue: {:.2}, upper_bound: {:.2})",
            self.level(),
            self.revenue,
            self.upper_bound
        )
    }
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchNode {}

/// Frontier priority: higher bound first, then deeper nodes, then higher
/// revenue, then the production prefix itself.
impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.upper_bound
            .total_cmp(&other.upper_bound)
            .then(self.level().cmp(&other.level()))
            .then(self.revenue.total_cmp(&other.revenue))
            .then_with(|| self.production.cmp(&other.production))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_root_is_empty() {
        let root = SearchNode::root(42.0);
        assert_eq!(root.level(), 0);
        assert!(root.production().is_empty());
        assert_eq!(root.revenue(), 0.0);
        assert_eq!(root.upper_bound(), 42.0);
    }

    #[test]
    fn test_extended_production_copies_prefix() {
        let parent = SearchNode::new(vec![1, 2], 10.0, 20.0);
        let child_prefix = parent.extended_production(7);

        assert_eq!(child_prefix, vec![1, 2, 7]);
        assert_eq!(parent.production(), &[1, 2]);
        assert_eq!(parent.level(), 2);
    }

    #[test]
    fn test_heap_pops_highest_bound_first() {
        let mut heap = BinaryHeap::new();
        heap.push(SearchNode::new(vec![0], 0.0, 10.0));
        heap.push(SearchNode::new(vec![1], 5.0, 30.0));
        heap.push(SearchNode::new(vec![2], 9.0, 20.0));

        let bounds: Vec<f64> = std::iter::from_fn(|| heap.pop())
            .map(|n| n.upper_bound())
            .collect();
        assert_eq!(bounds, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn test_ties_prefer_deeper_then_richer_nodes() {
        let shallow = SearchNode::new(vec![1], 50.0, 100.0);
        let deep_poor = SearchNode::new(vec![1, 0], 10.0, 100.0);
        let deep_rich = SearchNode::new(vec![0, 2], 60.0, 100.0);

        assert!(deep_poor > shallow);
        assert!(deep_rich > deep_poor);
        assert_eq!(deep_rich.cmp(&deep_rich.clone()), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        let node = SearchNode::new(vec![3], 135.0, 150.0);
        assert_eq!(
            format!("{}", node),
            "SearchNode(level: 1, revenue: 135.00, upper_bound: 150.00)"
        );
    }
}

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

use crate::node::SearchNode;
use std::collections::BinaryHeap;

/// The open nodes of a best-first search.
///
/// A max-heap keyed by `SearchNode`'s ordering (highest upper bound first).
/// Tracks the largest size it ever reached for the statistics.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<SearchNode>,
    peak_len: usize,
}

impl Frontier {
    #[inline]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            peak_len: 0,
        }
    }

    #[inline]
    pub fn preallocated(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            peak_len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(node);
        self.peak_len = self.peak_len.max(self.heap.len());
    }

    /// Removes and returns the node with the highest upper bound.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the largest number of nodes held at once since the last reset.
    #[inline]
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }

    /// Drops all nodes but keeps the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.heap.clear();
        self.peak_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order_and_peak() {
        let mut frontier = Frontier::new();
        assert!(frontier.is_empty());

        frontier.push(SearchNode::new(vec![0], 0.0, 1.0));
        frontier.push(SearchNode::new(vec![1], 0.0, 3.0));
        frontier.push(SearchNode::new(vec![2], 0.0, 2.0));
        assert_eq!(frontier.len(), 3);

        assert_eq!(frontier.pop().map(|n| n.upper_bound()), Some(3.0));
        assert_eq!(frontier.pop().map(|n| n.upper_bound()), Some(2.0));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.peak_len(), 3);
    }

    #[test]
    fn test_reset_clears_nodes_and_peak() {
        let mut frontier = Frontier::preallocated(8);
        frontier.push(SearchNode::root(5.0));
        frontier.reset();

        assert!(frontier.is_empty());
        assert_eq!(frontier.peak_len(), 0);
        assert!(frontier.pop().is_none());
    }
}

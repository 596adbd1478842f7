// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of a simple solver frontier
//! (priority queue).

use binary_heap_plus::BinaryHeap;

use crate::{CompareNode, Frontier, NodeRanking, SearchNode};

/// The simplest frontier implementation you can think of: it basically
/// consists of a binary heap that pushes and pops search nodes.
///
/// # Note
/// This is the default type of frontier for both the sequential and the
/// parallel solvers. Hence, you don't need to take any action in order to use
/// the `SimpleFrontier`.
pub struct SimpleFrontier<R: NodeRanking> {
    heap: BinaryHeap<SearchNode, CompareNode<R>>,
}
impl<R: NodeRanking> SimpleFrontier<R> {
    /// This creates a new simple frontier which uses a custom node order.
    pub fn new(ranking: R) -> Self {
        Self {
            heap: BinaryHeap::from_vec_cmp(vec![], CompareNode::new(ranking)),
        }
    }
}
impl<R: NodeRanking> Frontier for SimpleFrontier<R> {
    fn push(&mut self, node: SearchNode) {
        self.heap.push(node)
    }

    fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    fn clear(&mut self) {
        self.heap.clear()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_simple_frontier {
    use crate::*;

    fn node(bound: f64) -> SearchNode {
        SearchNode {
            bound,
            relaxation: vec![],
            fixed: FixedVars::default(),
        }
    }

    // by default, it is empty
    #[test]
    fn by_default_it_is_empty() {
        let front = SimpleFrontier::new(MinBound);
        assert!(front.is_empty())
    }

    // when the size is zero, then it is empty
    #[test]
    fn when_the_size_is_zero_then_it_is_empty() {
        let front = SimpleFrontier::new(MinBound);
        assert_eq!(front.len(), 0);
        assert!(front.is_empty());
    }

    // when the size is greater than zero, it it not empty
    #[test]
    fn when_the_size_is_greater_than_zero_it_is_not_empty() {
        let mut front = SimpleFrontier::new(MinBound);
        front.push(node(10.0));
        assert_eq!(front.len(), 1);
        assert!(!front.is_empty());
    }

    // when I push a node onto the frontier then the length increases
    #[test]
    fn when_i_push_a_node_onto_the_frontier_then_the_length_increases() {
        let mut front = SimpleFrontier::new(MinBound);
        front.push(node(10.0));
        front.push(node(20.0));

        assert_eq!(front.len(), 2);
    }

    // when I pop a node off the frontier then the length decreases
    #[test]
    fn when_i_pop_a_node_off_the_frontier_then_the_length_decreases() {
        let mut front = SimpleFrontier::new(MinBound);
        front.push(node(10.0));
        front.push(node(20.0));

        assert_eq!(front.len(), 2);
        front.pop();
        assert_eq!(front.len(), 1);
        front.pop();
        assert_eq!(front.len(), 0);
    }

    // when I try to pop a node off an empty frontier, I get none
    #[test]
    fn when_i_try_to_pop_a_node_off_an_empty_frontier_i_get_none() {
        let mut front = SimpleFrontier::new(MinBound);
        assert!(front.pop().is_none());
    }

    // when I pop a node, it is always the one with the least lower bound
    #[test]
    fn when_i_pop_a_node_it_is_always_the_one_with_the_least_bound() {
        let mut front = SimpleFrontier::new(MinBound);
        front.push(node(4.0));
        front.push(node(1.0));
        front.push(node(5.0));
        front.push(node(3.0));
        front.push(node(2.0));

        assert_eq!(front.pop().unwrap().bound, 1.0);
        assert_eq!(front.pop().unwrap().bound, 2.0);
        assert_eq!(front.pop().unwrap().bound, 3.0);
        assert_eq!(front.pop().unwrap().bound, 4.0);
        assert_eq!(front.pop().unwrap().bound, 5.0);
    }

    // when bounds are equal, the deeper node pops first
    #[test]
    fn when_bounds_are_equal_the_deeper_node_pops_first() {
        let mut shallow = node(1.0);
        shallow.fixed.insert(Variable(0), 0);
        let mut deep = node(1.0);
        deep.fixed.insert(Variable(0), 0);
        deep.fixed.insert(Variable(1), 1);

        let mut front = SimpleFrontier::new(MinBound);
        front.push(shallow);
        front.push(deep.clone());

        assert_eq!(front.pop().unwrap(), deep);
    }

    // when I clear an empty frontier, it remains empty
    #[test]
    fn when_i_clear_an_empty_frontier_it_remains_empty() {
        let mut front = SimpleFrontier::new(MinBound);
        assert!(front.is_empty());
        front.clear();
        assert!(front.is_empty());
    }

    // when I clear a non empty frontier it becomes empty
    #[test]
    fn when_i_clear_a_non_empty_frontier_it_becomes_empty() {
        let mut front = SimpleFrontier::new(MinBound);
        front.push(node(5.0));

        assert!(!front.is_empty());
        front.clear();
        assert!(front.is_empty());
    }
}

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

//! This module defines the heuristic seams of the engine: the ordering of the
//! frontier and the selection of the branching variable.

use std::cmp::Ordering;

use crate::{SearchNode, Variable};

/// A total order over search nodes which decides the order in which they pop
/// off the frontier: the node comparing *greatest* pops first.
pub trait NodeRanking {
    /// Compares two nodes; the greater one is considered the more promising.
    fn compare(&self, a: &SearchNode, b: &SearchNode) -> Ordering;
}

/// The policy that decides which fractional variable a node is split on. This
/// is a pure function of the relaxed solution vector: calling it twice with
/// the same vector selects the same variable.
pub trait BranchingHeuristic {
    /// Returns the variable to branch on, or `None` when every entry of the
    /// relaxed solution is integral (within tolerance) -- in which case the
    /// node is an integer-feasible leaf.
    fn select(&self, relaxation: &[f64]) -> Option<Variable>;
}

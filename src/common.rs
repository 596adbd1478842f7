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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client library is likely to work with.

use fxhash::FxHashMap;

// ----------------------------------------------------------------------------
// --- VARIABLE ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes a decision variable of the covering integer program: the
/// selection (or not) of one diagnostic test. Each variable is identified with
/// an integer ranging from 0 until `instance.num_tests()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Variable(pub usize);
impl Variable {
    #[inline]
    /// This function retruns the id (numeric value) of the variable.
    ///
    /// # Examples:
    /// ```
    /// # use discern::Variable;
    /// assert_eq!(0, Variable(0).id());
    /// assert_eq!(1, Variable(1).id());
    /// assert_eq!(2, Variable(2).id());
    /// assert_eq!(3, Variable(3).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- FIXED VARIABLES --------------------------------------------------------
// ----------------------------------------------------------------------------
/// The set of variables whose value has been fixed on the path from the root
/// of the search tree down to a given node. Values are 0 or 1; two sibling
/// nodes differ in the value of exactly one variable.
pub type FixedVars = FxHashMap<Variable, u8>;

// ----------------------------------------------------------------------------
// --- SEARCH NODE ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A node of the branch-and-bound tree: the outcome of one oracle invocation
/// for one set of fixed assignments. Nodes are immutable; they are created
/// when a worker branches and consumed (branched again, resolved to a leaf,
/// or discarded) after having been popped off the frontier.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// The relaxed objective value: a lower bound on the objective of any
    /// integer-feasible completion of this node.
    pub bound: f64,
    /// The relaxed solution vector, one entry in [0, 1] per variable. This is
    /// the solution the oracle returned for exactly `fixed`.
    pub relaxation: Vec<f64>,
    /// The assignments that produced this node.
    pub fixed: FixedVars,
}
impl SearchNode {
    /// The number of decisions taken on the path from the root to this node.
    pub fn depth(&self) -> usize {
        self.fixed.len()
    }
}

// ----------------------------------------------------------------------------
// --- Results ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of a solve that ran to completion. A solve that was cut short
/// by an oracle failure does not yield a `Completion`: it surfaces the error
/// to the caller instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// The objective value of the best integer-feasible solution, or `None`
    /// when the instance admits no feasible selection at all.
    pub best_value: Option<f64>,
    /// The number of nodes that have been popped off the frontier and
    /// effectively processed.
    pub explored: usize,
    /// The number of nodes that were discarded because their lower bound
    /// could not beat the incumbent.
    pub pruned: usize,
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

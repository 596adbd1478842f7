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

//! This module defines the contract between the engine and the LP library
//! which solves the relaxed subproblems. The engine never implements any
//! linear programming itself: it hands a set of fixed assignments to the
//! oracle and gets a relaxed solution (or an infeasibility verdict) back.

use crate::{FixedVars, OracleError};

/// The solution of one relaxed subproblem.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// The relaxed objective value. Because integrality was dropped, this is
    /// a lower bound on the objective of any integer-feasible solution
    /// honoring the same fixed assignments.
    pub objective: f64,
    /// The value of every variable in the relaxed optimum, each in [0, 1].
    pub values: Vec<f64>,
}

/// What the oracle has to say about one relaxed subproblem. Infeasibility is
/// an expected, frequent outcome (it silently prunes a branch); it is *not*
/// an error.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// The relaxation admits an optimum.
    Optimal(LpSolution),
    /// No fractional solution satisfies the constraints together with the
    /// fixed assignments.
    Infeasible,
}

/// The LP-relaxation oracle. Given a partial assignment (fixed 0/1 values for
/// a subset of the variables), it returns the optimum of the corresponding
/// relaxed subproblem, or reports that none exists.
///
/// # Contract
/// The oracle must be deterministic for a fixed input, and repeated calls
/// with different fixed-assignment sets must each be equivalent to solving
/// the base model with exactly the given assignments (whatever transient
/// state the implementation keeps in between). The `&mut self` receiver
/// accommodates LP backends that are not reentrant: every worker owns its
/// own oracle and never shares it.
pub trait RelaxationOracle {
    /// Solves the relaxation of the instance under the given fixed
    /// assignments. `Err` means the LP backend itself failed; this aborts
    /// the whole solve.
    fn solve_relaxed(&mut self, fixed: &FixedVars) -> Result<LpOutcome, OracleError>;
}

/// A source of oracles: the solve driver uses it to hand one private oracle
/// to every worker at startup.
pub trait OracleFactory: Sync {
    /// The kind of oracle this factory produces.
    type Oracle: RelaxationOracle;
    /// Builds a fresh, independent oracle over the instance at hand.
    fn oracle(&self) -> Result<Self::Oracle, OracleError>;
}

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

//! This module provides the immutable problem data of a solve: the cost of
//! each diagnostic test, the test × disease incidence matrix, and the
//! discriminating constraints derived from it. An `Instance` is built once
//! and shared by reference across all the workers; it requires no
//! synchronization whatsoever.

use crate::{InvalidInstance, Variable, FRACTIONAL_TOLERANCE};

/// The immutable data of one minimum-cost test selection problem.
///
/// The incidence matrix has one row per test and one column per disease; the
/// entry is 1 when the test is positive for the disease. At construction, the
/// matrix is turned into discriminating constraints: for every pair of
/// distinct diseases, at least one test whose outcome differs between the two
/// must be selected. Only the *support* of each constraint is kept (the set
/// of tests with differing outcomes); a pair of diseases with identical
/// columns is indistinguishable by any selection and contributes no
/// constraint at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// The cost of each test. All costs are non-negative.
    costs: Vec<f64>,
    /// The number of diseases (columns of the incidence matrix).
    num_diseases: usize,
    /// For every pair of distinct diseases with at least one differing test,
    /// the tests whose outcome differs between the two.
    discriminators: Vec<Vec<Variable>>,
}

impl Instance {
    /// Builds an instance from the cost vector and the incidence matrix
    /// (`incidence[i][j]` is the outcome of test `i` for disease `j`). The
    /// discriminating constraints are derived here, once, so that neither the
    /// workers nor their oracles ever need to re-derive them.
    pub fn new(costs: Vec<f64>, incidence: Vec<Vec<u8>>) -> Result<Self, InvalidInstance> {
        if costs.len() != incidence.len() {
            return Err(InvalidInstance::DimensionMismatch {
                costs: costs.len(),
                rows: incidence.len(),
            });
        }
        let num_diseases = incidence.first().map_or(0, Vec::len);
        for (row, outcomes) in incidence.iter().enumerate() {
            if outcomes.len() != num_diseases {
                return Err(InvalidInstance::RaggedIncidence {
                    row,
                    got: outcomes.len(),
                    expected: num_diseases,
                });
            }
            for (col, &value) in outcomes.iter().enumerate() {
                if value > 1 {
                    return Err(InvalidInstance::NotBinary { row, col, value });
                }
            }
        }
        for (variable, &cost) in costs.iter().enumerate() {
            if cost < 0.0 {
                return Err(InvalidInstance::NegativeCost { variable, cost });
            }
        }

        let discriminators = Self::derive_discriminators(&incidence, num_diseases);
        Ok(Instance {
            costs,
            num_diseases,
            discriminators,
        })
    }

    /// For every unordered pair of diseases, collects the tests whose outcome
    /// differs between the two (the xor of the two columns). Pairs with an
    /// empty support are skipped: no selection can tell them apart.
    fn derive_discriminators(incidence: &[Vec<u8>], num_diseases: usize) -> Vec<Vec<Variable>> {
        let mut discriminators = vec![];
        for j in 0..num_diseases {
            for k in j + 1..num_diseases {
                let support = incidence
                    .iter()
                    .enumerate()
                    .filter(|(_, outcomes)| outcomes[j] != outcomes[k])
                    .map(|(i, _)| Variable(i))
                    .collect::<Vec<_>>();
                if !support.is_empty() {
                    discriminators.push(support);
                }
            }
        }
        discriminators
    }

    /// The number of tests (decision variables).
    pub fn num_tests(&self) -> usize {
        self.costs.len()
    }
    /// The number of diseases (incidence columns).
    pub fn num_diseases(&self) -> usize {
        self.num_diseases
    }
    /// The cost of each test.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }
    /// The supports of the derived discriminating constraints.
    pub fn discriminators(&self) -> &[Vec<Variable>] {
        &self.discriminators
    }

    /// The objective value of a (possibly fractional) solution vector.
    pub fn objective_value(&self, solution: &[f64]) -> f64 {
        solution
            .iter()
            .zip(self.costs.iter())
            .map(|(x, cost)| x * cost)
            .sum()
    }

    /// The objective value of the *rounded* solution: every variable whose
    /// value exceeds the fractional tolerance counts as selected. For the
    /// covering structure at hand, the rounded vector of any feasible relaxed
    /// solution is itself feasible, which makes this a valid (cheap) upper
    /// bound on the integer optimum.
    pub fn rounded_objective(&self, solution: &[f64]) -> f64 {
        solution
            .iter()
            .zip(self.costs.iter())
            .filter(|(x, _)| **x > FRACTIONAL_TOLERANCE)
            .map(|(_, cost)| cost)
            .sum()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

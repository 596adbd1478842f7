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

//! The `microlp`-backed relaxation oracle. Each call builds the LP model of
//! the instance from scratch: one [0, 1] variable per test (pinched to its
//! fixed value when an assignment fixes it), one `>= 1` covering row per
//! discriminating constraint, and the cost vector as the minimization
//! objective. Rebuilding per call keeps every invocation equivalent to
//! solving the base model with exactly the given assignments, whatever the
//! caller did before.

use microlp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};

use crate::{
    FixedVars, Instance, LpOutcome, LpSolution, OracleError, OracleFactory, RelaxationOracle,
    Variable,
};

/// The relaxation of a test selection instance, ready to hand private oracles
/// to the workers of a solve.
#[derive(Debug, Clone, Copy)]
pub struct MicrolpRelaxation<'a> {
    instance: &'a Instance,
}
impl<'a> MicrolpRelaxation<'a> {
    /// Creates the relaxation of the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }
}
impl<'a> OracleFactory for MicrolpRelaxation<'a> {
    type Oracle = MicrolpOracle<'a>;

    fn oracle(&self) -> Result<Self::Oracle, OracleError> {
        Ok(MicrolpOracle {
            instance: self.instance,
        })
    }
}

/// One worker's private oracle over the shared instance data.
#[derive(Debug, Clone, Copy)]
pub struct MicrolpOracle<'a> {
    instance: &'a Instance,
}
impl RelaxationOracle for MicrolpOracle<'_> {
    fn solve_relaxed(&mut self, fixed: &FixedVars) -> Result<LpOutcome, OracleError> {
        // with no pair of diseases left to tell apart, the relaxed optimum is
        // immediate: every free variable sits at 0, every fixed one at its value
        if self.instance.discriminators().is_empty() {
            let values = (0..self.instance.num_tests())
                .map(|i| fixed.get(&Variable(i)).map_or(0.0, |&v| f64::from(v)))
                .collect::<Vec<_>>();
            let objective = self.instance.objective_value(&values);
            return Ok(LpOutcome::Optimal(LpSolution { objective, values }));
        }

        let mut lp = Problem::new(OptimizationDirection::Minimize);

        let vars = self
            .instance
            .costs()
            .iter()
            .enumerate()
            .map(|(i, &cost)| {
                let (low, high) = match fixed.get(&Variable(i)) {
                    Some(&value) => (f64::from(value), f64::from(value)),
                    None => (0.0, 1.0),
                };
                lp.add_var(cost, (low, high))
            })
            .collect::<Vec<_>>();

        for support in self.instance.discriminators() {
            let mut row = LinearExpr::empty();
            for variable in support {
                row.add(vars[variable.id()], 1.0);
            }
            lp.add_constraint(row, ComparisonOp::Ge, 1.0);
        }

        match lp.solve() {
            Ok(solution) => Ok(LpOutcome::Optimal(LpSolution {
                objective: solution.objective(),
                values: vars.iter().map(|&v| solution[v]).collect(),
            })),
            Err(microlp::Error::Infeasible) => Ok(LpOutcome::Infeasible),
            Err(error) => Err(OracleError::Backend(error.to_string())),
        }
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

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

//! This module provides the implementation of a sequential branch-and-bound
//! solver. That is a solver that will solve the problem using one single
//! thread of execution.
//!
//! This is usually not the implementation you will want to use if you are
//! after solving a hard problem efficiently. It applies the exact same
//! pruning, branching and bounding rules as the parallel solver, which makes
//! it a convenient differential baseline (and the right pick in environments
//! where spawning threads is not an option).

use log::debug;

use crate::{
    BranchingHeuristic, Completion, FixedVars, Frontier, Incumbent, Instance, LpOutcome,
    OracleError, OracleFactory, RelaxationOracle, SearchNode, SolveError, Solver, Variable,
};

/// The sequential best-first branch-and-bound solver.
pub struct SequentialSolver<'a, F: OracleFactory> {
    /// The immutable problem data.
    instance: &'a Instance,
    /// The source of the one relaxation oracle this solver owns.
    factory: &'a F,
    /// The policy deciding which fractional variable a node is split on.
    branching: &'a dyn BranchingHeuristic,
    /// The set of nodes that must still be explored before the problem can
    /// be considered 'solved', in ascending lower-bound order.
    frontier: &'a mut dyn Frontier,
    /// The best integer-feasible objective value found so far.
    incumbent: Incumbent,
    /// The number of nodes popped off the frontier and processed.
    explored: usize,
    /// The number of nodes discarded because their bound could not beat the
    /// incumbent.
    pruned: usize,
}

impl<'a, F: OracleFactory> SequentialSolver<'a, F> {
    pub fn new(
        instance: &'a Instance,
        factory: &'a F,
        branching: &'a dyn BranchingHeuristic,
        frontier: &'a mut dyn Frontier,
    ) -> Self {
        SequentialSolver {
            instance,
            factory,
            branching,
            frontier,
            incumbent: Incumbent::new(),
            explored: 0,
            pruned: 0,
        }
    }

    /// Solves the unconstrained relaxation and posts the root node onto the
    /// frontier. Returns false iff even the unconstrained relaxation is
    /// infeasible.
    fn initialize(&mut self, oracle: &mut F::Oracle) -> Result<bool, OracleError> {
        match oracle.solve_relaxed(&FixedVars::default())? {
            LpOutcome::Infeasible => Ok(false),
            LpOutcome::Optimal(lp) => {
                self.incumbent
                    .try_improve(self.instance.rounded_objective(&lp.values));
                self.frontier.push(SearchNode {
                    bound: lp.objective,
                    relaxation: lp.values,
                    fixed: FixedVars::default(),
                });
                Ok(true)
            }
        }
    }

    /// Processes one node: resolve it to a leaf, or split it on the selected
    /// fractional variable.
    fn process_one_node(
        &mut self,
        oracle: &mut F::Oracle,
        node: &SearchNode,
    ) -> Result<(), OracleError> {
        match self.branching.select(&node.relaxation) {
            None => {
                let objective = self.instance.rounded_objective(&node.relaxation);
                if self.incumbent.try_improve(objective) {
                    debug!("new incumbent {objective} (leaf at depth {})", node.depth());
                }
                Ok(())
            }
            Some(variable) => self.branch(oracle, node, variable),
        }
    }

    /// Splits `node` on `variable` into two children, one oracle call each.
    /// An infeasible child is simply not created; a feasible child first
    /// offers its rounded objective to the incumbent and then joins the
    /// frontier if its bound survives the comparison.
    fn branch(
        &mut self,
        oracle: &mut F::Oracle,
        node: &SearchNode,
        variable: Variable,
    ) -> Result<(), OracleError> {
        for value in [0, 1] {
            let mut fixed = node.fixed.clone();
            fixed.insert(variable, value);

            match oracle.solve_relaxed(&fixed)? {
                LpOutcome::Infeasible => continue,
                LpOutcome::Optimal(lp) => {
                    let surrogate = self.instance.rounded_objective(&lp.values);
                    if self.incumbent.try_improve(surrogate) {
                        debug!("new incumbent {surrogate} (rounded relaxation)");
                    }
                    if lp.objective <= self.incumbent.value() {
                        self.frontier.push(SearchNode {
                            bound: lp.objective,
                            relaxation: lp.values,
                            fixed,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl<'a, F: OracleFactory> Solver for SequentialSolver<'a, F> {
    fn minimize(&mut self) -> Result<Completion, SolveError> {
        let mut oracle = self.factory.oracle()?;
        if !self.initialize(&mut oracle)? {
            return Ok(Completion {
                best_value: None,
                explored: 0,
                pruned: 0,
            });
        }

        while let Some(node) = self.frontier.pop() {
            if node.bound > self.incumbent.value() {
                // the frontier is ordered: every remaining node is dominated
                self.pruned += 1 + self.frontier.len();
                self.frontier.clear();
                break;
            }
            self.explored += 1;
            self.process_one_node(&mut oracle, &node)
                .map_err(SolveError::Oracle)?;
        }

        Ok(Completion {
            best_value: self.best_value(),
            explored: self.explored,
            pruned: self.pruned,
        })
    }

    fn best_value(&self) -> Option<f64> {
        let value = self.incumbent.value();
        value.is_finite().then_some(value)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_sequential_solver {
    use crate::*;

    fn solve(instance: &Instance) -> Completion {
        let relaxation = MicrolpRelaxation::new(instance);
        let mut frontier = SimpleFrontier::new(MinBound);
        let mut solver = SequentialSolver::new(instance, &relaxation, &ClosestToHalf, &mut frontier);
        solver.minimize().unwrap()
    }

    #[test]
    fn the_diagonal_instance_selects_the_cheapest_test() {
        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        assert_eq!(Some(1.0), solve(&instance).best_value);
    }

    #[test]
    fn indistinguishable_diseases_cost_nothing() {
        let instance = Instance::new(vec![1.0, 1.0], vec![vec![1, 1], vec![0, 0]]).unwrap();
        let completion = solve(&instance);
        assert_eq!(Some(0.0), completion.best_value);
    }

    #[test]
    fn at_least_the_root_gets_explored() {
        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        assert!(solve(&instance).explored >= 1);
    }
}

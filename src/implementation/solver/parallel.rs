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

//! This module provides the implementation of the parallel branch-and-bound
//! solver. That is a solver that will solve the problem using as many threads
//! as requested. By default, it uses as many threads as the number of
//! hardware threads available on the machine.

use std::time::Duration;

use log::{debug, error};
use parking_lot::{Condvar, Mutex};

use crate::{
    BranchingHeuristic, Completion, FixedVars, Frontier, Incumbent, Instance, LpOutcome,
    OracleError, OracleFactory, RelaxationOracle, SearchNode, SolveError, Solver, Variable,
};

/// How long a starved worker waits on the monitor before re-examining the
/// shared state. The bounded wait alone proves nothing about termination
/// (another worker may be about to push children); the in-flight counter in
/// `Critical` is what decides when the search is really over.
pub const WORKER_TIMEOUT: Duration = Duration::from_millis(500);

/// The shared data that may only be manipulated within critical sections
struct Critical<'a> {
    /// This is the frontier: the set of nodes that must still be explored
    /// before the problem can be considered 'solved'.
    ///
    /// # Note:
    /// This frontier orders the nodes by lower bound (so the least bound is
    /// going to pop first). So, it is guaranteed that the lower bound of the
    /// first node being popped is a lower bound on the value reachable by
    /// exploring any of the nodes remaining on the frontier. As a
    /// consequence, the exploration can be stopped as soon as a node with a
    /// bound that exceeds the incumbent is popped.
    frontier: &'a mut (dyn Frontier + Send),
    /// This is the number of nodes that are currently being explored.
    ///
    /// # Note
    /// This information may seem innocuous/superfluous, whereas in fact it is
    /// very important. Indeed, this is the piece of information that lets us
    /// distinguish between a node-starvation and the completion of the
    /// problem resolution. The bottom line is, this counter needs to be
    /// carefully managed to guarantee the termination of all threads.
    ongoing: usize,
    /// This is a counter that tracks the number of nodes that have
    /// effectively been explored. That is, the number of nodes that have been
    /// popped from the frontier and processed (pruned, resolved or branched).
    explored: usize,
    /// The number of nodes that were discarded because their bound could not
    /// beat the incumbent.
    pruned: usize,
    /// If set, the oracle failure that aborted the search. All workers drain
    /// and terminate once this is set.
    abort: Option<OracleError>,
}

/// The state which is shared among the many running threads: it provides an
/// access to the critical data (protected by a mutex) as well as a monitor
/// (condvar) to park threads in case of node-starvation.
struct Shared<'a, F: OracleFactory> {
    /// The immutable problem data; safe for unsynchronized concurrent reads.
    instance: &'a Instance,
    /// The source of the one private relaxation oracle each worker owns.
    factory: &'a F,
    /// The policy deciding which fractional variable a node is split on.
    branching: &'a (dyn BranchingHeuristic + Send + Sync),
    /// The best integer-feasible objective value found so far. This one is
    /// deliberately *not* kept inside the critical section: every update goes
    /// through its own atomic compare-and-set, so workers can read and
    /// improve it without ever taking the lock.
    incumbent: Incumbent,
    /// This is the shared state data which can only be accessed within
    /// critical sections. Therefore, it is protected by a mutex which
    /// prevents concurrent reads/writes.
    critical: Mutex<Critical<'a>>,
    /// This is the monitor on which workers must wait when facing an empty
    /// frontier. The corollary, it that whenever a worker has completed the
    /// processing of a node, it must wake-up all parked threads waiting on
    /// this monitor.
    monitor: Condvar,
}

/// The workload a thread can get from the shared state
enum WorkLoad {
    /// There is no work left to be done: you can safely terminate
    Complete,
    /// The work must stop because the oracle failed
    Aborted,
    /// There is nothing you can do right now. Check again when you wake up
    Starvation,
    /// The item to process
    WorkItem { node: SearchNode },
}

/// The parallel best-first branch-and-bound solver: a fixed pool of workers
/// sharing one frontier and one incumbent bound. Each worker repeatedly pops
/// the open node with the least lower bound, prunes it against the incumbent,
/// and either resolves it to a leaf or branches it into two children with one
/// oracle call each.
pub struct ParallelSolver<'a, F: OracleFactory> {
    /// This is the shared state. Each thread is going to take a reference to it.
    shared: Shared<'a, F>,
    /// This is a configuration parameter that tunes the number of workers
    /// that will be spawned to solve the problem. By default, this number
    /// amounts to the number of hardware threads available on the machine.
    nb_workers: usize,
}

impl<'a, F: OracleFactory> ParallelSolver<'a, F> {
    pub fn new(
        instance: &'a Instance,
        factory: &'a F,
        branching: &'a (dyn BranchingHeuristic + Send + Sync),
        frontier: &'a mut (dyn Frontier + Send),
    ) -> Self {
        Self::custom(instance, factory, branching, frontier, num_cpus::get())
    }

    pub fn custom(
        instance: &'a Instance,
        factory: &'a F,
        branching: &'a (dyn BranchingHeuristic + Send + Sync),
        frontier: &'a mut (dyn Frontier + Send),
        nb_workers: usize,
    ) -> Self {
        ParallelSolver {
            shared: Shared {
                instance,
                factory,
                branching,
                incumbent: Incumbent::new(),
                monitor: Condvar::new(),
                critical: Mutex::new(Critical {
                    frontier,
                    ongoing: 0,
                    explored: 0,
                    pruned: 0,
                    abort: None,
                }),
            },
            nb_workers: nb_workers.max(1),
        }
    }

    /// Sets the number of workers used by the solver
    pub fn with_workers(mut self, nb_workers: usize) -> Self {
        self.nb_workers = nb_workers.max(1);
        self
    }

    /// This method initializes the problem resolution: it solves the
    /// unconstrained relaxation of the instance and posts the root node onto
    /// the frontier so that a worker can pick it up and the processing can be
    /// bootstrapped. Returns false iff even the unconstrained relaxation is
    /// infeasible (in which case there is nothing to search).
    fn initialize(&mut self) -> Result<bool, SolveError> {
        let mut oracle = self.shared.factory.oracle()?;
        match oracle.solve_relaxed(&FixedVars::default())? {
            LpOutcome::Infeasible => Ok(false),
            LpOutcome::Optimal(lp) => {
                // the rounded relaxed solution is integer feasible for this
                // covering structure: it seeds the incumbent before any
                // worker starts
                self.shared
                    .incumbent
                    .try_improve(self.shared.instance.rounded_objective(&lp.values));
                self.shared.critical.lock().frontier.push(SearchNode {
                    bound: lp.objective,
                    relaxation: lp.values,
                    fixed: FixedVars::default(),
                });
                Ok(true)
            }
        }
    }

    /// This is the main loop of every worker: get a workload, process it,
    /// notify the others, and start over until the search is complete (or
    /// aborted by an oracle failure).
    fn work(shared: &Shared<'a, F>) {
        let mut oracle = match shared.factory.oracle() {
            Ok(oracle) => oracle,
            Err(cause) => {
                Self::abort_search(shared, cause);
                return;
            }
        };

        loop {
            match Self::get_workload(shared) {
                WorkLoad::Complete => break,
                WorkLoad::Aborted => break,
                WorkLoad::Starvation => continue,
                WorkLoad::WorkItem { node } => {
                    let outcome = Self::process_one_node(&mut oracle, shared, &node);
                    Self::notify_node_finished(shared);
                    if let Err(cause) = outcome {
                        Self::abort_search(shared, cause);
                        break;
                    }
                }
            }
        }
    }

    /// This method processes the given `node`: it either resolves it to an
    /// integer-feasible leaf (and offers its objective to the incumbent), or
    /// splits it on the selected fractional variable, invoking the oracle
    /// once per child.
    fn process_one_node(
        oracle: &mut F::Oracle,
        shared: &Shared<'a, F>,
        node: &SearchNode,
    ) -> Result<(), OracleError> {
        match shared.branching.select(&node.relaxation) {
            None => {
                // no fractional entry: the node is an integer-feasible leaf
                let objective = shared.instance.rounded_objective(&node.relaxation);
                if shared.incumbent.try_improve(objective) {
                    debug!("new incumbent {objective} (leaf at depth {})", node.depth());
                }
                Ok(())
            }
            Some(variable) => Self::branch(oracle, shared, node, variable),
        }
    }

    /// Splits `node` on `variable`: two children extending the parent's fixed
    /// assignments with 0 and with 1 respectively. An infeasible child is
    /// simply not created. Each feasible child first offers its rounded
    /// objective to the incumbent (the cheap upper-bound surrogate), then
    /// joins the frontier only if its relaxed bound does not exceed the
    /// possibly just-updated incumbent.
    fn branch(
        oracle: &mut F::Oracle,
        shared: &Shared<'a, F>,
        node: &SearchNode,
        variable: Variable,
    ) -> Result<(), OracleError> {
        let mut children = vec![];
        for value in [0, 1] {
            let mut fixed = node.fixed.clone();
            fixed.insert(variable, value);

            match oracle.solve_relaxed(&fixed)? {
                LpOutcome::Infeasible => continue,
                LpOutcome::Optimal(lp) => {
                    let surrogate = shared.instance.rounded_objective(&lp.values);
                    if shared.incumbent.try_improve(surrogate) {
                        debug!("new incumbent {surrogate} (rounded relaxation)");
                    }
                    if lp.objective <= shared.incumbent.value() {
                        children.push(SearchNode {
                            bound: lp.objective,
                            relaxation: lp.values,
                            fixed,
                        });
                    }
                }
            }
        }

        if !children.is_empty() {
            let mut critical = shared.critical.lock();
            for child in children {
                // the incumbent may have moved since the child was bounded
                if child.bound <= shared.incumbent.value() {
                    critical.frontier.push(child);
                } else {
                    critical.pruned += 1;
                }
            }
        }
        Ok(())
    }

    /// Acknowledges that a worker finished processing its node.
    fn notify_node_finished(shared: &Shared<'a, F>) {
        let mut critical = shared.critical.lock();
        critical.ongoing -= 1;
        shared.monitor.notify_all();
    }

    /// Records the oracle failure that kills the search and wakes every
    /// parked worker so that they can all drain and terminate.
    fn abort_search(shared: &Shared<'a, F>, cause: OracleError) {
        error!("aborting the solve: {cause}");
        let mut critical = shared.critical.lock();
        if critical.abort.is_none() {
            critical.abort = Some(cause);
        }
        critical.frontier.clear();
        shared.monitor.notify_all();
    }

    /// Consults the shared state to fetch a workload. Depending on the
    /// current state, the workload can either be:
    ///
    ///   + Complete, when the problem is solved and all workers should stop;
    ///     this is the case only when the frontier is empty *and* no worker
    ///     is holding a node it might push children from -- both facts
    ///     observed under the same lock acquisition.
    ///   + Aborted, when the oracle failed and the search cannot conclude.
    ///   + Starvation, when there is no node available for processing at the
    ///     time being (but some node is still being processed and thus the
    ///     problem cannot be considered solved).
    ///   + WorkItem, when the worker successfully obtained a node to process.
    fn get_workload(shared: &Shared<'a, F>) -> WorkLoad {
        let mut critical = shared.critical.lock();

        // Are we done ?
        if critical.ongoing == 0 && critical.frontier.is_empty() {
            return WorkLoad::Complete;
        }

        // Do we need to stop ?
        if critical.abort.is_some() {
            return WorkLoad::Aborted;
        }

        // Nothing to do yet ? => Wait for someone to post jobs
        if critical.frontier.is_empty() {
            let _ = shared.monitor.wait_for(&mut critical, WORKER_TIMEOUT);
            return WorkLoad::Starvation;
        }

        // Nothing relevant ? => The whole frontier is dominated
        let Some(node) = critical.frontier.pop() else {
            return WorkLoad::Starvation;
        };
        if node.bound > shared.incumbent.value() {
            let dominated = 1 + critical.frontier.len();
            critical.pruned += dominated;
            critical.frontier.clear();
            return WorkLoad::Starvation;
        }

        // Consume the current node and process it
        critical.ongoing += 1;
        critical.explored += 1;

        WorkLoad::WorkItem { node }
    }
}

impl<'a, F: OracleFactory> Solver for ParallelSolver<'a, F> {
    /// Runs the parallel branch-and-bound search to completion: it spawns
    /// `nb_workers` long running threads; each of which will continually get
    /// a workload and process it until the frontier is permanently drained.
    fn minimize(&mut self) -> Result<Completion, SolveError> {
        if !self.initialize()? {
            return Ok(Completion {
                best_value: None,
                explored: 0,
                pruned: 0,
            });
        }

        std::thread::scope(|s| {
            for _ in 0..self.nb_workers {
                let shared = &self.shared;
                s.spawn(move || Self::work(shared));
            }
        });

        let mut critical = self.shared.critical.lock();
        if let Some(cause) = critical.abort.take() {
            return Err(SolveError::Oracle(cause));
        }
        Ok(Completion {
            best_value: self.best_value(),
            explored: critical.explored,
            pruned: critical.pruned,
        })
    }

    /// Returns the objective value of the best integer-feasible solution
    /// identified so far.
    fn best_value(&self) -> Option<f64> {
        let value = self.shared.incumbent.value();
        value.is_finite().then_some(value)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_parallel_solver {
    use crate::*;

    fn solve(instance: &Instance, nb_workers: usize) -> Completion {
        let relaxation = MicrolpRelaxation::new(instance);
        let mut frontier = SimpleFrontier::new(MinBound);
        let mut solver = ParallelSolver::custom(
            instance,
            &relaxation,
            &ClosestToHalf,
            &mut frontier,
            nb_workers,
        );
        solver.minimize().unwrap()
    }

    #[test]
    fn the_diagonal_instance_selects_the_cheapest_test() {
        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        assert_eq!(Some(1.0), solve(&instance, 2).best_value);
    }

    #[test]
    fn indistinguishable_diseases_cost_nothing() {
        let instance = Instance::new(vec![1.0, 1.0], vec![vec![1, 1], vec![0, 0]]).unwrap();
        assert_eq!(Some(0.0), solve(&instance, 2).best_value);
    }

    #[test]
    fn a_fractional_root_gets_branched_to_optimality() {
        // distinguishing the three disease pairs takes two of the three
        // tests, and the cheapest such pair is {0, 1} at cost 3
        let instance = Instance::new(
            vec![1.0, 2.0, 4.0],
            vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
        )
        .unwrap();
        assert_eq!(Some(3.0), solve(&instance, 3).best_value);
    }

    #[test]
    fn the_frontier_is_empty_once_the_solve_completes() {
        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        let relaxation = MicrolpRelaxation::new(&instance);
        let mut frontier = SimpleFrontier::new(MinBound);
        {
            let mut solver =
                ParallelSolver::custom(&instance, &relaxation, &ClosestToHalf, &mut frontier, 2);
            solver.minimize().unwrap();
        }
        assert!(frontier.is_empty());
    }

    #[test]
    fn best_value_is_none_before_anything_ran() {
        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        let relaxation = MicrolpRelaxation::new(&instance);
        let mut frontier = SimpleFrontier::new(MinBound);
        let solver = ParallelSolver::new(&instance, &relaxation, &ClosestToHalf, &mut frontier);
        assert_eq!(None, solver.best_value());
    }

    #[test]
    fn an_infeasible_root_relaxation_means_no_solution_at_all() {
        struct InfeasibleFactory;
        struct InfeasibleOracle;
        impl RelaxationOracle for InfeasibleOracle {
            fn solve_relaxed(&mut self, _: &FixedVars) -> Result<LpOutcome, OracleError> {
                Ok(LpOutcome::Infeasible)
            }
        }
        impl OracleFactory for InfeasibleFactory {
            type Oracle = InfeasibleOracle;
            fn oracle(&self) -> Result<Self::Oracle, OracleError> {
                Ok(InfeasibleOracle)
            }
        }

        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        let mut frontier = SimpleFrontier::new(MinBound);
        let mut solver = ParallelSolver::custom(
            &instance,
            &InfeasibleFactory,
            &ClosestToHalf,
            &mut frontier,
            2,
        );

        let completion = solver.minimize().unwrap();
        assert_eq!(None, completion.best_value);
        assert_eq!(0, completion.explored);
    }

    #[test]
    fn a_failing_oracle_aborts_the_solve() {
        struct FailingFactory;
        struct FailingOracle;
        impl RelaxationOracle for FailingOracle {
            fn solve_relaxed(&mut self, _: &FixedVars) -> Result<LpOutcome, OracleError> {
                Err(OracleError::Backend("out of memory".to_string()))
            }
        }
        impl OracleFactory for FailingFactory {
            type Oracle = FailingOracle;
            fn oracle(&self) -> Result<Self::Oracle, OracleError> {
                Ok(FailingOracle)
            }
        }

        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        let mut frontier = SimpleFrontier::new(MinBound);
        let mut solver =
            ParallelSolver::custom(&instance, &FailingFactory, &ClosestToHalf, &mut frontier, 2);

        let outcome = solver.minimize();
        assert_eq!(
            Err(SolveError::Oracle(OracleError::Backend(
                "out of memory".to_string()
            ))),
            outcome
        );
    }

    #[test]
    fn an_oracle_failure_mid_search_stops_every_worker() {
        // the root relaxation succeeds (with a fractional solution, forcing a
        // branch) but every child evaluation fails
        struct FlakyFactory;
        struct FlakyOracle;
        impl RelaxationOracle for FlakyOracle {
            fn solve_relaxed(&mut self, fixed: &FixedVars) -> Result<LpOutcome, OracleError> {
                if fixed.is_empty() {
                    Ok(LpOutcome::Optimal(LpSolution {
                        objective: 1.5,
                        values: vec![0.5, 0.5],
                    }))
                } else {
                    Err(OracleError::Backend("simplex blew up".to_string()))
                }
            }
        }
        impl OracleFactory for FlakyFactory {
            type Oracle = FlakyOracle;
            fn oracle(&self) -> Result<Self::Oracle, OracleError> {
                Ok(FlakyOracle)
            }
        }

        let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
        let mut frontier = SimpleFrontier::new(MinBound);
        let mut solver =
            ParallelSolver::custom(&instance, &FlakyFactory, &ClosestToHalf, &mut frontier, 4);

        let outcome = solver.minimize();
        assert_eq!(
            Err(SolveError::Oracle(OracleError::Backend(
                "simplex blew up".to_string()
            ))),
            outcome
        );
    }
}

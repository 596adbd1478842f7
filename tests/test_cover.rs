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

//! This module is meant to test the correctness of the engine end to end:
//! the optimum it reports on small instances is checked against an
//! exhaustive enumeration of all test subsets, and the parallel solver is
//! checked against its sequential sibling.

use discern::*;
use rstest::rstest;

/// Exhaustively enumerates every subset of tests and returns the cost of the
/// cheapest one which distinguishes every distinguishable pair of diseases.
/// All test costs below are small integers, so the optima compare exactly.
fn brute_force(costs: &[f64], incidence: &[Vec<u8>]) -> f64 {
    let n = costs.len();
    let m = incidence.first().map_or(0, Vec::len);

    let mut pairs = vec![];
    for j in 0..m {
        for k in j + 1..m {
            let support = (0..n)
                .filter(|&i| incidence[i][j] != incidence[i][k])
                .collect::<Vec<_>>();
            if !support.is_empty() {
                pairs.push(support);
            }
        }
    }

    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << n) {
        let covers = pairs
            .iter()
            .all(|support| support.iter().any(|&i| mask & (1 << i) != 0));
        if covers {
            let cost = (0..n)
                .filter(|&i| mask & (1 << i) != 0)
                .map(|i| costs[i])
                .sum::<f64>();
            best = best.min(cost);
        }
    }
    best
}

fn solve_parallel(instance: &Instance, nb_workers: usize) -> Completion {
    let relaxation = MicrolpRelaxation::new(instance);
    let mut frontier = SimpleFrontier::new(MinBound);
    let mut solver = ParallelSolver::custom(
        instance,
        &relaxation,
        &ClosestToHalf,
        &mut frontier,
        nb_workers,
    );
    solver.minimize().expect("the bundled oracle does not fail")
}

fn solve_sequential(instance: &Instance) -> Completion {
    let relaxation = MicrolpRelaxation::new(instance);
    let mut frontier = SimpleFrontier::new(MinBound);
    let mut solver = SequentialSolver::new(instance, &relaxation, &ClosestToHalf, &mut frontier);
    solver.minimize().expect("the bundled oracle does not fail")
}

#[test]
fn either_test_distinguishes_the_pair_so_the_cheapest_wins() {
    let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
    assert_eq!(Some(1.0), solve_parallel(&instance, 2).best_value);
}

#[test]
fn duplicated_diseases_need_no_test_at_all() {
    let instance = Instance::new(vec![1.0, 1.0], vec![vec![1, 1], vec![0, 0]]).unwrap();
    assert_eq!(Some(0.0), solve_parallel(&instance, 2).best_value);
}

#[test]
fn a_fractional_root_relaxation_is_branched_to_the_integer_optimum() {
    // the discriminating constraints form an odd cycle: the relaxed optimum
    // is the all-halves vector of value 1.5, while the integer optimum is 2
    let costs = vec![1.0, 1.0, 1.0];
    let incidence = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
    let instance = Instance::new(costs, incidence).unwrap();

    assert_eq!(Some(2.0), solve_parallel(&instance, 2).best_value);
}

#[rstest]
#[case::three_tests_three_diseases(
    vec![1.0, 2.0, 4.0],
    vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]
)]
#[case::odd_cycle(
    vec![1.0, 1.0, 1.0],
    vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]
)]
#[case::four_diseases(
    vec![1.0, 2.0, 4.0, 8.0, 16.0],
    vec![
        vec![1, 0, 1, 0],
        vec![0, 1, 1, 0],
        vec![0, 0, 1, 1],
        vec![1, 1, 0, 0],
        vec![1, 0, 0, 1],
    ]
)]
#[case::redundant_tests(
    vec![4.0, 1.0, 2.0, 1.0],
    vec![vec![1, 0], vec![1, 0], vec![0, 1], vec![0, 1]]
)]
#[case::expensive_singleton(
    vec![8.0, 1.0, 2.0],
    vec![vec![1, 0, 0], vec![1, 1, 0], vec![0, 1, 1]]
)]
fn the_engine_matches_the_brute_force_optimum(
    #[case] costs: Vec<f64>,
    #[case] incidence: Vec<Vec<u8>>,
) {
    let expected = brute_force(&costs, &incidence);
    let instance = Instance::new(costs, incidence).unwrap();

    assert_eq!(Some(expected), solve_parallel(&instance, 4).best_value);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(8)]
fn the_worker_count_does_not_change_the_optimum(#[case] nb_workers: usize) {
    let costs = vec![1.0, 2.0, 4.0, 8.0, 16.0];
    let incidence = vec![
        vec![1, 0, 1, 0],
        vec![0, 1, 1, 0],
        vec![0, 0, 1, 1],
        vec![1, 1, 0, 0],
        vec![1, 0, 0, 1],
    ];
    let expected = brute_force(&costs, &incidence);
    let instance = Instance::new(costs, incidence).unwrap();

    assert_eq!(Some(expected), solve_parallel(&instance, nb_workers).best_value);
}

#[test]
fn parallel_and_sequential_agree() {
    let costs = vec![2.0, 1.0, 4.0, 8.0];
    let incidence = vec![
        vec![1, 0, 0],
        vec![1, 1, 0],
        vec![0, 1, 1],
        vec![1, 0, 1],
    ];
    let instance = Instance::new(costs, incidence).unwrap();

    assert_eq!(
        solve_sequential(&instance).best_value,
        solve_parallel(&instance, 4).best_value
    );
}

#[test]
fn more_workers_than_nodes_still_terminates() {
    let instance = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
    assert_eq!(Some(1.0), solve_parallel(&instance, 16).best_value);
}

/// An oracle wrapper that records every fixed-assignment set it is invoked
/// with, so that the shape of the branching can be inspected after the fact.
struct RecordingFactory<'a> {
    instance: &'a Instance,
    log: &'a std::sync::Mutex<Vec<FixedVars>>,
}
struct RecordingOracle<'a> {
    inner: MicrolpOracle<'a>,
    log: &'a std::sync::Mutex<Vec<FixedVars>>,
}
impl<'a> OracleFactory for RecordingFactory<'a> {
    type Oracle = RecordingOracle<'a>;
    fn oracle(&self) -> Result<Self::Oracle, OracleError> {
        Ok(RecordingOracle {
            inner: MicrolpRelaxation::new(self.instance).oracle()?,
            log: self.log,
        })
    }
}
impl RelaxationOracle for RecordingOracle<'_> {
    fn solve_relaxed(&mut self, fixed: &FixedVars) -> Result<LpOutcome, OracleError> {
        self.log.lock().unwrap().push(fixed.clone());
        self.inner.solve_relaxed(fixed)
    }
}

#[test]
fn branching_always_produces_two_siblings_differing_in_one_key() {
    let costs = vec![1.0, 1.0, 1.0];
    let incidence = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
    let instance = Instance::new(costs, incidence).unwrap();

    let log = std::sync::Mutex::new(vec![]);
    let factory = RecordingFactory { instance: &instance, log: &log };
    let mut frontier = SimpleFrontier::new(MinBound);
    let mut solver = SequentialSolver::new(&instance, &factory, &ClosestToHalf, &mut frontier);
    solver.minimize().unwrap();

    let log = log.into_inner().unwrap();
    assert!(log[0].is_empty(), "the first oracle call is the root");
    // past the root, the sequential solver evaluates children in sibling
    // pairs: same keys, and exactly one key (the branched variable) whose
    // value differs -- fixed to 0 in the first sibling, to 1 in the second
    assert_eq!(1, log.len() % 2, "one root plus two calls per branching");
    for siblings in log[1..].chunks(2) {
        let (zero, one) = (&siblings[0], &siblings[1]);
        assert_eq!(zero.len(), one.len());

        let differing = zero
            .iter()
            .filter(|&(var, value)| one.get(var) != Some(value))
            .collect::<Vec<_>>();
        assert_eq!(1, differing.len());
        let (branched, value) = differing[0];
        assert_eq!(0, *value);
        assert_eq!(Some(&1), one.get(branched));
    }
}

#[test]
fn every_explored_node_is_accounted_for() {
    let costs = vec![1.0, 1.0, 1.0];
    let incidence = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
    let instance = Instance::new(costs, incidence).unwrap();

    let completion = solve_sequential(&instance);
    assert!(completion.explored >= 1);
    // the search never reports fewer processed nodes than the root alone
    assert!(completion.best_value.is_some());
}

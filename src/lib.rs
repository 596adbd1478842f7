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

//! # DISCERN
//! Discern is a parallel best-first branch-and-bound solver for the
//! minimum-cost discriminating test selection problem: given a set of
//! diagnostic tests (each with a non-negative cost) and their outcomes over a
//! set of diseases, select the cheapest subset of tests whose outcomes tell
//! every pair of diseases apart.
//!
//! The engine never solves any linear program itself. It drives an
//! LP-relaxation oracle (see `RelaxationOracle`): each search node is the
//! relaxed optimum of the instance under a partial 0/1 assignment, the
//! relaxed objective is the node's lower bound, and the engine branches on
//! the fractional variable the relaxation is the least decided about. A pool
//! of workers shares one best-first frontier and one atomically-updated
//! incumbent bound; a worker repeatedly pops the most promising node, prunes
//! it against the incumbent, and either resolves it to a leaf or splits it
//! in two with one oracle call per child.
//!
//! ## Side benefit
//! As a side benefit from using `discern`, you will be able to exploit all
//! of your hardware to solve your selection problems in parallel.
//!
//! ## Quick Example
//! The following solves the smallest interesting instance there is: two
//! diseases, and two tests of which the first is cheaper. Either test alone
//! tells the two diseases apart, so the optimum is to run test 0 only.
//!
//! ```
//! use discern::*;
//!
//! // two tests (rows), two diseases (columns)
//! let instance   = Instance::new(vec![1.0, 2.0], vec![vec![1, 0], vec![0, 1]]).unwrap();
//! let relaxation = MicrolpRelaxation::new(&instance);
//! let branching  = ClosestToHalf;
//! let mut frontier = SimpleFrontier::new(MinBound);
//!
//! let mut solver = ParallelSolver::new(&instance, &relaxation, &branching, &mut frontier);
//! let outcome    = solver.minimize().unwrap();
//!
//! assert_eq!(Some(1.0), outcome.best_value);
//! ```
//!
//! A `best_value` of `None` means the instance admits no feasible selection
//! at all, and an `Err` outcome means the LP oracle failed and the search is
//! unresolved. Swapping the bundled `microlp` backend for another LP library
//! is a matter of implementing `RelaxationOracle` (and its `OracleFactory`)
//! for it: the engine is oblivious to what computes its relaxations.

mod common;
mod error;
mod instance;
mod abstraction;
mod implementation;

pub use common::*;
pub use error::*;
pub use instance::*;
pub use abstraction::*;
pub use implementation::*;

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

//! This module defines the error types of the library. An infeasible
//! relaxation is *not* an error: it is an expected outcome which silently
//! prunes a branch (see `LpOutcome`). The errors below are the conditions
//! that genuinely prevent a solve from making progress.

use thiserror::Error;

/// The ways in which an instance construction can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInstance {
    /// The cost vector and the incidence matrix disagree on the number of tests.
    #[error("cost vector has {costs} entries but the incidence matrix has {rows} rows")]
    DimensionMismatch { costs: usize, rows: usize },
    /// One incidence row has a different width than the first one.
    #[error("incidence row {row} has {got} entries, expected {expected}")]
    RaggedIncidence { row: usize, got: usize, expected: usize },
    /// Test costs must be non-negative.
    #[error("test {variable} has negative cost {cost}")]
    NegativeCost { variable: usize, cost: f64 },
    /// The incidence matrix must be a 0/1 matrix.
    #[error("incidence entry ({row}, {col}) is {value}, expected 0 or 1")]
    NotBinary { row: usize, col: usize, value: u8 },
}

/// A failure of the LP-relaxation oracle itself (as opposed to an infeasible
/// relaxation). Such a failure is fatal to the whole solve: it aborts all
/// workers and is surfaced to the caller, never silently swallowed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    /// The underlying LP library reported an internal failure.
    #[error("lp backend failure: {0}")]
    Backend(String),
}

/// A solve-level failure: the search could not be run to completion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The relaxation oracle failed while the search was in flight.
    #[error("relaxation oracle failed: {0}")]
    Oracle(#[from] OracleError),
}

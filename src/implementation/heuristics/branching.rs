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

//! This module provides the branching-variable selection policies. Both
//! treat a relaxed value as fractional only beyond `FRACTIONAL_TOLERANCE`:
//! the LP backend routinely returns values like 0.9999999998 for variables
//! that are integral for all practical purposes, and branching on those
//! would split a node into two structurally identical subproblems.

use crate::{BranchingHeuristic, Variable};

/// A relaxed value closer than this to 0 or 1 is considered integral.
pub const FRACTIONAL_TOLERANCE: f64 = 1e-6;

/// Returns true iff the given relaxed value is integral within tolerance.
pub fn is_integral(x: f64) -> bool {
    x <= FRACTIONAL_TOLERANCE || x >= 1.0 - FRACTIONAL_TOLERANCE
}

/// The default branching policy: split on the variable whose relaxed value
/// is the closest to one half, the one the relaxation is the least decided
/// about. Branching near 0.5 tends to produce the most balanced subproblems,
/// which improves pruning over picking the greatest fractional part. Ties
/// are broken in favor of the lowest variable index.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosestToHalf;
impl BranchingHeuristic for ClosestToHalf {
    fn select(&self, relaxation: &[f64]) -> Option<Variable> {
        let mut best = None;
        let mut best_distance = f64::INFINITY;
        for (i, &x) in relaxation.iter().enumerate() {
            if is_integral(x) {
                continue;
            }
            let distance = (x - 0.5).abs();
            if distance < best_distance {
                best_distance = distance;
                best = Some(Variable(i));
            }
        }
        best
    }
}

/// An alternative policy: split on the variable with the greatest fractional
/// part. Ties are broken in favor of the lowest variable index.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostFractional;
impl BranchingHeuristic for MostFractional {
    fn select(&self, relaxation: &[f64]) -> Option<Variable> {
        let mut best = None;
        let mut best_fraction = 0.0;
        for (i, &x) in relaxation.iter().enumerate() {
            if is_integral(x) {
                continue;
            }
            let fraction = x - x.floor();
            if fraction > best_fraction {
                best_fraction = fraction;
                best = Some(Variable(i));
            }
        }
        best
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

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

//! This module provides the process-wide incumbent bound: the objective value
//! of the best integer-feasible solution found so far. Every worker reads it
//! to prune and offers it candidates; over the lifetime of a solve its value
//! only ever decreases.

use std::sync::atomic::{AtomicU64, Ordering};

/// A shared, monotonically non-increasing upper bound on the optimum.
///
/// The bound starts at +infinity ("no solution installed yet") and is updated
/// through `try_improve`, a compare-exchange loop over the bit pattern of the
/// stored f64. The loop makes the update a single atomic
/// compare-and-conditionally-set: two workers racing to install candidates
/// can never clobber a better bound with a worse one, and the stored value
/// always ends at the minimum of all candidates ever offered.
///
/// # Note
/// All atomic accesses use `Ordering::Relaxed`. The bound is a self-contained
/// scalar: no other memory is published along with it, and a worker reading a
/// momentarily stale value merely prunes a little less than it could have.
#[derive(Debug)]
pub struct Incumbent {
    bits: AtomicU64,
}

impl Incumbent {
    /// Creates a new incumbent bound, initialized to +infinity.
    pub fn new() -> Self {
        Incumbent {
            bits: AtomicU64::new(f64::INFINITY.to_bits()),
        }
    }

    /// Reads the current value of the bound.
    #[inline]
    pub fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Atomically installs `candidate` as the new bound iff it is strictly
    /// better (lower) than the stored value. Returns whether the update
    /// occurred.
    pub fn try_improve(&self, candidate: f64) -> bool {
        let mut current = self.bits.load(Ordering::Relaxed);
        loop {
            if candidate >= f64::from_bits(current) {
                return false;
            }
            match self.bits.compare_exchange_weak(
                current,
                candidate.to_bits(),
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }
}

impl Default for Incumbent {
    fn default() -> Self {
        Self::new()
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

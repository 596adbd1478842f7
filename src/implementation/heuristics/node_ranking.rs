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

//! This module provides the implementation of the node ranking that is used
//! to set the ordering of the solver frontier.

use std::cmp::Ordering;

use crate::{NodeRanking, SearchNode};

/// The MinBound strategy is one that always selects the node having the
/// least lower bound in the frontier. This is the best-first discipline of
/// the engine: because the frontier pops nodes in ascending lower-bound
/// order, the first node whose bound exceeds the incumbent proves that every
/// remaining open node is dominated too.
///
/// In case of equalities, the ties are broken in favor of the deepest node
/// (the one with the most fixed variables), which is the closest to becoming
/// a leaf. Any further tie-break is left to the heap.
#[derive(Debug, Clone, Copy)]
pub struct MinBound;
impl NodeRanking for MinBound {
    fn compare(&self, a: &SearchNode, b: &SearchNode) -> Ordering {
        b.bound
            .total_cmp(&a.bound)
            .then_with(|| a.depth().cmp(&b.depth()))
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

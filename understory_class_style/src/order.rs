// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Application order for a set of style rules.
//!
//! Specificity is only a partial order, so a comparison sort cannot be
//! trusted to produce a valid order. Instead the rules are treated as a DAG
//! ("`a` must apply before `b`" whenever `a` is less specific) and drained
//! with Kahn's algorithm. The ready set is a min-heap over input indices, so
//! among rules that could go next the earliest one in the input always wins.
//!
//! # Performance
//!
//! - Time complexity: O(n² · q) where q is the cost of one oracle query.
//! - Space complexity: O(n + E) for the edge lists and in-degrees.

use alloc::collections::BinaryHeap;
use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Reverse;

use smallvec::SmallVec;

use crate::oracle::TypeOracle;
use crate::specificity::is_less_specific;
use crate::style::Style;

/// Returns the indices of `styles` in application order.
///
/// Less specific rules come first. Rules that are incomparable keep their
/// input order whenever the specificity constraints allow it. The result is
/// a permutation of `0..styles.len()` and depends only on the input order
/// and the oracle.
///
/// If the oracle is inconsistent and the relation has a cycle, the rules on
/// the cycle are appended in input order after everything else.
#[must_use]
pub fn specificity_order<E: ?Sized, O: TypeOracle + ?Sized>(
    oracle: &O,
    styles: &[Style<E>],
) -> Vec<usize> {
    let n = styles.len();

    // successors[i]: rules that must apply after rule i.
    let mut successors: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); n];
    let mut in_degree = vec![0_usize; n];
    for (i, a) in styles.iter().enumerate() {
        for (j, b) in styles.iter().enumerate() {
            if i != j && is_less_specific(oracle, a, b) {
                successors[i].push(j);
                in_degree[j] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(i, _)| Reverse(i))
        .collect();

    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(i)) = ready.pop() {
        order.push(i);
        for &j in &successors[i] {
            in_degree[j] -= 1;
            if in_degree[j] == 0 {
                ready.push(Reverse(j));
            }
        }
    }

    if order.len() < n {
        log::warn!(
            "specificity relation has a cycle; {} style(s) kept in input order",
            n - order.len()
        );
        order.extend((0..n).filter(|&i| in_degree[i] > 0));
    }

    order
}

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Aggregation kernels
//!
//! The performance-critical path: gather → multiply → reduce → scatter over
//! ragged intervals. For every interval the destination row becomes the
//! weighted sum of the feature rows its pairings select:
//!
//! ```text
//! out[cell][ch] = Σ_i depth[ranks_depth[start+i]] * feat[ranks_feat[start+i]][ch]
//! ```
//!
//! Each referenced row is recomputed from scratch on every call (a discrete
//! expectation over the interval's samples, not a running accumulation);
//! rows never referenced by an interval keep their prior content.
//!
//! Summation order within an interval is the pairing order as given, for
//! every ordering, so repeated runs are bit-identical. Cross-ordering
//! agreement is tolerance-based: f32 addition is not associative.
//!
//! No bounds validation happens here beyond Rust's own slice checks — run
//! [`crate::validate()`] first when the index data is not trusted.

use crate::ragged::PoolProblem;

/// Pool with the preferred ordering.
///
/// Entry point for production callers; currently dispatches to
/// [`pool_pairing_outer`].
#[inline]
pub fn pool(problem: &PoolProblem<'_>, out: &mut [f32]) {
    pool_pairing_outer(problem, out);
}

/// Pairing-outer ordering (preferred).
///
/// Resolves the destination row once per interval, then walks pairings in
/// the outer loop and channels in the inner loop: the weight scalar is read
/// once per pairing and the feature row streams contiguously, so the channel
/// loop auto-vectorizes. The destination row is zeroed first, which keeps
/// the overwrite contract identical to [`pool_channel_outer`].
pub fn pool_pairing_outer(problem: &PoolProblem<'_>, out: &mut [f32]) {
    let c = problem.channels;
    let depth = problem.depth;
    let feat = problem.feat;
    let ranks_depth = problem.index.ranks_depth;
    let ranks_feat = problem.index.ranks_feat;
    let ranks_bev = problem.index.ranks_bev;

    debug_assert_eq!(ranks_depth.len(), ranks_feat.len());
    debug_assert_eq!(ranks_depth.len(), ranks_bev.len());
    debug_assert_eq!(out.len() % c, 0);

    for (start, length) in problem.index.intervals() {
        // A zero-length interval has no pairings and therefore no
        // destination cell to read.
        if length == 0 {
            continue;
        }
        let cell = ranks_bev[start] as usize;
        let row = &mut out[cell * c..cell * c + c];
        row.fill(0.0);

        for p in start..start + length {
            let weight = depth[ranks_depth[p] as usize];
            let sample = ranks_feat[p] as usize;
            let feat_row = &feat[sample * c..sample * c + c];
            for (acc, &f) in row.iter_mut().zip(feat_row) {
                *acc += weight * f;
            }
        }
    }
}

/// Channel-outer ordering (reference form).
///
/// Walks channels in the outer loop and pairings in the inner loop. The
/// per-pairing index arithmetic is redone once per channel — `C` times more
/// index work than [`pool_pairing_outer`] — but each accumulator lives in a
/// register for its whole reduction, which makes this the easy form to
/// check against.
pub fn pool_channel_outer(problem: &PoolProblem<'_>, out: &mut [f32]) {
    let c = problem.channels;
    let depth = problem.depth;
    let feat = problem.feat;
    let ranks_depth = problem.index.ranks_depth;
    let ranks_feat = problem.index.ranks_feat;
    let ranks_bev = problem.index.ranks_bev;

    debug_assert_eq!(ranks_depth.len(), ranks_feat.len());
    debug_assert_eq!(ranks_depth.len(), ranks_bev.len());
    debug_assert_eq!(out.len() % c, 0);

    for (start, length) in problem.index.intervals() {
        if length == 0 {
            continue;
        }
        let cell = ranks_bev[start] as usize;

        for ch in 0..c {
            let mut acc = 0.0_f32;
            for i in 0..length {
                let p = start + i;
                acc += depth[ranks_depth[p] as usize] * feat[ranks_feat[p] as usize * c + ch];
            }
            out[cell * c + ch] = acc;
        }
    }
}

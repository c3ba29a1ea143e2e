// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Interval-parallel pooling
//!
//! Intervals are independent under the partition invariant: each one writes
//! its own destination row and reads only shared immutable buffers. That
//! makes the interval the natural unit of data-parallel work.
//!
//! The shape here is fan-out/fan-in: a rayon pass computes one `(cell, row)`
//! contribution per interval, then a sequential join scatters the rows into
//! the output. The join is sum-free (rows are disjoint for validated input)
//! and runs in stored interval order, so the result matches the serial
//! kernels even on unvalidated duplicate-destination input.

use rayon::prelude::*;

use crate::ragged::PoolProblem;

/// Pool with intervals fanned out across the rayon thread pool.
///
/// Functionally equivalent to [`crate::pool_pairing_outer`]: per-interval
/// summation order is unchanged, so agreement is within f32 rounding of the
/// serial orderings and repeated runs are bit-identical.
pub fn pool_parallel(problem: &PoolProblem<'_>, out: &mut [f32]) {
    let c = problem.channels;
    let depth = problem.depth;
    let feat = problem.feat;
    let ranks_depth = problem.index.ranks_depth;
    let ranks_feat = problem.index.ranks_feat;
    let ranks_bev = problem.index.ranks_bev;
    let starts = problem.index.interval_starts;
    let lengths = problem.index.interval_lengths;

    debug_assert_eq!(starts.len(), lengths.len());
    debug_assert_eq!(out.len() % c, 0);

    // Fan-out: one weighted row per interval, no shared mutable state.
    let rows: Vec<(usize, Vec<f32>)> = starts
        .par_iter()
        .zip(lengths)
        .filter_map(|(&start, &length)| {
            let start = start as usize;
            let length = length as usize;
            if length == 0 {
                return None;
            }
            let cell = ranks_bev[start] as usize;
            let mut row = vec![0.0_f32; c];
            for p in start..start + length {
                let weight = depth[ranks_depth[p] as usize];
                let sample = ranks_feat[p] as usize;
                let feat_row = &feat[sample * c..sample * c + c];
                for (acc, &f) in row.iter_mut().zip(feat_row) {
                    *acc += weight * f;
                }
            }
            Some((cell, row))
        })
        .collect();

    // Fan-in: disjoint rows, no merge arithmetic needed.
    for (cell, row) in rows {
        out[cell * c..cell * c + c].copy_from_slice(&row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::pool_pairing_outer;
    use crate::ragged::RaggedIndex;

    /// 8 intervals of ragged lengths over 36 pairings, C = 5.
    fn build_tables() -> (Vec<f32>, Vec<f32>, Vec<u32>, Vec<u32>, Vec<u32>, Vec<u32>, Vec<u32>) {
        let n_weights = 64;
        let n_samples = 16;
        let c = 5;
        let depth: Vec<f32> = (0..n_weights).map(|i| (i as f32 * 0.113) % 1.0).collect();
        let feat: Vec<f32> = (0..n_samples * c)
            .map(|i| ((i * 31 % 17) as f32) * 0.25 - 2.0)
            .collect();

        let lengths_raw = [1_usize, 7, 3, 5, 2, 9, 4, 5];
        let mut starts = Vec::new();
        let mut lengths = Vec::new();
        let mut ranks_depth = Vec::new();
        let mut ranks_feat = Vec::new();
        let mut ranks_bev = Vec::new();
        let mut next = 0_usize;
        for (interval, &len) in lengths_raw.iter().enumerate() {
            starts.push(next as u32);
            lengths.push(len as u32);
            for i in 0..len {
                let p = next + i;
                ranks_depth.push(((p * 13) % n_weights) as u32);
                ranks_feat.push(((p * 7) % n_samples) as u32);
                ranks_bev.push((interval * 2) as u32);
            }
            next += len;
        }
        (depth, feat, ranks_depth, ranks_feat, ranks_bev, starts, lengths)
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (depth, feat, ranks_depth, ranks_feat, ranks_bev, starts, lengths) = build_tables();
        let problem = PoolProblem {
            channels: 5,
            depth: &depth,
            feat: &feat,
            index: RaggedIndex {
                ranks_depth: &ranks_depth,
                ranks_feat: &ranks_feat,
                ranks_bev: &ranks_bev,
                interval_starts: &starts,
                interval_lengths: &lengths,
            },
        };

        let n_cells = 16;
        let mut serial = vec![0.0_f32; n_cells * 5];
        let mut par = vec![0.0_f32; n_cells * 5];
        pool_pairing_outer(&problem, &mut serial);
        pool_parallel(&problem, &mut par);

        // Same per-interval summation order → bit-identical.
        assert_eq!(serial, par);
    }

    #[test]
    fn test_parallel_leaves_unreferenced_cells_alone() {
        let (depth, feat, ranks_depth, ranks_feat, ranks_bev, starts, lengths) = build_tables();
        let problem = PoolProblem {
            channels: 5,
            depth: &depth,
            feat: &feat,
            index: RaggedIndex {
                ranks_depth: &ranks_depth,
                ranks_feat: &ranks_feat,
                ranks_bev: &ranks_bev,
                interval_starts: &starts,
                interval_lengths: &lengths,
            },
        };

        // Destinations are the even cells 0..16; odd rows must survive.
        let mut out = vec![5.5_f32; 16 * 5];
        pool_parallel(&problem, &mut out);
        for cell in (1..16).step_by(2) {
            assert!(out[cell * 5..cell * 5 + 5].iter().all(|&v| v == 5.5));
        }
    }
}

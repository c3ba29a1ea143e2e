// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Umbrella surface check: the flattened re-exports cover the common path.

use bevpool::{pool, validate, PoolProblem, RaggedIndex};

#[test]
fn flattened_exports_cover_the_common_path() {
    let depth = [0.5_f32, 2.0];
    let feat = [1.0_f32, 1.0, 3.0, 4.0];
    let ranks_depth = [0_u32, 1];
    let ranks_feat = [0_u32, 1];
    let ranks_bev = [0_u32, 0];
    let starts = [0_u32];
    let lengths = [2_u32];

    let problem = PoolProblem {
        channels: 2,
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

    validate(&problem, 1).unwrap();
    let mut out = [0.0_f32; 2];
    pool(&problem, &mut out);
    assert_eq!(out, [6.5, 8.5]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_export_is_available() {
    let depth = [1.0_f32];
    let feat = [2.0_f32];
    let ranks_depth = [0_u32];
    let ranks_feat = [0_u32];
    let ranks_bev = [0_u32];
    let starts = [0_u32];
    let lengths = [1_u32];

    let problem = PoolProblem {
        channels: 1,
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

    let mut out = [0.0_f32; 1];
    bevpool::pool_parallel(&problem, &mut out);
    assert_eq!(out, [2.0]);
}

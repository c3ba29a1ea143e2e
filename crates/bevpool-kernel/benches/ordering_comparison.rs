// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Loop-ordering comparison benchmark
//!
//! Measures channel-outer vs pairing-outer (and the rayon interval-parallel
//! path when enabled) across channel widths and interval counts sized like
//! real camera-to-grid workloads.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bevpool_kernel::{pool_channel_outer, pool_pairing_outer, PoolProblem, RaggedIndex};

/// Owned tables generated deterministically (no rand in benches).
struct Fixture {
    channels: usize,
    n_cells: usize,
    depth: Vec<f32>,
    feat: Vec<f32>,
    ranks_depth: Vec<u32>,
    ranks_feat: Vec<u32>,
    ranks_bev: Vec<u32>,
    interval_starts: Vec<u32>,
    interval_lengths: Vec<u32>,
}

impl Fixture {
    fn problem(&self) -> PoolProblem<'_> {
        PoolProblem {
            channels: self.channels,
            depth: &self.depth,
            feat: &self.feat,
            index: RaggedIndex {
                ranks_depth: &self.ranks_depth,
                ranks_feat: &self.ranks_feat,
                ranks_bev: &self.ranks_bev,
                interval_starts: &self.interval_starts,
                interval_lengths: &self.interval_lengths,
            },
        }
    }
}

/// Ragged intervals with lengths cycling 1..=50, one distinct cell each.
fn generate_fixture(n_intervals: usize, channels: usize) -> Fixture {
    let n_weights = 1 << 16;
    let n_samples = 4096;
    let depth: Vec<f32> = (0..n_weights).map(|i| ((i * 37) % 1000) as f32 / 1000.0).collect();
    let feat: Vec<f32> = (0..n_samples * channels)
        .map(|i| ((i * 13) % 2000) as f32 / 1000.0 - 1.0)
        .collect();

    let mut ranks_depth = Vec::new();
    let mut ranks_feat = Vec::new();
    let mut ranks_bev = Vec::new();
    let mut interval_starts = Vec::new();
    let mut interval_lengths = Vec::new();
    for interval in 0..n_intervals {
        let length = interval % 50 + 1;
        let base = ranks_bev.len();
        interval_starts.push(base as u32);
        interval_lengths.push(length as u32);
        for i in 0..length {
            let p = base + i;
            ranks_depth.push(((p * 131) % n_weights) as u32);
            ranks_feat.push(((p * 53) % n_samples) as u32);
            ranks_bev.push(interval as u32);
        }
    }

    Fixture {
        channels,
        n_cells: n_intervals,
        depth,
        feat,
        ranks_depth,
        ranks_feat,
        ranks_bev,
        interval_starts,
        interval_lengths,
    }
}

fn bench_orderings(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_ordering");

    for &n_intervals in &[1_000_usize, 13_000] {
        for &channels in &[32_usize, 80] {
            let fixture = generate_fixture(n_intervals, channels);
            let mut out = vec![0.0_f32; fixture.n_cells * channels];
            let label = format!("{n_intervals}x{channels}");

            group.bench_with_input(
                BenchmarkId::new("channel_outer", &label),
                &fixture,
                |b, fixture| {
                    let problem = fixture.problem();
                    b.iter(|| {
                        out.fill(0.0);
                        pool_channel_outer(black_box(&problem), &mut out);
                    });
                },
            );

            group.bench_with_input(
                BenchmarkId::new("pairing_outer", &label),
                &fixture,
                |b, fixture| {
                    let problem = fixture.problem();
                    b.iter(|| {
                        out.fill(0.0);
                        pool_pairing_outer(black_box(&problem), &mut out);
                    });
                },
            );

            #[cfg(feature = "parallel")]
            group.bench_with_input(
                BenchmarkId::new("parallel", &label),
                &fixture,
                |b, fixture| {
                    let problem = fixture.problem();
                    b.iter(|| {
                        out.fill(0.0);
                        bevpool_kernel::pool_parallel(black_box(&problem), &mut out);
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_orderings);
criterion_main!(benches);

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Checked precondition pass
//!
//! The kernels assume well-formed index data; this module is where that
//! assumption is earned. Run [`validate`] once when the tables come from an
//! untrusted producer (or straight off disk), then call the kernels freely —
//! the hot loops never branch on error conditions themselves.
//!
//! Validation is all-or-nothing: the first violation is returned and the
//! input is rejected wholesale. There is no partial-success state.

use tracing::debug;

use crate::error::{PoolError, Result};
use crate::ragged::PoolProblem;

/// Validate a pooling problem against an output grid of `n_cells` cells.
///
/// Checks, in order:
/// - rank tables and interval tables agree in length;
/// - the feature buffer is a whole number of `channels`-wide rows;
/// - every rank is in bounds for its target buffer;
/// - intervals are non-empty, in range, and partition the pairing space
///   with no gap and no overlap;
/// - every pairing of an interval targets the interval's cell;
/// - no two intervals target the same cell.
///
/// # Errors
///
/// Returns the [`PoolError`] variant matching the first violation found.
pub fn validate(problem: &PoolProblem<'_>, n_cells: usize) -> Result<()> {
    let index = &problem.index;

    if index.ranks_depth.len() != index.ranks_feat.len()
        || index.ranks_depth.len() != index.ranks_bev.len()
    {
        return Err(PoolError::RankLengthMismatch {
            depth: index.ranks_depth.len(),
            feat: index.ranks_feat.len(),
            bev: index.ranks_bev.len(),
        });
    }
    if index.interval_starts.len() != index.interval_lengths.len() {
        return Err(PoolError::IntervalLengthMismatch {
            starts: index.interval_starts.len(),
            lengths: index.interval_lengths.len(),
        });
    }
    if problem.channels == 0 {
        return Err(PoolError::ZeroChannels);
    }
    if problem.feat.len() % problem.channels != 0 {
        return Err(PoolError::FeatureSizeMismatch {
            len: problem.feat.len(),
            channels: problem.channels,
        });
    }

    let n_pairings = index.n_pairings();
    let n_samples = problem.n_samples();
    let n_weights = problem.depth.len();

    for p in 0..n_pairings {
        let d = index.ranks_depth[p];
        if d as usize >= n_weights {
            return Err(PoolError::WeightIndexOutOfBounds { pairing: p, index: d, len: n_weights });
        }
        let f = index.ranks_feat[p];
        if f as usize >= n_samples {
            return Err(PoolError::FeatureIndexOutOfBounds { pairing: p, index: f, len: n_samples });
        }
        let b = index.ranks_bev[p];
        if b as usize >= n_cells {
            return Err(PoolError::CellIndexOutOfBounds { pairing: p, index: b, len: n_cells });
        }
    }

    // Partition check: every pairing covered exactly once.
    let mut covered = vec![false; n_pairings];
    for (interval, (start, length)) in index.intervals().enumerate() {
        if length == 0 {
            return Err(PoolError::EmptyInterval { interval });
        }
        if start + length > n_pairings {
            return Err(PoolError::IntervalOutOfRange {
                interval,
                start,
                length,
                pairings: n_pairings,
            });
        }
        for p in start..start + length {
            if covered[p] {
                return Err(PoolError::OverlappingIntervals { pairing: p });
            }
            covered[p] = true;
        }
    }
    if let Some(p) = covered.iter().position(|&c| !c) {
        return Err(PoolError::CoverageGap { pairing: p });
    }

    // Destination checks: constant within an interval, unique across them.
    let mut cell_owner: Vec<Option<usize>> = vec![None; n_cells];
    for (interval, (start, length)) in index.intervals().enumerate() {
        let cell = index.ranks_bev[start];
        for p in start..start + length {
            let found = index.ranks_bev[p];
            if found != cell {
                return Err(PoolError::SplitDestination {
                    interval,
                    pairing: p,
                    expected: cell,
                    found,
                });
            }
        }
        match cell_owner[cell as usize] {
            Some(first) => {
                return Err(PoolError::DuplicateDestination { cell, first, second: interval });
            }
            None => cell_owner[cell as usize] = Some(interval),
        }
    }

    debug!(
        pairings = n_pairings,
        intervals = index.n_intervals(),
        cells = n_cells,
        channels = problem.channels,
        "pool index validated"
    );
    Ok(())
}

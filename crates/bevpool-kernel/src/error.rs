// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for pooling validation
//!
//! Every variant corresponds to one malformed-input class rejected by the
//! validation pass. The aggregation kernels themselves never construct
//! these: out-of-contract input on the hot path is a caller bug, not a
//! reported error.

use thiserror::Error;

/// Typed rejection reasons for malformed index/interval data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("rank tables disagree in length: ranks_depth={depth}, ranks_feat={feat}, ranks_bev={bev}")]
    RankLengthMismatch { depth: usize, feat: usize, bev: usize },

    #[error("interval tables disagree in length: starts={starts}, lengths={lengths}")]
    IntervalLengthMismatch { starts: usize, lengths: usize },

    #[error("channel count must be non-zero")]
    ZeroChannels,

    #[error("feature buffer length {len} is not a multiple of {channels} channels")]
    FeatureSizeMismatch { len: usize, channels: usize },

    #[error("pairing {pairing}: weight index {index} out of bounds for {len} weights")]
    WeightIndexOutOfBounds { pairing: usize, index: u32, len: usize },

    #[error("pairing {pairing}: feature index {index} out of bounds for {len} samples")]
    FeatureIndexOutOfBounds { pairing: usize, index: u32, len: usize },

    #[error("pairing {pairing}: cell index {index} out of bounds for {len} cells")]
    CellIndexOutOfBounds { pairing: usize, index: u32, len: usize },

    #[error("interval {interval} has zero length")]
    EmptyInterval { interval: usize },

    #[error("interval {interval} spans [{start}, {start}+{length}) past {pairings} pairings")]
    IntervalOutOfRange { interval: usize, start: usize, length: usize, pairings: usize },

    #[error("pairing {pairing} is covered by more than one interval")]
    OverlappingIntervals { pairing: usize },

    #[error("pairing {pairing} is covered by no interval")]
    CoverageGap { pairing: usize },

    #[error("interval {interval}: pairing {pairing} targets cell {found}, interval targets cell {expected}")]
    SplitDestination { interval: usize, pairing: usize, expected: u32, found: u32 },

    #[error("cell {cell} is targeted by both interval {first} and interval {second}")]
    DuplicateDestination { cell: u32, first: usize, second: usize },
}

pub type Result<T> = core::result::Result<T, PoolError>;

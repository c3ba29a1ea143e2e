// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # BEV Pool Kernel
//!
//! Ragged-group scatter-accumulation: per-sample feature vectors, weighted by
//! a scalar confidence value, are pooled into a fixed grid of output cells.
//! The mapping from samples to cells is described entirely by precomputed
//! index arrays ("rank" tables) and a list of contiguous intervals over the
//! pairing index space — no geometry is evaluated at kernel time.
//!
//! ## Pipeline position
//! Upstream produces the rank tables and intervals once per frame geometry;
//! this crate consumes them together with the flat weight and feature
//! buffers and fills the caller-owned output grid. One invocation per
//! inference pass, no internal state.
//!
//! ## Two-phase contract
//! - [`validate()`](validate) is the optional, checked precondition pass: it rejects
//!   malformed index data with a typed [`PoolError`].
//! - The aggregation kernels ([`pool`], [`pool_pairing_outer`],
//!   [`pool_channel_outer`]) assume validated input and carry no error path.
//!
//! ## Loop orderings
//! Both admissible orderings are exported: channel-outer (reference form)
//! and pairing-outer (preferred — streams each feature row contiguously so
//! the channel loop auto-vectorizes). [`pool`] dispatches to the preferred
//! ordering; `pool_parallel` (feature `parallel`) fans intervals out across
//! a rayon pool.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod kernel;
pub mod ragged;
pub mod validate;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use error::{PoolError, Result};
pub use kernel::{pool, pool_channel_outer, pool_pairing_outer};
pub use ragged::{PoolProblem, RaggedIndex};
pub use validate::validate;

#[cfg(feature = "parallel")]
pub use parallel::pool_parallel;

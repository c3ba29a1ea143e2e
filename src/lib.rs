// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # bevpool
//!
//! Ragged weighted pooling of per-sample feature vectors into a fixed
//! bird's-eye-view cell grid. This umbrella crate re-exports the workspace
//! members; depend on them individually for selective use.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! bevpool = "0.3"  # Default: kernel + io, parallel execution enabled
//! ```
//!
//! ```no_run
//! use bevpool::io::Scene;
//! use bevpool::kernel::{pool, validate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scene = Scene::load("./capture")?;
//! let problem = scene.problem();
//! validate(&problem, scene.n_cells)?;
//!
//! let mut out = vec![0.0_f32; scene.n_cells * scene.channels];
//! pool(&problem, &mut out);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//! - **`parallel`** (default): rayon interval-parallel kernel
//!   (`kernel::pool_parallel`).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use bevpool_io as io;
pub use bevpool_kernel as kernel;

// The common surface, flattened for convenience.
pub use bevpool_io::Scene;
pub use bevpool_kernel::{
    pool, pool_channel_outer, pool_pairing_outer, validate, PoolError, PoolProblem, RaggedIndex,
};

#[cfg(feature = "parallel")]
pub use bevpool_kernel::pool_parallel;

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # BEV Pool I/O
//!
//! Reader/writer for the raw tensor file format the pooling pipeline
//! records: one flat little-endian array per file, with the logical name,
//! shape and dtype encoded in the file name
//! (`feat_1_6_16_44_80_float32.bin`, `ranks_bev_356967_int32.bin`, ...).
//!
//! [`Scene`] bundles the eight arrays of one recorded inference pass and
//! hands them to the kernel crate as a borrowed [`bevpool_kernel::PoolProblem`].
//!
//! This crate is tooling around the kernel: nothing here runs during
//! inference.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod reader;
pub mod scene;
pub mod tensor_meta;

pub use error::{IoError, Result};
pub use reader::{read_f32, read_i32, read_index, write_f32, write_i32};
pub use scene::Scene;
pub use tensor_meta::{Dtype, TensorMeta};

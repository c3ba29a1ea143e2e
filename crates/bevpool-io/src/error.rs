// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for tensor file loading

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file name {name:?} does not follow <name>_<dims...>_<dtype>.bin")]
    BadFileName { name: String },

    #[error("file name {name:?} carries unsupported dtype {dtype:?}")]
    UnsupportedDtype { name: String, dtype: String },

    #[error("{}: {bytes} bytes is not a whole number of {elem_size}-byte elements", path.display())]
    TruncatedFile { path: PathBuf, bytes: usize, elem_size: usize },

    #[error("{}: element {offset} is negative ({value}), not a valid index", path.display())]
    NegativeIndex { path: PathBuf, offset: usize, value: i32 },

    #[error("no {name:?} array found in {}", dir.display())]
    MissingArray { name: &'static str, dir: PathBuf },

    #[error("array {name:?} is recorded as {found}, expected {expected}")]
    DtypeMismatch { name: &'static str, expected: &'static str, found: String },

    #[error("array {name:?}: file holds {found} elements, name promises {expected}")]
    ElementCountMismatch { name: &'static str, expected: usize, found: usize },

    #[error("array {name:?} has {len} elements, not divisible by {channels} channels")]
    RaggedShape { name: &'static str, len: usize, channels: usize },
}

pub type Result<T> = std::result::Result<T, IoError>;

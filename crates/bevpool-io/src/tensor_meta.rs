// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Tensor file naming scheme
//!
//! A recorded array is a bare little-endian buffer; everything else lives in
//! the file name: `<name>_<d0>_<d1>..._<dtype>.bin`. The dims are the
//! maximal run of numeric tokens directly before the dtype suffix, so
//! logical names may themselves contain underscores (`ranks_bev`,
//! `interval_starts`).

use core::fmt;

use crate::error::{IoError, Result};

/// Element type of a recorded array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dtype {
    Float32,
    Int32,
}

impl Dtype {
    /// Size of one element in bytes.
    pub fn elem_size(self) -> usize {
        match self {
            Self::Float32 | Self::Int32 => 4,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "float32" => Some(Self::Float32),
            "int32" => Some(Self::Int32),
            _ => None,
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float32 => write!(f, "float32"),
            Self::Int32 => write!(f, "int32"),
        }
    }
}

/// Logical name, shape and dtype decoded from a tensor file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorMeta {
    pub name: String,
    pub shape: Vec<usize>,
    pub dtype: Dtype,
}

impl TensorMeta {
    /// Decode a file name such as `feat_1_6_16_44_80_float32.bin`.
    ///
    /// # Errors
    ///
    /// [`IoError::BadFileName`] when the suffix, dims or name are missing;
    /// [`IoError::UnsupportedDtype`] for an unknown dtype token.
    pub fn parse(file_name: &str) -> Result<Self> {
        let bad = || IoError::BadFileName { name: file_name.to_string() };

        let stem = file_name.strip_suffix(".bin").ok_or_else(bad)?;
        let tokens: Vec<&str> = stem.split('_').collect();
        if tokens.len() < 3 {
            return Err(bad());
        }

        let dtype_token = tokens[tokens.len() - 1];
        let dtype = Dtype::parse(dtype_token).ok_or_else(|| IoError::UnsupportedDtype {
            name: file_name.to_string(),
            dtype: dtype_token.to_string(),
        })?;

        // Dims: maximal numeric run before the dtype token.
        let mut first_dim = tokens.len() - 1;
        while first_dim > 0 && tokens[first_dim - 1].parse::<usize>().is_ok() {
            first_dim -= 1;
        }
        if first_dim == tokens.len() - 1 || first_dim == 0 {
            // no dims, or no name left over
            return Err(bad());
        }

        let shape = tokens[first_dim..tokens.len() - 1]
            .iter()
            .map(|t| t.parse::<usize>())
            .collect::<core::result::Result<_, _>>()
            .map_err(|_| bad())?;
        let name = tokens[..first_dim].join("_");

        Ok(Self { name, shape, dtype })
    }

    /// Re-encode into the on-disk file name.
    pub fn file_name(&self) -> String {
        let dims: Vec<String> = self.shape.iter().map(|d| d.to_string()).collect();
        format!("{}_{}_{}.bin", self.name, dims.join("_"), self.dtype)
    }

    /// Total element count (product of dims).
    pub fn elem_count(&self) -> usize {
        self.shape.iter().product()
    }
}

// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Raw array reading and writing
//!
//! Files are bare element sequences, little-endian, no header. Reads map
//! the file and decode with explicit byte order so the format stays
//! portable; writes are the exact inverse. Index arrays are recorded as
//! `int32` and surface here as `u32` — a negative entry is a load error,
//! never a kernel concern.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use tracing::debug;

use crate::error::{IoError, Result};

fn map_file(path: &Path, elem_size: usize) -> Result<Mmap> {
    let file = File::open(path)?;
    // Safety: the mapping is read-only and dropped before this call returns
    // to the caller's control of the file.
    let mmap = unsafe { Mmap::map(&file)? };
    if mmap.len() % elem_size != 0 {
        return Err(IoError::TruncatedFile {
            path: path.to_path_buf(),
            bytes: mmap.len(),
            elem_size,
        });
    }
    Ok(mmap)
}

/// Read a `float32` array.
pub fn read_f32(path: impl AsRef<Path>) -> Result<Vec<f32>> {
    let path = path.as_ref();
    let mmap = map_file(path, 4)?;
    let values: Vec<f32> = mmap
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    debug!(path = %path.display(), elements = values.len(), "read float32 array");
    Ok(values)
}

/// Read an `int32` array.
pub fn read_i32(path: impl AsRef<Path>) -> Result<Vec<i32>> {
    let path = path.as_ref();
    let mmap = map_file(path, 4)?;
    let values: Vec<i32> = mmap
        .chunks_exact(4)
        .map(|b| i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    debug!(path = %path.display(), elements = values.len(), "read int32 array");
    Ok(values)
}

/// Read an `int32` index array as `u32`, rejecting negative entries.
pub fn read_index(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let raw = read_i32(path)?;
    let mut values = Vec::with_capacity(raw.len());
    for (offset, &v) in raw.iter().enumerate() {
        if v < 0 {
            return Err(IoError::NegativeIndex { path: path.to_path_buf(), offset, value: v });
        }
        values.push(v as u32);
    }
    Ok(values)
}

/// Write a `float32` array (inverse of [`read_f32`]).
pub fn write_f32(path: impl AsRef<Path>, values: &[f32]) -> Result<()> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Write an `int32` array (inverse of [`read_i32`]).
pub fn write_i32(path: impl AsRef<Path>, values: &[i32]) -> Result<()> {
    let mut bytes = Vec::with_capacity(values.len() * 4);
    for v in values {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depth_4_float32.bin");
        let values = [0.5_f32, -1.25, 3.75, f32::MIN_POSITIVE];
        write_f32(&path, &values).unwrap();
        assert_eq!(read_f32(&path).unwrap(), values);
    }

    #[test]
    fn test_i32_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranks_4_int32.bin");
        let values = [0_i32, -7, i32::MAX, 42];
        write_i32(&path, &values).unwrap();
        assert_eq!(read_i32(&path).unwrap(), values);
    }

    #[test]
    fn test_index_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranks_3_int32.bin");
        write_i32(&path, &[0, 5, 356966]).unwrap();
        assert_eq!(read_index(&path).unwrap(), vec![0_u32, 5, 356966]);
    }

    #[test]
    fn test_index_rejects_negative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranks_3_int32.bin");
        write_i32(&path, &[0, -1, 2]).unwrap();
        assert!(matches!(
            read_index(&path),
            Err(IoError::NegativeIndex { offset: 1, value: -1, .. })
        ));
    }

    #[test]
    fn test_rejects_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depth_1_float32.bin");
        std::fs::write(&path, [0_u8, 1, 2]).unwrap();
        assert!(matches!(
            read_f32(&path),
            Err(IoError::TruncatedFile { bytes: 3, elem_size: 4, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_f32("/nonexistent/depth_1_float32.bin"),
            Err(IoError::Io(_))
        ));
    }
}

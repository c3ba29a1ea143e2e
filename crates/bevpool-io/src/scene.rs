// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recorded pooling scenes
//!
//! A scene is the complete input/output capture of one inference pass:
//! weight and feature buffers, the four rank tables, the interval tables,
//! and the reference output grid the pass produced. Eight arrays, one
//! directory, located by logical name.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use bevpool_kernel::{PoolProblem, RaggedIndex};
use tracing::{debug, info};

use crate::error::{IoError, Result};
use crate::reader::{read_f32, read_index};
use crate::tensor_meta::{Dtype, TensorMeta};

const DEPTH: &str = "depth";
const FEAT: &str = "feat";
const RANKS_DEPTH: &str = "ranks_depth";
const RANKS_FEAT: &str = "ranks_feat";
const RANKS_BEV: &str = "ranks_bev";
const INTERVAL_STARTS: &str = "interval_starts";
const INTERVAL_LENGTHS: &str = "interval_lengths";
const REFERENCE: &str = "bev_feat";

/// One recorded inference pass, fully loaded into memory.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Channels per feature row, from the last dim of the `feat` shape.
    pub channels: usize,
    /// Output cells, from the reference grid size over `channels`.
    pub n_cells: usize,
    pub depth: Vec<f32>,
    pub feat: Vec<f32>,
    pub ranks_depth: Vec<u32>,
    pub ranks_feat: Vec<u32>,
    pub ranks_bev: Vec<u32>,
    pub interval_starts: Vec<u32>,
    pub interval_lengths: Vec<u32>,
    /// The grid the recorded pass produced, for correctness comparison.
    pub reference: Vec<f32>,
}

/// Index of parseable tensor files in one directory.
struct SceneDir {
    dir: PathBuf,
    by_name: HashMap<String, (TensorMeta, PathBuf)>,
}

impl SceneDir {
    fn scan(dir: &Path) -> Result<Self> {
        let mut by_name = HashMap::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // Directories and unrelated files are fine to skip; only a
            // well-formed tensor name registers.
            let Ok(meta) = TensorMeta::parse(file_name) else {
                continue;
            };
            debug!(name = %meta.name, file = file_name, "found tensor file");
            by_name.insert(meta.name.clone(), (meta, path));
        }
        Ok(Self { dir: dir.to_path_buf(), by_name })
    }

    fn find(&self, name: &'static str, dtype: Dtype) -> Result<(&TensorMeta, &Path)> {
        let (meta, path) = self
            .by_name
            .get(name)
            .ok_or_else(|| IoError::MissingArray { name, dir: self.dir.clone() })?;
        if meta.dtype != dtype {
            return Err(IoError::DtypeMismatch {
                name,
                expected: match dtype {
                    Dtype::Float32 => "float32",
                    Dtype::Int32 => "int32",
                },
                found: meta.dtype.to_string(),
            });
        }
        Ok((meta, path))
    }

    fn load_f32(&self, name: &'static str) -> Result<Vec<f32>> {
        let (meta, path) = self.find(name, Dtype::Float32)?;
        let values = read_f32(path)?;
        check_count(name, meta, values.len())?;
        Ok(values)
    }

    fn load_index(&self, name: &'static str) -> Result<Vec<u32>> {
        let (meta, path) = self.find(name, Dtype::Int32)?;
        let values = read_index(path)?;
        check_count(name, meta, values.len())?;
        Ok(values)
    }
}

fn check_count(name: &'static str, meta: &TensorMeta, found: usize) -> Result<()> {
    let expected = meta.elem_count();
    if found != expected {
        return Err(IoError::ElementCountMismatch { name, expected, found });
    }
    Ok(())
}

impl Scene {
    /// Load the eight arrays of a recorded pass from `dir`.
    ///
    /// # Errors
    ///
    /// Any array missing, misnamed, mistyped, truncated, or inconsistent
    /// with its recorded shape rejects the whole scene.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let scan = SceneDir::scan(dir)?;

        let (feat_meta, _) = scan.find(FEAT, Dtype::Float32)?;
        let channels = *feat_meta.shape.last().unwrap_or(&0);
        if channels == 0 {
            return Err(IoError::BadFileName { name: feat_meta.file_name() });
        }

        let depth = scan.load_f32(DEPTH)?;
        let feat = scan.load_f32(FEAT)?;
        let ranks_depth = scan.load_index(RANKS_DEPTH)?;
        let ranks_feat = scan.load_index(RANKS_FEAT)?;
        let ranks_bev = scan.load_index(RANKS_BEV)?;
        let interval_starts = scan.load_index(INTERVAL_STARTS)?;
        let interval_lengths = scan.load_index(INTERVAL_LENGTHS)?;
        let reference = scan.load_f32(REFERENCE)?;

        if reference.len() % channels != 0 {
            return Err(IoError::RaggedShape {
                name: REFERENCE,
                len: reference.len(),
                channels,
            });
        }
        let n_cells = reference.len() / channels;

        info!(
            dir = %dir.display(),
            channels,
            n_cells,
            pairings = ranks_bev.len(),
            intervals = interval_starts.len(),
            "scene loaded"
        );

        Ok(Self {
            channels,
            n_cells,
            depth,
            feat,
            ranks_depth,
            ranks_feat,
            ranks_bev,
            interval_starts,
            interval_lengths,
            reference,
        })
    }

    /// Borrow the scene as a kernel problem.
    pub fn problem(&self) -> PoolProblem<'_> {
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

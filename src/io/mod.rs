//! Mesh file I/O.
//!
//! Files are read into a [`UvMesh`]: the half-edge mesh plus its per-corner
//! UV layer.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Per-corner `vt` UVs, n-gon faces |
//!
//! # Usage
//!
//! ```no_run
//! use seamline::io::{load, save, UvMesh};
//!
//! let mut loaded: UvMesh = load("model.obj").unwrap();
//! loaded.uvs.mark_seams_from_splits(&mut loaded.mesh, 1e-6).unwrap();
//! save(&loaded.mesh, &loaded.uvs, "output.obj").unwrap();
//! ```

pub mod obj;

use std::path::Path;

use crate::error::{MeshError, Result};
use crate::mesh::{CornerUvs, HalfEdgeMesh, MeshIndex};

/// A mesh together with its UV layer.
#[derive(Debug, Clone)]
pub struct UvMesh<I: MeshIndex = u32> {
    /// Topology and positions.
    pub mesh: HalfEdgeMesh<I>,
    /// One UV per corner of `mesh`.
    pub uvs: CornerUvs<I>,
}

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh with UVs, choosing the format by file extension.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<UvMesh<I>> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::load(path),
    }
}

/// Save a mesh with UVs, choosing the format by file extension.
pub fn save<P: AsRef<Path>, I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save(mesh, uvs, path),
    }
}

//! Interior UV smoothing.
//!
//! Each inner vertex is relaxed toward the average of the UVs that follow
//! its corners in their faces. All corners of the vertex then receive that
//! single average, which also welds any split the vertex had. The
//! `_within` variants take a face predicate and only read and write the
//! corners of faces it accepts.
//!
//! Updates are Jacobi style: every average in an iteration is computed from
//! the values at the start of the iteration, so the result does not depend
//! on vertex order and the averages can be computed in parallel.
//!
//! # Example
//!
//! ```
//! use seamline::algo::smooth::{smooth_interior, SmoothOptions};
//! use seamline::algo::UvEdit;
//! use seamline::mesh::{build_from_quads, CornerUvs, HalfEdgeMesh, VertexId};
//! use nalgebra::{Point2, Point3};
//!
//! let mut vertices = Vec::new();
//! for j in 0..3 {
//!     for i in 0..3 {
//!         vertices.push(Point3::new(i as f64, j as f64, 0.0));
//!     }
//! }
//! let faces = vec![[0, 1, 4, 3], [1, 2, 5, 4], [3, 4, 7, 6], [4, 5, 8, 7]];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//!
//! let mut planar: Vec<Point2<f64>> = vertices.iter().map(|p| Point2::new(p.x, p.y)).collect();
//! planar[4] = Point2::new(1.4, 0.7);
//! let uvs = CornerUvs::from_vertex_uvs(&mesh, &planar).unwrap();
//!
//! let mut edit = UvEdit::new(&uvs);
//! smooth_interior(&mesh, &mut edit, &[VertexId::new(4)], &SmoothOptions::default());
//!
//! let corner = mesh.vertex_loops(VertexId::new(4)).next().unwrap();
//! assert!((edit.get(corner) - Point2::new(1.0, 1.0)).norm() < 1e-12);
//! ```

use nalgebra::{Point2, Vector2};
use rayon::prelude::*;

use super::edit::UvEdit;
use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex, VertexId};

/// Options for interior smoothing.
#[derive(Debug, Clone)]
pub struct SmoothOptions {
    /// Number of smoothing iterations (default: 2).
    pub iterations: usize,

    /// Whether to use parallel execution (default: true).
    pub parallel: bool,
}

impl Default for SmoothOptions {
    fn default() -> Self {
        Self {
            iterations: 2,
            parallel: true,
        }
    }
}

impl SmoothOptions {
    /// Create options with the specified number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Average UV of the corners that follow `v`'s corners.
///
/// Returns `None` for a vertex without corners.
pub fn link_average<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edit: &UvEdit<'_, I>,
    v: VertexId<I>,
) -> Option<Point2<f64>> {
    link_average_within(mesh, edit, v, |_| true)
}

/// [`link_average`] over the corners of `v` whose face passes `within`.
pub fn link_average_within<I, F>(
    mesh: &HalfEdgeMesh<I>,
    edit: &UvEdit<'_, I>,
    v: VertexId<I>,
    within: F,
) -> Option<Point2<f64>>
where
    I: MeshIndex,
    F: Fn(FaceId<I>) -> bool,
{
    let mut sum = Vector2::zeros();
    let mut count = 0usize;
    for he in mesh.vertex_loops(v).filter(|&he| within(mesh.face_of(he))) {
        sum += edit.get(mesh.next(he)).coords;
        count += 1;
    }

    if count == 0 {
        return None;
    }
    Some(Point2::from(sum / count as f64))
}

/// Relax the UVs of `inner` vertices in place.
///
/// Writes are staged in `edit`. Vertices without corners are skipped.
pub fn smooth_interior<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edit: &mut UvEdit<'_, I>,
    inner: &[VertexId<I>],
    options: &SmoothOptions,
) {
    smooth_interior_within(mesh, edit, inner, options, |_| true);
}

/// [`smooth_interior`] restricted to corners whose face passes `within`.
///
/// Corners of other faces are neither read nor written.
pub fn smooth_interior_within<I, F>(
    mesh: &HalfEdgeMesh<I>,
    edit: &mut UvEdit<'_, I>,
    inner: &[VertexId<I>],
    options: &SmoothOptions,
    within: F,
) where
    I: MeshIndex,
    F: Fn(FaceId<I>) -> bool + Sync,
{
    if options.iterations == 0 || inner.is_empty() {
        return;
    }

    let within = &within;
    for _ in 0..options.iterations {
        let averages: Vec<Option<Point2<f64>>> = {
            let snapshot = &*edit;
            if options.parallel {
                inner
                    .par_iter()
                    .map(|&v| link_average_within(mesh, snapshot, v, within))
                    .collect()
            } else {
                inner
                    .iter()
                    .map(|&v| link_average_within(mesh, snapshot, v, within))
                    .collect()
            }
        };

        for (&v, average) in inner.iter().zip(averages) {
            match average {
                Some(uv) => {
                    for he in mesh.vertex_loops(v).filter(|&he| within(mesh.face_of(he))) {
                        edit.set(he, uv);
                    }
                }
                None => log::debug!("skipping vertex {:?} without corners", v),
            }
        }
    }
}

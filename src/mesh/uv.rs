//! Per-corner UV storage.
//!
//! This module provides [`CornerUvs`], a UV layer with one coordinate per
//! half-edge. Only face corners carry meaningful values; boundary half-edge
//! slots exist so the layer can be indexed directly by [`HalfEdgeId`].

use std::marker::PhantomData;

use nalgebra::Point2;

use super::halfedge::HalfEdgeMesh;
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex};
use crate::error::{MeshError, Result};

/// UV coordinates for every corner of a mesh.
///
/// Two corners of the same vertex in different faces are independent, which
/// is what lets UV islands split along seams.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerUvs<I: MeshIndex = u32> {
    coords: Vec<Point2<f64>>,
    _marker: PhantomData<I>,
}

impl<I: MeshIndex> CornerUvs<I> {
    /// Wrap raw coordinates indexed by half-edge.
    pub fn new(coords: Vec<Point2<f64>>) -> Self {
        Self {
            coords,
            _marker: PhantomData,
        }
    }

    /// A layer of `n` zero coordinates.
    pub fn zeros(n: usize) -> Self {
        Self::new(vec![Point2::origin(); n])
    }

    /// A layer where every corner takes its vertex's coordinate.
    ///
    /// The result has no UV splits; seams still partition islands.
    pub fn from_vertex_uvs(mesh: &HalfEdgeMesh<I>, uvs: &[Point2<f64>]) -> Result<Self> {
        if uvs.len() != mesh.num_vertices() {
            return Err(MeshError::UvCountMismatch {
                expected: mesh.num_vertices(),
                actual: uvs.len(),
            });
        }

        let mut layer = Self::zeros(mesh.num_halfedges());
        for f in mesh.face_ids() {
            for he in mesh.face_loops(f) {
                layer.set(he, uvs[mesh.origin(he).index()]);
            }
        }
        Ok(layer)
    }

    /// A layer from per-face corner lists, in face corner order.
    pub fn from_face_corners(mesh: &HalfEdgeMesh<I>, faces: &[Vec<Point2<f64>>]) -> Result<Self> {
        if faces.len() != mesh.num_faces() {
            return Err(MeshError::UvCountMismatch {
                expected: mesh.num_faces(),
                actual: faces.len(),
            });
        }

        let mut layer = Self::zeros(mesh.num_halfedges());
        for (f, corners) in mesh.face_ids().zip(faces) {
            let count = mesh.face_vertex_count(f);
            if corners.len() != count {
                return Err(MeshError::UvCountMismatch {
                    expected: count,
                    actual: corners.len(),
                });
            }
            for (he, &uv) in mesh.face_loops(f).zip(corners) {
                layer.set(he, uv);
            }
        }
        Ok(layer)
    }

    /// Get the UV of a corner.
    #[inline]
    pub fn get(&self, he: HalfEdgeId<I>) -> Point2<f64> {
        self.coords[he.index()]
    }

    /// Set the UV of a corner.
    #[inline]
    pub fn set(&mut self, he: HalfEdgeId<I>, uv: Point2<f64>) {
        self.coords[he.index()] = uv;
    }

    /// Number of corner slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// UVs of a face's corners in order.
    pub fn face_uvs(&self, mesh: &HalfEdgeMesh<I>, f: FaceId<I>) -> Vec<Point2<f64>> {
        mesh.face_loops(f).map(|he| self.get(he)).collect()
    }

    /// Overwrite corners with staged values.
    pub fn apply(&mut self, changes: &[(HalfEdgeId<I>, Point2<f64>)]) {
        for &(he, uv) in changes {
            self.set(he, uv);
        }
    }

    /// Bounding box of the given corners.
    ///
    /// Returns `None` if the iterator is empty.
    pub fn bounding_box<T>(&self, corners: T) -> Option<(Point2<f64>, Point2<f64>)>
    where
        T: IntoIterator<Item = HalfEdgeId<I>>,
    {
        let mut corners = corners.into_iter();
        let first = self.get(corners.next()?);
        let (mut min, mut max) = (first, first);

        for he in corners {
            let uv = self.get(he);
            min.x = min.x.min(uv.x);
            min.y = min.y.min(uv.y);
            max.x = max.x.max(uv.x);
            max.y = max.y.max(uv.y);
        }

        Some((min, max))
    }

    /// Bounding box of every face corner of a mesh.
    pub fn mesh_bounding_box(&self, mesh: &HalfEdgeMesh<I>) -> Option<(Point2<f64>, Point2<f64>)> {
        self.bounding_box(mesh.halfedge_ids().filter(|&he| !mesh.is_boundary_halfedge(he)))
    }

    /// Whether the two faces of an edge disagree on either endpoint's UV.
    ///
    /// Boundary edges are never split.
    pub fn is_split(&self, mesh: &HalfEdgeMesh<I>, e: EdgeId<I>, tolerance: f64) -> bool {
        let he = mesh.edge(e).halfedge;
        let twin = mesh.twin(he);
        if mesh.is_boundary_halfedge(he) || mesh.is_boundary_halfedge(twin) {
            return false;
        }

        // he runs a -> b in one face, twin runs b -> a in the other.
        let a_here = self.get(he);
        let b_here = self.get(mesh.next(he));
        let b_there = self.get(twin);
        let a_there = self.get(mesh.next(twin));

        (a_here - a_there).norm() > tolerance || (b_here - b_there).norm() > tolerance
    }

    /// Mark every UV-split edge as a seam and return how many were marked.
    pub fn mark_seams_from_splits(&self, mesh: &mut HalfEdgeMesh<I>, tolerance: f64) -> Result<usize> {
        if !(tolerance >= 0.0) {
            return Err(MeshError::invalid_param(
                "tolerance",
                tolerance,
                "must be non-negative",
            ));
        }
        if self.len() != mesh.num_halfedges() {
            return Err(MeshError::UvCountMismatch {
                expected: mesh.num_halfedges(),
                actual: self.len(),
            });
        }

        let split: Vec<EdgeId<I>> = mesh
            .edge_ids()
            .filter(|&e| self.is_split(mesh, e, tolerance))
            .collect();
        for &e in &split {
            mesh.set_seam(e, true);
        }
        Ok(split.len())
    }
}

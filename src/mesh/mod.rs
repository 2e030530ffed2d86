//! Core mesh data structures.
//!
//! This module provides the half-edge polygon mesh the straightening
//! pipeline reads, together with the per-corner UV layer it writes.
//!
//! # Overview
//!
//! [`HalfEdgeMesh`] stores vertices, half-edges, edges and faces in flat
//! arenas addressed by typed handles ([`VertexId`], [`HalfEdgeId`],
//! [`EdgeId`], [`FaceId`]). A half-edge owned by a face is one corner of that
//! face, so "the UV of a loop" is simply [`CornerUvs::get`] on that
//! half-edge. Edges carry the seam flag and faces the selection flag.
//!
//! # Construction
//!
//! ```
//! use seamline::mesh::{build_from_quads, CornerUvs, HalfEdgeMesh};
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//!
//! let planar: Vec<Point2<f64>> = vertices.iter().map(|p| Point2::new(p.x, p.y)).collect();
//! let uvs = CornerUvs::from_vertex_uvs(&mesh, &planar).unwrap();
//! assert_eq!(uvs.len(), mesh.num_halfedges());
//! ```

mod builder;
mod halfedge;
mod index;
mod uv;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, to_polygons};
#[cfg(test)]
pub(crate) use builder::{grid_mesh, grid_quads};
pub use halfedge::{
    Edge, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter,
};
pub use index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
pub use uv::CornerUvs;

//! # Seamline
//!
//! Seam-aware UV straightening for polygon meshes.
//!
//! Seamline takes a mesh whose faces carry per-corner UV coordinates and
//! whose edges may be marked as seams, and for every UV island of a face
//! selection:
//!
//! - snaps the corners along each run of seam edges ("wall") onto a shared
//!   horizontal or vertical line, and
//! - relaxes the island interior toward local averages so it blends with
//!   the straightened border.
//!
//! ## Features
//!
//! - **Half-edge data structure**: O(1) adjacency queries with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Per-corner UVs**: independent UVs per face corner, seams from UV splits
//! - **Transactional islands**: a failing island leaves its UVs untouched
//! - **OBJ I/O**: read and write `v`/`vt`/`f` records
//!
//! ## Quick Start
//!
//! ```no_run
//! use seamline::prelude::*;
//!
//! let mut loaded: seamline::io::UvMesh = seamline::io::load("model.obj").unwrap();
//! loaded.uvs.mark_seams_from_splits(&mut loaded.mesh, 1e-6).unwrap();
//! loaded.mesh.select_all();
//!
//! let report = straighten(&loaded.mesh, &mut loaded.uvs, &StraightenOptions::default()).unwrap();
//! println!("{} islands, {} walls", report.num_islands(), report.num_walls());
//!
//! seamline::io::save(&loaded.mesh, &loaded.uvs, "output.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use seamline::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
//! mesh.set_seam_between(0, 1).unwrap();
//! mesh.select_all();
//!
//! let planar = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.1),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let mut uvs = CornerUvs::from_vertex_uvs(&mesh, &planar).unwrap();
//!
//! // Average V along the bottom seam; the top edge is left alone
//! let options = StraightenOptions::default().with_scope(AlignScope::Wall);
//! straighten(&mesh, &mut uvs, &options).unwrap();
//!
//! let corners = uvs.face_uvs(&mesh, FaceId::new(0));
//! assert!((corners[0].y - 0.05).abs() < 1e-12);
//! assert!((corners[1].y - 0.05).abs() < 1e-12);
//! assert_eq!(corners[2], Point2::new(1.0, 1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use seamline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{
        run, straighten, straighten_faces, AlignScope, Alignment, SmoothOptions,
        StraightenOptions, StraightenReport, UvSink,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, CornerUvs, EdgeId, FaceId,
        HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::{Point2, Point3};

    #[test]
    fn test_strip_with_cut_ends() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6]];
        let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
        assert!(mesh.is_valid());
        assert_eq!(mesh.num_edges(), 10);

        mesh.set_seam_between(0, 4).unwrap();
        mesh.set_seam_between(3, 7).unwrap();
        mesh.select_all();

        // Both cut ends lean a little
        let planar = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0 / 3.0, 0.0),
            Point2::new(2.0 / 3.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.02, 1.0),
            Point2::new(1.0 / 3.0, 1.0),
            Point2::new(2.0 / 3.0, 1.0),
            Point2::new(0.97, 1.0),
        ];
        let mut uvs = CornerUvs::from_vertex_uvs(&mesh, &planar).unwrap();

        let options = StraightenOptions::default().with_smooth_iterations(0);
        let report = straighten(&mesh, &mut uvs, &options).unwrap();
        assert_eq!(report.num_islands(), 1);
        assert_eq!(report.num_walls(), 2);
        assert_eq!(report.islands[0].inner, 4);
        assert!(report.is_complete());

        // Each cut end is now perfectly vertical
        let first = uvs.face_uvs(&mesh, FaceId::new(0));
        assert!((first[0].x - 0.01).abs() < 1e-12);
        assert!((first[3].x - 0.01).abs() < 1e-12);
        let last = uvs.face_uvs(&mesh, FaceId::new(2));
        assert!((last[1].x - 0.985).abs() < 1e-12);
        assert!((last[2].x - 0.985).abs() < 1e-12);
    }
}

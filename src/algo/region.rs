//! Border, fringe and inner classification of an island.
//!
//! - **Border** faces have a vertex incident to any seam edge.
//! - **Fringe** faces have a seam among their own edges; Fringe ⊆ Border.
//! - **Inner** vertices are the vertices of faces that are not Border.

use std::collections::HashSet;

use super::island::Island;
use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex, VertexId};

/// The regions of one island.
#[derive(Debug, Clone, Default)]
pub struct Regions<I: MeshIndex = u32> {
    /// Faces touching a seam through a vertex or an edge, in island order.
    pub border: Vec<FaceId<I>>,
    /// Border faces owning a seam edge, in island order.
    pub fringe: Vec<FaceId<I>>,
    /// Faces with no seam contact at all.
    pub inner_faces: Vec<FaceId<I>>,
    /// Vertices of the inner faces, deduplicated in first-seen order.
    pub inner: Vec<VertexId<I>>,
}

impl<I: MeshIndex> Regions<I> {
    /// Border faces as a set, for membership tests.
    pub fn border_set(&self) -> HashSet<FaceId<I>> {
        self.border.iter().copied().collect()
    }
}

/// Classify the faces of an island.
///
/// # Panics
///
/// Panics if the island holds a face handle outside `0..mesh.num_faces()`.
pub fn classify_regions<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, island: &Island<I>) -> Regions<I> {
    let mut regions = Regions {
        border: Vec::new(),
        fringe: Vec::new(),
        inner_faces: Vec::new(),
        inner: Vec::new(),
    };
    let mut seen_inner = HashSet::new();

    for &f in &island.faces {
        if mesh.face_has_seam(f) {
            regions.fringe.push(f);
        }

        // A seam edge of the face touches its vertices too, so fringe faces
        // always pass this test.
        if mesh.face_vertices(f).any(|v| mesh.vertex_touches_seam(v)) {
            regions.border.push(f);
        } else {
            regions.inner_faces.push(f);
            for v in mesh.face_vertices(f) {
                if seen_inner.insert(v) {
                    regions.inner.push(v);
                }
            }
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::island::segment_islands;
    use crate::mesh::{build_from_quads, grid_mesh as grid};
    use nalgebra::Point3;

    fn indices(faces: &[FaceId]) -> Vec<usize> {
        faces.iter().map(|f| f.index()).collect()
    }

    #[test]
    fn test_seamless_island_is_all_inner() {
        let mesh = grid(2, 2);
        let island = Island {
            faces: mesh.face_ids().collect(),
        };
        let regions = classify_regions(&mesh, &island);

        assert!(regions.border.is_empty());
        assert!(regions.fringe.is_empty());
        assert_eq!(regions.inner_faces.len(), 4);
        assert_eq!(regions.inner.len(), 9);
    }

    #[test]
    fn test_border_fringe_and_inner() {
        // 5 x 5 grid with a seam along the bottom row of edges
        let mut mesh = grid(5, 5);
        for i in 0..5 {
            mesh.set_seam_between(i, i + 1).unwrap();
        }
        let island = Island {
            faces: mesh.face_ids().collect(),
        };
        let regions = classify_regions(&mesh, &island);

        // Bottom row owns the seam edges
        assert_eq!(indices(&regions.fringe), vec![0, 1, 2, 3, 4]);
        // Only the bottom row touches seam vertices (row 0 vertices)
        assert_eq!(indices(&regions.border), vec![0, 1, 2, 3, 4]);
        assert_eq!(regions.inner_faces.len(), 20);
        // Vertices of rows 1..=5
        assert_eq!(regions.inner.len(), 30);
    }

    #[test]
    fn test_vertex_contact_is_border_not_fringe() {
        // Seam on a single vertical edge in the middle of a 3 x 2 grid
        let mut mesh = grid(3, 2);
        // Vertex 5 = (1, 1), vertex 9 = (1, 2)
        mesh.set_seam_between(5, 9).unwrap();
        let island = Island {
            faces: mesh.face_ids().collect(),
        };
        let regions = classify_regions(&mesh, &island);

        // Faces 3, 4 own the seam edge
        assert_eq!(indices(&regions.fringe), vec![3, 4]);
        // Faces 0, 1 touch vertex 5 only
        assert_eq!(indices(&regions.border), vec![0, 1, 3, 4]);
        assert_eq!(indices(&regions.inner_faces), vec![2, 5]);
    }

    #[test]
    fn test_fringe_subset_of_border() {
        let mut mesh = grid(4, 4);
        for (a, b) in [(1, 6), (6, 11), (11, 12), (12, 13), (7, 12)] {
            mesh.set_seam_between(a, b).unwrap();
        }
        let all: Vec<FaceId> = mesh.face_ids().collect();

        for island in segment_islands(&mesh, &all) {
            let regions = classify_regions(&mesh, &island);
            let border = regions.border_set();
            assert!(regions.fringe.iter().all(|f| border.contains(f)));
            assert_eq!(regions.border.len() + regions.inner_faces.len(), island.len());
            for f in &regions.inner_faces {
                assert!(!regions.fringe.contains(f));
            }
        }
    }

    #[test]
    fn test_fully_seamed_face() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap();
        for e in mesh.edge_ids().collect::<Vec<_>>() {
            mesh.set_seam(e, true);
        }
        let island = Island {
            faces: vec![FaceId::new(0)],
        };
        let regions = classify_regions(&mesh, &island);

        assert_eq!(regions.border, vec![FaceId::new(0)]);
        assert_eq!(regions.fringe, vec![FaceId::new(0)]);
        assert!(regions.inner.is_empty());
    }
}

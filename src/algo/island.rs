//! Island segmentation.
//!
//! An island is a maximal set of selected faces that can reach each other
//! by crossing edges that are not seams. Islands partition the selection.

use std::collections::VecDeque;

use crate::mesh::{FaceId, HalfEdgeMesh, MeshIndex};

/// A set of faces connected through non-seam edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island<I: MeshIndex = u32> {
    /// Faces in discovery order; the first one seeded the island.
    pub faces: Vec<FaceId<I>>,
}

impl<I: MeshIndex> Island<I> {
    /// Number of faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Split a face selection into islands.
///
/// Seeds are taken in selection order and each island grows breadth-first
/// across non-seam edges, staying inside the selection. Duplicate entries in
/// `selection` are ignored. The output is deterministic for a given input
/// order.
///
/// # Panics
///
/// Panics if `selection` holds a handle outside `0..mesh.num_faces()`.
pub fn segment_islands<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    selection: &[FaceId<I>],
) -> Vec<Island<I>> {
    let mut in_selection = vec![false; mesh.num_faces()];
    for &f in selection {
        in_selection[f.index()] = true;
    }

    let mut visited = vec![false; mesh.num_faces()];
    let mut islands = Vec::new();
    let mut queue = VecDeque::new();

    for &seed in selection {
        if visited[seed.index()] {
            continue;
        }
        visited[seed.index()] = true;
        queue.push_back(seed);

        let mut faces = Vec::new();
        while let Some(f) = queue.pop_front() {
            faces.push(f);

            for he in mesh.face_loops(f) {
                if mesh.is_seam(mesh.edge_of(he)) {
                    continue;
                }
                let n = mesh.face_of(mesh.twin(he));
                if n.is_valid() && in_selection[n.index()] && !visited[n.index()] {
                    visited[n.index()] = true;
                    queue.push_back(n);
                }
            }
        }

        log::trace!("island {} seeded at {:?}: {} faces", islands.len(), seed, faces.len());
        islands.push(Island { faces });
    }

    islands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::grid_mesh as grid;

    fn sorted(island: &Island) -> Vec<usize> {
        let mut v: Vec<usize> = island.faces.iter().map(|f| f.index()).collect();
        v.sort();
        v
    }

    #[test]
    fn test_single_island_without_seams() {
        let mut mesh = grid(3, 3);
        mesh.select_all();
        let islands = segment_islands(&mesh, &mesh.selected_faces());

        assert_eq!(islands.len(), 1);
        assert_eq!(sorted(&islands[0]), (0..9).collect::<Vec<_>>());
        assert_eq!(islands[0].faces[0], FaceId::new(0));
    }

    #[test]
    fn test_vertical_seam_splits_grid() {
        let mut mesh = grid(4, 2);
        // Seam along x = 2 (vertices 2, 7, 12)
        mesh.set_seam_between(2, 7).unwrap();
        mesh.set_seam_between(7, 12).unwrap();
        mesh.select_all();

        let islands = segment_islands(&mesh, &mesh.selected_faces());
        assert_eq!(islands.len(), 2);
        assert_eq!(sorted(&islands[0]), vec![0, 1, 4, 5]);
        assert_eq!(sorted(&islands[1]), vec![2, 3, 6, 7]);
    }

    #[test]
    fn test_partition_of_selection() {
        let mut mesh = grid(4, 4);
        mesh.set_seam_between(1, 6).unwrap();
        mesh.set_seam_between(6, 11).unwrap();
        mesh.set_seam_between(10, 11).unwrap();
        mesh.set_seam_between(11, 12).unwrap();

        let selection: Vec<FaceId> = [0, 1, 2, 4, 5, 9, 15, 3]
            .iter()
            .map(|&i| FaceId::new(i))
            .collect();
        let islands = segment_islands(&mesh, &selection);

        let mut all: Vec<usize> = islands.iter().flat_map(|isl| sorted(isl)).collect();
        all.sort();
        let mut expected: Vec<usize> = selection.iter().map(|f| f.index()).collect();
        expected.sort();
        assert_eq!(all, expected, "islands must cover the selection exactly once");
        assert!(islands.iter().all(|isl| !isl.is_empty()));
    }

    #[test]
    fn test_unselected_faces_break_islands() {
        let mesh = grid(3, 1);
        let selection = vec![FaceId::new(0), FaceId::new(2)];
        let islands = segment_islands(&mesh, &selection);
        assert_eq!(islands.len(), 2);

        let islands = segment_islands(&mesh, &[FaceId::new(0), FaceId::new(1), FaceId::new(2)]);
        assert_eq!(islands.len(), 1);
    }

    #[test]
    fn test_seam_isolation() {
        let mut mesh = grid(2, 1);
        let seam = mesh.set_seam_between(1, 4).unwrap();
        let both = [FaceId::new(0), FaceId::new(1)];

        assert_eq!(segment_islands(&mesh, &both).len(), 2);

        mesh.set_seam(seam, false);
        assert_eq!(segment_islands(&mesh, &both).len(), 1);
    }

    #[test]
    fn test_fully_seamed_face_is_singleton() {
        let mut mesh = grid(3, 1);
        // Seam around the middle face
        for (a, b) in [(1, 2), (2, 6), (6, 5), (5, 1)] {
            mesh.set_seam_between(a, b).unwrap();
        }
        mesh.select_all();

        let islands = segment_islands(&mesh, &mesh.selected_faces());
        assert_eq!(islands.len(), 3);
        assert_eq!(islands[1].faces, vec![FaceId::new(1)]);
    }

    #[test]
    fn test_duplicates_and_order() {
        let mesh = grid(2, 1);
        let selection = vec![FaceId::new(1), FaceId::new(0), FaceId::new(1)];
        let islands = segment_islands(&mesh, &selection);

        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0].faces, vec![FaceId::new(1), FaceId::new(0)]);

        // Same input, same output
        assert_eq!(islands, segment_islands(&mesh, &selection));
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_face_panics() {
        let mesh = grid(2, 1);
        segment_islands(&mesh, &[FaceId::new(2)]);
    }
}

//! Wall grouping.
//!
//! A wall is a maximal run of fringe faces that share the same
//! [`Alignment`] and touch each other through at least one vertex. Walls
//! partition the fringe of an island.

use std::collections::{HashMap, HashSet, VecDeque};

use super::alignment::{classify_face, Alignment};
use crate::mesh::{CornerUvs, FaceId, HalfEdgeMesh, MeshIndex};

/// A group of same-alignment fringe faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wall<I: MeshIndex = u32> {
    /// Faces in discovery order; the first one seeded the wall.
    pub faces: Vec<FaceId<I>>,
    /// Shared alignment, `None` only for a seed without any seam edge.
    pub alignment: Option<Alignment>,
}

impl<I: MeshIndex> Wall<I> {
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

/// Group fringe faces into walls.
///
/// Seeds are taken in fringe order. Each wall grows breadth-first to every
/// remaining fringe face that shares a vertex with a face already in the
/// wall and has the wall's alignment. Classification reads `uvs` as given.
pub fn group_walls<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    fringe: &[FaceId<I>],
) -> Vec<Wall<I>> {
    let alignments: HashMap<FaceId<I>, Option<Alignment>> = fringe
        .iter()
        .map(|&f| (f, classify_face(mesh, uvs, f)))
        .collect();
    let mut remaining: HashSet<FaceId<I>> = fringe.iter().copied().collect();

    let mut walls = Vec::new();
    let mut queue = VecDeque::new();

    for &seed in fringe {
        if !remaining.remove(&seed) {
            continue;
        }

        let alignment = alignments[&seed];
        debug_assert!(alignment.is_some(), "fringe face {:?} has no seam edge", seed);

        let mut faces = vec![seed];
        if alignment.is_some() {
            queue.push_back(seed);
        }

        while let Some(f) = queue.pop_front() {
            for v in mesh.face_vertices(f) {
                for n in mesh.vertex_faces(v) {
                    if alignments.get(&n) == Some(&alignment) && remaining.remove(&n) {
                        faces.push(n);
                        queue.push_back(n);
                    }
                }
            }
        }

        log::trace!(
            "wall {} seeded at {:?}: {} faces, {:?}",
            walls.len(),
            seed,
            faces.len(),
            alignment
        );
        walls.push(Wall { faces, alignment });
    }

    walls
}

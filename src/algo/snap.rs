//! Wall alignment.
//!
//! Every corner sitting on a seam edge of a wall is moved onto one shared
//! line: the snapped coordinate is replaced by its mean over the wall's
//! corners and the other coordinate is left alone.

use std::collections::HashSet;

use super::alignment::Alignment;
use super::edit::UvEdit;
use super::wall::Wall;
use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Which corners a wall pulls onto its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlignScope {
    /// Every corner at a seam endpoint of the wall that belongs to a border
    /// face of the island, so neighbouring border faces follow the wall.
    #[default]
    Border,
    /// Only the corners of the wall's own faces on their seam edges.
    Wall,
}

/// Corners that a wall aligns, deduplicated in discovery order.
pub fn wall_corners<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    wall: &Wall<I>,
    border: &HashSet<FaceId<I>>,
    scope: AlignScope,
) -> Vec<HalfEdgeId<I>> {
    let mut seen = HashSet::new();
    let mut corners = Vec::new();
    let mut push = |he: HalfEdgeId<I>| {
        if seen.insert(he) {
            corners.push(he);
        }
    };

    for &f in &wall.faces {
        for he in mesh.face_loops(f) {
            if !mesh.is_seam(mesh.edge_of(he)) {
                continue;
            }
            match scope {
                AlignScope::Wall => {
                    push(he);
                    push(mesh.next(he));
                }
                AlignScope::Border => {
                    for v in [mesh.origin(he), mesh.dest(he)] {
                        for corner in mesh.vertex_loops(v) {
                            if border.contains(&mesh.face_of(corner)) {
                                push(corner);
                            }
                        }
                    }
                }
            }
        }
    }

    corners
}

/// Snap a wall's corners to their mean and return how many were written.
///
/// # Errors
///
/// Returns [`MeshError::NoSeamEdge`] for a wall without an alignment.
pub fn snap_wall<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    edit: &mut UvEdit<'_, I>,
    wall: &Wall<I>,
    border: &HashSet<FaceId<I>>,
    scope: AlignScope,
) -> Result<usize> {
    let Some(&seed) = wall.faces.first() else {
        log::trace!("empty wall, nothing to align");
        return Ok(0);
    };
    let alignment: Alignment = wall
        .alignment
        .ok_or(MeshError::NoSeamEdge { face: seed.index() })?;

    let corners = wall_corners(mesh, wall, border, scope);
    if corners.is_empty() {
        log::trace!("wall at {:?} has no corners to align", seed);
        return Ok(0);
    }

    let axis = alignment.snapped_axis();
    let mean = corners.iter().map(|&he| edit.get(he)[axis]).sum::<f64>() / corners.len() as f64;

    for &he in &corners {
        let mut uv = edit.get(he);
        uv[axis] = mean;
        edit.set(he, uv);
    }

    log::trace!(
        "wall at {:?}: {} corners snapped to {:?} = {}",
        seed,
        corners.len(),
        alignment,
        mean
    );
    Ok(corners.len())
}

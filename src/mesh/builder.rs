//! Mesh construction utilities.
//!
//! Meshes are built from face-vertex lists. Handles are assigned in input
//! order: face `k`'s corners occupy consecutive half-edge slots starting at
//! that face's first corner, edges are numbered in the order their first
//! corner appears and boundary half-edges come after all corners.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and polygon faces.
///
/// Faces are lists of at least three distinct vertex indices, consistently
/// oriented. Returns an error for invalid indices, degenerate faces and
/// non-manifold edges or vertices.
///
/// # Example
/// ```
/// use seamline::mesh::{build_from_polygons, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.5, 1.5, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3], vec![3, 2, 4]];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_from_polygons<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        if face.len() < 3 {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        for (k, &vi) in face.iter().enumerate() {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if face[k + 1..].contains(&vi) {
                return Err(MeshError::DegenerateFace { face: fi });
            }
        }
    }

    let num_corners: usize = faces.iter().map(Vec::len).sum();
    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), num_corners, faces.len());

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&p| mesh.add_vertex(p)).collect();

    // Directed edge (from, to) -> corner
    let mut directed: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(num_corners);

    // First pass: corners and faces
    for face in faces {
        let face_id = FaceId::<I>::new(mesh.num_faces());
        let first = mesh.num_halfedges();
        let n = face.len();
        mesh.faces.push(Face::new(HalfEdgeId::new(first)));

        for (k, &vi) in face.iter().enumerate() {
            let he = HalfEdgeId::<I>::new(first + k);
            mesh.halfedges.push(HalfEdge {
                origin: vertex_ids[vi],
                next: HalfEdgeId::new(first + (k + 1) % n),
                prev: HalfEdgeId::new(first + (k + n - 1) % n),
                face: face_id,
                ..HalfEdge::new()
            });
            mesh.vertex_mut(vertex_ids[vi]).halfedge = he;

            let vj = face[(k + 1) % n];
            if directed.insert((vi, vj), he).is_some() {
                return Err(MeshError::NonManifoldEdge { v0: vi, v1: vj });
            }
        }
    }

    // Second pass: twins and edges, in corner order so numbering is stable
    for i in 0..num_corners {
        let he = HalfEdgeId::<I>::new(i);
        if mesh.twin(he).is_valid() {
            continue;
        }

        let a = mesh.origin(he).index();
        let b = mesh.origin(mesh.next(he)).index();
        let edge_id = EdgeId::<I>::new(mesh.num_edges());
        mesh.edges.push(Edge::new(he));

        let twin = match directed.get(&(b, a)) {
            Some(&twin) => twin,
            None => {
                let boundary = HalfEdgeId::<I>::new(mesh.num_halfedges());
                mesh.halfedges.push(HalfEdge {
                    origin: vertex_ids[b],
                    ..HalfEdge::new()
                });
                boundary
            }
        };

        {
            let h = mesh.halfedge_mut(he);
            h.twin = twin;
            h.edge = edge_id;
        }
        {
            let t = mesh.halfedge_mut(twin);
            t.twin = he;
            t.edge = edge_id;
        }
    }

    link_boundary_loops(&mut mesh)?;
    fix_boundary_vertex_halfedges(&mut mesh);
    check_vertex_fans(&mesh)?;

    Ok(mesh)
}

/// Link boundary half-edges into loops.
///
/// A vertex with two outgoing boundary half-edges joins two separate fans
/// and is rejected.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let boundary_hes: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    let mut outgoing: HashMap<usize, HalfEdgeId<I>> = HashMap::with_capacity(boundary_hes.len());
    for &he in &boundary_hes {
        let origin = mesh.origin(he).index();
        if outgoing.insert(origin, he).is_some() {
            return Err(MeshError::NonManifold {
                details: format!("vertex {} joins more than one boundary fan", origin),
            });
        }
    }

    for &he in &boundary_hes {
        let dest = mesh.dest(he).index();
        if let Some(&next_he) = outgoing.get(&dest) {
            mesh.halfedge_mut(he).next = next_he;
            mesh.halfedge_mut(next_he).prev = he;
        }
    }

    Ok(())
}

/// Point boundary vertices at their outgoing boundary half-edge.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    for he in mesh.halfedge_ids().collect::<Vec<_>>() {
        if mesh.is_boundary_halfedge(he) {
            let v = mesh.origin(he);
            mesh.vertex_mut(v).halfedge = he;
        }
    }
}

/// Reject vertices whose rotation does not reach every outgoing half-edge.
fn check_vertex_fans<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> Result<()> {
    let mut outgoing = vec![0usize; mesh.num_vertices()];
    for he in &mesh.halfedges {
        outgoing[he.origin.index()] += 1;
    }

    for v in mesh.vertex_ids() {
        let reached = mesh.vertex_halfedges(v).take(outgoing[v.index()] + 1).count();
        if reached != outgoing[v.index()] {
            return Err(MeshError::NonManifold {
                details: format!(
                    "vertex {} has {} outgoing half-edges but only {} are connected",
                    v.index(),
                    outgoing[v.index()],
                    reached
                ),
            });
        }
    }

    Ok(())
}

/// Build a half-edge mesh from vertices and triangle faces.
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    let polygons: Vec<Vec<usize>> = faces.iter().map(|f| f.to_vec()).collect();
    build_from_polygons(vertices, &polygons)
}

/// Build a half-edge mesh from vertices and quad faces (counter-clockwise).
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<HalfEdgeMesh<I>> {
    let polygons: Vec<Vec<usize>> = faces.iter().map(|f| f.to_vec()).collect();
    build_from_polygons(vertices, &polygons)
}

/// Convert a half-edge mesh back to positions and polygon index lists.
pub fn to_polygons<I: MeshIndex>(mesh: &HalfEdgeMesh<I>) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();

    let faces: Vec<Vec<usize>> = mesh
        .face_ids()
        .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
        .collect();

    (vertices, faces)
}

/// Positions and quads of an `n` x `m` grid of unit squares.
///
/// Vertex `j * (n + 1) + i` sits at `(i, j)`; face `j * n + i` is column
/// `i`, row `j`.
#[cfg(test)]
pub(crate) fn grid_quads(n: usize, m: usize) -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
    let mut vertices = Vec::new();
    for j in 0..=m {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    let mut faces = Vec::new();
    for j in 0..m {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            faces.push([v00, v00 + 1, v00 + n + 2, v00 + n + 1]);
        }
    }
    (vertices, faces)
}

/// The [`grid_quads`] layout as a mesh.
#[cfg(test)]
pub(crate) fn grid_mesh(n: usize, m: usize) -> HalfEdgeMesh {
    let (vertices, faces) = grid_quads(n, m);
    build_from_quads(&vertices, &faces).unwrap()
}

//! Half-edge polygon mesh with seam and selection flags.
//!
//! # Structure
//!
//! - Every undirected [`Edge`] is split into two half-edges pointing in
//!   opposite directions; the edge stores the seam flag.
//! - A half-edge that belongs to a face is one **corner** (loop) of that
//!   face: its `origin` is the corner's vertex, `next` is the following
//!   corner around the face and `edge` is the edge running from this corner
//!   to the next one.
//! - Each vertex stores one outgoing half-edge, each face one of its corners.
//!
//! # Boundary Handling
//!
//! Boundary half-edges have an invalid face. Their `next` pointers chain the
//! boundary loop, which keeps rotation around boundary vertices complete.
//! Boundary vertices always point at their outgoing boundary half-edge.

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// A vertex of the mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// Position in mesh space.
    pub position: Point3<f64>,

    /// One outgoing half-edge; a boundary half-edge for boundary vertices.
    pub halfedge: HalfEdgeId<I>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an unconnected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            halfedge: HalfEdgeId::invalid(),
        }
    }
}

/// A directed half-edge.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge<I: MeshIndex = u32> {
    /// The vertex this half-edge starts at.
    pub origin: VertexId<I>,

    /// The opposite half-edge.
    pub twin: HalfEdgeId<I>,

    /// The next half-edge around the face (or boundary loop).
    pub next: HalfEdgeId<I>,

    /// The previous half-edge around the face (or boundary loop).
    pub prev: HalfEdgeId<I>,

    /// The owning face; invalid on the boundary.
    pub face: FaceId<I>,

    /// The undirected edge shared with `twin`.
    pub edge: EdgeId<I>,
}

impl<I: MeshIndex> HalfEdge<I> {
    /// Create an unlinked half-edge.
    pub fn new() -> Self {
        Self {
            origin: VertexId::invalid(),
            twin: HalfEdgeId::invalid(),
            next: HalfEdgeId::invalid(),
            prev: HalfEdgeId::invalid(),
            face: FaceId::invalid(),
            edge: EdgeId::invalid(),
        }
    }

    /// Whether this half-edge lies on the mesh boundary.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        !self.face.is_valid()
    }
}

impl<I: MeshIndex> Default for HalfEdge<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// An undirected edge.
#[derive(Debug, Clone, Copy)]
pub struct Edge<I: MeshIndex = u32> {
    /// One of the two half-edges; always a face corner when one exists.
    pub halfedge: HalfEdgeId<I>,

    /// UV seam flag, authored by the host.
    pub seam: bool,
}

impl<I: MeshIndex> Edge<I> {
    /// Create a non-seam edge.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self {
            halfedge,
            seam: false,
        }
    }
}

/// A polygonal face.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// The first corner of the face.
    pub halfedge: HalfEdgeId<I>,

    /// Edit-mode selection flag.
    pub selected: bool,
}

impl<I: MeshIndex> Face<I> {
    /// Create an unselected face starting at the given corner.
    pub fn new(halfedge: HalfEdgeId<I>) -> Self {
        Self {
            halfedge,
            selected: false,
        }
    }
}

/// A half-edge mesh of arbitrary polygons.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) halfedges: Vec<HalfEdge<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> Default for HalfEdgeMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> HalfEdgeMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            halfedges: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated storage.
    ///
    /// `num_corners` is the total number of face corners; boundary half-edges
    /// come on top of that, so a small margin is reserved.
    pub fn with_capacity(num_vertices: usize, num_corners: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_corners + num_corners / 4),
            edges: Vec::with_capacity(num_corners / 2 + num_corners / 8),
            faces: Vec::with_capacity(num_faces),
        }
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of half-edges, boundary half-edges included.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Number of undirected edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    #[inline]
    pub(crate) fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId<I>) -> &HalfEdge<I> {
        &self.halfedges[id.index()]
    }

    #[inline]
    pub(crate) fn halfedge_mut(&mut self, id: HalfEdgeId<I>) -> &mut HalfEdge<I> {
        &mut self.halfedges[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    // ==================== Topology Queries ====================

    /// The opposite half-edge.
    #[inline]
    pub fn twin(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).twin
    }

    /// The next corner around the same face.
    #[inline]
    pub fn next(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).next
    }

    /// The previous corner around the same face.
    #[inline]
    pub fn prev(&self, he: HalfEdgeId<I>) -> HalfEdgeId<I> {
        self.halfedge(he).prev
    }

    /// The vertex of a corner.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.halfedge(he).origin
    }

    /// The vertex a half-edge points to.
    #[inline]
    pub fn dest(&self, he: HalfEdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(he))
    }

    /// The face of a corner (invalid for boundary half-edges).
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId<I>) -> FaceId<I> {
        self.halfedge(he).face
    }

    /// The undirected edge of a half-edge.
    #[inline]
    pub fn edge_of(&self, he: HalfEdgeId<I>) -> EdgeId<I> {
        self.halfedge(he).edge
    }

    /// Whether a half-edge lies on the boundary.
    #[inline]
    pub fn is_boundary_halfedge(&self, he: HalfEdgeId<I>) -> bool {
        self.halfedge(he).is_boundary()
    }

    /// Whether a vertex lies on the mesh boundary (or is isolated).
    pub fn is_boundary_vertex(&self, v: VertexId<I>) -> bool {
        let start = self.vertex(v).halfedge;
        !start.is_valid() || self.is_boundary_halfedge(start)
    }

    /// The two vertices of an edge.
    pub fn edge_vertices(&self, e: EdgeId<I>) -> [VertexId<I>; 2] {
        let he = self.edge(e).halfedge;
        [self.origin(he), self.dest(he)]
    }

    /// The one or two faces bordering an edge.
    pub fn edge_faces(&self, e: EdgeId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        let he = self.edge(e).halfedge;
        [self.face_of(he), self.face_of(self.twin(he))]
            .into_iter()
            .filter(|f| f.is_valid())
    }

    /// Find the edge joining two vertices.
    pub fn find_edge(&self, a: VertexId<I>, b: VertexId<I>) -> Option<EdgeId<I>> {
        self.vertex_halfedges(a)
            .find(|&he| self.dest(he) == b)
            .map(|he| self.edge_of(he))
    }

    // ==================== Seams & Selection ====================

    /// Whether an edge is marked as a UV seam.
    #[inline]
    pub fn is_seam(&self, e: EdgeId<I>) -> bool {
        self.edge(e).seam
    }

    /// Mark or clear the seam flag of an edge.
    #[inline]
    pub fn set_seam(&mut self, e: EdgeId<I>, seam: bool) {
        self.edges[e.index()].seam = seam;
    }

    /// Mark the edge between two vertex indices as a seam.
    pub fn set_seam_between(&mut self, a: usize, b: usize) -> Result<EdgeId<I>> {
        if a >= self.num_vertices() || b >= self.num_vertices() {
            return Err(MeshError::MissingEdge { v0: a, v1: b });
        }
        let e = self
            .find_edge(VertexId::new(a), VertexId::new(b))
            .ok_or(MeshError::MissingEdge { v0: a, v1: b })?;
        self.set_seam(e, true);
        Ok(e)
    }

    /// Clear every seam flag.
    pub fn clear_seams(&mut self) {
        for edge in &mut self.edges {
            edge.seam = false;
        }
    }

    /// Number of seam edges.
    pub fn num_seams(&self) -> usize {
        self.edges.iter().filter(|e| e.seam).count()
    }

    /// Whether any edge around a vertex is a seam.
    pub fn vertex_touches_seam(&self, v: VertexId<I>) -> bool {
        self.vertex_edges(v).any(|e| self.is_seam(e))
    }

    /// Whether any of the face's own edges is a seam.
    pub fn face_has_seam(&self, f: FaceId<I>) -> bool {
        self.face_seam_loop(f).is_some()
    }

    /// The first corner of a face (in face order) whose edge is a seam.
    pub fn face_seam_loop(&self, f: FaceId<I>) -> Option<HalfEdgeId<I>> {
        self.face_loops(f).find(|&he| self.is_seam(self.edge_of(he)))
    }

    /// Whether a face is selected.
    #[inline]
    pub fn is_selected(&self, f: FaceId<I>) -> bool {
        self.face(f).selected
    }

    /// Select or deselect a face.
    #[inline]
    pub fn select_face(&mut self, f: FaceId<I>, selected: bool) {
        self.faces[f.index()].selected = selected;
    }

    /// Select every face.
    pub fn select_all(&mut self) {
        for face in &mut self.faces {
            face.selected = true;
        }
    }

    /// Selected faces in index order.
    pub fn selected_faces(&self) -> Vec<FaceId<I>> {
        self.face_ids().filter(|&f| self.is_selected(f)).collect()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Outgoing half-edges around a vertex, boundary half-edges included.
    pub fn vertex_halfedges(&self, v: VertexId<I>) -> VertexHalfEdgeIter<'_, I> {
        VertexHalfEdgeIter::new(self, v)
    }

    /// Corners of a vertex, one per incident face.
    pub fn vertex_loops(&self, v: VertexId<I>) -> impl Iterator<Item = HalfEdgeId<I>> + '_ {
        self.vertex_halfedges(v)
            .filter(|&he| !self.is_boundary_halfedge(he))
    }

    /// Faces around a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_loops(v).map(|he| self.face_of(he))
    }

    /// Edges around a vertex.
    pub fn vertex_edges(&self, v: VertexId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.vertex_halfedges(v).map(|he| self.edge_of(he))
    }

    /// Corners of a face in order.
    pub fn face_loops(&self, f: FaceId<I>) -> FaceHalfEdgeIter<'_, I> {
        FaceHalfEdgeIter::new(self, f)
    }

    /// Vertices of a face in order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_loops(f).map(|he| self.origin(he))
    }

    /// Edges of a face in order; edge `k` joins corner `k` and `k + 1`.
    pub fn face_edges(&self, f: FaceId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.face_loops(f).map(|he| self.edge_of(he))
    }

    /// Faces sharing an edge with `f`.
    pub fn face_neighbors(&self, f: FaceId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.face_loops(f)
            .map(|he| self.face_of(self.twin(he)))
            .filter(|n| n.is_valid())
    }

    /// Number of corners of a face.
    pub fn face_vertex_count(&self, f: FaceId<I>) -> usize {
        self.face_loops(f).count()
    }

    /// Bounding box of the vertex positions.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?.position;
        let mut min = first;
        let mut max = first;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v.position[i]);
                max[i] = max[i].max(v.position[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position));
        id
    }

    // ==================== Validation ====================

    /// Check that all connectivity is consistent.
    pub fn is_valid(&self) -> bool {
        for (i, v) in self.vertices.iter().enumerate() {
            if v.halfedge.is_valid() && self.origin(v.halfedge).index() != i {
                return false;
            }
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            if !he.twin.is_valid() || self.twin(he.twin).index() != i {
                return false;
            }
            if !he.edge.is_valid() || he.edge != self.edge_of(he.twin) {
                return false;
            }
            if he.next.is_valid() && self.prev(he.next).index() != i {
                return false;
            }
            if he.prev.is_valid() && self.next(he.prev).index() != i {
                return false;
            }
        }

        for e in &self.edges {
            if !e.halfedge.is_valid() {
                return false;
            }
        }

        self.faces.iter().all(|f| f.halfedge.is_valid())
    }
}

/// Iterator over outgoing half-edges around a vertex.
pub struct VertexHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, v: VertexId<I>) -> Self {
        let start = mesh.vertex(v).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;

        // twin(he) ends at the vertex; the half-edge after it leaves the vertex again.
        self.current = self.mesh.next(self.mesh.twin(self.current));

        if self.current == self.start || !self.current.is_valid() {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the corners of a face.
pub struct FaceHalfEdgeIter<'a, I: MeshIndex = u32> {
    mesh: &'a HalfEdgeMesh<I>,
    start: HalfEdgeId<I>,
    current: HalfEdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceHalfEdgeIter<'a, I> {
    fn new(mesh: &'a HalfEdgeMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).halfedge;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceHalfEdgeIter<'a, I> {
    type Item = HalfEdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_quads;

    fn two_quads() -> HalfEdgeMesh {
        // 3---4---5
        // |   |   |
        // 0---1---2
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 4, 3], [1, 2, 5, 4]];
        build_from_quads(&vertices, &faces).unwrap()
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::<u32>::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert!(mesh.is_valid());
        assert!(mesh.bounding_box().is_none());
    }

    #[test]
    fn test_corner_queries() {
        let mesh = two_quads();
        let f0 = FaceId::new(0);

        let verts: Vec<usize> = mesh.face_vertices(f0).map(|v| v.index()).collect();
        assert_eq!(verts, vec![0, 1, 4, 3]);

        // Edge k of a face runs from corner k to corner k + 1.
        for he in mesh.face_loops(f0) {
            let [a, b] = mesh.edge_vertices(mesh.edge_of(he));
            let (o, n) = (mesh.origin(he), mesh.origin(mesh.next(he)));
            assert!((a == o && b == n) || (a == n && b == o));
        }
    }

    #[test]
    fn test_vertex_rotation() {
        let mesh = two_quads();
        let v1 = VertexId::new(1);

        let mut faces: Vec<usize> = mesh.vertex_faces(v1).map(|f| f.index()).collect();
        faces.sort();
        assert_eq!(faces, vec![0, 1]);
        assert_eq!(mesh.vertex_loops(v1).count(), 2);
        // 1-0, 1-2, 1-4
        assert_eq!(mesh.vertex_edges(v1).count(), 3);
        assert!(mesh.is_boundary_vertex(v1));
    }

    #[test]
    fn test_edge_faces() {
        let mesh = two_quads();
        let shared = mesh.find_edge(VertexId::new(1), VertexId::new(4)).unwrap();
        assert_eq!(mesh.edge_faces(shared).count(), 2);

        let outer = mesh.find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert_eq!(mesh.edge_faces(outer).count(), 1);

        assert!(mesh.find_edge(VertexId::new(0), VertexId::new(5)).is_none());
    }

    #[test]
    fn test_seam_flags() {
        let mut mesh = two_quads();
        assert_eq!(mesh.num_seams(), 0);

        let e = mesh.set_seam_between(4, 1).unwrap();
        assert!(mesh.is_seam(e));
        assert_eq!(mesh.num_seams(), 1);

        assert!(mesh.face_has_seam(FaceId::new(0)));
        assert!(mesh.face_has_seam(FaceId::new(1)));
        assert!(mesh.vertex_touches_seam(VertexId::new(4)));
        assert!(!mesh.vertex_touches_seam(VertexId::new(0)));

        assert!(matches!(
            mesh.set_seam_between(0, 5),
            Err(MeshError::MissingEdge { v0: 0, v1: 5 })
        ));

        mesh.clear_seams();
        assert_eq!(mesh.num_seams(), 0);
    }

    #[test]
    fn test_selection() {
        let mut mesh = two_quads();
        assert!(mesh.selected_faces().is_empty());

        mesh.select_face(FaceId::new(1), true);
        assert_eq!(mesh.selected_faces(), vec![FaceId::new(1)]);

        mesh.select_all();
        assert_eq!(mesh.selected_faces().len(), 2);
    }

    #[test]
    fn test_face_neighbors() {
        let mesh = two_quads();
        let n: Vec<FaceId> = mesh.face_neighbors(FaceId::new(0)).collect();
        assert_eq!(n, vec![FaceId::new(1)]);
    }
}

//! The straightening pipeline.
//!
//! For every island of a face selection, in order:
//!
//! 1. classify border, fringe and inner regions,
//! 2. group the fringe into walls,
//! 3. snap each wall onto one axis-aligned line,
//! 4. smooth the inner vertices.
//!
//! All writes for an island are staged and applied together once the island
//! finishes. An island that fails leaves its UVs untouched and is reported;
//! the remaining islands are still processed. Smoothing never reads or
//! writes the corners of another island's faces, even where two islands
//! meet at a single vertex.
//!
//! # Example
//!
//! ```
//! use seamline::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(2.0, 1.0, 0.0),
//! ];
//! let mut mesh: HalfEdgeMesh = build_from_quads(&vertices, &[[0, 1, 4, 3], [1, 2, 5, 4]]).unwrap();
//! mesh.set_seam_between(1, 4).unwrap();
//! mesh.select_all();
//!
//! let planar = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.48, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.52, 1.0),
//!     Point2::new(1.0, 1.0),
//! ];
//! let mut uvs = CornerUvs::from_vertex_uvs(&mesh, &planar).unwrap();
//!
//! let report = straighten(&mesh, &mut uvs, &StraightenOptions::default()).unwrap();
//! assert_eq!(report.num_islands(), 2);
//! assert!(report.is_complete());
//! ```

use std::collections::HashSet;

use nalgebra::Point2;

use super::edit::UvEdit;
use super::island::{segment_islands, Island};
use super::progress::Progress;
use super::region::classify_regions;
use super::smooth::{smooth_interior_within, SmoothOptions};
use super::snap::{snap_wall, AlignScope};
use super::wall::group_walls;
use crate::error::{MeshError, Result};
use crate::mesh::{CornerUvs, FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex};

/// Options for [`straighten`].
#[derive(Debug, Clone, Default)]
pub struct StraightenOptions {
    /// Interior smoothing options.
    pub smooth: SmoothOptions,

    /// Which corners each wall aligns (default: [`AlignScope::Border`]).
    pub scope: AlignScope,
}

impl StraightenOptions {
    /// Set the number of interior smoothing iterations.
    pub fn with_smooth_iterations(mut self, iterations: usize) -> Self {
        self.smooth.iterations = iterations;
        self
    }

    /// Set the wall alignment scope.
    pub fn with_scope(mut self, scope: AlignScope) -> Self {
        self.scope = scope;
        self
    }

    /// Set whether smoothing may run in parallel.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.smooth.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.smooth.parallel = false;
        self
    }
}

/// What happened to one island.
#[derive(Debug, Default)]
pub struct IslandReport {
    /// Number of faces in the island.
    pub faces: usize,
    /// Number of border faces.
    pub border: usize,
    /// Number of fringe faces.
    pub fringe: usize,
    /// Number of inner vertices.
    pub inner: usize,
    /// Number of walls.
    pub walls: usize,
    /// Corner writes made by wall alignment.
    pub aligned_corners: usize,
    /// Corners whose UV differs after the island was applied.
    pub changed_corners: usize,
    /// Why the island was rolled back, if it was.
    pub error: Option<MeshError>,
}

/// Outcome of a straightening run.
#[derive(Debug, Default)]
pub struct StraightenReport {
    /// One entry per island, in processing order.
    pub islands: Vec<IslandReport>,
}

impl StraightenReport {
    /// Number of islands found.
    pub fn num_islands(&self) -> usize {
        self.islands.len()
    }

    /// Total number of walls over all islands.
    pub fn num_walls(&self) -> usize {
        self.islands.iter().map(|i| i.walls).sum()
    }

    /// Total number of changed corners.
    pub fn num_changed(&self) -> usize {
        self.islands.iter().map(|i| i.changed_corners).sum()
    }

    /// Number of islands whose edits were discarded.
    pub fn rolled_back(&self) -> usize {
        self.islands.iter().filter(|i| i.error.is_some()).count()
    }

    /// Whether every island was applied.
    pub fn is_complete(&self) -> bool {
        self.rolled_back() == 0
    }
}

/// Receives the final UVs after a run.
///
/// [`run`] calls [`UvSink::commit`] exactly once, after every island has
/// been processed.
pub trait UvSink<I: MeshIndex = u32> {
    /// Accept the updated UV layer.
    fn commit(&mut self, mesh: &HalfEdgeMesh<I>, uvs: &CornerUvs<I>) -> Result<()>;
}

impl<I, F> UvSink<I> for F
where
    I: MeshIndex,
    F: FnMut(&HalfEdgeMesh<I>, &CornerUvs<I>) -> Result<()>,
{
    fn commit(&mut self, mesh: &HalfEdgeMesh<I>, uvs: &CornerUvs<I>) -> Result<()> {
        self(mesh, uvs)
    }
}

/// Straighten the selected faces of `mesh`.
///
/// # Errors
///
/// Returns [`MeshError::EmptySelection`] if no face is selected and
/// [`MeshError::UvCountMismatch`] if `uvs` does not fit the mesh. In both
/// cases nothing is modified.
pub fn straighten<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &mut CornerUvs<I>,
    options: &StraightenOptions,
) -> Result<StraightenReport> {
    straighten_faces(mesh, uvs, &mesh.selected_faces(), options)
}

/// Straighten an explicit list of faces, ignoring the selection flags.
pub fn straighten_faces<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &mut CornerUvs<I>,
    faces: &[FaceId<I>],
    options: &StraightenOptions,
) -> Result<StraightenReport> {
    straighten_with_progress(mesh, uvs, faces, options, &Progress::none())
}

/// Straighten an explicit list of faces, reporting once per island.
pub fn straighten_with_progress<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &mut CornerUvs<I>,
    faces: &[FaceId<I>],
    options: &StraightenOptions,
    progress: &Progress,
) -> Result<StraightenReport> {
    if uvs.len() != mesh.num_halfedges() {
        return Err(MeshError::UvCountMismatch {
            expected: mesh.num_halfedges(),
            actual: uvs.len(),
        });
    }
    if faces.is_empty() {
        return Err(MeshError::EmptySelection);
    }
    if let Some(f) = faces.iter().find(|f| f.index() >= mesh.num_faces()) {
        return Err(MeshError::invalid_param(
            "face",
            f.index(),
            "out of range",
        ));
    }

    let islands = segment_islands(mesh, faces);
    let mut owner = vec![None; mesh.num_faces()];
    for (i, island) in islands.iter().enumerate() {
        for &f in &island.faces {
            owner[f.index()] = Some(i);
        }
    }
    let total = islands.len();
    progress.report(0, total, "straightening");

    let mut report = StraightenReport::default();
    for (i, island) in islands.iter().enumerate() {
        let mut island_report = IslandReport {
            faces: island.len(),
            ..Default::default()
        };

        match straighten_island(mesh, uvs, island, i, &owner, options, &mut island_report) {
            Ok(changes) => {
                uvs.apply(&changes);
                log::debug!(
                    "island {}: {} faces, {} border, {} fringe, {} inner, {} walls, {} corners changed",
                    i,
                    island_report.faces,
                    island_report.border,
                    island_report.fringe,
                    island_report.inner,
                    island_report.walls,
                    island_report.changed_corners
                );
            }
            Err(err) => {
                log::warn!("island {} rolled back: {}", i, err);
                island_report.changed_corners = 0;
                island_report.error = Some(err);
            }
        }

        report.islands.push(island_report);
        progress.report(i + 1, total, "straightening");
    }

    log::info!(
        "straightened {} islands ({} walls, {} corners changed, {} rolled back)",
        report.num_islands(),
        report.num_walls(),
        report.num_changed(),
        report.rolled_back()
    );
    Ok(report)
}

/// Straighten the selection and hand the result to `sink`.
///
/// The sink is not called when the run fails up front.
pub fn run<I, S>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &mut CornerUvs<I>,
    options: &StraightenOptions,
    sink: &mut S,
) -> Result<StraightenReport>
where
    I: MeshIndex,
    S: UvSink<I> + ?Sized,
{
    run_with_progress(mesh, uvs, &mesh.selected_faces(), options, &Progress::none(), sink)
}

/// [`run`] over explicit faces with progress reporting.
pub fn run_with_progress<I, S>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &mut CornerUvs<I>,
    faces: &[FaceId<I>],
    options: &StraightenOptions,
    progress: &Progress,
    sink: &mut S,
) -> Result<StraightenReport>
where
    I: MeshIndex,
    S: UvSink<I> + ?Sized,
{
    let report = straighten_with_progress(mesh, uvs, faces, options, progress)?;
    sink.commit(mesh, uvs)?;
    Ok(report)
}

/// Run every phase for one island and return its staged writes.
///
/// `owner` maps each face to its island index; unselected faces map to
/// `None`.
fn straighten_island<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    island: &Island<I>,
    index: usize,
    owner: &[Option<usize>],
    options: &StraightenOptions,
    report: &mut IslandReport,
) -> Result<Vec<(HalfEdgeId<I>, Point2<f64>)>> {
    let regions = classify_regions(mesh, island);
    report.border = regions.border.len();
    report.fringe = regions.fringe.len();
    report.inner = regions.inner.len();

    let walls = group_walls(mesh, uvs, &regions.fringe);
    report.walls = walls.len();

    let border: HashSet<FaceId<I>> = regions.border_set();
    let mut edit = UvEdit::new(uvs);
    for wall in &walls {
        report.aligned_corners += snap_wall(mesh, &mut edit, wall, &border, options.scope)?;
    }

    smooth_interior_within(mesh, &mut edit, &regions.inner, &options.smooth, |f| {
        owner[f.index()].map_or(true, |j| j == index)
    });

    edit.check_finite()?;
    report.changed_corners = edit.num_changed();
    Ok(edit.into_changes())
}

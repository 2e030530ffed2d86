//! UV straightening algorithms.
//!
//! The pipeline is split into small phases that can also be used on their
//! own:
//!
//! - **Islands**: split a face selection along seams ([`segment_islands`])
//! - **Regions**: border, fringe and inner sets of an island ([`classify_regions`])
//! - **Alignment**: seam direction of a border face ([`classify_face`])
//! - **Walls**: same-alignment runs of fringe faces ([`group_walls`])
//! - **Snapping**: pull a wall onto one line ([`snap_wall`])
//! - **Smoothing**: relax inner vertices ([`smooth::smooth_interior`])
//!
//! [`straighten`] and [`run`] drive all of them over a selection.

pub mod alignment;
pub mod edit;
pub mod island;
pub mod progress;
pub mod region;
pub mod smooth;
pub mod snap;
pub mod straighten;
pub mod wall;

pub use alignment::{classify_face, try_classify_face, Alignment};
pub use edit::UvEdit;
pub use island::{segment_islands, Island};
pub use progress::Progress;
pub use region::{classify_regions, Regions};
pub use smooth::SmoothOptions;
pub use snap::{snap_wall, wall_corners, AlignScope};
pub use straighten::{
    run, run_with_progress, straighten, straighten_faces, straighten_with_progress, IslandReport,
    StraightenOptions, StraightenReport, UvSink,
};
pub use wall::{group_walls, Wall};

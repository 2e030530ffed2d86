//! Seam direction classification.
//!
//! A border face is classified by the UV-space slope of its first seam edge.
//! A mostly horizontal seam is [`Alignment::X`] and gets its V coordinate
//! snapped; anything steeper, including a vertical seam, is
//! [`Alignment::Y`] and gets its U coordinate snapped.

use std::f64::consts::FRAC_PI_4;

use nalgebra::Point2;

use crate::error::{MeshError, Result};
use crate::mesh::{CornerUvs, FaceId, HalfEdgeMesh, MeshIndex};

/// Direction a seam segment runs along in UV space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Runs along U; the V coordinate is shared.
    X,
    /// Runs along V; the U coordinate is shared.
    Y,
}

impl Alignment {
    /// Classify the segment `a`-`b`.
    pub fn from_segment(a: Point2<f64>, b: Point2<f64>) -> Self {
        let du = b.x - a.x;
        let dv = b.y - a.y;
        if du == 0.0 {
            return Alignment::Y;
        }

        let angle = (dv / du).atan();
        if angle > -FRAC_PI_4 && angle < FRAC_PI_4 {
            Alignment::X
        } else {
            Alignment::Y
        }
    }

    /// Index of the coordinate that is snapped (0 = U, 1 = V).
    #[inline]
    pub fn snapped_axis(self) -> usize {
        match self {
            Alignment::X => 1,
            Alignment::Y => 0,
        }
    }
}

/// The UV segment of a face's first seam edge, in face order.
pub fn seam_segment<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    f: FaceId<I>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let he = mesh.face_seam_loop(f)?;
    Some((uvs.get(he), uvs.get(mesh.next(he))))
}

/// Classify a face, or `None` if it has no seam edge.
pub fn classify_face<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    f: FaceId<I>,
) -> Option<Alignment> {
    seam_segment(mesh, uvs, f).map(|(a, b)| Alignment::from_segment(a, b))
}

/// Classify a face that must have a seam edge.
pub fn try_classify_face<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    f: FaceId<I>,
) -> Result<Alignment> {
    classify_face(mesh, uvs, f).ok_or(MeshError::NoSeamEdge { face: f.index() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_quads;
    use nalgebra::Point3;

    fn unit_quad() -> HalfEdgeMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_quads(&vertices, &[[0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_segment_slopes() {
        let o = Point2::new(0.0, 0.0);
        assert_eq!(Alignment::from_segment(o, Point2::new(0.0, 1.0)), Alignment::Y);
        assert_eq!(Alignment::from_segment(o, Point2::new(1.0, 0.2)), Alignment::X);
        assert_eq!(Alignment::from_segment(o, Point2::new(1.0, 1.0)), Alignment::Y);
        assert_eq!(Alignment::from_segment(o, Point2::new(1.0, -0.5)), Alignment::X);
        assert_eq!(Alignment::from_segment(o, Point2::new(-1.0, 0.1)), Alignment::X);
        assert_eq!(Alignment::from_segment(o, Point2::new(0.2, -3.0)), Alignment::Y);
    }

    #[test]
    fn test_zero_length_segment() {
        let p = Point2::new(0.3, 0.3);
        assert_eq!(Alignment::from_segment(p, p), Alignment::Y);
    }

    #[test]
    fn test_snapped_axis() {
        assert_eq!(Alignment::X.snapped_axis(), 1);
        assert_eq!(Alignment::Y.snapped_axis(), 0);
    }

    #[test]
    fn test_classify_face_uses_first_seam() {
        let mut mesh = unit_quad();
        let uvs = CornerUvs::from_vertex_uvs(
            &mesh,
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.1),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
        )
        .unwrap();
        let f = FaceId::new(0);

        assert_eq!(classify_face(&mesh, &uvs, f), None);
        assert!(matches!(
            try_classify_face(&mesh, &uvs, f),
            Err(MeshError::NoSeamEdge { face: 0 })
        ));

        // Right edge is vertical
        mesh.set_seam_between(1, 2).unwrap();
        assert_eq!(classify_face(&mesh, &uvs, f), Some(Alignment::Y));

        // Bottom edge comes first in face order and wins
        mesh.set_seam_between(0, 1).unwrap();
        assert_eq!(try_classify_face(&mesh, &uvs, f).unwrap(), Alignment::X);
        assert_eq!(
            seam_segment(&mesh, &uvs, f),
            Some((Point2::new(0.0, 0.0), Point2::new(1.0, 0.1)))
        );
    }

    #[test]
    fn test_deterministic() {
        let mut mesh = unit_quad();
        mesh.set_seam_between(2, 3).unwrap();
        let uvs = CornerUvs::from_vertex_uvs(
            &mesh,
            &[
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.9, 0.8),
                Point2::new(0.1, 1.0),
            ],
        )
        .unwrap();
        let f = FaceId::new(0);
        let first = classify_face(&mesh, &uvs, f);
        assert_eq!(first, Some(Alignment::X));
        for _ in 0..10 {
            assert_eq!(classify_face(&mesh, &uvs, f), first);
        }
    }
}

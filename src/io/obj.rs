//! Wavefront OBJ support.
//!
//! Only the records the straightening pipeline needs are handled: `v`
//! positions, `vt` texture coordinates and `f` polygons with `v`, `v/vt`,
//! `v/vt/vn` or `v//vn` corners. Negative (relative) indices are accepted.
//! Other records such as `vn`, `o`, `g`, `s` or `usemtl` are skipped.
//!
//! OBJ has no seam records. Seams are usually recovered from UV splits with
//! [`CornerUvs::mark_seams_from_splits`].

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use super::UvMesh;
use crate::error::{MeshError, Result};
use crate::mesh::{build_from_polygons, CornerUvs, HalfEdgeMesh, MeshIndex};

/// Read a mesh with per-corner UVs from OBJ text.
///
/// Corners without a texture index get the UV `(0, 0)`.
///
/// # Example
///
/// ```
/// use seamline::io::obj;
/// use seamline::io::UvMesh;
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
/// let loaded: UvMesh = obj::read(text.as_bytes()).unwrap();
/// assert_eq!(loaded.mesh.num_faces(), 1);
/// ```
pub fn read<R: BufRead, I: MeshIndex>(reader: R) -> Result<UvMesh<I>> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut texcoords: Vec<Point2<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut face_uvs: Vec<Vec<Point2<f64>>> = Vec::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        match parts[0] {
            "v" => {
                if parts.len() < 4 {
                    return Err(MeshError::parse(line_num, "vertex requires 3 coordinates"));
                }
                let x = parse_float(parts[1], line_num)?;
                let y = parse_float(parts[2], line_num)?;
                let z = parse_float(parts[3], line_num)?;
                positions.push(Point3::new(x, y, z));
            }
            "vt" => {
                if parts.len() < 2 {
                    return Err(MeshError::parse(line_num, "texture coordinate requires u"));
                }
                let u = parse_float(parts[1], line_num)?;
                let v = match parts.get(2) {
                    Some(s) => parse_float(s, line_num)?,
                    None => 0.0,
                };
                texcoords.push(Point2::new(u, v));
            }
            "f" => {
                if parts.len() < 4 {
                    return Err(MeshError::parse(line_num, "face requires at least 3 vertices"));
                }

                let mut corners = Vec::with_capacity(parts.len() - 1);
                let mut uvs = Vec::with_capacity(parts.len() - 1);
                for corner in &parts[1..] {
                    let mut fields = corner.split('/');
                    let v = fields.next().unwrap_or("");
                    let vi = resolve_index(v, positions.len(), line_num)?;

                    let uv = match fields.next() {
                        Some(vt) if !vt.is_empty() => {
                            texcoords[resolve_index(vt, texcoords.len(), line_num)?]
                        }
                        _ => Point2::origin(),
                    };

                    corners.push(vi);
                    uvs.push(uv);
                }
                faces.push(corners);
                face_uvs.push(uvs);
            }
            _ => {}
        }
    }

    let mesh = build_from_polygons(&positions, &faces)?;
    let uvs = CornerUvs::from_face_corners(&mesh, &face_uvs)?;
    log::debug!(
        "read OBJ: {} vertices, {} texture coordinates, {} faces",
        positions.len(),
        texcoords.len(),
        faces.len()
    );
    Ok(UvMesh { mesh, uvs })
}

/// Load a mesh with per-corner UVs from an OBJ file.
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<UvMesh<I>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    read(BufReader::new(file)).map_err(|e| match e {
        MeshError::Io(_) => e,
        other => MeshError::LoadError {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

/// Write a mesh and its UVs as OBJ text.
///
/// Identical UVs share one `vt` record.
pub fn write<W: Write, I: MeshIndex>(
    writer: &mut W,
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
) -> Result<()> {
    if uvs.len() != mesh.num_halfedges() {
        return Err(MeshError::UvCountMismatch {
            expected: mesh.num_halfedges(),
            actual: uvs.len(),
        });
    }

    writeln!(writer, "# Generated by seamline")?;
    for v in mesh.vertex_ids() {
        let p = mesh.position(v);
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    let mut texcoord_index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut face_records: Vec<Vec<(usize, usize)>> = Vec::with_capacity(mesh.num_faces());
    for f in mesh.face_ids() {
        let mut record = Vec::new();
        for he in mesh.face_loops(f) {
            let uv = uvs.get(he);
            let key = (uv.x.to_bits(), uv.y.to_bits());
            let next = texcoord_index.len();
            let vt = *texcoord_index.entry(key).or_insert(next);
            if vt == next {
                writeln!(writer, "vt {} {}", uv.x, uv.y)?;
            }
            record.push((mesh.origin(he).index() + 1, vt + 1));
        }
        face_records.push(record);
    }

    for record in &face_records {
        write!(writer, "f")?;
        for (v, vt) in record {
            write!(writer, " {}/{}", v, vt)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a mesh and its UVs to an OBJ file.
pub fn save<P: AsRef<Path>, I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    uvs: &CornerUvs<I>,
    path: P,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(&mut writer, mesh, uvs)
}

fn parse_float(s: &str, line_num: usize) -> Result<f64> {
    s.parse()
        .map_err(|_| MeshError::parse(line_num, format!("invalid number '{}'", s)))
}

/// Turn a 1-based or negative OBJ index into a 0-based one.
fn resolve_index(s: &str, count: usize, line_num: usize) -> Result<usize> {
    let raw: i64 = s
        .parse()
        .map_err(|_| MeshError::parse(line_num, format!("invalid index '{}'", s)))?;

    let resolved = if raw > 0 {
        raw - 1
    } else {
        count as i64 + raw
    };

    if raw == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(MeshError::parse(
            line_num,
            format!("index {} out of range ({} defined)", raw, count),
        ));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FaceId;

    const SPLIT_QUADS: &str = "\
# two quads, UVs split along x = 1
v 0 0 0
v 1 0 0
v 2 0 0
v 0 1 0
v 1 1 0
v 2 1 0
vt 0 0
vt 0.48 0
vt 0.52 1
vt 0 1
vt 0.6 0
vt 1 0
vt 1 1
vt 0.6 1
vn 0 0 1
f 1/1/1 2/2/1 5/3/1 4/4/1
f 2/5/1 3/6/1 6/7/1 5/8/1
";

    #[test]
    fn test_read_split_quads() {
        let loaded: UvMesh = read(SPLIT_QUADS.as_bytes()).unwrap();
        assert_eq!(loaded.mesh.num_vertices(), 6);
        assert_eq!(loaded.mesh.num_faces(), 2);

        let f1 = loaded.uvs.face_uvs(&loaded.mesh, FaceId::new(1));
        assert_eq!(f1[0], Point2::new(0.6, 0.0));
        assert_eq!(f1[3], Point2::new(0.6, 1.0));
    }

    #[test]
    fn test_seams_from_splits() {
        let mut loaded: UvMesh = read(SPLIT_QUADS.as_bytes()).unwrap();
        let marked = loaded
            .uvs
            .mark_seams_from_splits(&mut loaded.mesh, 1e-9)
            .unwrap();
        assert_eq!(marked, 1);
        assert_eq!(loaded.mesh.num_seams(), 1);
    }

    #[test]
    fn test_faces_without_texcoords() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\nf 1 2 3 4\nf 2//1 5//1 3//1\n";
        let loaded: UvMesh = read(text.as_bytes()).unwrap();
        assert_eq!(loaded.mesh.num_faces(), 2);
        for f in loaded.mesh.face_ids() {
            assert!(loaded
                .uvs
                .face_uvs(&loaded.mesh, f)
                .iter()
                .all(|uv| *uv == Point2::origin()));
        }
    }

    #[test]
    fn test_negative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf -3/-3 -2/-2 -1/-1\n";
        let loaded: UvMesh = read(text.as_bytes()).unwrap();
        let uvs = loaded.uvs.face_uvs(&loaded.mesh, FaceId::new(0));
        assert_eq!(uvs[1], Point2::new(1.0, 0.0));
        assert_eq!(uvs[2], Point2::new(0.0, 1.0));
    }

    #[test]
    fn test_parse_errors() {
        let err = read::<_, u32>("v 0 0\n".as_bytes());
        assert!(matches!(err, Err(MeshError::Parse { line: 1, .. })));

        let err = read::<_, u32>("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n".as_bytes());
        assert!(matches!(err, Err(MeshError::Parse { line: 4, .. })));

        let err = read::<_, u32>("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/x 2 3\n".as_bytes());
        assert!(matches!(err, Err(MeshError::Parse { line: 4, .. })));

        let err = read::<_, u32>("v 0 0 0\nv a 0 0\n".as_bytes());
        assert!(matches!(err, Err(MeshError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_write_shares_texcoords() {
        let loaded: UvMesh = read(SPLIT_QUADS.as_bytes()).unwrap();
        let mut out = Vec::new();
        write(&mut out, &loaded.mesh, &loaded.uvs).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 8);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2);

        let reread: UvMesh = read(text.as_bytes()).unwrap();
        assert_eq!(reread.uvs, loaded.uvs);
        assert_eq!(reread.mesh.num_edges(), loaded.mesh.num_edges());
    }

    #[test]
    fn test_write_merges_identical_uvs() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\nv 2 1 0\n\
                    vt 0 0\nvt 0.5 0\nvt 0.5 1\nvt 0 1\nvt 1 0\nvt 1 1\n\
                    f 1/1 2/2 3/3 4/4\nf 2/2 5/5 6/6 3/3\n";
        let loaded: UvMesh = read(text.as_bytes()).unwrap();
        let mut out = Vec::new();
        write(&mut out, &loaded.mesh, &loaded.uvs).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert_eq!(written.lines().filter(|l| l.starts_with("vt ")).count(), 6);
    }
}

//! Wavefront OBJ format support.
//!
//! The reader understands the subset of OBJ that describes polygon
//! geometry:
//!
//! - `v x y z [w]`: vertex position (`w` is ignored)
//! - `vt u v [w]`: texture coordinate (`w` is ignored)
//! - `f a b c ...`: face with 1-based vertex indices, optionally written
//!   `a/t`, `a/t/n` or `a//n`; normal indices are ignored
//! - `#`: comment to end of line
//!
//! Other statements (`vn`, `o`, `g`, `s`, `usemtl`, `mtllib`, ...) are
//! skipped. Relative (negative) indices are not supported.
//!
//! Faces may reference vertices declared later in the file. All indices are
//! checked once the whole file has been read, so a bad index rejects the
//! load without producing a partial mesh.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// A face as read from the file: 1-based vertex and optional UV indices.
struct RawFace {
    line: usize,
    vertices: Vec<usize>,
    uvs: Option<Vec<usize>>,
}

/// Load a mesh from an OBJ file.
///
/// # Errors
/// Every failure, including I/O, is wrapped in [`MeshError::LoadError`]
/// carrying the path; the underlying [`MeshError::InvalidVertexIndex`],
/// [`MeshError::Parse`] or [`MeshError::Io`] is its source.
///
/// # Example
///
/// ```no_run
/// use tessera::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let result = File::open(path)
        .map_err(MeshError::from)
        .and_then(|file| read(BufReader::new(file)));

    result.map_err(|e| MeshError::LoadError {
        path: path.to_path_buf(),
        source: Box::new(e),
    })
}

/// Parse OBJ text held in memory.
///
/// # Errors
/// See [`read`].
pub fn parse(text: &str) -> Result<Mesh> {
    read(text.as_bytes())
}

/// Read OBJ data from any buffered reader.
///
/// # Errors
/// - [`MeshError::Parse`] for a malformed statement (line numbers are 1-based)
/// - [`MeshError::InvalidVertexIndex`] for a face index outside
///   `[1, vertex count]`, reported as written in the file
/// - [`MeshError::InvalidUvIndex`] for a texture index outside
///   `[1, uv count]` or a face that gives UVs for only some corners
/// - [`MeshError::Io`] if reading fails
pub fn read<R: BufRead>(reader: R) -> Result<Mesh> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut uvs: Vec<Point2<f64>> = Vec::new();
    let mut faces: Vec<RawFace> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let content = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line.as_str(),
        };

        let mut tokens = content.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_coords::<3>(line_no, "v", &mut tokens)?;
                vertices.push(Point3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_coords::<2>(line_no, "vt", &mut tokens)?;
                uvs.push(Point2::new(u, v));
            }
            "f" => faces.push(parse_face(line_no, tokens)?),
            other => log::trace!("obj: line {}: skipping '{}'", line_no, other),
        }
    }

    build(vertices, uvs, faces)
}

fn parse_coords<'a, const N: usize>(
    line: usize,
    keyword: &str,
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<[f64; N]> {
    let mut coords = [0.0; N];
    for (n, slot) in coords.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| MeshError::Parse {
            line,
            message: format!("'{}' needs {} coordinates, found {}", keyword, N, n),
        })?;
        *slot = token.parse().map_err(|_| MeshError::Parse {
            line,
            message: format!("invalid number '{}'", token),
        })?;
    }
    Ok(coords)
}

fn parse_index(line: usize, token: &str) -> Result<usize> {
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid index '{}'", token),
    })
}

fn parse_face<'a>(line: usize, tokens: impl Iterator<Item = &'a str>) -> Result<RawFace> {
    let mut vertices = Vec::new();
    let mut uvs = Vec::new();
    let mut corners_with_uv = 0;

    for token in tokens {
        let mut parts = token.split('/');
        let vertex = parts.next().unwrap_or_default();
        vertices.push(parse_index(line, vertex)?);
        if let Some(uv) = parts.next().filter(|s| !s.is_empty()) {
            uvs.push(parse_index(line, uv)?);
            corners_with_uv += 1;
        }
    }

    if vertices.is_empty() {
        return Err(MeshError::Parse {
            line,
            message: "face has no vertices".to_string(),
        });
    }

    let uvs = match corners_with_uv {
        0 => None,
        n if n == vertices.len() => Some(uvs),
        n => {
            return Err(MeshError::Parse {
                line,
                message: format!("face gives texture indices for {} of {} corners", n, vertices.len()),
            })
        }
    };

    Ok(RawFace { line, vertices, uvs })
}

fn build(vertices: Vec<Point3<f64>>, uvs: Vec<Point2<f64>>, faces: Vec<RawFace>) -> Result<Mesh> {
    let to_zero_based = |written: &[usize], count: usize| -> std::result::Result<Vec<usize>, usize> {
        written
            .iter()
            .map(|&k| if k >= 1 && k <= count { Ok(k - 1) } else { Err(k) })
            .collect()
    };

    let mut mesh = Mesh::with_capacity(vertices.len(), faces.len());
    mesh.add_vertices(vertices);
    for uv in uvs {
        mesh.add_uv(uv);
    }

    for (fi, face) in faces.iter().enumerate() {
        let indices = to_zero_based(&face.vertices, mesh.num_vertices())
            .map_err(|vertex| MeshError::InvalidVertexIndex { face: fi, vertex })?;

        match &face.uvs {
            Some(written) => {
                let uv_indices = to_zero_based(written, mesh.num_uvs()).map_err(|uv| MeshError::InvalidUvIndex {
                    face: fi,
                    details: format!("line {}: texture index {} out of range", face.line, uv),
                })?;
                mesh.push_face_with_uvs(indices, uv_indices);
            }
            None => {
                mesh.push_face(indices);
            }
        }
    }

    log::debug!(
        "obj: read {} vertices, {} uvs, {} faces",
        mesh.num_vertices(),
        mesh.num_uvs(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Save a mesh to an OBJ file.
///
/// # Example
///
/// ```no_run
/// use tessera::io::obj;
///
/// let mesh = tessera::primitives::cube(1.0);
/// obj::save(&mesh, "cube.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write a mesh as OBJ text.
///
/// Coordinates use Rust's shortest round-trip formatting, so reading the
/// output back reproduces every position bit for bit. Faces with UV corners
/// are written as `v/t` pairs.
pub fn write<W: Write>(mesh: &Mesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "# {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces())?;

    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for t in mesh.uvs() {
        writeln!(writer, "vt {} {}", t.x, t.y)?;
    }

    for face in mesh.faces() {
        write!(writer, "f")?;
        if face.has_uvs() {
            for (v, t) in face.indices().iter().zip(face.uv_indices()) {
                write!(writer, " {}/{}", v + 1, t + 1)?;
            }
        } else {
            for v in face.indices() {
                write!(writer, " {}", v + 1)?;
            }
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Render a mesh as OBJ text.
///
/// # Errors
/// Propagates any error from [`write`].
pub fn to_string(mesh: &Mesh) -> Result<String> {
    let mut buf = Vec::new();
    write(mesh, &mut buf)?;
    String::from_utf8(buf).map_err(|e| MeshError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

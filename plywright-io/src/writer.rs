//! PLY encoding.
//!
//! One call writes one snapshot: header first, then vertex records in input
//! order, then face records. The header is plain text regardless of body
//! format, with `\n` line endings.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use plywright_mesh::MeshSnapshot;
use tracing::{debug, info};

use crate::{EncodeError, PlyFormat};

/// Write `mesh` to `sink` as a PLY byte stream.
///
/// The sink is flushed on success and dropped when the call returns. On
/// failure the sink may hold a truncated prefix; callers needing atomic
/// visibility should stage to a temporary path and rename.
#[tracing::instrument(skip_all, fields(format = ?format, vertices = mesh.vertex_count(), faces = mesh.face_count()))]
pub fn encode<W: Write>(
    mesh: &MeshSnapshot,
    format: PlyFormat,
    mut sink: W,
) -> Result<(), EncodeError> {
    write_header(mesh, format, &mut sink)?;
    write_vertices(mesh, format, &mut sink)?;
    write_faces(mesh, format, &mut sink)?;
    sink.flush()?;

    debug!(
        "Encoded {} vertices and {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(())
}

/// Create `path` and write `mesh` to it through a buffered writer.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn encode_to_path<P: AsRef<Path>>(
    mesh: &MeshSnapshot,
    format: PlyFormat,
    path: P,
) -> Result<(), EncodeError> {
    let file = File::create(path.as_ref())?;
    encode(mesh, format, BufWriter::new(file))?;

    info!(
        "Exported {} vertices and {} faces to {}",
        mesh.vertex_count(),
        mesh.face_count(),
        path.as_ref().display()
    );
    Ok(())
}

fn write_header<W: Write>(
    mesh: &MeshSnapshot,
    format: PlyFormat,
    sink: &mut W,
) -> Result<(), EncodeError> {
    let format_name = match format {
        PlyFormat::Ascii => "ascii",
        PlyFormat::BinaryLittleEndian => "binary_little_endian",
    };

    writeln!(sink, "ply")?;
    writeln!(sink, "format {format_name} 1.0")?;
    writeln!(sink, "comment Exported by plywright")?;

    writeln!(sink, "element vertex {}", mesh.vertex_count())?;
    writeln!(sink, "property float x")?;
    writeln!(sink, "property float y")?;
    writeln!(sink, "property float z")?;
    if mesh.normals().is_some() {
        writeln!(sink, "property float nx")?;
        writeln!(sink, "property float ny")?;
        writeln!(sink, "property float nz")?;
    }
    if mesh.texcoords().is_some() {
        writeln!(sink, "property float u")?;
        writeln!(sink, "property float v")?;
    }
    if mesh.colors().is_some() {
        writeln!(sink, "property uint8 red")?;
        writeln!(sink, "property uint8 green")?;
        writeln!(sink, "property uint8 blue")?;
    }

    writeln!(sink, "element face {}", mesh.face_count())?;
    writeln!(sink, "property list uchar int vertex_indices")?;
    writeln!(sink, "end_header")?;
    Ok(())
}

fn write_vertices<W: Write>(
    mesh: &MeshSnapshot,
    format: PlyFormat,
    sink: &mut W,
) -> Result<(), EncodeError> {
    for i in 0..mesh.vertex_count() {
        let p = mesh.positions()[i];
        match format {
            PlyFormat::BinaryLittleEndian => {
                write_f32_le(sink, &[p.x, p.y, p.z])?;
                if let Some(normals) = mesh.normals() {
                    let n = normals[i];
                    write_f32_le(sink, &[n.x, n.y, n.z])?;
                }
                if let Some(texcoords) = mesh.texcoords() {
                    let t = texcoords[i];
                    write_f32_le(sink, &[t.x, t.y])?;
                }
                if let Some(colors) = mesh.colors() {
                    sink.write_all(&colors[i])?;
                }
            }
            PlyFormat::Ascii => {
                write!(sink, "{:.7} {:.7} {:.7}", p.x, p.y, p.z)?;
                if let Some(normals) = mesh.normals() {
                    let n = normals[i];
                    write!(sink, " {:.7} {:.7} {:.7}", n.x, n.y, n.z)?;
                }
                if let Some(texcoords) = mesh.texcoords() {
                    let t = texcoords[i];
                    write!(sink, " {:.7} {:.7}", t.x, t.y)?;
                }
                if let Some(colors) = mesh.colors() {
                    let [r, g, b] = colors[i];
                    write!(sink, " {r} {g} {b}")?;
                }
                writeln!(sink)?;
            }
        }
    }
    Ok(())
}

fn write_faces<W: Write>(
    mesh: &MeshSnapshot,
    format: PlyFormat,
    sink: &mut W,
) -> Result<(), EncodeError> {
    for (face_idx, face) in mesh.faces().iter().enumerate() {
        let count = face_count_u8(face_idx, face.len())?;
        match format {
            PlyFormat::BinaryLittleEndian => {
                sink.write_all(&[count])?;
                for &index in face {
                    sink.write_all(&index.to_le_bytes())?;
                }
            }
            PlyFormat::Ascii => {
                write!(sink, "{count}")?;
                for &index in face {
                    write!(sink, " {index}")?;
                }
                writeln!(sink)?;
            }
        }
    }
    Ok(())
}

/// Narrow a face's vertex count to the u8 list-length field.
///
/// Snapshots already reject oversized faces at construction, so this only
/// fails for data that bypassed validation. No bytes of the face have been
/// written when it does.
fn face_count_u8(face: usize, len: usize) -> Result<u8, EncodeError> {
    u8::try_from(len).map_err(|_| EncodeError::UnsupportedFaceSize { face, len })
}

fn write_f32_le<W: Write>(sink: &mut W, values: &[f32]) -> io::Result<()> {
    for v in values {
        sink.write_all(&v.to_le_bytes())?;
    }
    Ok(())
}

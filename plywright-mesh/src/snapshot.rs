//! Mesh snapshot value types.
//!
//! A [`MeshSnapshot`] describes one mesh to export: vertex positions in a
//! caller-chosen order, optional per-vertex attributes, and polygon faces
//! indexing into the vertex list. All invariants are checked when the
//! snapshot is built, so every snapshot that exists can be encoded.

use glam::{Vec2, Vec3};
use thiserror::Error;

/// Largest vertex count a single face may have. The PLY list-length prefix
/// is an unsigned 8-bit integer.
pub const MAX_FACE_LEN: usize = u8::MAX as usize;

/// Errors detected while building a [`MeshSnapshot`].
#[derive(Debug, Error)]
pub enum MalformedMesh {
    #[error("attribute '{attribute}' has {got} entries, expected {expected} (one per vertex)")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("face {face} has {len} vertices, a polygon needs at least 3")]
    FaceTooSmall { face: usize, len: usize },

    #[error("face {face} has {len} vertices, face sizes are stored as u8 (max 255)")]
    UnsupportedFaceSize { face: usize, len: usize },
}

/// An immutable, validated mesh ready for export.
///
/// Vertex identity is positional: a face index `i` refers to the `i`-th
/// entry of every attribute array, and the encoder emits vertices in exactly
/// the order held here. Fields are private so a snapshot cannot drift out of
/// its validated state.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSnapshot {
    positions: Vec<Vec3>,
    normals: Option<Vec<Vec3>>,
    texcoords: Option<Vec<Vec2>>,
    colors: Option<Vec<[u8; 3]>>,
    faces: Vec<Vec<u32>>,
}

impl MeshSnapshot {
    /// Build a snapshot from vertex positions and polygon faces.
    ///
    /// Fails if any face has fewer than 3 or more than [`MAX_FACE_LEN`]
    /// vertices, or references a vertex that does not exist.
    pub fn new(positions: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Result<Self, MalformedMesh> {
        let vertex_count = positions.len();

        for (face_idx, face) in faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MalformedMesh::FaceTooSmall {
                    face: face_idx,
                    len: face.len(),
                });
            }
            if face.len() > MAX_FACE_LEN {
                return Err(MalformedMesh::UnsupportedFaceSize {
                    face: face_idx,
                    len: face.len(),
                });
            }
            for &index in face {
                if index as usize >= vertex_count {
                    return Err(MalformedMesh::VertexIndexOutOfRange {
                        face: face_idx,
                        index,
                        vertex_count,
                    });
                }
            }
        }

        Ok(Self {
            positions,
            normals: None,
            texcoords: None,
            colors: None,
            faces,
        })
    }

    /// Attach per-vertex normals. The array must have one entry per vertex.
    pub fn with_normals(mut self, normals: Vec<Vec3>) -> Result<Self, MalformedMesh> {
        self.check_len("normal", normals.len())?;
        self.normals = Some(normals);
        Ok(self)
    }

    /// Attach per-vertex texture coordinates.
    pub fn with_texcoords(mut self, texcoords: Vec<Vec2>) -> Result<Self, MalformedMesh> {
        self.check_len("texcoord", texcoords.len())?;
        self.texcoords = Some(texcoords);
        Ok(self)
    }

    /// Attach per-vertex colors as byte channels in [0, 255].
    pub fn with_colors(mut self, colors: Vec<[u8; 3]>) -> Result<Self, MalformedMesh> {
        self.check_len("color", colors.len())?;
        self.colors = Some(colors);
        Ok(self)
    }

    /// Attach per-vertex colors given as float RGB in [0, 1].
    ///
    /// Channels are converted with [`color_from_f32`], which truncates:
    /// 0.5 maps to 127, not 128.
    pub fn with_colors_f32(self, colors: Vec<Vec3>) -> Result<Self, MalformedMesh> {
        self.with_colors(colors.into_iter().map(color_from_f32).collect())
    }

    fn check_len(&self, attribute: &'static str, got: usize) -> Result<(), MalformedMesh> {
        if got != self.positions.len() {
            return Err(MalformedMesh::AttributeLength {
                attribute,
                expected: self.positions.len(),
                got,
            });
        }
        Ok(())
    }

    /// Number of vertices in the snapshot.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of faces in the snapshot.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Vertex positions, in the order they will be written.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Per-vertex normals, if attached.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Per-vertex texture coordinates, if attached.
    pub fn texcoords(&self) -> Option<&[Vec2]> {
        self.texcoords.as_deref()
    }

    /// Per-vertex colors, if attached.
    pub fn colors(&self) -> Option<&[[u8; 3]]> {
        self.colors.as_deref()
    }

    /// Polygon faces as vertex index lists.
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }
}

/// Convert a float RGB color in [0, 1] to byte channels by truncation.
///
/// `(1.0, 0.5, 0.0)` maps to `[255, 127, 0]`. Values outside [0, 1]
/// saturate at the channel bounds.
pub fn color_from_f32(color: Vec3) -> [u8; 3] {
    [
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    ]
}

/// Encode a scalar vertex weight in [0, 1] as a red-channel color.
pub fn color_from_weight(weight: f32) -> [u8; 3] {
    [(weight * 255.0) as u8, 0, 0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_new_valid_triangle() {
        let mesh = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1, 2]]).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.normals().is_none());
        assert!(mesh.texcoords().is_none());
        assert!(mesh.colors().is_none());
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        let mesh = MeshSnapshot::new(vec![], vec![]).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_face_too_small() {
        let err = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1]]).unwrap_err();
        assert!(matches!(
            err,
            MalformedMesh::FaceTooSmall { face: 0, len: 2 }
        ));
    }

    #[test]
    fn test_vertex_index_out_of_range() {
        // Index equal to the vertex count is the first invalid value
        let err = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1, 3]]).unwrap_err();
        assert!(matches!(
            err,
            MalformedMesh::VertexIndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn test_face_at_max_size() {
        let positions: Vec<Vec3> = (0..255).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let face: Vec<u32> = (0..255).collect();
        let mesh = MeshSnapshot::new(positions, vec![face]).unwrap();
        assert_eq!(mesh.faces()[0].len(), 255);
    }

    #[test]
    fn test_face_over_max_size() {
        let positions: Vec<Vec3> = (0..256).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let face: Vec<u32> = (0..256).collect();
        let err = MeshSnapshot::new(positions, vec![face]).unwrap_err();
        assert!(matches!(
            err,
            MalformedMesh::UnsupportedFaceSize { face: 0, len: 256 }
        ));
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let mesh = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1, 2]]).unwrap();
        let err = mesh
            .with_normals(vec![Vec3::Z, Vec3::Z])
            .unwrap_err();
        assert!(matches!(
            err,
            MalformedMesh::AttributeLength {
                attribute: "normal",
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_attach_all_attributes() {
        let mesh = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1, 2]])
            .unwrap()
            .with_normals(vec![Vec3::Z; 3])
            .unwrap()
            .with_texcoords(vec![Vec2::ZERO; 3])
            .unwrap()
            .with_colors(vec![[255, 0, 0]; 3])
            .unwrap();
        assert_eq!(mesh.normals().unwrap().len(), 3);
        assert_eq!(mesh.texcoords().unwrap().len(), 3);
        assert_eq!(mesh.colors().unwrap().len(), 3);
    }

    #[test]
    fn test_color_truncation() {
        assert_eq!(color_from_f32(Vec3::new(1.0, 0.5, 0.0)), [255, 127, 0]);
    }

    #[test]
    fn test_color_saturation() {
        assert_eq!(color_from_f32(Vec3::new(1.5, -0.2, 0.999)), [255, 0, 254]);
    }

    #[test]
    fn test_color_from_weight() {
        assert_eq!(color_from_weight(0.5), [127, 0, 0]);
        assert_eq!(color_from_weight(1.0), [255, 0, 0]);
    }

    #[test]
    fn test_with_colors_f32_truncates() {
        let mesh = MeshSnapshot::new(triangle_positions(), vec![vec![0, 1, 2]])
            .unwrap()
            .with_colors_f32(vec![Vec3::new(1.0, 0.5, 0.0); 3])
            .unwrap();
        assert_eq!(mesh.colors().unwrap()[0], [255, 127, 0]);
    }
}

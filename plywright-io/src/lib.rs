//! Plywright IO Crate
//!
//! Serializes a [`MeshSnapshot`](plywright_mesh::MeshSnapshot) into the PLY
//! file format, as either binary little-endian or ASCII, preserving the
//! caller's vertex order exactly.

mod writer;

pub use writer::{encode, encode_to_path};

/// The body encoding of a produced PLY file.
///
/// The header is plain text in both cases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlyFormat {
    Ascii,
    BinaryLittleEndian,
}

/// Errors that can occur while encoding.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("face {face} has {len} vertices, face sizes are stored as u8 (max 255)")]
    UnsupportedFaceSize { face: usize, len: usize },
}

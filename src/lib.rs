//! Plywright
//!
//! Vertex-order-preserving PLY export. A caller builds an immutable
//! [`MeshSnapshot`] from its own scene data, then hands it to [`encode`] or
//! [`encode_to_path`] with a [`PlyFormat`]. The data model lives in
//! `plywright-mesh`, the encoder in `plywright-io`; this crate re-exports
//! the public surface of both.

pub use plywright_io::{EncodeError, PlyFormat, encode, encode_to_path};
pub use plywright_mesh::{
    MAX_FACE_LEN, MalformedMesh, MeshSnapshot, color_from_f32, color_from_weight,
};

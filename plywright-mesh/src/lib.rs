//! Plywright Mesh Crate
//!
//! Caller-constructed mesh snapshots for export. This crate is I/O-agnostic
//! and holds only the data model: vertex positions, optional parallel
//! attribute arrays, and polygon faces, validated at construction.

pub mod snapshot;

pub use snapshot::{
    MAX_FACE_LEN, MalformedMesh, MeshSnapshot, color_from_f32, color_from_weight,
};

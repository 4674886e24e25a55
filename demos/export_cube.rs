//! Cube export demo
//!
//! Builds a unit cube snapshot with corner-coordinate vertex colors and
//! writes it in both encodings.
//!
//! Usage:
//!   cargo run --example export_cube -- [output_stem]

use glam::Vec3;
use plywright_io::{PlyFormat, encode_to_path};
use plywright_mesh::{MalformedMesh, MeshSnapshot};

fn cube_mesh() -> Result<MeshSnapshot, MalformedMesh> {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, 1.0, 1.0),
    ];
    let faces = vec![
        vec![0, 3, 2, 1],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];

    // Corner coordinates double as RGB in [0, 1]
    let colors = positions.clone();
    MeshSnapshot::new(positions, faces)?.with_colors_f32(colors)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let stem = std::env::args().nth(1).unwrap_or_else(|| "cube".to_string());
    let mesh = cube_mesh().expect("cube mesh is valid");

    let binary_path = format!("{stem}.ply");
    let ascii_path = format!("{stem}_ascii.ply");

    if let Err(err) = encode_to_path(&mesh, PlyFormat::BinaryLittleEndian, &binary_path) {
        eprintln!("export_cube failed: {err}");
        return;
    }
    if let Err(err) = encode_to_path(&mesh, PlyFormat::Ascii, &ascii_path) {
        eprintln!("export_cube failed: {err}");
        return;
    }

    tracing::info!("Wrote {binary_path} and {ascii_path}");
}

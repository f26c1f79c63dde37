//! Build a small aircraft scene in code and export it in every layout
//!
//! Usage: cargo run --example export_hierarchy -- [output-dir]
//!
//! Writes `embedded.dnm`, `pck_only.dnm`, `exploded.dnm` with its `parts/`
//! directory, and a bare `fuselage.srf`. Then reads `embedded.dnm` back.

use nalgebra::Vector3;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use surfdnm::export::{export_dnm, export_surf, write_export};
use surfdnm::host::{HostFace, HostMaterial, HostMesh, HostNode, HostScene, HostVertex};
use surfdnm::import::import_dnm;
use surfdnm::{DnmLayout, ExportConfig, FileSystemSink};

/// A flat plate with one face on each side
fn plate(width: f64, depth: f64, color: [f64; 3]) -> HostMesh {
    let (w, d) = (width / 2.0, depth / 2.0);
    HostMesh {
        vertices: vec![
            HostVertex::new(-w, -d, 0.0),
            HostVertex::new(w, -d, 0.0),
            HostVertex::new(w, d, 0.0),
            HostVertex::sharp(-w, d, 0.0),
        ],
        faces: vec![
            HostFace::new(vec![0, 1, 2, 3]).with_material(0).smooth(),
            HostFace::new(vec![3, 2, 1, 0]).with_material(1),
        ],
        materials: vec![
            HostMaterial::new("top", color),
            HostMaterial::new("bottom", color).with_emit(1.0).with_alpha(0.8),
        ],
    }
}

fn scene() -> HostScene {
    let mut scene = HostScene::new();
    let fuselage = scene.add(HostNode::mesh("fuselage", plate(1.0, 6.0, [0.8, 0.8, 0.8])));
    let wing = scene
        .add_child(
            fuselage,
            HostNode::mesh("wing", plate(8.0, 1.5, [0.9, 0.1, 0.1]))
                .with_transform(Vector3::new(0.0, 0.5, 0.2), Vector3::zeros()),
        )
        .unwrap_or(fuselage);
    scene.add_child(
        wing,
        HostNode::mesh("aileron", plate(1.5, 0.3, [0.9, 0.1, 0.1])).with_transform(
            Vector3::new(3.0, -0.9, 0.2),
            Vector3::new(0.0, 0.0, 0.1),
        ),
    );
    scene.add(HostNode::empty("camera_target"));
    scene
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("surfdnm_demo"));
    fs::create_dir_all(&out_dir)?;
    let scene = scene();
    let mut sink = FileSystemSink::new(&out_dir);

    for (layout, file) in [
        (DnmLayout::Embedded, "embedded.dnm"),
        (DnmLayout::PckOnly, "pck_only.dnm"),
        (DnmLayout::Exploded, "exploded.dnm"),
    ] {
        let export = export_dnm(&scene, &ExportConfig::dnm().with_layout(layout))?;
        write_export(&export, Path::new(file), &mut sink)?;
        println!("{:?}: {} + {} side file(s)", layout, file, export.parts.len());
    }

    let surf = export_surf(&scene, 0, &ExportConfig::surf())?;
    fs::write(out_dir.join("fuselage.srf"), surf)?;
    println!("SURF: fuselage.srf");

    println!();
    let text = fs::read_to_string(out_dir.join("embedded.dnm"))?;
    for mesh in import_dnm(&text)? {
        println!(
            "Imported {:<10} {} vertices, {} faces, materials: {}",
            mesh.name,
            mesh.mesh.vertices.len(),
            mesh.mesh.faces.len(),
            mesh.mesh
                .materials
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!("\nOutput in {}", out_dir.display());
    Ok(())
}

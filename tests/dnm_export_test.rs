//! End-to-end tests for DNM export layouts and import

use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;
use surfdnm::export::{export_dnm, export_dnm_to_path, write_export};
use surfdnm::host::{HostFace, HostMaterial, HostMesh, HostNode, HostScene, HostVertex};
use surfdnm::import::{import_dnm, import_dnm_streaming};
use surfdnm::{DnmDocument, DnmLayout, ExportConfig, FileSystemSink, NormalMode};
use tempfile::tempdir;

fn box_mesh() -> HostMesh {
    let corners = [
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.0),
        (1.0, 1.0, 0.0),
        (0.0, 1.0, 0.0),
        (0.0, 0.0, 1.0),
        (1.0, 0.0, 1.0),
        (1.0, 1.0, 1.0),
        (0.0, 1.0, 1.0),
    ];
    let faces = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];
    HostMesh {
        vertices: corners
            .iter()
            .map(|&(x, y, z)| HostVertex::new(x, y, z))
            .collect(),
        faces: faces
            .iter()
            .enumerate()
            .map(|(i, f)| HostFace::new(f.to_vec()).with_material(i % 2))
            .collect(),
        materials: vec![
            HostMaterial::new("hull", [0.5, 0.5, 0.5]),
            HostMaterial::new("canopy", [0.2, 0.4, 1.0]).with_alpha(0.5),
        ],
    }
}

/// fuselage at the origin with a wing and a rotated flap under the wing
fn aircraft() -> HostScene {
    let mut scene = HostScene::new();
    let fuselage = scene.add(HostNode::mesh("fuselage", box_mesh()));
    let wing = scene
        .add_child(
            fuselage,
            HostNode::mesh("wing", box_mesh())
                .with_transform(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros()),
        )
        .unwrap();
    scene.add_child(
        wing,
        HostNode::mesh("flap", box_mesh())
            .with_transform(Vector3::new(3.0, 1.0, 0.0), Vector3::new(FRAC_PI_2, 0.0, 0.0)),
    );
    scene.add(HostNode::empty("camera"));
    scene.add(HostNode::mesh("hidden_gear", box_mesh()).hidden());
    scene
}

#[test]
fn test_embedded_export_parses_back() {
    let scene = aircraft();
    let export = export_dnm(&scene, &ExportConfig::dnm()).unwrap();
    let main = export.main.unwrap();

    let document = DnmDocument::from_reader(main.as_bytes()).unwrap();
    assert_eq!(document.version, 1);
    assert!(document.footer);

    let names: Vec<&str> = document.surfaces.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["fuselage.srf", "wing.srf", "flap.srf"]);

    let uids: Vec<u32> = document.nodes.iter().map(|n| n.uid).collect();
    assert_eq!(uids, vec![0, 1, 2]);
    assert_eq!(document.node(0).unwrap().children, vec![1]);
    assert_eq!(document.node(1).unwrap().children, vec![2]);

    // Alternate faces use the translucent material
    let fuselage = &document.surfaces[0];
    assert_eq!(fuselage.materials.len(), 2);
    assert_eq!(fuselage.transparency.len(), 3);
    assert_eq!(fuselage.transparency_of(1), Some(114));
}

#[test]
fn test_node_placement() {
    let scene = aircraft();
    let main = export_dnm(&scene, &ExportConfig::dnm()).unwrap().main.unwrap();
    let document = DnmDocument::from_reader(main.as_bytes()).unwrap();

    // Root at the origin: the computed pivot keeps its decimals
    assert!(main.contains(
        "POS 0.0000 0.0000 0.0000 0 0 0 1\nCNT 0.00000 0.00000 0.00000\n"
    ));
    assert!(main.contains("CNT 0.0000 0.0000 0.0000\nREL DEP\nNCH 0\n"));

    // Parent at the origin: the node's location goes into CNT
    let wing = document.node(1).unwrap();
    assert_eq!(wing.position, Vector3::zeros());
    assert_eq!(wing.center, Vector3::new(-2.0, 0.0, 0.0));

    // Parent away from the origin: offset goes into POS
    let flap = document.node(2).unwrap();
    assert_eq!(flap.position, Vector3::new(-1.0, 0.0, -1.0));
    assert_eq!(flap.center, Vector3::zeros());
    assert_eq!(flap.rotation, [0, 16384, 0]);
}

#[test]
fn test_exploded_export_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("aircraft.dnm");
    let config = ExportConfig::dnm().with_layout(DnmLayout::Exploded);

    let export = export_dnm_to_path(&aircraft(), &config, &path).unwrap();
    assert_eq!(export.parts.len(), 3);

    let main = fs::read_to_string(&path).unwrap();
    assert!(main.contains("FIL parts/wing.srf\n"));
    assert!(!main.contains("PCK"));

    for name in ["fuselage", "wing", "flap"] {
        let part = dir.path().join("parts").join(format!("{}.srf", name));
        let text = fs::read_to_string(&part).unwrap();
        assert!(text.starts_with("SURF\n"), "{} is not a bare SURF", part.display());
    }
}

#[test]
fn test_parts_only_writes_no_main_file() {
    let dir = tempdir().unwrap();
    let config = ExportConfig::dnm().with_layout(DnmLayout::PartsOnly);
    let export = export_dnm(&aircraft(), &config).unwrap();

    let mut sink = FileSystemSink::new(dir.path());
    write_export(&export, Path::new("aircraft.dnm"), &mut sink).unwrap();

    assert!(!dir.path().join("aircraft.dnm").exists());
    assert!(dir.path().join("parts/flap.srf").exists());
}

#[test]
fn test_pck_only_import() {
    let config = ExportConfig::dnm().with_layout(DnmLayout::PckOnly);
    let main = export_dnm(&aircraft(), &config).unwrap().main.unwrap();
    assert!(!main.contains("\nEND\n"));

    let meshes = import_dnm(&main).unwrap();
    assert_eq!(meshes.len(), 3);
}

#[test]
fn test_import_restores_host_geometry() {
    let main = export_dnm(&aircraft(), &ExportConfig::dnm())
        .unwrap()
        .main
        .unwrap();
    let meshes = import_dnm(&main).unwrap();

    let fuselage = &meshes[0];
    assert_eq!(fuselage.name, "fuselage");
    assert_eq!(fuselage.mesh.vertices.len(), 8);

    let original = box_mesh();
    for (imported, source) in fuselage.mesh.vertices.iter().zip(&original.vertices) {
        assert!((imported.position - source.position).norm() < 1e-4);
    }
    for (imported, source) in fuselage.mesh.faces.iter().zip(&original.faces) {
        assert_eq!(imported.vertices, source.vertices);
    }

    assert_eq!(fuselage.mesh.materials[0].name, "fuselage1");
    assert_eq!(fuselage.face_alpha[0], 1.0);
    assert!((fuselage.face_alpha[1] - 0.5).abs() < 1e-9);

    // Winding survives the round trip: the bottom face points down
    assert!(fuselage.face_normals[0].z < -0.99);
}

/// One PCK block followed by an SRF block with the given body lines
fn dnm_with_srf(srf_body: &str) -> String {
    format!(
        "DYNAMODEL\nDNMVER 1\n\
         PCK body.srf 8\nSURF\nV 0 0 0\nV 1 0 0\nV 0 0 1\nF\nV 0 1 2\nE\nE\n\n\
         SRF \"0000\"\nFIL body.srf\n{}END\nEND\n",
        srf_body
    )
}

#[test]
fn test_import_ignores_srf_animation_lines() {
    let text = dnm_with_srf(
        "CLA 0\nNST 0\nPOS 0.0000 0.0000 0.0000 0 0 0 1\nSTA 0 0 0 0 0 0 1\nNCH 0\n",
    );
    assert!(DnmDocument::from_reader(text.as_bytes()).is_err());

    let meshes = import_dnm(&text).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].name, "body");

    let count = import_dnm_streaming(text.as_bytes(), |_| {}).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_import_ignores_dangling_children() {
    let text = dnm_with_srf("NCH 1\nCLD \"0009\"\n");
    assert!(DnmDocument::from_reader(text.as_bytes()).is_err());

    let meshes = import_dnm(&text).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(import_dnm_streaming(text.as_bytes(), |_| {}).unwrap(), 1);

    // count mismatch and duplicate uids are skipped as well
    let mismatch = dnm_with_srf("NCH 3\nCLD \"0000\"\n");
    assert_eq!(import_dnm(&mismatch).unwrap().len(), 1);
    let duplicate = dnm_with_srf("END\nSRF \"0000\"\nFIL body.srf\n");
    assert_eq!(import_dnm(&duplicate).unwrap().len(), 1);
}

#[test]
fn test_streaming_import_matches_batch() {
    let main = export_dnm(&aircraft(), &ExportConfig::dnm())
        .unwrap()
        .main
        .unwrap();
    let batch = import_dnm(&main).unwrap();

    let mut streamed = Vec::new();
    let count = import_dnm_streaming(main.as_bytes(), |mesh| streamed.push(mesh)).unwrap();
    assert_eq!(count, batch.len());
    for (a, b) in streamed.iter().zip(&batch) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.mesh.faces.len(), b.mesh.faces.len());
    }
}

#[test]
fn test_scale_and_two_sided_normals() {
    let config = ExportConfig::dnm()
        .with_scale(2.0)
        .with_normal_mode(NormalMode::TwoSided);
    let main = export_dnm(&aircraft(), &config).unwrap().main.unwrap();
    let document = DnmDocument::from_reader(main.as_bytes()).unwrap();

    let wing = document.node(1).unwrap();
    assert_eq!(wing.center, Vector3::new(-4.0, 0.0, 0.0));
    assert!(
        document.surfaces[0]
            .geometry
            .faces
            .iter()
            .all(|f| f.is_two_sided())
    );
}

//! Conversion between host-editor meshes and wire surfaces
//!
//! [`surface_from_host`] is the export half: it moves a mesh node into engine
//! axes relative to its own origin, decides round vertices, computes medians
//! and normals, interns materials and builds the transparency table.
//! [`host_from_surface`] is the import half and undoes the axis change and the
//! winding reversal.

use log::debug;
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::host::{HostFace, HostMaterial, HostMesh, HostNode, HostVertex, ImportedMesh};
use crate::mesh_ops::{polygon_median_weighted, polygon_normal, vertex_normals};
use crate::model::{
    ExportConfig, Face, GeometryBuffer, Material, MaterialTable, NormalMode, SmoothingPolicy,
    Surface, TransparencyEntry, Vertex,
};
use crate::transform::CoordinateTransform;
use crate::validator::validate_surface;

/// Emission strength given to imported materials that carry the `B` flag
pub const IMPORTED_BRIGHT_EMIT: f64 = 2.0;

/// Decide which vertices of a host mesh are written round (`R`)
///
/// Faces referencing out-of-range vertices are ignored here; the caller
/// reports them.
pub fn round_vertices(mesh: &HostMesh, policy: SmoothingPolicy) -> Vec<bool> {
    let mut touches_smooth_face = vec![false; mesh.vertices.len()];
    for face in mesh.faces.iter().filter(|f| f.smooth) {
        for &i in &face.vertices {
            if let Some(flag) = touches_smooth_face.get_mut(i) {
                *flag = true;
            }
        }
    }

    match policy {
        SmoothingPolicy::AdjacentFace => touches_smooth_face,
        SmoothingPolicy::SmoothEdgesAndFace => mesh
            .vertices
            .iter()
            .zip(touches_smooth_face)
            .map(|(vertex, smooth_face)| vertex.smooth_edges && smooth_face)
            .collect(),
    }
}

/// Build the wire surface for one host mesh node
///
/// Vertices go through `export(scale) * world_matrix`, then the node's
/// location (through the 3x3 part of the export transform) is subtracted, so
/// the block is expressed relative to the node's own origin. Face medians get
/// the same offset. Face indices are written in reverse host order.
///
/// # Errors
///
/// - [`Error::InvalidSurface`] if the node has no mesh or a face is empty
/// - [`Error::Reference`] if a face names a vertex or material slot that does
///   not exist
pub fn surface_from_host(
    node: &HostNode,
    file_name: &str,
    config: &ExportConfig,
) -> Result<Surface> {
    let mesh = node.mesh.as_ref().ok_or_else(|| {
        Error::InvalidSurface(format!("Node '{}' has no mesh data to export", node.name))
    })?;

    let transform = CoordinateTransform::export(config.scale);
    let to_engine = transform.compose(&node.world_matrix);
    let local_axis = transform.transform_vector(&node.location);

    let positions: Vec<Point3<f64>> = mesh
        .vertices
        .iter()
        .map(|v| to_engine.transform_point(&v.position))
        .collect();
    let round = round_vertices(mesh, config.smoothing);

    let mut geometry = GeometryBuffer::with_capacity(mesh.vertices.len(), mesh.faces.len());
    for (position, is_smooth) in positions.iter().zip(&round) {
        geometry.push_vertex(Vertex {
            position: *position - local_axis,
            is_smooth: *is_smooth,
        });
    }

    let mut materials = MaterialTable::new();
    let mut transparency = Vec::new();

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let points = face_positions(node, face_idx, face, &positions)?;

        let host_normal = polygon_normal(&points);
        let normal = match config.normal_mode {
            NormalMode::Flipped => -host_normal,
            NormalMode::Host => host_normal,
            NormalMode::TwoSided => Vector3::zeros(),
        };
        let median = polygon_median_weighted(&points) - local_axis;

        let material = match face.material {
            Some(slot) => {
                let host_material = mesh.materials.get(slot).ok_or_else(|| {
                    Error::Reference(format!(
                        "Node '{}': face {} uses material slot {} but the mesh has {} slot(s)",
                        node.name,
                        face_idx,
                        slot,
                        mesh.materials.len()
                    ))
                })?;
                if host_material.alpha < 1.0 {
                    transparency.push(TransparencyEntry::new(
                        face_idx,
                        TransparencyEntry::level_for_alpha(host_material.alpha),
                    ));
                }
                Some(materials.intern(material_from_host(host_material)))
            }
            None => None,
        };

        geometry.push_face(Face {
            vertices: face.vertices.iter().rev().copied().collect(),
            material,
            median,
            normal,
        });
    }

    debug!(
        "Built surface '{}' from node '{}': {} vertices, {} faces, {} materials, {} transparent",
        file_name,
        node.name,
        geometry.vertices.len(),
        geometry.faces.len(),
        materials.len(),
        transparency.len()
    );

    Ok(Surface {
        name: file_name.to_string(),
        geometry,
        materials,
        transparency,
    })
}

fn face_positions(
    node: &HostNode,
    face_idx: usize,
    face: &HostFace,
    positions: &[Point3<f64>],
) -> Result<Vec<Point3<f64>>> {
    if face.vertices.is_empty() {
        return Err(Error::InvalidSurface(format!(
            "Node '{}': face {} has no vertices",
            node.name, face_idx
        )));
    }
    face.vertices
        .iter()
        .map(|&i| {
            positions.get(i).copied().ok_or_else(|| {
                Error::Reference(format!(
                    "Node '{}': face {} references vertex {} but the mesh has {} vertices",
                    node.name,
                    face_idx,
                    i,
                    positions.len()
                ))
            })
        })
        .collect()
}

fn material_from_host(material: &HostMaterial) -> Material {
    let [r, g, b] = material.diffuse;
    Material::new(r, g, b).with_bright(material.emit > 0.0)
}

/// Rebuild a host mesh from a decoded surface
///
/// Positions go through the inverse axis transform, face winding is reversed
/// back to host order, and a face is smooth if any of its vertices is round.
/// Materials become slots named `<name><k>` in table order (k from 1).
///
/// # Errors
///
/// Returns the validator's error if the surface does not satisfy the model
/// invariants (which a freshly parsed surface always does).
pub fn host_from_surface(surface: &Surface, name: &str, scale: f64) -> Result<ImportedMesh> {
    validate_surface(surface)?;

    let transform = CoordinateTransform::import(scale);
    let geometry = &surface.geometry;

    let vertices: Vec<HostVertex> = geometry
        .vertices
        .iter()
        .map(|v| HostVertex {
            position: transform.transform_point(&v.position),
            smooth_edges: v.is_smooth,
        })
        .collect();

    let faces: Vec<HostFace> = geometry
        .faces
        .iter()
        .map(|face| HostFace {
            vertices: face.vertices.iter().rev().copied().collect(),
            material: face.material.map(|m| m - 1),
            smooth: face.vertices.iter().any(|&i| geometry.vertices[i].is_smooth),
        })
        .collect();

    let materials: Vec<HostMaterial> = surface
        .materials
        .iter()
        .enumerate()
        .map(|(k, material)| HostMaterial {
            name: format!("{}{}", name, k + 1),
            diffuse: material.color,
            emit: if material.bright {
                IMPORTED_BRIGHT_EMIT
            } else {
                0.0
            },
            alpha: 1.0,
        })
        .collect();

    let positions: Vec<Point3<f64>> = vertices.iter().map(|v| v.position).collect();
    let face_normals = faces
        .iter()
        .map(|face| {
            let points: Vec<Point3<f64>> = face.vertices.iter().map(|&i| positions[i]).collect();
            polygon_normal(&points)
        })
        .collect();
    let face_indices: Vec<Vec<usize>> = faces.iter().map(|f| f.vertices.clone()).collect();
    let vertex_normals = vertex_normals(&positions, &face_indices);

    let face_alpha = (0..faces.len())
        .map(|i| {
            surface
                .transparency
                .iter()
                .find(|entry| entry.face == i)
                .map_or(1.0, TransparencyEntry::alpha)
        })
        .collect();

    debug!(
        "Imported mesh '{}': {} vertices, {} faces, {} materials",
        name,
        vertices.len(),
        faces.len(),
        materials.len()
    );

    Ok(ImportedMesh {
        name: name.to_string(),
        mesh: HostMesh {
            vertices,
            faces,
            materials,
        },
        face_normals,
        vertex_normals,
        face_alpha,
    })
}

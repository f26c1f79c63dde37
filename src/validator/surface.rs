//! Surface-level validation: faces, material references, transparency table

use crate::error::{Error, Result};
use crate::model::{MAX_TRANSPARENCY_LEVEL, Surface};

/// Validates that every face is non-empty and every vertex index resolves
pub fn validate_face_indices(surface: &Surface) -> Result<()> {
    let num_vertices = surface.geometry.vertices.len();

    for (face_idx, face) in surface.geometry.faces.iter().enumerate() {
        if face.vertices.is_empty() {
            return Err(Error::InvalidSurface(format!(
                "Surface '{}': face {} has no vertices. \
                 Every F ... E block must contain a V line with at least one index.",
                surface.name, face_idx
            )));
        }

        if let Some(&bad) = face.vertices.iter().find(|&&i| i >= num_vertices) {
            return Err(Error::Reference(format!(
                "Surface '{}': face {} references vertex {} but the surface has {} vertices. \
                 Face indices are 0-based and must be less than the vertex count.",
                surface.name, face_idx, bad, num_vertices
            )));
        }
    }

    Ok(())
}

/// Validates that face materials point into the surface's material table
pub fn validate_material_references(surface: &Surface) -> Result<()> {
    let num_materials = surface.materials.len();

    for (face_idx, face) in surface.geometry.faces.iter().enumerate() {
        let Some(material) = face.material else {
            continue;
        };
        if material == 0 || material > num_materials {
            return Err(Error::Reference(format!(
                "Surface '{}': face {} uses material {} but the table holds {} material(s) \
                 (valid indices: 1-{}).",
                surface.name, face_idx, material, num_materials, num_materials
            )));
        }
    }

    Ok(())
}

/// Validates the `ZA` side table: faces exist, levels in range, one entry per face
pub fn validate_transparency(surface: &Surface) -> Result<()> {
    let num_faces = surface.geometry.faces.len();
    let mut seen = vec![false; num_faces];

    for entry in &surface.transparency {
        if entry.face >= num_faces {
            return Err(Error::Reference(format!(
                "Surface '{}': transparency entry names face {} but the surface has {} faces.",
                surface.name, entry.face, num_faces
            )));
        }
        if entry.level > MAX_TRANSPARENCY_LEVEL {
            return Err(Error::InvalidSurface(format!(
                "Surface '{}': transparency level {} for face {} exceeds {}.",
                surface.name, entry.level, entry.face, MAX_TRANSPARENCY_LEVEL
            )));
        }
        if seen[entry.face] {
            return Err(Error::InvalidSurface(format!(
                "Surface '{}': face {} appears more than once in the transparency table.",
                surface.name, entry.face
            )));
        }
        seen[entry.face] = true;
    }

    Ok(())
}

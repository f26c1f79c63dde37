//! Validation logic for surfaces and DNM documents
//!
//! Writers run these checks before emitting anything, so an invalid model never
//! turns into a file. Validation ensures that:
//! - Every face has at least one vertex and every index resolves
//! - Face material indices point into the surface's material table
//! - Transparency entries name existing faces with levels in 0-228
//! - SRF uids are unique and every child uid is declared

mod scene;
mod surface;

pub use scene::{validate_child_references, validate_node_uids, validate_single_parent};
pub use surface::{validate_face_indices, validate_material_references, validate_transparency};

use crate::error::Result;
use crate::model::{DnmDocument, Surface};

/// Validate a single surface
///
/// Checks, in order:
/// - Face vertex lists are non-empty and in range
/// - Material references resolve
/// - The transparency table is consistent
pub fn validate_surface(surface: &Surface) -> Result<()> {
    validate_face_indices(surface)?;
    validate_material_references(surface)?;
    validate_transparency(surface)?;
    Ok(())
}

/// Validate a whole DNM document: every surface, then the SRF node graph
pub fn validate_document(document: &DnmDocument) -> Result<()> {
    for surface in &document.surfaces {
        validate_surface(surface)?;
    }
    validate_node_uids(&document.nodes)?;
    validate_child_references(&document.nodes)?;
    validate_single_parent(&document.nodes)?;
    Ok(())
}

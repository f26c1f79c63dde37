//! Import entry points
//!
//! Decoded surfaces are turned into [`ImportedMesh`] values in host
//! coordinates. DNM imports produce one mesh per PCK block. SRF blocks are
//! skipped without being checked, so the hierarchy comes back flattened and
//! SRF content this crate does not model (animation states, dangling child
//! uids) does not stop an import.

use log::debug;
use std::io::BufRead;

use crate::convert::host_from_surface;
use crate::error::Result;
use crate::host::ImportedMesh;
use crate::model::Surface;
use crate::parser::parse_surf;
use crate::streaming::{DnmReader, DnmRecord};

/// Scale applied on import; exports at other scales are not reversed
pub const IMPORT_SCALE: f64 = 1.0;

fn mesh_from_surface(surface: &Surface) -> Result<ImportedMesh> {
    host_from_surface(surface, surface.base_name(), IMPORT_SCALE)
}

/// Import a bare SURF file
///
/// `file_name` names the surface; the mesh is named after it without the
/// extension (`wing.srf` gives `wing`).
///
/// ```
/// use surfdnm::import::import_surf;
///
/// let text = "SURF\nV 0 0 0\nV 1 0 0\nV 0 0 1\nF\nC 255 0 0\nB\nV 0 1 2\nE\nE\n";
/// let mesh = import_surf(text, "wing.srf").unwrap();
/// assert_eq!(mesh.name, "wing");
/// assert_eq!(mesh.mesh.faces[0].vertices, vec![2, 1, 0]);
/// assert_eq!(mesh.mesh.materials[0].name, "wing1");
/// assert_eq!(mesh.mesh.materials[0].emit, 2.0);
/// ```
pub fn import_surf(text: &str, file_name: &str) -> Result<ImportedMesh> {
    let surface = parse_surf(text, file_name)?;
    mesh_from_surface(&surface)
}

/// Import every PCK block of a DNM file
pub fn import_dnm(text: &str) -> Result<Vec<ImportedMesh>> {
    let mut meshes = Vec::new();
    import_dnm_streaming(text.as_bytes(), |mesh| meshes.push(mesh))?;
    debug!("Flattened DNM into {} meshes", meshes.len());
    Ok(meshes)
}

/// Import a DNM file block by block
///
/// `on_mesh` is called as soon as each PCK block has been decoded, before
/// the rest of the input is read. Returns the number of meshes delivered.
/// An error stops the import; meshes already delivered stay delivered.
pub fn import_dnm_streaming<R, F>(reader: R, mut on_mesh: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(ImportedMesh),
{
    let mut records = DnmReader::geometry_only(reader);
    records.version()?;

    let mut count = 0;
    for record in &mut records {
        if let DnmRecord::Surface(surface) = record? {
            on_mesh(mesh_from_surface(&surface)?);
            count += 1;
        }
    }
    Ok(count)
}

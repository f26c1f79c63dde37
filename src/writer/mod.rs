//! Text writing for SURF and DNM files
//!
//! This module serializes [`Surface`] and [`DnmDocument`] values back into the
//! line-oriented wire format. Every entry point validates its input first and
//! returns an error instead of producing a file that breaks a model invariant.
//!
//! Numbers are written with fixed precision: coordinates, medians and normals
//! at 5 decimals, colors rounded to integers, rotations and transparency
//! levels as integers.

mod dnm;
mod surf;

use log::debug;
use std::io::Write as IoWrite;

use crate::error::Result;
use crate::model::{DnmDocument, PckShape, SrfNode, Surface};
use crate::validator::{validate_document, validate_surface};

/// Render one surface in the given PCK shape
///
/// ```
/// use surfdnm::model::{Face, PckShape, Surface, Vertex};
/// use surfdnm::writer::surf_to_string;
///
/// let mut surface = Surface::new("dot.srf");
/// surface.geometry.push_vertex(Vertex::new(0.0, 0.0, 0.0));
/// surface.geometry.push_face(Face::new(vec![0]));
///
/// let text = surf_to_string(&surface, PckShape::Embedded).unwrap();
/// assert!(text.starts_with("PCK dot.srf 7\nSURF\n"));
/// ```
pub fn surf_to_string(surface: &Surface, shape: PckShape) -> Result<String> {
    validate_surface(surface)?;
    let body = surf::surface_body(surface);
    debug!(
        "Encoded surface '{}' ({:?}): {} lines",
        surface.name,
        shape,
        body.lines().count()
    );
    Ok(surf::wrap_pck(surface, body, shape))
}

/// Write one surface in the given PCK shape
pub fn write_surf<W: IoWrite>(surface: &Surface, shape: PckShape, mut writer: W) -> Result<()> {
    let text = surf_to_string(surface, shape)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Render one SRF descriptor block
pub fn srf_to_string(node: &SrfNode) -> String {
    dnm::srf_block(node)
}

/// Render a whole DNM document
///
/// Layout: header, every surface as an embedded PCK block, every SRF block,
/// then `END` when the document has a footer.
pub fn dnm_to_string(document: &DnmDocument) -> Result<String> {
    validate_document(document)?;

    let mut out = dnm::header(document.version);
    for surface in &document.surfaces {
        out.push_str(&surf::wrap_pck(
            surface,
            surf::surface_body(surface),
            PckShape::Embedded,
        ));
    }
    for node in &document.nodes {
        out.push_str(&dnm::srf_block(node));
    }
    if document.footer {
        out.push_str("END\n");
    }

    debug!(
        "Encoded DNM: {} PCK blocks, {} SRF blocks",
        document.surfaces.len(),
        document.nodes.len()
    );
    Ok(out)
}

/// Write a whole DNM document
pub fn write_dnm<W: IoWrite>(document: &DnmDocument, mut writer: W) -> Result<()> {
    let text = dnm_to_string(document)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

//! # surfdnm
//!
//! A pure Rust codec for the SURF and DYNAMODEL (DNM) geometry formats used
//! by the YSFlight flight simulator.
//!
//! SURF is a line-oriented text format for one polygon mesh: vertices,
//! faces with inline color and brightness, per-face normal and median, and a
//! transparency side table. DNM wraps several SURF bodies as `PCK` blocks and
//! links them into a hierarchy with `SRF` descriptor blocks.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Parse and write bare SURF files and DNM containers
//! - Streaming DNM reader that yields one block at a time
//! - Export a host scene graph with pre-order uid assignment and four file
//!   layouts (embedded, PCK only, exploded, parts only)
//! - Import SURF and DNM files back into host-coordinate meshes
//!
//! ## Example
//!
//! ```
//! use surfdnm::{DnmDocument, Surface};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "SURF\nV 0 0 0\nV 1 0 0\nV 0 1 0\nF\nC 255 0 0\nV 0 1 2\nE\nE\n";
//! let surface = Surface::from_reader(text.as_bytes())?;
//! println!("{} vertices, {} faces", surface.geometry.vertices.len(), surface.geometry.faces.len());
//!
//! let mut document = DnmDocument::new();
//! let mut part = surface.clone();
//! part.name = "tri.srf".to_string();
//! document.surfaces.push(part);
//! let dnm = document.to_dnm_string()?;
//! assert!(dnm.starts_with("DYNAMODEL\nDNMVER 1\nPCK tri.srf "));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod export;
pub mod host;
pub mod import;
pub mod mesh_ops;
pub mod model;
pub mod output;
pub mod parser;
pub mod scene;
pub mod streaming;
pub mod transform;
pub mod validator;
pub mod writer;

pub use error::{Error, Result};
pub use export::{DnmExport, ExportedFile, export_dnm, export_surf, write_export};
pub use host::{HostFace, HostMaterial, HostMesh, HostNode, HostScene, HostVertex, ImportedMesh};
pub use import::{import_dnm, import_dnm_streaming, import_surf};
pub use model::{
    DnmDocument, DnmLayout, ExportConfig, Face, GeometryBuffer, Material, MaterialTable,
    NormalMode, PckShape, Placement, SmoothingPolicy, SrfNode, Surface, TransparencyEntry, Vertex,
};
pub use output::{FileSystemSink, MemorySink, OutputSink};
pub use scene::{ExportSession, SceneGraphBuilder};

use std::io::Read;
use std::path::Path;

impl Surface {
    /// Parse a bare SURF file from a reader
    ///
    /// The surface gets an empty name; set [`Surface::name`] before
    /// embedding it in a DNM document.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use surfdnm::Surface;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("wing.srf")?;
    /// let surface = Surface::from_reader(file)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_surf_reader(reader, "")
    }

    /// Render as a bare SURF file
    pub fn to_surf_string(&self) -> Result<String> {
        writer::surf_to_string(self, PckShape::Part)
    }

    /// Write a bare SURF file to a path
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_surf_string()?;
        std::fs::write(path, text).map_err(|e| Error::file_io(path, e))
    }
}

impl DnmDocument {
    /// Parse a DYNAMODEL file from a reader
    ///
    /// # Example
    ///
    /// ```no_run
    /// use surfdnm::DnmDocument;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("aircraft.dnm")?;
    /// let document = DnmDocument::from_reader(file)?;
    /// println!("{} PCK blocks", document.surfaces.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        parser::parse_dnm_reader(reader)
    }

    /// Render the whole document
    pub fn to_dnm_string(&self) -> Result<String> {
        writer::dnm_to_string(self)
    }

    /// Write the document to a path
    ///
    /// Side files named by `FIL` are not written; use
    /// [`export::write_export`] for exploded layouts.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_dnm_string()?;
        std::fs::write(path, text).map_err(|e| Error::file_io(path, e))
    }
}

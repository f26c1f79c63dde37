//! Data structures representing SURF surfaces and DNM documents
//!
//! Everything in this module is expressed in the engine's coordinate space,
//! exactly as it appears on the wire. Host-editor data lives in
//! [`crate::host`] and is converted by [`crate::convert`].

mod config;
mod core;
mod dnm;
mod material;

pub use self::config::{DnmLayout, ExportConfig, NormalMode, PckShape, SmoothingPolicy};
pub use self::core::{Face, GeometryBuffer, Surface, TransparencyEntry, Vertex, MAX_TRANSPARENCY_LEVEL};
pub use self::dnm::{DnmDocument, Placement, SrfNode, DNM_VERSION};
pub use self::material::{Material, MaterialTable};

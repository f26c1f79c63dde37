//! DNM container types: SRF scene-graph nodes and the whole document

use nalgebra::Vector3;

use super::core::Surface;

/// Format version written in the `DNMVER` line
pub const DNM_VERSION: u32 = 1;

/// Which of `POS` and `CNT` carries a node's location
///
/// The other one is written as the fixed `0.0000 0.0000 0.0000` literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Zero `POS`, the location is the pivot (`CNT`)
    #[default]
    Pivot,
    /// Offset from the parent in `POS`, zero `CNT`
    Offset,
}

/// One `SRF` descriptor block
///
/// Places a PCK block (by file name) in the scene and links it to its
/// children by uid.
#[derive(Debug, Clone, PartialEq)]
pub struct SrfNode {
    /// Per-export unique id, written zero-padded to four digits
    pub uid: u32,
    /// PCK block or side file this node renders (`FIL`)
    pub file_name: String,
    /// `CLA` value
    pub class: i32,
    /// `NST` value
    pub nest: i32,
    /// Translation part of `POS`
    pub position: Vector3<f64>,
    /// Rotation part of `POS`, in fixed-point angle units
    pub rotation: [i32; 3],
    /// Trailing flag of `POS`
    pub flag: i32,
    /// Pivot point (`CNT`)
    pub center: Vector3<f64>,
    /// Relation tag (`REL`), `DEP` for exported nodes
    pub relation: String,
    /// Uids of direct children (`CLD`)
    pub children: Vec<u32>,
    /// Whether the location was written to `CNT` or to `POS`
    pub placement: Placement,
}

impl SrfNode {
    /// Create a node with the fixed placeholders the exporter writes
    pub fn new(uid: u32, file_name: impl Into<String>) -> Self {
        Self {
            uid,
            file_name: file_name.into(),
            class: 0,
            nest: 0,
            position: Vector3::zeros(),
            rotation: [0; 3],
            flag: 1,
            center: Vector3::zeros(),
            relation: "DEP".to_string(),
            children: Vec::new(),
            placement: Placement::Pivot,
        }
    }
}

/// A parsed or to-be-written DNM file
#[derive(Debug, Clone)]
pub struct DnmDocument {
    /// `DNMVER` value
    pub version: u32,
    /// Embedded PCK blocks, in file order
    pub surfaces: Vec<Surface>,
    /// SRF descriptor blocks, in file order
    pub nodes: Vec<SrfNode>,
    /// Whether the document ends with the `END` footer
    pub footer: bool,
}

impl DnmDocument {
    /// Create an empty document with the current version and a footer
    pub fn new() -> Self {
        Self {
            version: DNM_VERSION,
            surfaces: Vec::new(),
            nodes: Vec::new(),
            footer: true,
        }
    }

    /// Find an embedded surface by its PCK name
    pub fn surface(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    /// Find a node by uid
    pub fn node(&self, uid: u32) -> Option<&SrfNode> {
        self.nodes.iter().find(|n| n.uid == uid)
    }
}

impl Default for DnmDocument {
    fn default() -> Self {
        Self::new()
    }
}
